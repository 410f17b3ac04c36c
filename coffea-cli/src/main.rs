//! coffea CLI
//!
//! Forecasts the coffee price level (low / medium / high) for one season from
//! rainfall, temperature, supply and demand, using a decision tree trained on
//! the bundled 2015–2023 history or on a history file.
//!
//! # Usage
//!
//! ```bash
//! # Forecast one season
//! coffea predict --rainfall 1800 --temperature 25.3 --supply 2100000 --demand 2080000
//!
//! # Same, trained on another history, as JSON
//! coffea --history seasons.json --json predict --rainfall 1800 --temperature 25.3 \
//!     --supply 2100000 --demand 2080000
//!
//! # Show the trained tree
//! coffea tree
//! ```

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level()) {
        eprintln!("Warning: {e}");
    }

    match commands::run_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
