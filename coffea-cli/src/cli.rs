//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use coffea_ml::tree::DEFAULT_MAX_DEPTH;
use coffea_ml::FeatureVector;

use crate::logging::LogLevel;

/// Coffee price-level forecaster
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "coffea", version, about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// JSON array of observations to train on instead of the bundled history
    #[arg(long, global = true, env = "COFFEA_HISTORY")]
    pub history: Option<PathBuf>,

    /// Maximum depth of the decision tree
    #[arg(long, global = true, env = "COFFEA_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Forecast the price level for one season
    Predict(PredictArgs),

    /// Print the trained decision tree
    Tree,
}

/// The four observations of the season to forecast.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// Rainfall (mm)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_measurement)]
    pub rainfall: f64,

    /// Mean temperature (°C)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_measurement)]
    pub temperature: f64,

    /// Supply capacity (tonnes)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_measurement)]
    pub supply: f64,

    /// Demand (tonnes)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_measurement)]
    pub demand: f64,
}

impl PredictArgs {
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector::new(self.rainfall, self.temperature, self.supply, self.demand)
    }
}

/// Parse a finite number; `nan`, `inf` and free text are rejected here so the
/// forecaster only ever sees real measurements.
fn parse_measurement(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a number, got {s:?}")),
    }
}
