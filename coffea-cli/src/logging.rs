//! Logging setup for the CLI.
//!
//! Installs a global tracing subscriber writing to stderr, so stdout carries
//! only the forecast. `COFFEA_LOG` (an `EnvFilter` directive) overrides the
//! level picked from `--verbose` / `--quiet`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Environment variable holding a filter directive, e.g. `coffea_ml=debug`.
pub const LOG_ENV: &str = "COFFEA_LOG";

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Progress messages
    Normal,
    /// Split-by-split detail from the learner
    Verbose,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn,coffea=info",
            LogLevel::Verbose => "info,coffea=debug,coffea_ml=debug",
        }
    }
}

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The `COFFEA_LOG` directive could not be parsed.
    #[error("Invalid {LOG_ENV} directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::FromEnvError),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Build the filter for `level`, letting `COFFEA_LOG` take precedence.
pub fn filter(level: LogLevel) -> Result<EnvFilter, LoggingError> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => Ok(EnvFilter::builder()
            .with_env_var(LOG_ENV)
            .from_env()?),
        _ => Ok(EnvFilter::new(level.directive())),
    }
}

/// Initialize tracing to write to stderr.
///
/// Failures are returned so the caller can carry on without logging.
pub fn init(level: LogLevel) -> Result<(), LoggingError> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);

    let subscriber = Registry::default()
        .with(filter(level)?)
        .with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(?level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_directives_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert!(level.directive().parse::<EnvFilter>().is_ok());
        }
    }
}
