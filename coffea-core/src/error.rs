//! Structured error types for the coffea crates.

use thiserror::Error;

/// Unified error type for all coffea operations.
#[derive(Debug, Error)]
pub enum CoffeaError {
    /// Invalid argument (empty dataset, record missing a requested feature)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value on the prediction path is missing or not numeric
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Parse error (malformed history file, unknown feature or label name)
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the coffea crates.
pub type Result<T> = std::result::Result<T, CoffeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_prefix() {
        let err = CoffeaError::TypeMismatch("cannot compare a non-numeric value".into());
        assert_eq!(
            err.to_string(),
            "type mismatch: cannot compare a non-numeric value"
        );
        let err = CoffeaError::InvalidArgument("empty dataset".into());
        assert_eq!(err.to_string(), "invalid argument: empty dataset");
    }

    #[test]
    fn io_converts() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(CoffeaError::Io(_))));
    }
}
