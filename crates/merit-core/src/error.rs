//! Unified error types for the merit workspace.
//!
//! This module provides a common error type [`MeritError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `MeritError` for uniform error handling at API boundaries.

use thiserror::Error;

/// Unified error type for all merit operations.
#[derive(Error, Debug)]
pub enum MeritError {
    /// I/O errors (payload files, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Payload validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Allocation/solver errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Invariant violations that validation should have prevented
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using MeritError.
pub type MeritResult<T> = Result<T, MeritError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for MeritError {
    fn from(err: anyhow::Error) -> Self {
        MeritError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for MeritError {
    fn from(s: String) -> Self {
        MeritError::Other(s)
    }
}

impl From<&str> for MeritError {
    fn from(s: &str) -> Self {
        MeritError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for MeritError {
    fn from(err: serde_json::Error) -> Self {
        MeritError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeritError::Solver("no feasible allocation".into());
        assert!(err.to_string().contains("Solver error"));
        assert!(err.to_string().contains("no feasible allocation"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MeritError = io_err.into();
        assert!(matches!(err, MeritError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MeritError = json_err.into();
        assert!(matches!(err, MeritError::Parse(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> MeritResult<()> {
            Err(MeritError::Validation("test".into()))
        }

        fn outer() -> MeritResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
