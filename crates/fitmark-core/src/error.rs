//! Error types for fitmark.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! The parse pipeline itself is total and never produces one; errors come
//! from configuration, explicit buffer edits and mention resolution.

use std::io;
use thiserror::Error as ThisError;

/// The core error type for all fitmark operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error (configuration files, catalogs)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Validation error
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// Cursor outside the buffer or inside a multi-byte character
    #[error("Invalid cursor offset {offset} for buffer of {len} bytes")]
    InvalidCursor { offset: usize, len: usize },

    /// Mention resolution failed in transport (distinct from not-found)
    #[error("Resolution error for {entity_type}:{entity_id}: {reason}")]
    ResolutionError {
        entity_type: String,
        entity_id: String,
        reason: String,
    },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(offset: usize, len: usize) -> Self {
        Error::InvalidCursor { offset, len }
    }

    /// Create a resolution error
    pub fn resolution_error(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::ResolutionError {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::invalid_cursor(12, 4);
        assert_eq!(
            err.to_string(),
            "Invalid cursor offset 12 for buffer of 4 bytes"
        );

        let err = Error::resolution_error("exercise", "ex_1", "timeout");
        assert!(err.to_string().contains("exercise:ex_1"));

        let err = Error::config_error("max_candidates must be at least 1");
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: denied");
    }
}
