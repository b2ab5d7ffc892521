//! Error types for fitlog operations.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FitlogError>;

/// Errors produced by the store and the range filter.
#[derive(Error, Debug)]
pub enum FitlogError {
    /// The store has been closed and rejects further operations.
    #[error("database is closed")]
    DatabaseClosed,

    /// A record carried a date string that could not be parsed.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// A caller-supplied value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An explicit record id collided with an existing one.
    #[error("duplicate record id: {0}")]
    DuplicateId(uuid::Uuid),

    /// Snapshot or config data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    SerializationErrorWithContext(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FitlogError {
    /// Build an `InvalidDate` error for a value that failed to parse.
    pub(crate) fn invalid_date(value: &str, reason: impl Into<String>) -> Self {
        FitlogError::InvalidDate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
