//! Core error types.

use thiserror::Error;

/// Errors raised while parsing severity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeverityError {
    /// The value does not name a known severity.
    #[error("unknown severity '{0}', expected one of: info, low, medium, high, critical")]
    Unknown(String),

    /// A list entry was empty after trimming.
    #[error("empty severity entry in list '{0}'")]
    EmptyEntry(String),
}

/// Result type for severity parsing.
pub type SeverityResult<T> = Result<T, SeverityError>;
