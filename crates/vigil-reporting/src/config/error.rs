//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding and validating reporting options.
///
/// Any of these aborts the load before environment references are
/// resolved. An unset environment variable is never an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read the configuration source.
    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),

    /// Syntax error or type mismatch while decoding.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    ValidationError { message: String },

    /// Required field missing or empty.
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// File extension not handled by any enabled format.
    #[error("Unsupported or disabled configuration file format: .{0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
