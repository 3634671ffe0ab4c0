//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, reading or querying a [`Configuration`](crate::Configuration)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The override file could not be read
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The override file is not valid property-file syntax
    #[error("Failed to parse config file at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A key the caller requires was never set by a default or an override
    #[error("Missing configuration key: {key}")]
    MissingKey { key: String },

    /// A key is present but its value cannot be coerced to the requested type
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;
