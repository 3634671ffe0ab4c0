//! Error types for the serializer crate

use snb_datagen_config::ConfigError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle state of a serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerState {
    Uninitialized,
    Initialized,
    Closed,
}

impl fmt::Display for SerializerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializerState::Uninitialized => write!(f, "uninitialized"),
            SerializerState::Initialized => write!(f, "initialized"),
            SerializerState::Closed => write!(f, "closed"),
        }
    }
}

/// One writer that failed to close
#[derive(Debug)]
pub struct CloseFailure {
    /// Logical writer name, `<kind>_<partition>`
    pub writer: String,
    pub source: std::io::Error,
}

/// Errors that can occur while opening, writing or closing partition writers
#[derive(Debug, Error)]
pub enum SerializerError {
    /// A physical output file could not be created
    #[error("Failed to open output file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be written
    #[error("Failed to write to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every writer was closed, but some of them reported errors
    #[error("Failed to close {} writer(s): {}", .failures.len(), describe_failures(.failures))]
    Close { failures: Vec<CloseFailure> },

    /// Operation not allowed in the serializer's current lifecycle state
    #[error("Cannot {operation} a serializer that is {state}")]
    InvalidState {
        state: SerializerState,
        operation: &'static str,
    },

    /// Sub-partition count must be at least one
    #[error("Invalid number of partitions: {0} (must be at least 1)")]
    InvalidPartitionCount(i64),

    /// `fs.defaultFS` names a filesystem this build cannot write to
    #[error("Unsupported filesystem '{scheme}'. Supported: file:///")]
    UnsupportedFileSystem { scheme: String },

    /// No serializer is registered under the configured name
    #[error("Unknown serializer '{name}'. Supported: {supported}")]
    UnknownSerializer { name: String, supported: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SerializerError {
    pub(crate) fn invalid_state(state: SerializerState, operation: &'static str) -> Self {
        Self::InvalidState { state, operation }
    }
}

fn describe_failures(failures: &[CloseFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.writer, f.source))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for SerializerError
pub type Result<T> = std::result::Result<T, SerializerError>;
