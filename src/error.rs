//! Error types for taskflow-event

use thiserror::Error;

/// Errors that can occur in the event system
#[derive(Debug, Error)]
pub enum EventError {
    /// Input rejected at the edit boundary (empty title, bad time range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup or update target no longer exists
    #[error("Event not found: {0}")]
    NotFound(i64),

    /// Underlying persistence failure — fatal to the operation, not the process
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store configuration error (paths, directories, file access)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for event operations
pub type Result<T> = std::result::Result<T, EventError>;
