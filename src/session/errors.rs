//! Session storage error types.

use thiserror::Error;

/// Errors raised by durable session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session storage operations
pub type StorageResult<T> = Result<T, StorageError>;
