//! Transport error taxonomy.

use thiserror::Error;

use crate::session::StorageError;

/// Errors surfaced by [`crate::transport::AuthenticatedTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// No usable credentials: missing tokens, or the refresh itself failed.
    /// The session has been cleared; callers should redirect to login.
    #[error("not authenticated")]
    Unauthenticated,

    /// Connectivity failure; the request may never have reached the server
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response from the backend
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A success response whose body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Request body could not be encoded
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Session persistence failed
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TransportError {
    /// Whether the caller should treat this as a logged-out state.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
