//! Authenticated HTTP transport.

pub mod client;
pub mod errors;

pub use client::{ApiRequest, ApiResponse, AuthenticatedTransport, REQUEST_TIMEOUT};
pub use errors::{TransportError, TransportResult};
