//! # Rescue Client
//!
//! A client SDK for an SOS emergency-alert service: authenticate, observe
//! session state, and work with alerts and notifications.
//!
//! ## Architecture
//!
//! The crate is built around three pieces:
//!
//! - [`session::SessionStore`]: the single source of truth for
//!   authentication state. Tokens and the cached profile are persisted
//!   through a pluggable [`session::SessionBackend`] and published as
//!   snapshots over a watch channel.
//! - [`transport::AuthenticatedTransport`]: HTTP dispatch with automatic
//!   bearer-token attachment. A 401 triggers a single-flight token refresh
//!   and at most one replay of the original request; a failed refresh
//!   clears the session and surfaces `Unauthenticated`.
//! - [`wire`] / [`domain`]: loosely-typed wire records and the strict
//!   entities they convert into. Conversions are total: unknown enum tags
//!   fall back to `Unknown` and malformed timestamps degrade to absent.
//!
//! [`api::RescueClient`] ties these together into the operations a UI
//! layer consumes.
//!
//! ## Example
//!
//! ```no_run
//! use rescue_client::{ClientConfig, FileBackend, RescueClient, SessionStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://rescue.example.com", "rescue_prefs");
//!     let session = SessionStore::open(Arc::new(FileBackend::new(&config.data_dir))).await?;
//!     let client = RescueClient::new(&config, session)?;
//!
//!     let user = client.login("user@example.com", "secret").await?;
//!     println!("logged in as {}", user.email);
//!
//!     let alerts = client.alerts(Default::default()).await?;
//!     println!("{} open alerts", alerts.len());
//!     Ok(())
//! }
//! ```

/// Client configuration.
pub mod config;

/// Strict domain entities.
pub mod domain;

/// High-level backend operations.
pub mod api;

/// Session state and durable storage.
pub mod session;

/// Authenticated HTTP transport.
pub mod transport;

/// Wire-format records and conversions.
pub mod wire;

pub use api::{AlertDraft, AlertFilter, RescueClient};
pub use config::{ClientConfig, ConfigError};
pub use domain::{
    Alert, AlertNotification, AlertStatus, AuthTokens, EmergencyType, NotificationType,
    UserProfile, UserRole,
};
pub use session::{FileBackend, MemoryBackend, Session, SessionBackend, SessionStore, StorageError};
pub use transport::{
    ApiRequest, ApiResponse, AuthenticatedTransport, TransportError, TransportResult,
};
