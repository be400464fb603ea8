//! Session state: tokens, cached profile, durable storage, observation.
//!
//! [`SessionStore`] is the one piece of mutable shared state in the crate.
//! It is constructed explicitly and handed to collaborators; there is no
//! ambient global session.

pub mod backend;
pub mod errors;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};
pub use errors::{StorageError, StorageResult};
pub use store::{Session, SessionStore};
