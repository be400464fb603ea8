//! The single source of truth for authentication state.

use log::debug;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use super::backend::SessionBackend;
use super::errors::StorageResult;
use crate::domain::UserProfile;

/// A snapshot of the authentication state.
///
/// Invariant: `access_token` absent implies `user` absent. The store
/// restores this on load and `clear` maintains it; it may be transiently
/// violated inside a refresh, never in an observed snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Holds the current session, persists every change through a
/// [`SessionBackend`], and publishes snapshots over a watch channel.
///
/// The store is cheap to clone; clones share state. Writers are serialized
/// internally, and every mutation is durable before it becomes observable.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    state: Arc<watch::Sender<Session>>,
    write_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    /// Open a store over `backend`, seeding in-memory state from durable
    /// storage.
    pub async fn open(backend: Arc<dyn SessionBackend>) -> StorageResult<Self> {
        let mut initial = backend.load().await?;
        if initial.access_token.is_none() {
            // No profile without a session.
            initial.user = None;
        }
        let (tx, _rx) = watch::channel(initial);
        Ok(Self {
            backend,
            state: Arc::new(tx),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Non-blocking read of the latest snapshot.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Non-blocking read of the latest access token.
    pub fn current_access_token(&self) -> Option<String> {
        self.state.borrow().access_token.clone()
    }

    /// Non-blocking read of the latest refresh token.
    pub fn current_refresh_token(&self) -> Option<String> {
        self.state.borrow().refresh_token.clone()
    }

    /// Subscribe to session snapshots.
    ///
    /// The receiver immediately holds the most recent snapshot and wakes on
    /// every subsequent change.
    pub fn observe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Atomically replace both tokens, durably, then publish.
    pub async fn save_tokens(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        self.backend.save_tokens(access_token, refresh_token).await?;
        self.state.send_modify(|session| {
            session.access_token = Some(access_token.to_string());
            session.refresh_token = Some(refresh_token.to_string());
        });
        debug!("session tokens updated");
        Ok(())
    }

    /// Replace the cached profile, durably, then publish. On a storage
    /// failure the prior value stays in place, in memory and on disk.
    pub async fn save_profile(&self, profile: UserProfile) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        self.backend.save_profile(&profile).await?;
        self.state.send_modify(|session| {
            session.user = Some(profile);
        });
        Ok(())
    }

    /// Remove all session state. Idempotent.
    pub async fn clear(&self) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        self.backend.clear().await?;
        self.state.send_replace(Session::default());
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::backend::MemoryBackend;

    #[tokio::test]
    async fn test_read_after_write() {
        let store = SessionStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        store.save_tokens("a", "r").await.unwrap();

        let snapshot = store.observe().borrow().clone();
        assert_eq!(snapshot.access_token.as_deref(), Some("a"));
        assert_eq!(snapshot.refresh_token.as_deref(), Some("r"));
        assert_eq!(store.current_access_token().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_clear_twice_leaves_empty_state() {
        let store = SessionStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        store.save_tokens("a", "r").await.unwrap();
        store.clear().await.unwrap();
        let once = store.current();
        store.clear().await.unwrap();
        let twice = store.current();

        assert_eq!(once, Session::default());
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_latest_snapshot() {
        let store = SessionStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        store.save_tokens("a", "r").await.unwrap();

        // Subscribed after the write, still sees it.
        let rx = store.observe();
        assert_eq!(rx.borrow().access_token.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_observer_wakes_on_change() {
        let store = SessionStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        let mut rx = store.observe();

        store.save_tokens("a", "r").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().access_token.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_open_drops_orphan_profile() {
        // A backend holding a profile but no tokens violates the session
        // invariant; the store repairs it on open.
        let backend = Arc::new(MemoryBackend::new());
        backend
            .save_profile(&UserProfile {
                id: "u-1".to_string(),
                email: "a@b.c".to_string(),
                phone: None,
                full_name: None,
                role: crate::domain::UserRole::User,
                team_id: None,
                team_name: None,
                is_active: true,
                is_verified: false,
                is_shared_account: false,
                specialization: None,
                created_at: None,
            })
            .await
            .unwrap();

        let store = SessionStore::open(backend).await.unwrap();
        assert_eq!(store.current().user, None);
    }
}
