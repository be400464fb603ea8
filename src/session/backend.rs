//! Durable storage backends for session state.
//!
//! The store treats persistence as an external collaborator behind the
//! [`SessionBackend`] trait. Tokens and the cached profile are persisted
//! independently so a failed profile write never touches the token pair.

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::errors::StorageResult;
use super::store::Session;
use crate::domain::UserProfile;

const TOKENS_FILE: &str = "tokens.json";
const PROFILE_FILE: &str = "profile.json";

/// Durable key-value persistence for session state.
///
/// Contract: every `save_*` call is durable before it returns, and `load`
/// reflects durable state after a restart. A `save_profile` call either
/// fully commits the new value or leaves the prior value intact.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Load the persisted session. Missing pieces come back absent.
    async fn load(&self) -> StorageResult<Session>;

    /// Persist the token pair atomically.
    async fn save_tokens(&self, access_token: &str, refresh_token: &str) -> StorageResult<()>;

    /// Persist the cached profile, replacing any prior value.
    async fn save_profile(&self, profile: &UserProfile) -> StorageResult<()>;

    /// Remove all persisted session state. Idempotent.
    async fn clear(&self) -> StorageResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

/// File-backed session storage under a namespaced directory.
///
/// Tokens and profile live in separate JSON files, each written through a
/// temp-file-then-rename so readers never observe a torn write.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn tokens_path(&self) -> PathBuf {
        self.dir.join(TOKENS_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        // The contents must reach disk before the swap, or a crash could
        // surface a renamed-but-empty file.
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Read and decode a JSON file. A missing file is absent; an unreadable
    /// or undecodable file is treated as absent too, matching how the
    /// original session starts empty rather than refusing to start.
    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("failed to read {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding corrupt session file {}: {e}", path.display());
                None
            }
        }
    }
}

#[async_trait]
impl SessionBackend for FileBackend {
    async fn load(&self) -> StorageResult<Session> {
        let tokens: Option<StoredTokens> = Self::read_json(&self.tokens_path()).await;
        let user: Option<UserProfile> = Self::read_json(&self.profile_path()).await;
        let (access_token, refresh_token) = match tokens {
            Some(t) => (Some(t.access_token), Some(t.refresh_token)),
            None => (None, None),
        };
        Ok(Session {
            access_token,
            refresh_token,
            user,
        })
    }

    async fn save_tokens(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        let stored = StoredTokens {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        let bytes = serde_json::to_vec(&stored)?;
        self.write_atomic(&self.tokens_path(), &bytes).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        // Serialize before touching the file so a bad value cannot clobber
        // the previously stored profile.
        let bytes = serde_json::to_vec(profile)?;
        self.write_atomic(&self.profile_path(), &bytes).await
    }

    async fn clear(&self) -> StorageResult<()> {
        remove_if_present(&self.tokens_path()).await?;
        remove_if_present(&self.profile_path()).await?;
        Ok(())
    }
}

async fn remove_if_present(path: &Path) -> StorageResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// In-memory session storage, primarily for tests.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<&'static str, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionBackend for MemoryBackend {
    async fn load(&self) -> StorageResult<Session> {
        let values = self.values.lock().expect("memory backend lock poisoned");
        let user = values
            .get("profile")
            .and_then(|raw| serde_json::from_str(raw).ok());
        Ok(Session {
            access_token: values.get("access_token").cloned(),
            refresh_token: values.get("refresh_token").cloned(),
            user,
        })
    }

    async fn save_tokens(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        let mut values = self.values.lock().expect("memory backend lock poisoned");
        values.insert("access_token", access_token.to_string());
        values.insert("refresh_token", refresh_token.to_string());
        Ok(())
    }

    async fn save_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        let raw = serde_json::to_string(profile)?;
        let mut values = self.values.lock().expect("memory backend lock poisoned");
        values.insert("profile", raw);
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        let mut values = self.values.lock().expect("memory backend lock poisoned");
        values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn sample_profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            email: "a@b.c".to_string(),
            phone: None,
            full_name: Some("A B".to_string()),
            role: UserRole::Responder,
            team_id: None,
            team_name: None,
            is_active: true,
            is_verified: true,
            is_shared_account: false,
            specialization: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        backend.save_tokens("a", "r").await.unwrap();
        backend.save_profile(&sample_profile()).await.unwrap();

        let session = backend.load().await.unwrap();
        assert_eq!(session.access_token.as_deref(), Some("a"));
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert_eq!(session.user.unwrap().id, "u-1");
    }

    #[tokio::test]
    async fn test_memory_backend_clear_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.save_tokens("a", "r").await.unwrap();
        backend.clear().await.unwrap();
        backend.clear().await.unwrap();

        let session = backend.load().await.unwrap();
        assert_eq!(session.access_token, None);
        assert_eq!(session.user, None);
    }
}
