//! File-backed session identifier store.

use crate::paths::MedchatPaths;
use async_trait::async_trait;
use medchat_core::session::SessionStore;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Stores the session identifier as a single plain-text file.
///
/// All persistence failures are swallowed: when the file cannot be read
/// or written, a freshly minted identifier is still handed out and simply
/// lives only for the current process. Losing durability is recoverable;
/// blocking the chat is not.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at the default location (`<config>/medchat/session_id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be
    /// determined.
    pub fn default_location() -> Result<Self, crate::paths::PathError> {
        Ok(Self {
            path: MedchatPaths::session_id_file()?,
        })
    }

    /// Creates a store writing to `session_id` under the given directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join("session_id"),
        }
    }

    /// Mints a fresh identifier: time-based prefix plus random suffix, so
    /// collisions across sessions are overwhelmingly improbable.
    fn mint_id() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!(
            "session_{}_{}",
            chrono::Utc::now().timestamp_millis(),
            &suffix[..9]
        )
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get_or_create(&self) -> String {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let existing = contents.trim();
                if !existing.is_empty() {
                    return existing.to_string();
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to read session id");
            }
        }

        let fresh = Self::mint_id();
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent).await {
                tracing::warn!(error = %err, "failed to create session store directory");
                return fresh;
            }
        }
        if let Err(err) = fs::write(&self.path, &fresh).await {
            tracing::warn!(error = %err, path = %self.path.display(), "failed to persist session id");
        }
        fresh
    }

    async fn clear(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to clear session id");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identifier_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let first = store.get_or_create().await;
        let second = store.get_or_create().await;

        assert!(first.starts_with("session_"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_identifier_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileSessionStore::new(dir.path()).get_or_create().await;
        let second = FileSessionStore::new(dir.path()).get_or_create().await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clear_forces_a_new_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let before = store.get_or_create().await;
        store.clear().await;
        let after = store.get_or_create().await;

        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_whitespace_only_file_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("session_id"), "  \n")
            .await
            .unwrap();
        let store = FileSessionStore::new(dir.path());

        let id = store.get_or_create().await;
        assert!(id.starts_with("session_"));
    }

    #[tokio::test]
    async fn test_clear_on_missing_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.clear().await;
    }
}
