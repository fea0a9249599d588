//! File-backed conversation log store.

use crate::paths::MedchatPaths;
use async_trait::async_trait;
use medchat_core::session::{ConversationStore, Message};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Persists the conversation log as a JSON array in a single file.
///
/// Loading tolerates an absent or corrupt file by returning an empty log;
/// corrupt data is logged and discarded, never surfaced to the user.
/// Saving writes the full serialized log each time (the controller is the
/// only writer, so there is no read-modify-write contention).
pub struct JsonConversationStore {
    path: PathBuf,
}

impl JsonConversationStore {
    /// Creates a store at the default location (`<config>/medchat/messages.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be
    /// determined.
    pub fn default_location() -> Result<Self, crate::paths::PathError> {
        Ok(Self {
            path: MedchatPaths::messages_file()?,
        })
    }

    /// Creates a store writing to `messages.json` under the given directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join("messages.json"),
        }
    }
}

#[async_trait]
impl ConversationStore for JsonConversationStore {
    async fn load(&self) -> Vec<Message> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to read conversation log");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(messages) => messages,
            Err(err) => {
                tracing::warn!(error = %err, "conversation log is corrupt, starting fresh");
                Vec::new()
            }
        }
    }

    async fn save(&self, messages: &[Message]) {
        let serialized = match serde_json::to_vec(messages) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize conversation log");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent).await {
                tracing::warn!(error = %err, "failed to create conversation store directory");
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, serialized).await {
            tracing::warn!(error = %err, path = %self.path.display(), "failed to persist conversation log");
        }
    }

    async fn clear(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to clear conversation log");
            }
        }
    }
}
