//! Persistence traits for session identity and conversation history.
//!
//! These traits decouple the controller from the storage mechanism
//! (files, browser-local storage behind a WASM shim, an in-memory mock).
//! Both stores are deliberately infallible from the caller's point of
//! view: persistence is best-effort, and a missing or corrupt copy
//! degrades to "start fresh" rather than surfacing an error.

use super::message::Message;
use async_trait::async_trait;

/// An abstract store for the durable session identifier.
///
/// # Implementation Notes
///
/// Implementations must swallow persistence failures: when the backing
/// storage is unavailable, `get_or_create` still returns a freshly
/// minted identifier, which simply lives only as long as the process.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the persisted session identifier, minting and persisting
    /// a new one if none exists.
    ///
    /// A previously persisted non-empty identifier is returned unchanged
    /// so the session survives reloads.
    async fn get_or_create(&self) -> String;

    /// Removes the persisted identifier. A subsequent `get_or_create`
    /// call will mint a new one.
    async fn clear(&self);
}

/// An abstract store for the ordered conversation log.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the persisted log.
    ///
    /// Returns an empty sequence when nothing is persisted or the
    /// persisted data is corrupt; corrupt data is discarded, never
    /// surfaced as an error.
    async fn load(&self) -> Vec<Message>;

    /// Persists the full log. Best-effort: failures are logged, not
    /// propagated.
    async fn save(&self, messages: &[Message]);

    /// Removes the persisted log. Best-effort.
    async fn clear(&self);
}
