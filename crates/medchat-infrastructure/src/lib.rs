//! Storage and network adapters for the medchat client core.
//!
//! Provides file-backed implementations of the core's persistence traits
//! and the reqwest-backed gateway to the inference backend. Wiring is the
//! embedding application's job:
//!
//! ```ignore
//! use std::sync::Arc;
//! use medchat_core::session::ChatSessionController;
//! use medchat_infrastructure::{FileSessionStore, HttpBackendGateway, JsonConversationStore};
//!
//! let controller = ChatSessionController::init(
//!     Arc::new(HttpBackendGateway::new()),
//!     Arc::new(JsonConversationStore::default_location()?),
//!     Arc::new(FileSessionStore::default_location()?),
//! )
//! .await;
//! ```

pub mod file_session_store;
pub mod http_gateway;
pub mod json_conversation_store;
pub mod paths;

pub use crate::file_session_store::FileSessionStore;
pub use crate::http_gateway::{HttpBackendGateway, DEFAULT_BASE_URL};
pub use crate::json_conversation_store::JsonConversationStore;
pub use crate::paths::{MedchatPaths, PathError};
