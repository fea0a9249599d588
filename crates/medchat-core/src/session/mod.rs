//! Session domain module.
//!
//! This module contains the conversation data model, the persistence and
//! gateway interfaces, and the controller that drives them.
//!
//! # Module Structure
//!
//! - `message`: Conversation turn types (`Sender`, `Message`)
//! - `state`: Observable session state (`ChatState`)
//! - `store`: Persistence traits (`SessionStore`, `ConversationStore`)
//! - `gateway`: Backend boundary (`BackendGateway`, `Reply`, `ImageAttachment`)
//! - `controller`: Session lifecycle (`ChatSessionController`)

mod controller;
mod gateway;
mod message;
mod state;
mod store;


// Re-export public API
pub use controller::{
    ChatSessionController, IMAGE_FAILED_BANNER, IMAGE_FAILED_REPLY, SEND_FAILED_BANNER,
    SEND_FAILED_REPLY,
};
pub use gateway::{
    BackendGateway, ImageAttachment, Reply, CONVERSATION_AGENT, IMAGE_ANALYSIS_AGENT, RAG_AGENT,
    WEB_SEARCH_PROCESSOR_AGENT,
};
pub use message::{Message, Sender};
pub use state::ChatState;
pub use store::{ConversationStore, SessionStore};
