//! Client-side chat session core for a medical assistant service.
//!
//! This crate owns conversation state and the request/response protocol
//! of a chat client: optimistic echo of the user's messages, a single
//! in-flight turn at a time, recovery of every backend failure into a
//! visible error turn, and best-effort persistence of identity and
//! history across reloads.
//!
//! It is a UI core, not a UI: the presentation layer renders
//! [`ChatState`](session::ChatState) snapshots and dispatches intents on
//! [`ChatSessionController`](session::ChatSessionController). Storage and
//! network adapters live in `medchat-infrastructure`.

pub mod error;
pub mod session;

// Re-export common error type
pub use error::ChatError;
