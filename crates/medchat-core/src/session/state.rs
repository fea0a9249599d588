//! Observable chat session state.

use super::message::Message;
use serde::{Deserialize, Serialize};

/// Snapshot of the session state the presentation layer renders from.
///
/// The controller owns the live copy; consumers only ever see clones of
/// it, so nothing outside the controller can mutate the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    /// Ordered conversation log, oldest first.
    pub messages: Vec<Message>,
    /// True for the entire duration of an in-flight request.
    pub loading: bool,
    /// Presentation-facing "assistant is composing" flag.
    ///
    /// Currently set for exactly the same window as `loading`; kept
    /// separate so "network busy" and "composing" can diverge later
    /// without changing the rendered contract.
    pub is_typing: bool,
    /// At most one human-readable error banner, cleared at the start of
    /// every new intent.
    pub error: Option<String>,
    /// The backend sub-agent that produced the most recent tagged reply.
    pub current_agent: Option<String>,
}
