//! Conversation message types.
//!
//! This module contains types for representing turns in a conversation,
//! including the sender role and optional image/agent metadata.

use serde::{Deserialize, Serialize};

/// Represents the originator of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message from the user.
    User,
    /// Message from the assistant backend.
    Assistant,
}

/// A single turn in the conversation log.
///
/// Messages are append-only: once a message is added to the log it is
/// never mutated or removed. The only destructive operation is wiping the
/// entire log when a new chat is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Controller-assigned identifier, strictly increasing within a session.
    pub id: u64,
    /// Message body. May be empty only when `has_image` is true.
    pub text: String,
    /// Who produced the message.
    pub sender: Sender,
    /// Creation instant (ISO 8601 / RFC 3339 format).
    ///
    /// The presentation layer uses this to decide whether a message is
    /// fresh enough to animate; the core only stamps it.
    pub timestamp: String,
    /// Local preview reference for an attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the message carries an image attachment.
    #[serde(default)]
    pub has_image: bool,
    /// True only for synthetic assistant messages representing a
    /// recovered failure.
    #[serde(default)]
    pub is_error: bool,
    /// Backend sub-agent that produced an assistant reply, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl Message {
    /// Creates a plain user message stamped with the current time.
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: chrono::Utc::now().to_rfc3339(),
            image: None,
            has_image: false,
            is_error: false,
            agent: None,
        }
    }

    /// Creates a user message carrying an image attachment.
    ///
    /// `preview` is a locally scoped reference used by the presentation
    /// layer; it is unrelated to anything the backend later returns.
    pub fn user_with_image(id: u64, text: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: chrono::Utc::now().to_rfc3339(),
            image: Some(preview.into()),
            has_image: true,
            is_error: false,
            agent: None,
        }
    }

    /// Creates an assistant reply message, optionally tagged with the
    /// sub-agent that produced it.
    pub fn assistant(id: u64, text: impl Into<String>, agent: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: chrono::Utc::now().to_rfc3339(),
            image: None,
            has_image: false,
            is_error: false,
            agent,
        }
    }

    /// Creates a synthetic assistant message representing a recovered
    /// failure.
    pub fn assistant_error(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: chrono::Utc::now().to_rfc3339(),
            image: None,
            has_image: false,
            is_error: true,
            agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip_preserves_all_fields() {
        let messages = vec![
            Message::user(1, "What are the symptoms of diabetes?"),
            Message::assistant(2, "Common symptoms include...", Some("RAG_AGENT".to_string())),
            Message::user_with_image(3, "", "attachment://scan.png"),
            Message::assistant_error(4, "Sorry, something went wrong."),
        ];

        let json = serde_json::to_string(&messages).unwrap();
        let restored: Vec<Message> = serde_json::from_str(&json).unwrap();

        assert_eq!(messages, restored);
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        // A minimal persisted message from an older log.
        let json = r#"{"id":7,"text":"hi","sender":"user","timestamp":"2024-01-01T00:00:00Z"}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        assert_eq!(message.sender, Sender::User);
        assert!(message.image.is_none());
        assert!(!message.has_image);
        assert!(!message.is_error);
        assert!(message.agent.is_none());
    }
}
