//! Backend gateway abstraction.
//!
//! The gateway is the sole network boundary of the client core. It knows
//! exactly two request kinds (a text turn and an image turn) and returns
//! either a normalized reply or a normalized failure; retry policy, if
//! any, belongs to the caller.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Tag for replies produced by the general conversation agent.
pub const CONVERSATION_AGENT: &str = "CONVERSATION_AGENT";
/// Tag for replies grounded in the medical document database.
pub const RAG_AGENT: &str = "RAG_AGENT";
/// Tag for replies produced via live web search.
pub const WEB_SEARCH_PROCESSOR_AGENT: &str = "WEB_SEARCH_PROCESSOR_AGENT";
/// Tag the image pathway always attributes its replies to.
pub const IMAGE_ANALYSIS_AGENT: &str = "IMAGE_ANALYSIS_AGENT";

/// A normalized backend reply to a single turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// The assistant's answer text.
    pub text: String,
    /// The backend sub-agent that produced the answer, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// An image the user attached to a turn.
///
/// Carries the raw bytes for upload plus enough metadata to build the
/// multipart part and a local preview reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    /// Original file name, used for the multipart part and the preview.
    pub file_name: String,
    /// MIME type of the image (e.g. `image/png`).
    pub content_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Returns a locally scoped reference for rendering the attachment
    /// before (and independent of) any backend response.
    pub fn preview_ref(&self) -> String {
        format!("attachment://{}", self.file_name)
    }
}

/// An abstract gateway to the remote inference backend.
///
/// # Implementation Notes
///
/// Both operations are single-attempt: a failure surfaces to the caller
/// exactly once, with no automatic retry. Failure kinds are
/// [`ChatError::Network`](crate::error::ChatError::Network) (no
/// response), [`ChatError::Server`](crate::error::ChatError::Server)
/// (non-success status) and
/// [`ChatError::Protocol`](crate::error::ChatError::Protocol) (response
/// body missing the expected reply field).
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Issues a text turn for the given session.
    async fn send_text(&self, session_id: &str, text: &str) -> Result<Reply>;

    /// Issues an image turn for the given session. `text` is optional
    /// context accompanying the image.
    async fn send_image(
        &self,
        session_id: &str,
        text: Option<&str>,
        image: &ImageAttachment,
    ) -> Result<Reply>;
}
