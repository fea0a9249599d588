//! HTTP implementation of the backend gateway.
//!
//! Issues the two multipart requests the inference backend understands
//! (`POST /chat` and `POST /upload`) and normalizes each outcome into a
//! [`Reply`] or one of the three gateway failure kinds. No retries: a
//! failed call surfaces to the controller exactly once.

use async_trait::async_trait;
use medchat_core::error::{ChatError, Result};
use medchat_core::session::{BackendGateway, ImageAttachment, Reply};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

/// Build-time default for the backend base endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Reqwest-backed [`BackendGateway`].
#[derive(Clone)]
pub struct HttpBackendGateway {
    client: Client,
    base_url: String,
}

impl Default for HttpBackendGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackendGateway {
    /// Creates a gateway against the default base endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the base endpoint, for embedding and tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<Reply> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ChatError::network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Body is drained for diagnostics only; the caller sees the
            // status, the user sees a static banner.
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%url, status = status.as_u16(), body = %body, "backend returned error status");
            return Err(ChatError::server(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ChatError::protocol(format!("failed to parse response body: {err}")))?;
        parse_reply(&payload)
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn send_text(&self, session_id: &str, text: &str) -> Result<Reply> {
        let form = Form::new()
            .text("message", text.to_string())
            .text("session_id", session_id.to_string());
        self.post_form("/chat", form).await
    }

    async fn send_image(
        &self,
        session_id: &str,
        text: Option<&str>,
        image: &ImageAttachment,
    ) -> Result<Reply> {
        let part = Part::bytes(image.data.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|err| ChatError::internal(format!("invalid attachment MIME type: {err}")))?;

        let mut form = Form::new()
            .part("file", part)
            .text("session_id", session_id.to_string());
        if let Some(text) = text {
            form = form.text("message", text.to_string());
        }
        self.post_form("/upload", form).await
    }
}

/// Extracts the normalized reply from a response body.
///
/// The `reply` string field is the contract; a body without it is a
/// protocol failure. The `agent` tag is optional.
fn parse_reply(payload: &Value) -> Result<Reply> {
    let text = payload
        .get("reply")
        .and_then(|value| value.as_str())
        .ok_or_else(|| ChatError::protocol("response body missing 'reply' field"))?;
    let agent = payload
        .get("agent")
        .and_then(|value| value.as_str())
        .map(str::to_string);

    Ok(Reply {
        text: text.to_string(),
        agent,
    })
}
