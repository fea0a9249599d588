//! Error types for the medchat client core.

use thiserror::Error;

/// A shared error type for the chat client core.
///
/// Gateway failures carry their distinct kinds for diagnostics, but the
/// controller collapses all of them into a single user-facing condition;
/// nothing in this enum is shown to the end user verbatim.
#[derive(Error, Debug, Clone)]
pub enum ChatError {
    /// Transport-level failure: the request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success HTTP status.
    #[error("Server error: status {status}")]
    Server { status: u16 },

    /// The backend answered, but the body is not the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Local persistence failure (storage layer).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error from an HTTP status code
    pub fn server(status: u16) -> Self {
        Self::Server { status }
    }

    /// Creates a Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a gateway failure (network, server, or protocol).
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::Protocol(_)
        )
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;
