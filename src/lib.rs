//! Chat session client for a remote conversational backend.
//!
//! Provides:
//! - `ChatSessionClient`: session identity, transcript state, and the
//!   send/animate/reset workflow
//! - Optimistic sends with rollback to the last authoritative transcript
//! - A cancellable typewriter reveal of assistant replies
//! - Pluggable backend transport (`ChatBackend`) and session-id storage
//!   (`KeyValueStore`) so both can be swapped in tests

pub mod backend;
pub mod session;
pub mod storage;
pub mod typing;

use async_trait::async_trait;

pub use backend::{BackendConfig, HttpBackend};
pub use session::{ChatSessionClient, SendOutcome, Snapshot};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use typing::{Typewriter, TypewriterHandle};

/// Transport to the chat backend service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetch the authoritative transcript for a session.
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>, BackendError>;

    /// Submit a user message. Returns the full authoritative transcript,
    /// including the new assistant reply.
    async fn send_chat(
        &self,
        session_id: &str,
        user_message: &str,
    ) -> Result<Vec<Message>, BackendError>;

    /// Ask the backend to drop its state for a session.
    async fn clear_session(&self, session_id: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend overloaded")]
    Overloaded,
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// User-visible send failure, held in the client's single error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The chat endpoint answered HTTP 503.
    Overloaded,
    /// Any other failed round trip.
    Failed,
}

impl SendError {
    /// The message a UI should display for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            SendError::Overloaded => {
                "The assistant is overloaded right now. Please retry shortly."
            }
            SendError::Failed => "Something went wrong sending your message. Please try again.",
        }
    }
}

impl From<&BackendError> for SendError {
    fn from(err: &BackendError) -> Self {
        match err {
            BackendError::Overloaded => SendError::Overloaded,
            _ => SendError::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wire_shape() {
        let msg = Message::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));

        let msg: Message = serde_json::from_value(serde_json::json!({
            "role": "assistant",
            "content": "hello"
        }))
        .unwrap();
        assert_eq!(msg, Message::assistant("hello"));
    }

    #[test]
    fn send_error_from_backend_error() {
        assert_eq!(
            SendError::from(&BackendError::Overloaded),
            SendError::Overloaded
        );
        assert_eq!(
            SendError::from(&BackendError::Api("HTTP 500".into())),
            SendError::Failed
        );
        assert_eq!(
            SendError::from(&BackendError::Network("connection refused".into())),
            SendError::Failed
        );
        assert_ne!(SendError::Overloaded.message(), SendError::Failed.message());
    }
}
