//! Backend HTTP client struct, URL/body building, and response parsing.

use crate::{BackendError, Message};

use super::config::BackendConfig;

/// HTTP client for the chat backend service.
pub struct HttpBackend {
    pub(crate) config: BackendConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn history_url(&self, session_id: &str) -> String {
        format!(
            "{}/api/session/{}/history",
            self.config.base_url, session_id
        )
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.base_url)
    }

    pub(crate) fn clear_url(&self, session_id: &str) -> String {
        format!("{}/api/session/{}/clear", self.config.base_url, session_id)
    }

    /// Build the JSON request body for the chat endpoint.
    pub(crate) fn build_chat_body(&self, session_id: &str, user_message: &str) -> serde_json::Value {
        serde_json::json!({
            "sessionId": session_id,
            "userMessage": user_message,
        })
    }

    /// Parse a `{ "history": [...] }` response body into a transcript.
    pub(crate) fn parse_history(
        &self,
        json: serde_json::Value,
    ) -> Result<Vec<Message>, BackendError> {
        let history = json
            .get("history")
            .cloned()
            .ok_or_else(|| BackendError::Parse("no history in response".to_string()))?;
        serde_json::from_value(history).map_err(|e| BackendError::Parse(e.to_string()))
    }
}
