//! ChatBackend trait implementation for HttpBackend.

use async_trait::async_trait;
use tracing::debug;

use crate::{BackendError, ChatBackend, Message};

use super::client::HttpBackend;

/// Map a non-success status (plus response body) to a `BackendError`.
/// 503 is the backend's throttling signal and gets its own variant.
fn status_error(status: reqwest::StatusCode, body: String) -> BackendError {
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        return BackendError::Overloaded;
    }
    let body = body.chars().take(200).collect::<String>();
    BackendError::Api(format!("HTTP {status}: {body}"))
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>, BackendError> {
        debug!(session = %session_id, "fetching session history");

        let response = self
            .http
            .get(self.history_url(session_id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        self.parse_history(json)
    }

    async fn send_chat(
        &self,
        session_id: &str,
        user_message: &str,
    ) -> Result<Vec<Message>, BackendError> {
        let body = self.build_chat_body(session_id, user_message);

        debug!(session = %session_id, "sending chat message");

        let response = self
            .http
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        self.parse_history(json)
    }

    async fn clear_session(&self, session_id: &str) -> Result<(), BackendError> {
        debug!(session = %session_id, "clearing session");

        let response = self
            .http
            .post(self.clear_url(session_id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        // Response body is ignored.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_status_gets_own_variant() {
        let err = status_error(reqwest::StatusCode::SERVICE_UNAVAILABLE, "busy".into());
        assert!(matches!(err, BackendError::Overloaded));
    }

    #[test]
    fn other_statuses_are_api_errors_with_truncated_body() {
        let long_body = "x".repeat(500);
        let err = status_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, long_body);
        match err {
            BackendError::Api(text) => {
                assert!(text.starts_with("HTTP 500"));
                assert!(text.len() < 300, "body should be truncated");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
