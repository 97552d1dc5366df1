//! Ollama native chat backend (`POST /api/chat`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;

use super::http::{create_http_client, endpoint_url, post_json, send_and_decode};
use super::{ChatBackend, ChatMessage, ChatRequest};

pub(super) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`OllamaChatBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Server base URL (e.g., `http://127.0.0.1:11434`).
    pub base_url: String,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OllamaConfig {
    /// Constructs configuration for a specific server.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// Chat backend talking to a local Ollama server.
#[derive(Debug, Clone, Default)]
pub struct OllamaChatBackend {
    config: OllamaConfig,
}

impl OllamaChatBackend {
    /// Creates a backend from explicit configuration.
    #[must_use]
    pub const fn new(config: OllamaConfig) -> Self {
        Self { config }
    }
}

impl ChatBackend for OllamaChatBackend {
    fn chat(&self, request: &ChatRequest) -> Result<String, EnhanceError> {
        let endpoint = endpoint_url(&self.config.base_url, "api/chat");
        let payload = OllamaChatPayload {
            model: request.model.as_str(),
            messages: &request.messages,
            stream: false,
        };
        tracing::debug!(
            "sending {} messages to Ollama model {} at {endpoint}",
            request.messages.len(),
            request.model
        );

        let client = create_http_client(self.config.timeout)?;
        let response: OllamaChatResponse =
            send_and_decode(post_json(&client, endpoint.as_str(), &payload))?;

        response
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| EnhanceError::external("Ollama response did not contain message content"))
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{OllamaChatBackend, OllamaChatPayload, OllamaChatResponse};
    use crate::ai::backend::ChatMessage;

    #[test]
    fn payload_disables_streaming() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let payload = OllamaChatPayload {
            model: "phi4:14b",
            messages: &messages,
            stream: false,
        };

        let value = serde_json::to_value(&payload).expect("payload should serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "model": "phi4:14b",
                "messages": [
                    {"role": "system", "content": "s"},
                    {"role": "user", "content": "u"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn response_without_message_decodes_to_none() {
        let response: OllamaChatResponse =
            serde_json::from_value(serde_json::json!({"done": true}))
                .expect("response should decode");

        assert!(response.message.is_none());
    }

    #[test]
    fn default_backend_targets_local_server() {
        let backend = OllamaChatBackend::default();
        assert!(format!("{backend:?}").contains("127.0.0.1:11434"));
    }
}
