//! OpenAI-compatible chat backend (`POST /chat/completions`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;

use super::http::{create_http_client, endpoint_url, post_json, send_and_decode};
use super::{ChatBackend, ChatMessage, ChatRequest};

pub(super) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`OpenAiChatBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    /// Base API URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    /// API key used for bearer authentication; local servers usually
    /// accept requests without one.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenAiConfig {
    /// Constructs configuration with explicit API settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout,
        }
    }
}

/// OpenAI-compatible chat backend.
#[derive(Debug, Clone, Default)]
pub struct OpenAiChatBackend {
    config: OpenAiConfig,
}

impl OpenAiChatBackend {
    /// Creates a backend from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }
}

impl ChatBackend for OpenAiChatBackend {
    fn chat(&self, request: &ChatRequest) -> Result<String, EnhanceError> {
        let endpoint = endpoint_url(&self.config.base_url, "chat/completions");
        let payload = ChatCompletionsRequest {
            model: request.model.as_str(),
            messages: &request.messages,
        };
        tracing::debug!(
            "sending {} messages to OpenAI-compatible model {} at {endpoint}",
            request.messages.len(),
            request.model
        );

        let client = create_http_client(self.config.timeout)?;
        let builder = post_json(&client, endpoint.as_str(), &payload);
        let authorised = match self.config.api_key.as_deref() {
            Some(api_key) => builder.bearer_auth(api_key),
            None => builder,
        };
        let response: ChatCompletionsResponse = send_and_decode(authorised)?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .and_then(parse_content_value)
            .map(ToOwned::to_owned)
            .ok_or_else(|| EnhanceError::external("chat response did not contain assistant text"))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
struct ChatContentPart {
    text: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<ChatContent>,
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts
            .iter()
            .find_map(|part| part.text.as_deref().or(part.content.as_deref())),
    }
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
