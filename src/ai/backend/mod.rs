//! Chat-completion backends shared by the rewriter and the scorer.
//!
//! Both adapters only need one capability from a model server: send an
//! ordered list of role-tagged messages plus a model identifier and receive
//! the generated text. [`ChatBackend`] captures that contract; the HTTP
//! implementations speak the Ollama native dialect and the
//! OpenAI-compatible dialect.

mod http;
mod ollama;
mod openai;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::error::EnhanceError;

pub use ollama::{OllamaChatBackend, OllamaConfig};
pub use openai::{OpenAiChatBackend, OpenAiConfig};

/// Role attached to each chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instruction framing the model's behaviour.
    System,
    /// Content supplied on behalf of the user.
    User,
}

/// One role-tagged message in a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A complete chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Model identifier understood by the backend.
    pub model: String,
    /// Ordered conversation sent to the model.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Builds the system/user pair used by every adapter in this crate.
    #[must_use]
    pub fn system_and_user(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        }
    }

    /// Returns the content of the first message with `role`, if any.
    #[must_use]
    pub fn content_for(&self, role: ChatRole) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == role)
            .map(|message| message.content.as_str())
    }
}

/// Minimal chat-completion capability.
pub trait ChatBackend: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the assistant text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::ExternalService`] when the transport fails,
    /// the request times out, the server answers with a non-success status,
    /// or the response carries no content field.
    fn chat(&self, request: &ChatRequest) -> Result<String, EnhanceError>;
}

/// Supported backend dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Ollama native `/api/chat`.
    #[default]
    Ollama,
    /// OpenAI-compatible `/chat/completions`.
    OpenAi,
}

impl BackendKind {
    /// Configuration label for this backend.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
        }
    }

    /// Base URL used when none is configured.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Ollama => ollama::DEFAULT_BASE_URL,
            Self::OpenAi => openai::DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Parse error for [`BackendKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported backend '{value}': valid options are 'ollama' or 'openai'")]
pub struct BackendKindParseError {
    value: String,
}

impl FromStr for BackendKind {
    type Err = BackendKindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "openai-compatible" => Ok(Self::OpenAi),
            _ => Err(BackendKindParseError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Connection settings shared by the HTTP backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    /// Which dialect to speak.
    pub kind: BackendKind,
    /// Base URL of the server.
    pub base_url: String,
    /// Bearer key, only sent by the OpenAI-compatible backend.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Builds a boxed backend for `settings`.
#[must_use]
pub fn build_backend(settings: BackendSettings) -> Box<dyn ChatBackend> {
    match settings.kind {
        BackendKind::Ollama => Box::new(OllamaChatBackend::new(OllamaConfig::new(
            settings.base_url,
            settings.timeout,
        ))),
        BackendKind::OpenAi => Box::new(OpenAiChatBackend::new(OpenAiConfig::new(
            settings.base_url,
            settings.api_key,
            settings.timeout,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{BackendKind, BackendSettings, ChatRequest, ChatRole, build_backend};

    #[rstest]
    #[case("ollama", Some(BackendKind::Ollama))]
    #[case("OpenAI", Some(BackendKind::OpenAi))]
    #[case(" openai-compatible ", Some(BackendKind::OpenAi))]
    #[case("llamafile", None)]
    fn parse_backend_kind(#[case] value: &str, #[case] expected: Option<BackendKind>) {
        let parsed = value.parse::<BackendKind>();
        match expected {
            Some(kind) => assert_eq!(parsed.ok(), Some(kind)),
            None => assert!(parsed.is_err(), "expected parse error for {value}"),
        }
    }

    #[test]
    fn system_and_user_orders_messages() {
        let request = ChatRequest::system_and_user("m", "rules", "data");

        let roles: Vec<ChatRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::System, ChatRole::User]);
        assert_eq!(request.content_for(ChatRole::System), Some("rules"));
        assert_eq!(request.content_for(ChatRole::User), Some("data"));
    }

    #[test]
    fn chat_role_serialises_lowercase() {
        let value = serde_json::to_value(ChatRole::System).expect("role should serialise");
        assert_eq!(value, serde_json::json!("system"));
    }

    #[rstest]
    #[case(BackendKind::Ollama, "OllamaChatBackend")]
    #[case(BackendKind::OpenAi, "OpenAiChatBackend")]
    fn build_backend_selects_dialect(#[case] kind: BackendKind, #[case] type_name: &str) {
        let backend = build_backend(BackendSettings {
            kind,
            base_url: kind.default_base_url().to_owned(),
            api_key: None,
            timeout: Duration::from_secs(1),
        });

        assert!(format!("{backend:?}").starts_with(type_name));
    }
}
