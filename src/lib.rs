//! Promptly library crate: LLM-backed prompt enhancement and evaluation.
//!
//! A [`PromptRewriter`] turns rough user text into a clearer prompt using a
//! chat model, remembering the last few attempts so a feedback pass can
//! improve on them. A [`PromptScorer`] asks the model to rate a rewrite
//! against its original and tolerates malformed answers by falling back to
//! default metrics. The [`Workbench`] owns the session and runs each chat
//! call on a blocking worker.

pub mod ai;
pub mod config;
pub mod error;
pub mod presenter;
pub mod workbench;

pub use ai::{
    BackendKind, BackendSettings, ChatBackend, ChatMessage, ChatRequest, ChatRole, Evaluation,
    EvaluationMetrics, OllamaChatBackend, OllamaConfig, OpenAiChatBackend, OpenAiConfig,
    PromptRewriter, PromptScorer, RewriteAttempt, RewriteMode, RewriteRequest, RewriteSession,
    build_backend,
};
pub use config::{OperationMode, PromptlyConfig};
pub use error::EnhanceError;
pub use presenter::{Presenter, TerminalPresenter};
pub use workbench::Workbench;
