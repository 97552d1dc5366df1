//! LLM-backed prompt enhancement and evaluation.
//!
//! [`rewrite`] turns user text into a clearer prompt, [`scoring`] rates how
//! much a rewrite improved on its original, and [`backend`] provides the
//! chat-completion transports both are built on.

pub mod backend;
pub mod rewrite;
pub mod scoring;

pub use backend::{
    BackendKind, BackendSettings, ChatBackend, ChatMessage, ChatRequest, ChatRole,
    OllamaChatBackend, OllamaConfig, OpenAiChatBackend, OpenAiConfig, build_backend,
};
pub use rewrite::{
    PromptRewriter, RewriteAttempt, RewriteMode, RewriteRequest, RewriteSession,
};
pub use scoring::{Evaluation, EvaluationMetrics, PromptScorer};
