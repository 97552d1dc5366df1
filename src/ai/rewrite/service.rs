//! Rewrite service that turns a session and a request into one chat call.

use std::sync::Arc;

use crate::ai::backend::{ChatBackend, ChatRequest};
use crate::error::EnhanceError;

use super::model::{RewriteAttempt, RewriteMode, RewriteRequest};
use super::prompts::{
    FEEDBACK_USER_MESSAGE, enhance_system_prompt, feedback_system_prompt, frame_user_prompt,
};
use super::session::RewriteSession;

/// Builds enhancement requests and sends them to a [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct PromptRewriter {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl PromptRewriter {
    /// Creates a rewriter that asks `model` on `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Model identifier sent with every request.
    #[must_use]
    pub const fn model(&self) -> &str {
        self.model.as_str()
    }

    /// Builds the chat request for `request` against `session`.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Precondition`] for blank fresh input or a
    /// feedback request without history, and
    /// [`EnhanceError::Configuration`] if a template fails to render.
    pub fn build_request(
        &self,
        session: &RewriteSession,
        request: &RewriteRequest,
    ) -> Result<ChatRequest, EnhanceError> {
        match request.mode() {
            RewriteMode::Fresh => {
                if request.input_text().trim().is_empty() {
                    return Err(EnhanceError::precondition(
                        "Please enter a prompt to enhance.",
                    ));
                }
                Ok(ChatRequest::system_and_user(
                    self.model.as_str(),
                    enhance_system_prompt(session)?,
                    frame_user_prompt(request.input_text()),
                ))
            }
            RewriteMode::Feedback => {
                let basis = session.feedback_basis()?;
                Ok(ChatRequest::system_and_user(
                    self.model.as_str(),
                    feedback_system_prompt(basis)?,
                    FEEDBACK_USER_MESSAGE,
                ))
            }
        }
    }

    /// Performs one rewrite without mutating `session`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::build_request`], and
    /// [`EnhanceError::ExternalService`] when the backend fails or answers
    /// with blank text.
    pub fn rewrite(
        &self,
        session: &RewriteSession,
        request: &RewriteRequest,
    ) -> Result<RewriteAttempt, EnhanceError> {
        let chat_request = self.build_request(session, request)?;
        tracing::debug!(
            "dispatching {} rewrite with {} prior attempts",
            request.mode(),
            session.attempt_count()
        );

        let reply = self.backend.chat(&chat_request)?;
        let rewritten = reply.trim();
        if rewritten.is_empty() {
            return Err(EnhanceError::external("model returned an empty rewrite"));
        }

        Ok(match request.mode() {
            RewriteMode::Fresh => RewriteAttempt::fresh(request.input_text(), rewritten),
            RewriteMode::Feedback => RewriteAttempt::feedback(rewritten),
        })
    }

    /// Performs one rewrite and records it into `session` on success.
    ///
    /// # Errors
    ///
    /// Same as [`Self::rewrite`]; on error `session` is left unchanged.
    pub fn rewrite_and_record(
        &self,
        session: &mut RewriteSession,
        request: &RewriteRequest,
    ) -> Result<String, EnhanceError> {
        let attempt = self.rewrite(session, request)?;
        Ok(session.record(attempt))
    }
}
