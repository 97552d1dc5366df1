//! Session owner driving rewrites and evaluations off the caller's thread.
//!
//! The [`Workbench`] is the single owner of a [`RewriteSession`]. Chat calls
//! run on blocking workers via [`tasks`]; the session is only mutated here,
//! after a worker hands its result back. Taking `&mut self` on every async
//! operation keeps at most one request in flight.

pub mod tasks;

use std::sync::Arc;

use crate::ai::backend::ChatBackend;
use crate::ai::rewrite::{PromptRewriter, RewriteRequest, RewriteSession};
use crate::ai::scoring::{Evaluation, EvaluationMetrics, PromptScorer};
use crate::error::EnhanceError;

pub use tasks::{spawn_rewrite, spawn_score};

/// Owns the rewrite session and the two services acting on it.
#[derive(Debug, Clone)]
pub struct Workbench {
    rewriter: Arc<PromptRewriter>,
    scorer: Arc<PromptScorer>,
    session: RewriteSession,
}

impl Workbench {
    /// Creates a workbench with an empty session.
    #[must_use]
    pub fn new(rewriter: Arc<PromptRewriter>, scorer: Arc<PromptScorer>) -> Self {
        Self {
            rewriter,
            scorer,
            session: RewriteSession::new(),
        }
    }

    /// Creates a workbench whose services share one backend.
    #[must_use]
    pub fn with_backend(
        backend: &Arc<dyn ChatBackend>,
        model: &str,
        scoring_model: &str,
    ) -> Self {
        Self::new(
            Arc::new(PromptRewriter::new(Arc::clone(backend), model)),
            Arc::new(PromptScorer::new(Arc::clone(backend), scoring_model)),
        )
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &RewriteSession {
        &self.session
    }

    /// Runs one rewrite and records it, returning the rewritten text.
    ///
    /// # Errors
    ///
    /// Returns the rewriter's error; the session is left unchanged.
    pub async fn rewrite(&mut self, request: RewriteRequest) -> Result<String, EnhanceError> {
        let attempt =
            spawn_rewrite(Arc::clone(&self.rewriter), self.session.clone(), request).await?;
        Ok(self.session.record(attempt))
    }

    /// Evaluates `enhanced` against `original`, keeping the parse outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Precondition`] for blank input and
    /// [`EnhanceError::ExternalService`] on transport failure.
    pub async fn evaluate(
        &mut self,
        original: &str,
        enhanced: &str,
    ) -> Result<Evaluation, EnhanceError> {
        spawn_score(
            Arc::clone(&self.scorer),
            original.to_owned(),
            enhanced.to_owned(),
        )
        .await
    }

    /// Scores `enhanced` against `original`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::evaluate`].
    pub async fn score(
        &mut self,
        original: &str,
        enhanced: &str,
    ) -> Result<EvaluationMetrics, EnhanceError> {
        self.evaluate(original, enhanced)
            .await
            .map(Evaluation::into_metrics)
    }

    /// Scores the latest attempt against the session's original prompt.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Precondition`] when nothing has been rewritten
    /// yet, otherwise the errors of [`Self::evaluate`].
    pub async fn score_latest(&mut self) -> Result<EvaluationMetrics, EnhanceError> {
        let (original, latest) = match (
            self.session.original_prompt(),
            self.session.latest_attempt(),
        ) {
            (Some(original), Some(latest)) => (original.to_owned(), latest.to_owned()),
            _ => {
                return Err(EnhanceError::precondition(
                    "Enhance a prompt before requesting an evaluation.",
                ));
            }
        };

        self.score(&original, &latest).await
    }

    /// Forgets the original prompt and every attempt.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}
