//! Blocking-worker handoff for chat calls.
//!
//! Each call runs on exactly one `spawn_blocking` worker; the caller keeps
//! ownership of the session and applies the result once the worker returns.

use std::sync::Arc;

use crate::ai::rewrite::{PromptRewriter, RewriteAttempt, RewriteRequest, RewriteSession};
use crate::ai::scoring::{Evaluation, PromptScorer};
use crate::error::EnhanceError;

/// Runs one rewrite against a snapshot of the session.
///
/// # Errors
///
/// Returns the rewriter's error, or [`EnhanceError::ExternalService`] when
/// the worker panics or is cancelled.
pub async fn spawn_rewrite(
    rewriter: Arc<PromptRewriter>,
    snapshot: RewriteSession,
    request: RewriteRequest,
) -> Result<RewriteAttempt, EnhanceError> {
    tokio::task::spawn_blocking(move || rewriter.rewrite(&snapshot, &request))
        .await
        .map_err(|error| EnhanceError::external(format!("rewrite task failed: {error}")))?
}

/// Runs one evaluation of `enhanced` against `original`.
///
/// # Errors
///
/// Returns the scorer's error, or [`EnhanceError::ExternalService`] when the
/// worker panics or is cancelled.
pub async fn spawn_score(
    scorer: Arc<PromptScorer>,
    original: String,
    enhanced: String,
) -> Result<Evaluation, EnhanceError> {
    tokio::task::spawn_blocking(move || scorer.evaluate(&original, &enhanced))
        .await
        .map_err(|error| EnhanceError::external(format!("scoring task failed: {error}")))?
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{spawn_rewrite, spawn_score};
    use crate::ai::backend::test_support::StubChatBackend;
    use crate::ai::rewrite::{PromptRewriter, RewriteRequest, RewriteSession};
    use crate::ai::scoring::{EvaluationMetrics, PromptScorer};
    use crate::error::EnhanceError;

    #[tokio::test]
    async fn rewrite_runs_on_worker_and_returns_attempt() {
        let backend = Arc::new(StubChatBackend::success("  A sharper prompt.  "));
        let rewriter = Arc::new(PromptRewriter::new(backend.clone(), "phi4:14b"));

        let attempt = spawn_rewrite(
            rewriter,
            RewriteSession::new(),
            RewriteRequest::fresh("make it better"),
        )
        .await
        .expect("rewrite should succeed");

        assert_eq!(attempt.rewritten_text(), "A sharper prompt.");
        assert_eq!(attempt.new_original(), Some("make it better"));
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn score_surfaces_transport_errors() {
        let backend = StubChatBackend::failure(EnhanceError::external("connection refused"));
        let scorer = Arc::new(PromptScorer::new(Arc::new(backend), "phi4:14b"));

        let result = spawn_score(scorer, "a".to_owned(), "b".to_owned()).await;

        assert!(matches!(result, Err(EnhanceError::ExternalService { .. })));
    }

    #[tokio::test]
    async fn score_degrades_to_fallback_on_prose() {
        let backend = StubChatBackend::success("The enhanced prompt is much better.");
        let scorer = Arc::new(PromptScorer::new(Arc::new(backend), "phi4:14b"));

        let evaluation = spawn_score(scorer, "a".to_owned(), "b".to_owned())
            .await
            .expect("prose is not an error");

        assert_eq!(evaluation.into_metrics(), EvaluationMetrics::fallback());
    }
}
