//! One-shot mode: enhance one prompt, refine it, and optionally score it.

use promptly::{EnhanceError, Presenter, RewriteRequest, Workbench};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Options controlling a one-shot run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShotOptions {
    /// Feedback rewrites to run after the first one.
    pub feedback_rounds: u32,
    /// Whether to score the final rewrite.
    pub evaluate: bool,
}

/// Reads the whole prompt from `reader`.
///
/// # Errors
///
/// Returns [`EnhanceError::Io`] when the reader fails or is not UTF-8.
pub async fn read_prompt<R: AsyncRead + Unpin>(mut reader: R) -> Result<String, EnhanceError> {
    let mut prompt = String::new();
    reader
        .read_to_string(&mut prompt)
        .await
        .map_err(|error| EnhanceError::Io {
            message: format!("failed to read prompt from stdin: {error}"),
        })?;
    Ok(prompt)
}

/// Rewrites `prompt`, runs the feedback rounds, and presents the result.
///
/// # Errors
///
/// Returns the first rewrite or scoring error; nothing is presented for a
/// failed rewrite.
pub async fn run<P: Presenter>(
    workbench: &mut Workbench,
    presenter: &mut P,
    prompt: &str,
    options: OneShotOptions,
) -> Result<(), EnhanceError> {
    let mut rewritten = workbench.rewrite(RewriteRequest::fresh(prompt)).await?;
    for round in 1..=options.feedback_rounds {
        tracing::debug!("running feedback round {round}");
        rewritten = workbench.rewrite(RewriteRequest::feedback()).await?;
    }

    presenter.render(&rewritten)?;

    if options.evaluate {
        let metrics = workbench.score_latest().await?;
        presenter.show_metrics(&metrics)?;
    }

    Ok(())
}
