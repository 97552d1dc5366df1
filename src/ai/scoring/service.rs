//! Scoring service comparing an original prompt with its rewrite.

use std::sync::Arc;

use crate::ai::backend::{ChatBackend, ChatRequest};
use crate::error::EnhanceError;

use super::extraction::{ExtractionFailure, JsonExtraction, ParseTier, extract_json};
use super::metrics::EvaluationMetrics;
use super::prompts::{EVALUATION_SYSTEM_PROMPT, evaluation_user_prompt};

/// Interpretation of one scoring reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The reply contained a JSON object; missing fields were defaulted.
    Parsed {
        /// Mapped metrics.
        metrics: EvaluationMetrics,
        /// Extraction tier that recovered the object.
        tier: ParseTier,
    },
    /// Nothing could be parsed; the fallback record is used.
    Fallback {
        /// The fallback record.
        metrics: EvaluationMetrics,
        /// Why extraction failed.
        failure: ExtractionFailure,
    },
}

impl Evaluation {
    /// Metrics to display, whichever branch produced them.
    #[must_use]
    pub const fn metrics(&self) -> &EvaluationMetrics {
        match self {
            Self::Parsed { metrics, .. } | Self::Fallback { metrics, .. } => metrics,
        }
    }

    /// Consumes the evaluation, returning its metrics.
    #[must_use]
    pub fn into_metrics(self) -> EvaluationMetrics {
        match self {
            Self::Parsed { metrics, .. } | Self::Fallback { metrics, .. } => metrics,
        }
    }
}

/// Turns a raw model reply into an [`Evaluation`]. Never fails.
#[must_use]
pub fn interpret_reply(content: &str) -> Evaluation {
    match extract_json(content) {
        JsonExtraction::Parsed { value, tier } => {
            if tier == ParseTier::Repaired {
                tracing::debug!("evaluation reply needed JSON repair");
            }
            Evaluation::Parsed {
                metrics: EvaluationMetrics::from_value(&value),
                tier,
            }
        }
        JsonExtraction::Fallback(failure) => {
            tracing::warn!(
                "falling back to default evaluation metrics: {}",
                failure.describe()
            );
            Evaluation::Fallback {
                metrics: EvaluationMetrics::fallback(),
                failure,
            }
        }
    }
}

/// Builds evaluation requests and interprets the replies.
#[derive(Debug, Clone)]
pub struct PromptScorer {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl PromptScorer {
    /// Creates a scorer that asks `model` on `backend`.
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

    /// Builds the chat request comparing `original` with `enhanced`.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Precondition`] when either text is blank and
    /// [`EnhanceError::Configuration`] if the template fails to render.
    pub fn build_request(&self, original: &str, enhanced: &str) -> Result<ChatRequest, EnhanceError> {
        if original.trim().is_empty() || enhanced.trim().is_empty() {
            return Err(EnhanceError::precondition(
                "Both original and enhanced prompts are required for evaluation.",
            ));
        }

        Ok(ChatRequest::system_and_user(
            self.model.as_str(),
            EVALUATION_SYSTEM_PROMPT,
            evaluation_user_prompt(original, enhanced)?,
        ))
    }

    /// Scores `enhanced` against `original`, reporting the parse tier.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::build_request`], and
    /// [`EnhanceError::ExternalService`] when the backend call fails.
    /// Malformed replies are not errors.
    pub fn evaluate(&self, original: &str, enhanced: &str) -> Result<Evaluation, EnhanceError> {
        let request = self.build_request(original, enhanced)?;
        tracing::debug!("dispatching evaluation to model {}", self.model);

        let reply = self.backend.chat(&request)?;
        Ok(interpret_reply(&reply))
    }

    /// Scores `enhanced` against `original`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::evaluate`].
    pub fn score(&self, original: &str, enhanced: &str) -> Result<EvaluationMetrics, EnhanceError> {
        self.evaluate(original, enhanced)
            .map(Evaluation::into_metrics)
    }
}
