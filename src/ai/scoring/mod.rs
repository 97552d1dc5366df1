//! Prompt evaluation: rubric, reply extraction, and the scoring service.

pub mod extraction;
mod metrics;
pub mod prompts;
mod service;

pub use extraction::{ExtractionFailure, JsonExtraction, ParseTier, extract_json};
pub use metrics::{
    DEFAULT_ACTIONABILITY_SCORE, DEFAULT_CLARITY_SCORE, DEFAULT_OVERALL_IMPROVEMENT,
    DEFAULT_SPECIFICITY_SCORE, EvaluationMetrics,
};
pub use service::{Evaluation, PromptScorer, interpret_reply};
