//! Evaluation metrics record and its tolerant field mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clarity score used when the model omits or garbles it.
pub const DEFAULT_CLARITY_SCORE: f64 = 75.0;
/// Specificity score used when the model omits or garbles it.
pub const DEFAULT_SPECIFICITY_SCORE: f64 = 70.0;
/// Actionability score used when the model omits or garbles it.
pub const DEFAULT_ACTIONABILITY_SCORE: f64 = 65.0;
/// Overall improvement used when the model omits or garbles it.
pub const DEFAULT_OVERALL_IMPROVEMENT: f64 = 70.0;

const DEFAULT_IMPROVEMENT_DETAIL: &str = "Enhanced prompt structure and clarity";
const DEFAULT_SUGGESTION: &str = "Consider adding more specific constraints";

const FALLBACK_IMPROVEMENT_DETAILS: [&str; 2] = [
    "Unable to analyze specific improvements due to evaluation error",
    "Recommend manual review of prompt changes",
];
const FALLBACK_SUGGESTIONS: [&str; 2] = [
    "Ensure prompts are well-structured and specific",
    "Consider adding examples or constraints to improve clarity",
];

/// Scores and notes describing how much a rewrite improved its original.
///
/// `overall_improvement` is taken verbatim from the model; it is never
/// recomputed from the sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Clarity, 0–100.
    pub clarity_score: f64,
    /// Specificity, 0–100.
    pub specificity_score: f64,
    /// Actionability, 0–100.
    pub actionability_score: f64,
    /// Overall improvement, 0–100.
    pub overall_improvement: f64,
    /// Improvements the rewrite made.
    pub improvement_details: Vec<String>,
    /// Further suggestions.
    pub suggestions: Vec<String>,
}

impl EvaluationMetrics {
    /// Record shown when the reply could not be parsed at all.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            clarity_score: DEFAULT_CLARITY_SCORE,
            specificity_score: DEFAULT_SPECIFICITY_SCORE,
            actionability_score: DEFAULT_ACTIONABILITY_SCORE,
            overall_improvement: DEFAULT_OVERALL_IMPROVEMENT,
            improvement_details: FALLBACK_IMPROVEMENT_DETAILS
                .iter()
                .map(|detail| (*detail).to_owned())
                .collect(),
            suggestions: FALLBACK_SUGGESTIONS
                .iter()
                .map(|suggestion| (*suggestion).to_owned())
                .collect(),
        }
    }

    /// Maps a parsed reply object onto the record, defaulting per field.
    ///
    /// Scores are read from the `metrics` object, or from the top level when
    /// a model flattens them.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let scores = value
            .get("metrics")
            .filter(|metrics| metrics.is_object())
            .unwrap_or(value);

        Self {
            clarity_score: coerce_score(scores.get("clarity_score"), DEFAULT_CLARITY_SCORE),
            specificity_score: coerce_score(
                scores.get("specificity_score"),
                DEFAULT_SPECIFICITY_SCORE,
            ),
            actionability_score: coerce_score(
                scores.get("actionability_score"),
                DEFAULT_ACTIONABILITY_SCORE,
            ),
            overall_improvement: coerce_score(
                scores.get("overall_improvement"),
                DEFAULT_OVERALL_IMPROVEMENT,
            ),
            improvement_details: coerce_list(
                value.get("improvement_details"),
                DEFAULT_IMPROVEMENT_DETAIL,
            ),
            suggestions: coerce_list(value.get("suggestions"), DEFAULT_SUGGESTION),
        }
    }
}

fn coerce_score(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|score| score.is_finite()).unwrap_or(default)
}

fn coerce_list(value: Option<&Value>, default: &str) -> Vec<String> {
    match value {
        None | Some(Value::Null) => vec![default.to_owned()],
        Some(Value::Array(items)) => items.iter().map(value_as_text).collect(),
        Some(other) => vec![value_as_text(other)],
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{
        DEFAULT_ACTIONABILITY_SCORE, DEFAULT_CLARITY_SCORE, DEFAULT_OVERALL_IMPROVEMENT,
        DEFAULT_SPECIFICITY_SCORE, EvaluationMetrics, coerce_score,
    };

    #[test]
    fn complete_object_maps_verbatim() {
        let metrics = EvaluationMetrics::from_value(&json!({
            "metrics": {
                "clarity_score": 80,
                "specificity_score": 70,
                "actionability_score": 60,
                "overall_improvement": 72.5
            },
            "improvement_details": ["a"],
            "suggestions": ["b"]
        }));

        assert_eq!(
            metrics,
            EvaluationMetrics {
                clarity_score: 80.0,
                specificity_score: 70.0,
                actionability_score: 60.0,
                overall_improvement: 72.5,
                improvement_details: vec!["a".to_owned()],
                suggestions: vec!["b".to_owned()],
            }
        );
    }

    #[test]
    fn missing_fields_use_per_field_defaults() {
        let metrics = EvaluationMetrics::from_value(&json!({"metrics": {"clarity_score": 91}}));

        assert_eq!(metrics.clarity_score, 91.0);
        assert_eq!(metrics.specificity_score, DEFAULT_SPECIFICITY_SCORE);
        assert_eq!(metrics.actionability_score, DEFAULT_ACTIONABILITY_SCORE);
        assert_eq!(metrics.overall_improvement, DEFAULT_OVERALL_IMPROVEMENT);
        assert_eq!(metrics.improvement_details.len(), 1);
        assert_eq!(metrics.suggestions.len(), 1);
    }

    #[test]
    fn flattened_scores_are_accepted() {
        let metrics = EvaluationMetrics::from_value(&json!({
            "clarity_score": 55,
            "overall_improvement": "61.5"
        }));

        assert_eq!(metrics.clarity_score, 55.0);
        assert_eq!(metrics.overall_improvement, 61.5);
    }

    #[rstest]
    #[case::integer(json!(80), 80.0)]
    #[case::float(json!(72.5), 72.5)]
    #[case::numeric_string(json!(" 64 "), 64.0)]
    #[case::word(json!("high"), DEFAULT_CLARITY_SCORE)]
    #[case::boolean(json!(true), DEFAULT_CLARITY_SCORE)]
    #[case::null(Value::Null, DEFAULT_CLARITY_SCORE)]
    #[case::non_finite(json!("NaN"), DEFAULT_CLARITY_SCORE)]
    fn scores_are_coerced_to_finite_numbers(#[case] raw: Value, #[case] expected: f64) {
        assert_eq!(coerce_score(Some(&raw), DEFAULT_CLARITY_SCORE), expected);
    }

    #[test]
    fn scalar_lists_are_wrapped() {
        let metrics = EvaluationMetrics::from_value(&json!({
            "improvement_details": "Added a word limit",
            "suggestions": [1, "two"]
        }));

        assert_eq!(metrics.improvement_details, vec!["Added a word limit"]);
        assert_eq!(metrics.suggestions, vec!["1", "two"]);
    }

    #[test]
    fn fallback_uses_documented_defaults() {
        let metrics = EvaluationMetrics::fallback();

        assert_eq!(metrics.clarity_score, DEFAULT_CLARITY_SCORE);
        assert_eq!(metrics.specificity_score, DEFAULT_SPECIFICITY_SCORE);
        assert_eq!(metrics.actionability_score, DEFAULT_ACTIONABILITY_SCORE);
        assert_eq!(metrics.overall_improvement, DEFAULT_OVERALL_IMPROVEMENT);
        assert_eq!(metrics.improvement_details.len(), 2);
        assert_eq!(metrics.suggestions.len(), 2);
    }
}
