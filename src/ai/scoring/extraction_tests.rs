//! Unit tests for tiered JSON extraction.

use rstest::rstest;
use serde_json::json;

use super::{
    ExtractionFailure, JsonExtraction, ParseTier, TRAILING_COMMA, balanced_object, extract_json,
    strip_code_fence,
};

const EXAMPLE_JSON: &str = concat!(
    r#"{"metrics":{"clarity_score":80,"specificity_score":70,"actionability_score":60,"#,
    r#""overall_improvement":72.5},"improvement_details":["a"],"suggestions":["b"]}"#
);

fn example_value() -> serde_json::Value {
    serde_json::from_str(EXAMPLE_JSON).expect("example JSON should parse")
}

#[rstest]
#[case::bare(EXAMPLE_JSON.to_owned())]
#[case::prose_before(format!("Here is my evaluation:\n{EXAMPLE_JSON}"))]
#[case::prose_after(format!("{EXAMPLE_JSON}\nLet me know if you need more {{details}}."))]
#[case::prose_both(format!("Sure! {EXAMPLE_JSON} Hope that helps }}"))]
#[case::json_fence(format!("```json\n{EXAMPLE_JSON}\n```"))]
#[case::bare_fence(format!("Result:\n```\n{EXAMPLE_JSON}\n```\nDone."))]
#[case::fenced_example_after_object(format!(
    "{EXAMPLE_JSON}\n\nFor example, try:\n```\nWrite 500 words.\n```\n"
))]
#[case::fenced_example_between_prose(format!(
    "Evaluation below.\n{EXAMPLE_JSON}\nA stronger prompt might read:\n```\nList three risks.\n```"
))]
fn well_formed_object_is_extracted_exactly(#[case] reply: String) {
    assert_eq!(
        extract_json(&reply),
        JsonExtraction::Parsed {
            value: example_value(),
            tier: ParseTier::Strict,
        }
    );
}

#[rstest]
#[case::bare(r#"{"improvement_details":["Wrapped code in ``` fences"]}"#.to_owned())]
#[case::json_fence(
    "```json\n{\"improvement_details\":[\"Wrapped code in ``` fences\"]}\n```".to_owned()
)]
fn fence_marker_inside_string_value_is_preserved(#[case] reply: String) {
    assert_eq!(
        extract_json(&reply),
        JsonExtraction::Parsed {
            value: json!({"improvement_details": ["Wrapped code in ``` fences"]}),
            tier: ParseTier::Strict,
        }
    );
}

#[test]
fn reply_without_brace_falls_back() {
    assert_eq!(
        extract_json("I cannot evaluate these prompts."),
        JsonExtraction::Fallback(ExtractionFailure::NoObject)
    );
}

#[test]
fn unterminated_object_falls_back() {
    assert_eq!(
        extract_json(r#"{"metrics": {"clarity_score": 80}"#),
        JsonExtraction::Fallback(ExtractionFailure::Unbalanced)
    );
}

#[test]
fn unquoted_keys_fall_back_without_panicking() {
    assert_eq!(
        extract_json("Sure! {clarity_score: 80, 'bad': true,}"),
        JsonExtraction::Fallback(ExtractionFailure::Unparseable)
    );
}

#[test]
fn single_quotes_and_trailing_commas_are_repaired() {
    let reply = "Scores: {'metrics': {'clarity_score': 90,}, 'suggestions': ['x', 'y',],}";

    assert_eq!(
        extract_json(reply),
        JsonExtraction::Parsed {
            value: json!({
                "metrics": {"clarity_score": 90},
                "suggestions": ["x", "y"]
            }),
            tier: ParseTier::Repaired,
        }
    );
}

#[rstest]
#[case(",}", "}")]
#[case(", \n ]", "]")]
#[case("{\"a\": 1}", "{\"a\": 1}")]
fn trailing_comma_pattern_drops_comma_before_closer(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(TRAILING_COMMA.replace_all(input, "$1"), expected);
}

#[test]
fn braces_inside_strings_do_not_end_the_object() {
    let reply = r#"{"suggestions": ["use {placeholders} carefully", "close } later"]} trailing"#;

    assert_eq!(
        balanced_object(reply),
        Ok(r#"{"suggestions": ["use {placeholders} carefully", "close } later"]}"#)
    );
}

#[test]
fn escaped_quotes_inside_strings_are_respected() {
    let reply = r#"{"note": "say \"}\" twice"} and more"#;

    assert_eq!(balanced_object(reply), Ok(r#"{"note": "say \"}\" twice"}"#));
}

#[test]
fn non_object_json_is_not_accepted() {
    assert_eq!(
        extract_json("[1, 2, 3]"),
        JsonExtraction::Fallback(ExtractionFailure::NoObject)
    );
}

#[rstest]
#[case("no fence here", "no fence here")]
#[case("```json\n{}\n```", "{}")]
#[case("```\n{\"a\": 1}\n```", "{\"a\": 1}")]
#[case("```json\n{\"a\": 1}", "{\"a\": 1}")]
#[case("```{\"a\": 1}```", "{\"a\": 1}")]
#[case("Reply:\n```json\n{}\n```", "{}")]
#[case("Prose first\n```\nx\n```", "Prose first\n```\nx\n```")]
fn strip_code_fence_returns_block_body(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(strip_code_fence(input), expected);
}
