//! Tiered JSON object extraction from free-text model replies.
//!
//! Models asked for "only JSON" still wrap their answer in code fences or
//! surround it with prose. Extraction runs in tiers and reports which one
//! succeeded:
//!
//! 1. strip a fenced code block when the reply is wrapped in one;
//! 2. locate the first `{` and scan to its balancing `}`, rescanning the
//!    unstripped reply if the fenced body holds no complete object;
//! 3. parse that slice strictly;
//! 4. otherwise repair common defects (single quotes, trailing commas) and
//!    parse the first-`{`-to-last-`}` slice of the repaired text.
//!
//! Anything else is a [`JsonExtraction::Fallback`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

const CODE_FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

#[expect(
    clippy::expect_used,
    reason = "the pattern is a constant; failing to compile it is a programming error"
)]
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern should compile"));

/// Which tier produced a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// The balanced slice parsed as-is.
    Strict,
    /// Parsing only succeeded after the repair pass.
    Repaired,
}

/// Why no object could be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// The reply contains no `{`.
    NoObject,
    /// The first `{` is never balanced.
    Unbalanced,
    /// Neither the strict nor the repaired text parsed as a JSON object.
    Unparseable,
}

impl ExtractionFailure {
    /// Short description used in logs.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NoObject => "reply contains no JSON object",
            Self::Unbalanced => "reply contains an unterminated JSON object",
            Self::Unparseable => "reply JSON could not be parsed or repaired",
        }
    }
}

/// Outcome of [`extract_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum JsonExtraction {
    /// A JSON object was recovered.
    Parsed {
        /// The parsed object.
        value: Value,
        /// Tier that produced it.
        tier: ParseTier,
    },
    /// Nothing usable was found.
    Fallback(ExtractionFailure),
}

/// Extracts the first JSON object from `content`.
#[must_use]
pub fn extract_json(content: &str) -> JsonExtraction {
    let trimmed = content.trim();
    let fenced = strip_code_fence(trimmed);

    let (cleaned, candidate) = match balanced_object(fenced) {
        Ok(candidate) => (fenced, candidate),
        Err(failure) if fenced == trimmed => return JsonExtraction::Fallback(failure),
        Err(_) => match balanced_object(trimmed) {
            Ok(candidate) => (trimmed, candidate),
            Err(failure) => return JsonExtraction::Fallback(failure),
        },
    };

    if let Some(value) = parse_object(candidate) {
        return JsonExtraction::Parsed {
            value,
            tier: ParseTier::Strict,
        };
    }

    repair_and_parse(cleaned).map_or(
        JsonExtraction::Fallback(ExtractionFailure::Unparseable),
        |value| JsonExtraction::Parsed {
            value,
            tier: ParseTier::Repaired,
        },
    )
}

/// Returns the body of the fenced block wrapping `text`, or `text`
/// unchanged.
///
/// Only a reply that opens with a fence, or carries a ```` ```json ````
/// block, counts as wrapped; fences elsewhere in prose are left alone. An
/// info string such as `json` on the opening fence line is skipped. An
/// unterminated fence yields everything after the opening line.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let fence_start = if text.starts_with(CODE_FENCE) {
        0
    } else if let Some(json_fence) = text.find(JSON_FENCE) {
        json_fence
    } else {
        return text;
    };
    let Some(after_fence) = text.get(fence_start + CODE_FENCE.len()..) else {
        return text;
    };

    let body_start = match after_fence.find('\n') {
        Some(newline) if is_info_string(after_fence.get(..newline).unwrap_or_default()) => {
            newline + 1
        }
        _ => 0,
    };
    let body = after_fence.get(body_start..).unwrap_or_default();
    let fenced = body
        .find(CODE_FENCE)
        .and_then(|fence_end| body.get(..fence_end))
        .unwrap_or(body);

    fenced.trim()
}

fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || character == '-' || character == '_')
}

/// Returns the slice from the first `{` to its balancing `}`.
///
/// Braces inside double-quoted string literals do not count.
///
/// # Errors
///
/// Returns [`ExtractionFailure::NoObject`] when there is no `{` and
/// [`ExtractionFailure::Unbalanced`] when the object never closes.
pub fn balanced_object(text: &str) -> Result<&str, ExtractionFailure> {
    let start = text.find('{').ok_or(ExtractionFailure::NoObject)?;
    let tail = text.get(start..).ok_or(ExtractionFailure::NoObject)?;

    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, character) in tail.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == '"' {
                in_string = false;
            }
            continue;
        }

        match character {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return tail
                        .get(..=offset)
                        .ok_or(ExtractionFailure::Unbalanced);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionFailure::Unbalanced)
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}

fn repair_and_parse(text: &str) -> Option<Value> {
    let double_quoted = text.replace('\'', "\"");
    let repaired = TRAILING_COMMA.replace_all(&double_quoted, "$1");

    let start = repaired.find('{')?;
    let end = repaired.rfind('}')?;
    if end < start {
        return None;
    }

    parse_object(repaired.get(start..=end)?)
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
