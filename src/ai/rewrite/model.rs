//! Request and result models for prompt rewriting.

use std::fmt;

/// Rewriting mode requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Enhance a newly supplied prompt.
    Fresh,
    /// Re-attempt the stored prompt after the user rejected the last output.
    Feedback,
}

impl RewriteMode {
    /// Human-readable action label used in UI output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for RewriteMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Input payload for a rewrite call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    mode: RewriteMode,
    input_text: String,
}

impl RewriteRequest {
    /// Construct a request from an explicit mode and text.
    ///
    /// Feedback requests ignore `input_text`; the stored original prompt is
    /// used instead.
    #[must_use]
    pub fn new(mode: RewriteMode, input_text: impl Into<String>) -> Self {
        Self {
            mode,
            input_text: input_text.into(),
        }
    }

    /// Request enhancement of a new prompt.
    #[must_use]
    pub fn fresh(input_text: impl Into<String>) -> Self {
        Self::new(RewriteMode::Fresh, input_text)
    }

    /// Request a feedback-driven re-attempt of the stored prompt.
    #[must_use]
    pub const fn feedback() -> Self {
        Self {
            mode: RewriteMode::Feedback,
            input_text: String::new(),
        }
    }

    /// Requested rewrite mode.
    #[must_use]
    pub const fn mode(&self) -> RewriteMode {
        self.mode
    }

    /// Input text that should be rewritten.
    #[must_use]
    pub const fn input_text(&self) -> &str {
        self.input_text.as_str()
    }
}

/// One successful rewrite, ready to be recorded into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteAttempt {
    rewritten_text: String,
    new_original: Option<String>,
}

impl RewriteAttempt {
    /// Attempt produced from a fresh prompt; recording it replaces the
    /// session's original prompt.
    #[must_use]
    pub fn fresh(original: impl Into<String>, rewritten_text: impl Into<String>) -> Self {
        Self {
            rewritten_text: rewritten_text.into(),
            new_original: Some(original.into()),
        }
    }

    /// Attempt produced in feedback mode; the original prompt is kept.
    #[must_use]
    pub fn feedback(rewritten_text: impl Into<String>) -> Self {
        Self {
            rewritten_text: rewritten_text.into(),
            new_original: None,
        }
    }

    /// Model-produced text.
    #[must_use]
    pub const fn rewritten_text(&self) -> &str {
        self.rewritten_text.as_str()
    }

    /// Original prompt this attempt establishes, if it came from fresh input.
    #[must_use]
    pub fn new_original(&self) -> Option<&str> {
        self.new_original.as_deref()
    }

    pub(super) fn into_parts(self) -> (String, Option<String>) {
        (self.rewritten_text, self.new_original)
    }
}
