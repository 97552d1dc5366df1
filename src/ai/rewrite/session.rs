//! Bounded rewrite history carried between calls.

use std::collections::VecDeque;

use crate::error::EnhanceError;

use super::model::RewriteAttempt;

/// Number of prior attempts kept as model context.
pub const MAX_ATTEMPT_HISTORY: usize = 3;

/// State shared by consecutive rewrites of one prompt.
///
/// The session is a plain owned value. Rewrites read it and return a
/// [`RewriteAttempt`]; only the owner mutates it, via [`Self::record`].
/// Starting a fresh rewrite replaces the original prompt but keeps earlier
/// attempts as context until [`Self::reset`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteSession {
    original_prompt: Option<String>,
    attempt_history: VecDeque<String>,
}

/// The two texts a feedback rewrite blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackBasis<'a> {
    /// Prompt the user originally asked to enhance.
    pub original_prompt: &'a str,
    /// Most recent rewrite attempt.
    pub last_attempt: &'a str,
}

impl RewriteSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt recorded by the latest successful fresh rewrite.
    #[must_use]
    pub fn original_prompt(&self) -> Option<&str> {
        self.original_prompt.as_deref()
    }

    /// Prior attempts, oldest first.
    pub fn attempts(&self) -> impl ExactSizeIterator<Item = &str> {
        self.attempt_history.iter().map(String::as_str)
    }

    /// Number of attempts currently held.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempt_history.len()
    }

    /// Most recent attempt, if any.
    #[must_use]
    pub fn latest_attempt(&self) -> Option<&str> {
        self.attempt_history.back().map(String::as_str)
    }

    /// Returns the inputs needed for a feedback rewrite.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Precondition`] when no attempt has been
    /// recorded yet, or no original prompt is stored.
    pub fn feedback_basis(&self) -> Result<FeedbackBasis<'_>, EnhanceError> {
        let last_attempt = self.latest_attempt().ok_or_else(|| {
            EnhanceError::precondition("No previous attempts available for feedback.")
        })?;
        let original_prompt = self.original_prompt().ok_or_else(|| {
            EnhanceError::precondition("No original prompt stored for feedback.")
        })?;

        Ok(FeedbackBasis {
            original_prompt,
            last_attempt,
        })
    }

    /// Applies a successful attempt and returns its text.
    ///
    /// Fresh attempts replace the original prompt. The history keeps at
    /// most [`MAX_ATTEMPT_HISTORY`] entries, evicting the oldest.
    pub fn record(&mut self, attempt: RewriteAttempt) -> String {
        let (rewritten_text, new_original) = attempt.into_parts();
        if let Some(original) = new_original {
            self.original_prompt = Some(original);
        }

        self.attempt_history.push_back(rewritten_text.clone());
        while self.attempt_history.len() > MAX_ATTEMPT_HISTORY {
            self.attempt_history.pop_front();
        }

        rewritten_text
    }

    /// Forgets the original prompt and every attempt.
    pub fn reset(&mut self) {
        self.original_prompt = None;
        self.attempt_history.clear();
    }
}
