//! Output surface for rewrites, evaluations and errors.
//!
//! Presenters hold no business logic: the CLI decides what to show and a
//! [`Presenter`] only decides how it looks.

mod terminal;

pub use terminal::TerminalPresenter;

use crate::ai::scoring::EvaluationMetrics;
use crate::error::EnhanceError;

/// Receives everything the user should see.
pub trait Presenter {
    /// Shows markdown-formatted text, such as a rewritten prompt.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Io`] when the output cannot be written.
    fn render(&mut self, markup: &str) -> Result<(), EnhanceError>;

    /// Shows a user-visible error message.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Io`] when the output cannot be written.
    fn show_error(&mut self, message: &str) -> Result<(), EnhanceError>;

    /// Shows an evaluation report.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Io`] when the output cannot be written.
    fn show_metrics(&mut self, metrics: &EvaluationMetrics) -> Result<(), EnhanceError>;
}
