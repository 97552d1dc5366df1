//! Plain-text presenter writing to arbitrary writers.

use std::io::{self, Stderr, Stdout, Write};

use crate::ai::scoring::EvaluationMetrics;
use crate::error::{EnhanceError, io_error};

use super::Presenter;

/// Writes rewrites and reports to `out` and errors to `err`.
///
/// Markdown is printed verbatim. With JSON output enabled, metrics are
/// written as one pretty-printed JSON object instead of the text report.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write, E: Write> {
    out: W,
    err: E,
    json_metrics: bool,
}

impl TerminalPresenter<Stdout, Stderr> {
    /// Presenter bound to the process's standard streams.
    #[must_use]
    pub fn stdio(json_metrics: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), json_metrics)
    }
}

impl<W: Write, E: Write> TerminalPresenter<W, E> {
    /// Creates a presenter over the given writers.
    #[must_use]
    pub const fn new(out: W, err: E, json_metrics: bool) -> Self {
        Self {
            out,
            err,
            json_metrics,
        }
    }

    /// Writer receiving rewrites and reports.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Writer receiving errors.
    #[must_use]
    pub const fn errors(&self) -> &E {
        &self.err
    }

    fn write_report(&mut self, metrics: &EvaluationMetrics) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "Overall Improvement: {:.1}%", metrics.overall_improvement)?;
        writeln!(out, "Clarity: {:.1}", metrics.clarity_score)?;
        writeln!(out, "Specificity: {:.1}", metrics.specificity_score)?;
        writeln!(out, "Actionability: {:.1}", metrics.actionability_score)?;
        write_section(out, "Improvements Made", &metrics.improvement_details)?;
        write_section(out, "Further Suggestions", &metrics.suggestions)?;
        out.flush()
    }
}

fn write_section<W: Write>(out: &mut W, heading: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{heading}:")?;
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}

impl<W: Write, E: Write> Presenter for TerminalPresenter<W, E> {
    fn render(&mut self, markup: &str) -> Result<(), EnhanceError> {
        writeln!(self.out, "{}", markup.trim_end())
            .and_then(|()| self.out.flush())
            .map_err(|error| io_error(&error))
    }

    fn show_error(&mut self, message: &str) -> Result<(), EnhanceError> {
        writeln!(self.err, "Error: {message}").map_err(|error| io_error(&error))
    }

    fn show_metrics(&mut self, metrics: &EvaluationMetrics) -> Result<(), EnhanceError> {
        if self.json_metrics {
            let rendered =
                serde_json::to_string_pretty(metrics).map_err(|error| EnhanceError::Io {
                    message: format!("failed to serialise metrics: {error}"),
                })?;
            return self.render(&rendered);
        }

        self.write_report(metrics).map_err(|error| io_error(&error))
    }
}
