//! Interactive mode: a line-driven enhancement session.
//!
//! Any non-command line starts a fresh rewrite. Commands start with `:`.
//! Errors are shown and the session continues.

use promptly::ai::rewrite::prompts::render_history_context;
use promptly::{EnhanceError, EvaluationMetrics, Presenter, RewriteRequest, Workbench};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const GREETING: &str = "Enter a prompt to enhance, or :help for commands.";

const HELP: &str = "\
Commands:
  <text>    enhance <text> as a new prompt
  :retry    improve the latest attempt using the original prompt
  :eval     score the latest attempt against the original prompt
  :history  show the original prompt and previous attempts
  :new      start over with an empty session
  :help     show this help
  :quit     exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rewrite the given text as a new prompt.
    Enhance(String),
    /// Feedback rewrite of the latest attempt.
    Retry,
    /// Score the latest attempt.
    Evaluate,
    /// Show the session history.
    History,
    /// Reset the session.
    New,
    /// Show the command list.
    Help,
    /// Leave the session.
    Quit,
    /// Blank line.
    Empty,
    /// Unrecognised `:` command.
    Unknown(String),
}

impl Command {
    /// Parses one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if !trimmed.starts_with(':') {
            return Self::Enhance(trimmed.to_owned());
        }

        match trimmed.to_ascii_lowercase().as_str() {
            ":retry" | ":feedback" => Self::Retry,
            ":eval" | ":evaluate" => Self::Evaluate,
            ":history" => Self::History,
            ":new" | ":reset" => Self::New,
            ":help" => Self::Help,
            ":quit" | ":exit" | ":q" => Self::Quit,
            _ => Self::Unknown(trimmed.to_owned()),
        }
    }
}

/// Runs the session until `:quit` or end of input.
///
/// # Errors
///
/// Returns [`EnhanceError::Io`] when input cannot be read or output cannot
/// be written. Rewrite and scoring errors are shown, not returned.
pub async fn run<R, P>(
    workbench: &mut Workbench,
    presenter: &mut P,
    input: R,
) -> Result<(), EnhanceError>
where
    R: AsyncBufRead + Unpin,
    P: Presenter,
{
    presenter.render(GREETING)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.map_err(|error| EnhanceError::Io {
        message: format!("failed to read input: {error}"),
    })? {
        let command = Command::parse(&line);
        if command == Command::Quit {
            break;
        }
        handle(workbench, presenter, command).await?;
    }

    Ok(())
}

/// What a successful command shows.
enum Reply {
    Text(String),
    Metrics(EvaluationMetrics),
}

async fn handle<P: Presenter>(
    workbench: &mut Workbench,
    presenter: &mut P,
    command: Command,
) -> Result<(), EnhanceError> {
    let result = match command {
        Command::Enhance(text) => workbench
            .rewrite(RewriteRequest::fresh(text))
            .await
            .map(Reply::Text),
        Command::Retry => workbench
            .rewrite(RewriteRequest::feedback())
            .await
            .map(Reply::Text),
        Command::Evaluate => workbench.score_latest().await.map(Reply::Metrics),
        Command::History => Ok(Reply::Text(history(workbench))),
        Command::New => {
            workbench.reset();
            Ok(Reply::Text("Session cleared.".to_owned()))
        }
        Command::Help => Ok(Reply::Text(HELP.to_owned())),
        Command::Unknown(name) => Err(EnhanceError::precondition(format!(
            "Unknown command '{name}'. Type :help for commands."
        ))),
        Command::Empty | Command::Quit => return Ok(()),
    };

    match result {
        Ok(Reply::Text(text)) => presenter.render(&text),
        Ok(Reply::Metrics(metrics)) => presenter.show_metrics(&metrics),
        Err(error) => presenter.show_error(&error.to_string()),
    }
}

fn history(workbench: &Workbench) -> String {
    let session = workbench.session();
    let original = session.original_prompt().unwrap_or("(none)");
    format!(
        "Original prompt:\n{original}\n\n{}",
        render_history_context(session)
    )
}
