//! Promptly CLI entrypoint for prompt enhancement.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use promptly::{EnhanceError, OperationMode, PromptlyConfig, TerminalPresenter};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use cli::one_shot::OneShotOptions;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "Error: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), EnhanceError> {
    let config = load_config()?;
    let mut workbench = cli::build_workbench(&config)?;
    let mut presenter = TerminalPresenter::stdio(config.json);

    match config.operation_mode() {
        OperationMode::Interactive => {
            cli::interactive::run(
                &mut workbench,
                &mut presenter,
                BufReader::new(tokio::io::stdin()),
            )
            .await
        }
        OperationMode::OneShot => {
            let prompt = match config.resolve_prompt_text()? {
                Some(prompt) => prompt,
                None => cli::one_shot::read_prompt(tokio::io::stdin()).await?,
            };
            let options = OneShotOptions {
                feedback_rounds: config.feedback_rounds,
                evaluate: config.evaluate,
            };
            cli::one_shot::run(&mut workbench, &mut presenter, &prompt, options).await
        }
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`EnhanceError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PromptlyConfig, EnhanceError> {
    PromptlyConfig::load().map_err(|error| EnhanceError::Configuration {
        message: error.to_string(),
    })
}
