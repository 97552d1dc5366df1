//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.promptly.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PROMPTLY_MODEL`, `PROMPTLY_API_KEY`, or
//!    `OPENAI_API_KEY` for the key alone
//! 4. **Command-line arguments** – `--model`/`-m`, `--prompt`/`-p`, ...
//!
//! # Configuration File
//!
//! ```toml
//! backend = "ollama"
//! base_url = "http://127.0.0.1:11434"
//! model = "phi4:14b"
//! scoring_model = "phi4:14b"
//! timeout_seconds = 120
//! evaluate = true
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ai::backend::{BackendKind, BackendSettings};
use crate::error::EnhanceError;

/// Model used for rewriting when none is configured.
pub const DEFAULT_MODEL: &str = "phi4:14b";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Enhance one prompt, optionally refine and score it, then exit.
    OneShot,
    /// Line-driven session reading prompts and commands from stdin.
    Interactive,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use promptly::PromptlyConfig;
///
/// let config = PromptlyConfig::load().expect("failed to load configuration");
/// let settings = config.backend_settings().expect("backend settings");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PROMPTLY",
    discovery(
        dotfile_name = ".promptly.toml",
        config_file_name = "promptly.toml",
        app_name = "promptly"
    )
)]
pub struct PromptlyConfig {
    /// Chat backend dialect: `ollama` or `openai`.
    ///
    /// Can be provided via:
    /// - CLI: `--backend <KIND>` or `-b <KIND>`
    /// - Environment: `PROMPTLY_BACKEND`
    /// - Config file: `backend = "..."`
    #[ortho_config(cli_short = 'b')]
    pub backend: String,

    /// Base URL of the chat endpoint. Defaults per backend.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>`
    /// - Environment: `PROMPTLY_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config()]
    pub base_url: Option<String>,

    /// Model used for rewriting.
    ///
    /// Can be provided via:
    /// - CLI: `--model <MODEL>` or `-m <MODEL>`
    /// - Environment: `PROMPTLY_MODEL`
    /// - Config file: `model = "..."`
    #[ortho_config(cli_short = 'm')]
    pub model: String,

    /// Model used for scoring. Falls back to `model`.
    #[ortho_config()]
    pub scoring_model: Option<String>,

    /// Bearer key for OpenAI-compatible endpoints.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>` or `-k <KEY>`
    /// - Environment: `PROMPTLY_API_KEY` or `OPENAI_API_KEY`
    /// - Config file: `api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Prompt text for one-shot mode. Read from stdin when absent.
    #[ortho_config(cli_short = 'p')]
    pub prompt: Option<String>,

    /// UTF-8 file holding the prompt. `prompt` wins when both are set.
    #[ortho_config(cli_short = 'f')]
    pub prompt_file: Option<String>,

    /// Feedback re-attempts after the first rewrite in one-shot mode.
    #[ortho_config(cli_short = 'r')]
    pub feedback_rounds: u32,

    /// Scores the final rewrite against the original.
    ///
    /// Note: booleans are not loaded from the environment by `ortho_config`;
    /// use `--evaluate` / `-e` or `evaluate = true` in a config file.
    #[ortho_config(cli_short = 'e')]
    pub evaluate: bool,

    /// Prints metrics as JSON instead of the text report.
    #[ortho_config()]
    pub json: bool,

    /// Starts the line-driven interactive session.
    #[ortho_config(cli_short = 'i')]
    pub interactive: bool,
}

impl Default for PromptlyConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default().label().to_owned(),
            base_url: None,
            model: DEFAULT_MODEL.to_owned(),
            scoring_model: None,
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            prompt: None,
            prompt_file: None,
            feedback_rounds: 0,
            evaluate: false,
            json: false,
            interactive: false,
        }
    }
}

impl PromptlyConfig {
    /// Determines the operation mode from the `interactive` flag.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.interactive {
            OperationMode::Interactive
        } else {
            OperationMode::OneShot
        }
    }

    /// Parses the configured backend dialect.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Configuration`] for an unknown dialect.
    pub fn backend_kind(&self) -> Result<BackendKind, EnhanceError> {
        self.backend
            .parse::<BackendKind>()
            .map_err(|error| EnhanceError::Configuration {
                message: error.to_string(),
            })
    }

    /// Returns the configured base URL, or the dialect default.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Configuration`] when the dialect is unknown or
    /// the URL does not parse.
    pub fn resolve_base_url(&self) -> Result<String, EnhanceError> {
        let kind = self.backend_kind()?;
        let base_url = self
            .base_url
            .as_deref()
            .map_or_else(|| kind.default_base_url().to_owned(), str::to_owned);

        Url::parse(&base_url).map_err(|error| EnhanceError::Configuration {
            message: format!("invalid base_url '{base_url}': {error}"),
        })?;

        Ok(base_url)
    }

    /// Resolves the API key from configuration or the `OPENAI_API_KEY`
    /// environment variable.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(OPENAI_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Model used for scoring.
    #[must_use]
    pub fn scoring_model(&self) -> &str {
        self.scoring_model.as_deref().unwrap_or(self.model.as_str())
    }

    /// Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Configuration`] when the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, EnhanceError> {
        if self.timeout_seconds == 0 {
            return Err(EnhanceError::Configuration {
                message: "timeout_seconds must be greater than zero".to_owned(),
            });
        }
        Ok(Duration::from_secs(self.timeout_seconds))
    }

    /// Collects everything needed to build a chat backend.
    ///
    /// The API key is only attached for the OpenAI dialect.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Configuration`] when the dialect, base URL or
    /// timeout is invalid, or the model name is blank.
    pub fn backend_settings(&self) -> Result<BackendSettings, EnhanceError> {
        if self.model.trim().is_empty() {
            return Err(EnhanceError::Configuration {
                message: "model must not be empty".to_owned(),
            });
        }

        let kind = self.backend_kind()?;
        let api_key = match kind {
            BackendKind::OpenAi => self.resolve_api_key(),
            BackendKind::Ollama => None,
        };

        Ok(BackendSettings {
            kind,
            base_url: self.resolve_base_url()?,
            api_key,
            timeout: self.timeout()?,
        })
    }

    /// Returns the one-shot prompt from `prompt` or `prompt_file`.
    ///
    /// `Ok(None)` means neither is configured and the caller should read
    /// standard input.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Io`] when `prompt_file` cannot be read.
    pub fn resolve_prompt_text(&self) -> Result<Option<String>, EnhanceError> {
        if let Some(prompt) = &self.prompt {
            return Ok(Some(prompt.clone()));
        }

        self.prompt_file
            .as_deref()
            .map(|path| read_prompt_file(Utf8Path::new(path)))
            .transpose()
    }
}

fn read_prompt_file(path: &Utf8Path) -> Result<String, EnhanceError> {
    let file_name = path.file_name().ok_or_else(|| EnhanceError::Io {
        message: format!("invalid prompt file path '{path}': no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        EnhanceError::Io {
            message: format!("failed to open prompt directory '{parent}': {error}"),
        }
    })?;

    dir.read_to_string(file_name)
        .map_err(|error| EnhanceError::Io {
            message: format!("failed to read prompt file '{path}': {error}"),
        })
}

#[cfg(test)]
mod tests;
