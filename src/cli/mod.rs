//! CLI operation mode handlers.
//!
//! - [`one_shot`]: enhance a single prompt, refine it, and optionally score it
//! - [`interactive`]: line-driven session reading prompts and commands

use std::sync::Arc;

use promptly::{ChatBackend, EnhanceError, PromptlyConfig, Workbench, build_backend};

pub mod interactive;
pub mod one_shot;

/// Builds the workbench described by `config`.
///
/// # Errors
///
/// Returns [`EnhanceError::Configuration`] when backend settings are invalid.
pub fn build_workbench(config: &PromptlyConfig) -> Result<Workbench, EnhanceError> {
    let settings = config.backend_settings()?;
    tracing::debug!(
        "using {} backend at {} with model {}",
        settings.kind,
        settings.base_url,
        config.model
    );

    let backend: Arc<dyn ChatBackend> = Arc::from(build_backend(settings));
    Ok(Workbench::with_backend(
        &backend,
        config.model.as_str(),
        config.scoring_model(),
    ))
}
