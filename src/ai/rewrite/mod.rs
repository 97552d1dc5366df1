//! Prompt enhancement: session history, templates, and the rewrite service.

mod model;
pub mod prompts;
mod service;
mod session;

pub use model::{RewriteAttempt, RewriteMode, RewriteRequest};
pub use service::PromptRewriter;
pub use session::{FeedbackBasis, MAX_ATTEMPT_HISTORY, RewriteSession};
