//! Error types surfaced by the enhancement and scoring layers.

use thiserror::Error;

/// Errors surfaced while building requests or talking to a chat backend.
///
/// Malformed scoring output is not an error: the scorer degrades to default
/// metrics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnhanceError {
    /// The chat backend could not be reached, timed out, rejected the
    /// request, or answered without usable content.
    #[error("chat backend error: {message}")]
    ExternalService {
        /// Transport or response detail.
        message: String,
    },

    /// The requested operation is not valid for the current session.
    #[error("{message}")]
    Precondition {
        /// Which precondition failed.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl EnhanceError {
    /// Builds an [`EnhanceError::ExternalService`] from any displayable detail.
    #[must_use]
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
        }
    }

    /// Builds an [`EnhanceError::Precondition`] from any displayable detail.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }
}

/// Maps a writer failure into [`EnhanceError::Io`].
#[must_use]
pub fn io_error(error: &std::io::Error) -> EnhanceError {
    EnhanceError::Io {
        message: error.to_string(),
    }
}
