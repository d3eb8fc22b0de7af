//! Errors raised at the host boundary.
//!
//! Conversion itself never fails: nodes whose spans cannot be recovered are
//! omitted. Only obtaining the external tree and reading configuration can
//! go wrong.

use thiserror::Error;

/// Errors from loading a document tree or processor configuration.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The document loader could not produce a tree.
    #[error("failed to load document tree: {message}")]
    Load {
        /// Loader-specific description.
        message: String,
    },

    /// A tree or configuration was not valid JSON of the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessorError {
    /// A [`ProcessorError::Load`] with the given message.
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }
}

/// Result type for host boundary operations.
pub type Result<T> = std::result::Result<T, ProcessorError>;
