//! Error types for network persistence.

use std::path::PathBuf;

use pipe_types::PipeError;
use thiserror::Error;

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors that can occur while saving or loading a network.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON, or a value of the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A node record is well-formed JSON but not a valid node.
    #[error("invalid node {id}: {message}")]
    InvalidNode {
        /// Node key as written in the file.
        id: String,
        /// What was wrong with it.
        message: String,
    },

    /// The nodes could not be assembled into a table.
    #[error("invalid network: {0}")]
    Table(#[from] PipeError),
}

impl PersistError {
    /// Create an `InvalidNode` error.
    #[must_use]
    pub fn invalid_node(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidNode {
            id: id.into(),
            message: message.into(),
        }
    }
}
