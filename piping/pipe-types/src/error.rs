//! Error types for pipe network operations.
//!
//! This module defines the [`PipeError`] enum shared by the types,
//! generation, and persistence crates.

use crate::{LatticeCoord, NodeId};

/// Result type for pipe network operations.
pub type PipeResult<T> = Result<T, PipeError>;

/// Errors that can occur while building or querying a pipe network.
///
/// Two of the variants are contract violations rather than user errors:
/// [`PipeError::InvalidDirection`] is raised when a direction token is not
/// one of the six known tokens, and [`PipeError::BrokenInvariant`] signals
/// inconsistent bookkeeping inside the generator. Neither is meant to be
/// recovered from; a generation run that hits one is aborted.
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, PipeError};
///
/// let err = "w".parse::<Direction>().unwrap_err();
/// assert!(matches!(err, PipeError::InvalidDirection(ref token) if token == "w"));
/// assert!(err.to_string().contains("invalid direction"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PipeError {
    /// A direction token was not one of `x`, `-x`, `y`, `-y`, `z`, `-z`.
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// Internal bookkeeping is inconsistent.
    ///
    /// Indicates a defect in neighbor reconciliation or position indexing.
    #[error("broken invariant: {0}")]
    BrokenInvariant(String),

    /// A node already occupies the lattice cell.
    #[error("position {position} is already occupied by node {existing}")]
    PositionOccupied {
        /// The contested lattice cell.
        position: LatticeCoord,
        /// The node that already owns it.
        existing: NodeId,
    },

    /// A node id does not exist in the table.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipeError {
    /// Creates a broken invariant error with the given message.
    #[must_use]
    pub fn broken_invariant(message: impl Into<String>) -> Self {
        Self::BrokenInvariant(message.into())
    }

    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use pipe_types::PipeError;
    ///
    /// let error = PipeError::invalid_config("num_nodes must be positive");
    /// assert!(error.to_string().contains("num_nodes"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if this error signals a programming-contract violation.
    ///
    /// Contract violations abort generation; they are never retried.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidDirection(_) | Self::BrokenInvariant(_))
    }
}
