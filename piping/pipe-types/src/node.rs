//! Pipe nodes and their identities.

use std::fmt;

use crate::coord::LatticeCoord;
use crate::fitting::FittingKind;
use crate::ports::PortSet;

/// Dense node identifier, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a node id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the pipe network.
///
/// A finalized node has every direction in exactly one of `active` (ports
/// it opened) or `closed` (ports it refused).
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, LatticeCoord, Node, PortSet};
///
/// let node = Node::finalized(
///     LatticeCoord::origin(),
///     PortSet::from([Direction::PosX, Direction::NegX]),
/// );
/// assert!(node.is_finalized());
/// assert_eq!(node.closed().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    position: LatticeCoord,
    active: PortSet,
    closed: PortSet,
}

impl Node {
    /// Creates a finalized node: `closed` is the complement of `active`.
    #[must_use]
    pub const fn finalized(position: LatticeCoord, active: PortSet) -> Self {
        Self {
            position,
            active,
            closed: active.complement(),
        }
    }

    /// Creates a node from explicit port sets.
    ///
    /// No invariant is enforced; use [`Node::is_finalized`] to check.
    #[must_use]
    pub const fn from_parts(position: LatticeCoord, active: PortSet, closed: PortSet) -> Self {
        Self {
            position,
            active,
            closed,
        }
    }

    /// The cell this node occupies.
    #[must_use]
    pub const fn position(&self) -> LatticeCoord {
        self.position
    }

    /// Ports the node opened.
    #[must_use]
    pub const fn active(&self) -> PortSet {
        self.active
    }

    /// Ports the node refused.
    #[must_use]
    pub const fn closed(&self) -> PortSet {
        self.closed
    }

    /// Returns `true` if active and closed partition all six directions.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.active.is_disjoint(self.closed) && self.active.union(self.closed).is_full()
    }

    /// Classifies the node's active ports as a fitting.
    #[must_use]
    pub fn fitting(&self) -> Option<FittingKind> {
        FittingKind::classify(self.active)
    }

    // Only reachable through `NodeTable::close_port`.
    pub(crate) fn close(&mut self, direction: crate::Direction) {
        self.active.remove(direction);
        self.closed.insert(direction);
    }
}
