//! Port constraints inherited from already-placed neighbors.

use pipe_types::{LatticeCoord, NodeTable, PortSet};

/// Port state a new node inherits from its materialized neighbors.
///
/// `active` and `closed` are always disjoint: each neighbor's facing port is
/// in exactly one of its own active or closed sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForcedPorts {
    /// Directions whose neighbor already opened the facing port.
    pub active: PortSet,
    /// Directions whose neighbor already refused the facing port.
    pub closed: PortSet,
}

impl ForcedPorts {
    /// Directions with no materialized neighbor.
    #[must_use]
    pub const fn undetermined(&self) -> PortSet {
        self.active.union(self.closed).complement()
    }
}

/// Derives the forced ports of a node about to be placed at `position`.
///
/// For each direction `d`, if a node already sits at `position + d`, the
/// state of that node's `-d` port is copied onto `d`. Cells without a node
/// leave `d` undetermined.
///
/// # Example
///
/// ```
/// use pipe_gen::reconcile;
/// use pipe_types::{Direction, LatticeCoord, Node, NodeTable, PortSet};
///
/// let mut table = NodeTable::new();
/// table.insert(Node::finalized(LatticeCoord::origin(), PortSet::from([Direction::PosX])))?;
///
/// let forced = reconcile(LatticeCoord::new(1, 0, 0), &table);
/// assert_eq!(forced.active, PortSet::single(Direction::NegX));
/// assert!(forced.closed.is_empty());
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
#[must_use]
pub fn reconcile(position: LatticeCoord, table: &NodeTable) -> ForcedPorts {
    let mut forced = ForcedPorts::default();
    for (direction, neighbor_position) in position.neighbors() {
        let Some(neighbor) = table.node_at(neighbor_position) else {
            continue;
        };
        let facing = direction.opposite();
        if neighbor.active().contains(facing) {
            forced.active.insert(direction);
        } else if neighbor.closed().contains(facing) {
            forced.closed.insert(direction);
        }
    }
    forced
}
