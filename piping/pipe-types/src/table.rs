//! Arena of nodes with a position index.

use hashbrown::HashMap;

use crate::coord::LatticeCoord;
use crate::direction::Direction;
use crate::error::{PipeError, PipeResult};
use crate::node::{Node, NodeId};

/// Node arena keyed by dense [`NodeId`]s, plus the position index.
///
/// The table maps every occupied [`LatticeCoord`] to exactly one node.
/// Nodes are immutable once inserted, with one exception:
/// [`NodeTable::close_port`] may flip a single port from active to closed.
/// That is the only sanctioned mutation of a finalized node and it is used
/// by cycle resolution on a node adjacent to the one being placed.
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, LatticeCoord, Node, NodeTable, PortSet};
///
/// let mut table = NodeTable::new();
/// let id = table
///     .insert(Node::finalized(LatticeCoord::origin(), PortSet::from([Direction::PosX])))
///     .unwrap();
///
/// assert_eq!(table.id_at(LatticeCoord::origin()), Some(id));
/// assert!(table.id_at(LatticeCoord::new(1, 0, 0)).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<LatticeCoord, NodeId>,
}

impl NodeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a table from nodes, assigning ids in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::PositionOccupied`] if two nodes share a position.
    pub fn from_nodes<I: IntoIterator<Item = Node>>(nodes: I) -> PipeResult<Self> {
        let mut table = Self::new();
        for node in nodes {
            table.insert(node)?;
        }
        Ok(table)
    }

    /// Registers a node and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::PositionOccupied`] if the cell already holds a node.
    pub fn insert(&mut self, node: Node) -> PipeResult<NodeId> {
        let position = node.position();
        if let Some(&existing) = self.index.get(&position) {
            return Err(PipeError::PositionOccupied { position, existing });
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(position, id);
        Ok(id)
    }

    /// Moves `direction` of node `id` from its active set to its closed set.
    ///
    /// A closed port is never re-opened, so closing a port that is not
    /// currently active is rejected.
    ///
    /// # Errors
    ///
    /// - [`PipeError::UnknownNode`] if `id` is not in the table
    /// - [`PipeError::BrokenInvariant`] if the port is not active
    pub fn close_port(&mut self, id: NodeId, direction: Direction) -> PipeResult<()> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(PipeError::UnknownNode(id))?;
        if !node.active().contains(direction) {
            return Err(PipeError::broken_invariant(format!(
                "cannot close port {direction} of node {id}: port is not active"
            )));
        }
        node.close(direction);
        Ok(())
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the id of the node at `position`, if one exists.
    #[must_use]
    pub fn id_at(&self, position: LatticeCoord) -> Option<NodeId> {
        self.index.get(&position).copied()
    }

    /// Returns the node at `position`, if one exists.
    #[must_use]
    pub fn node_at(&self, position: LatticeCoord) -> Option<&Node> {
        self.id_at(position).and_then(|id| self.get(id))
    }

    /// Returns `true` if a node occupies `position`.
    #[must_use]
    pub fn is_occupied(&self, position: LatticeCoord) -> bool {
        self.index.contains_key(&position)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates `(id, node)` pairs in id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }
}

impl PartialEq for NodeTable {
    // The index is derived from the nodes.
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for NodeTable {}
