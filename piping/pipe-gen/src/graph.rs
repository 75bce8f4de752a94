//! Graph view of a generated network.
//!
//! The view follows the downstream convention: an undirected edge joins `u`
//! and `v` whenever one of `u`'s active ports points at `v`'s cell. In a
//! network built by [`PipeGenerator`](crate::PipeGenerator) every such port is
//! reciprocated, which [`PipeGraph::is_reciprocal`] verifies.

use std::collections::{BTreeMap, BTreeSet};

use pipe_types::{FittingKind, LatticeCoord, NodeId, NodeTable, PortSet};

/// One vertex of a [`PipeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphNode {
    /// Node id in the source table.
    pub id: NodeId,
    /// Cell the node occupies.
    pub position: LatticeCoord,
    /// Active ports.
    pub ports: PortSet,
}

/// Undirected graph of face-adjacent connected nodes.
///
/// # Example
///
/// ```
/// use pipe_gen::{GeneratorConfig, PipeGraph, generate_network};
///
/// let generation = generate_network(&GeneratorConfig::new(40).with_tree_mode(true).with_seed(3))?;
/// let graph = PipeGraph::from_table(&generation.table);
///
/// assert!(graph.is_reciprocal());
/// assert!(graph.is_forest());
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<(NodeId, NodeId)>,
    adjacency: Vec<Vec<NodeId>>,
    reciprocal: bool,
}

impl PipeGraph {
    /// Builds the graph view of `table`.
    #[must_use]
    pub fn from_table(table: &NodeTable) -> Self {
        let nodes: Vec<GraphNode> = table
            .iter()
            .map(|(id, node)| GraphNode {
                id,
                position: node.position(),
                ports: node.active(),
            })
            .collect();

        let mut edges = BTreeSet::new();
        let mut reciprocal = true;
        for node in &nodes {
            for direction in node.ports.iter() {
                let Some(other) = node
                    .position
                    .checked_step(direction)
                    .and_then(|cell| table.id_at(cell))
                else {
                    continue;
                };
                let answers = table
                    .get(other)
                    .is_some_and(|n| n.active().contains(direction.opposite()));
                reciprocal &= answers;
                edges.insert(ordered(node.id, other));
            }
        }
        let edges: Vec<_> = edges.into_iter().collect();

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for &(u, v) in &edges {
            adjacency[u.index()].push(v);
            adjacency[v.index()].push(u);
        }

        Self {
            nodes,
            edges,
            adjacency,
            reciprocal,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertices in id order.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges as `(u, v)` pairs with `u < v`, sorted.
    #[must_use]
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Neighbors of `id` in ascending id order. Empty for unknown ids.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges incident to `id`.
    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Active ports of `id` that point at empty cells.
    #[must_use]
    pub fn dangling_ports(&self, id: NodeId) -> PortSet {
        let Some(node) = self.nodes.get(id.index()) else {
            return PortSet::empty();
        };
        let linked: PortSet = self
            .neighbors(id)
            .iter()
            .filter_map(|&n| node.position.direction_to(self.nodes[n.index()].position))
            .collect();
        node.ports.difference(linked)
    }

    /// Total number of dangling ports across the network.
    #[must_use]
    pub fn open_end_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| self.dangling_ports(n.id).len())
            .sum()
    }

    /// Connected components, each sorted by id, ordered by smallest id.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut uf = UnionFind::new(self.nodes.len());
        for &(u, v) in &self.edges {
            uf.union(u.index(), v.index());
        }

        let mut by_root: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        let mut order = Vec::new();
        for node in &self.nodes {
            let root = uf.find(node.id.index());
            by_root
                .entry(root)
                .or_insert_with(|| {
                    order.push(root);
                    Vec::new()
                })
                .push(node.id);
        }
        order
            .into_iter()
            .filter_map(|root| by_root.remove(&root))
            .collect()
    }

    /// Number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut uf = UnionFind::new(self.nodes.len());
        let merges = self
            .edges
            .iter()
            .filter(|&&(u, v)| uf.union(u.index(), v.index()))
            .count();
        self.nodes.len() - merges
    }

    /// Returns `true` if the graph has no cycles.
    #[must_use]
    pub fn is_forest(&self) -> bool {
        let mut uf = UnionFind::new(self.nodes.len());
        self.edges
            .iter()
            .all(|&(u, v)| uf.union(u.index(), v.index()))
    }

    /// Returns `true` if every active port facing a node is answered by that
    /// node's facing port.
    #[must_use]
    pub const fn is_reciprocal(&self) -> bool {
        self.reciprocal
    }

    /// Count of nodes per fitting kind. Nodes without ports are skipped.
    #[must_use]
    pub fn fitting_histogram(&self) -> BTreeMap<FittingKind, usize> {
        let mut histogram = BTreeMap::new();
        for kind in self.nodes.iter().filter_map(|n| FittingKind::classify(n.ports)) {
            *histogram.entry(kind).or_insert(0) += 1;
        }
        histogram
    }

    /// Smallest and largest occupied coordinates per axis.
    #[must_use]
    pub fn bounds(&self) -> Option<(LatticeCoord, LatticeCoord)> {
        let first = self.nodes.first()?.position;
        Some(self.nodes.iter().fold((first, first), |(lo, hi), n| {
            let p = n.position;
            (
                LatticeCoord::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                LatticeCoord::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}

fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Disjoint-set forest with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they were already
    /// in the same set.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] = self.rank[root_x].saturating_add(1);
            }
        }
        true
    }
}
