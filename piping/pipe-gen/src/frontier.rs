//! Breadth-first queue of cells awaiting a node.

use std::collections::VecDeque;

use hashbrown::HashSet;

use pipe_types::{LatticeCoord, NodeTable};

/// FIFO of lattice cells waiting to be materialized.
///
/// A cell is admitted at most once per run, and never more than `budget`
/// cells in total (the seed counts).
///
/// # Example
///
/// ```
/// use pipe_gen::Frontier;
/// use pipe_types::{LatticeCoord, NodeTable};
///
/// let table = NodeTable::new();
/// let mut frontier = Frontier::new(LatticeCoord::origin(), 2);
///
/// assert!(frontier.offer(LatticeCoord::new(1, 0, 0), &table));
/// assert!(!frontier.offer(LatticeCoord::new(1, 0, 0), &table)); // already queued
/// assert!(!frontier.offer(LatticeCoord::new(0, 1, 0), &table)); // budget spent
///
/// assert_eq!(frontier.pop(), Some(LatticeCoord::origin()));
/// ```
#[derive(Debug, Clone)]
pub struct Frontier {
    queue: VecDeque<LatticeCoord>,
    queued: HashSet<LatticeCoord>,
    admitted: usize,
    budget: usize,
}

impl Frontier {
    /// Creates a frontier holding only `seed`.
    #[must_use]
    pub fn new(seed: LatticeCoord, budget: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            admitted: 0,
            budget,
        };
        if budget > 0 {
            frontier.push(seed);
        }
        frontier
    }

    fn push(&mut self, position: LatticeCoord) {
        self.queue.push_back(position);
        self.queued.insert(position);
        self.admitted += 1;
    }

    /// Removes and returns the oldest queued cell.
    pub fn pop(&mut self) -> Option<LatticeCoord> {
        let position = self.queue.pop_front()?;
        self.queued.remove(&position);
        Some(position)
    }

    /// Queues `position` unless it is occupied, already queued, or the
    /// budget is spent. Returns `true` if the cell was queued.
    pub fn offer(&mut self, position: LatticeCoord, table: &NodeTable) -> bool {
        if self.is_budget_spent() || table.is_occupied(position) || self.queued.contains(&position)
        {
            return false;
        }
        self.push(position);
        true
    }

    /// Returns `true` if `position` is waiting in the queue.
    #[must_use]
    pub fn contains(&self, position: LatticeCoord) -> bool {
        self.queued.contains(&position)
    }

    /// Number of queued cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no cell is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total cells admitted so far, including the seed.
    #[must_use]
    pub const fn admitted(&self) -> usize {
        self.admitted
    }

    /// Returns `true` once `budget` cells have been admitted.
    #[must_use]
    pub const fn is_budget_spent(&self) -> bool {
        self.admitted >= self.budget
    }
}
