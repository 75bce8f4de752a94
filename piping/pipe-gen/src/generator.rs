//! Breadth-first growth of a pipe network from the origin.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use pipe_types::{LatticeCoord, Node, NodeId, NodeTable, PipeError, PipeResult, PortSet};

use crate::complete::{Completion, CompletionCase, complete_ports};
use crate::config::GeneratorConfig;
use crate::cycle::resolve_cycles;
use crate::frontier::Frontier;
use crate::reconcile::{ForcedPorts, reconcile};
use crate::sampler::DegreeSampler;

/// Why a generation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The configured number of nodes was created.
    NodeBudgetReached,
    /// No queued cell remained before the budget was reached.
    FrontierExhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NodeBudgetReached => "node budget reached",
            Self::FrontierExhausted => "frontier exhausted",
        })
    }
}

/// Trace of how one node was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRecord {
    /// Id assigned to the node.
    pub id: NodeId,
    /// Cell the node occupies.
    pub position: LatticeCoord,
    /// Sampled target port count.
    pub target_degree: usize,
    /// Forced ports after cycle resolution.
    pub forced: ForcedPorts,
    /// Links severed by cycle resolution (tree mode only).
    pub severed: PortSet,
    /// Completion outcome.
    pub completion: Completion,
}

impl PlacementRecord {
    /// Ports the node ended up with at placement time.
    #[must_use]
    pub const fn active(&self) -> PortSet {
        self.completion.active(&self.forced)
    }

    /// Returns `true` if the target degree could not be reached.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.completion.case == CompletionCase::Saturated
    }
}

/// Aggregate counters of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Nodes created.
    pub nodes: usize,
    /// Nodes whose target degree was unreachable.
    pub saturated: usize,
    /// Links severed by cycle resolution.
    pub severed_links: usize,
    /// Ambiguous two-port cases resolved straight through.
    pub couplers: usize,
    /// Ambiguous two-port cases resolved as a bend.
    pub elbows: usize,
}

impl GenerationStats {
    fn from_records(records: &[PlacementRecord]) -> Self {
        let mut stats = Self {
            nodes: records.len(),
            ..Self::default()
        };
        for record in records {
            stats.severed_links += record.severed.len();
            match record.completion.case {
                CompletionCase::Saturated => stats.saturated += 1,
                CompletionCase::Coupler => stats.couplers += 1,
                CompletionCase::Elbow => stats.elbows += 1,
                _ => {}
            }
        }
        stats
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The generated nodes.
    pub table: NodeTable,
    /// Per-node placement trace, in id order.
    pub records: Vec<PlacementRecord>,
    /// Why the run stopped.
    pub termination: Termination,
    /// Aggregate counters.
    pub stats: GenerationStats,
}

/// Grows pipe networks breadth-first from the origin.
///
/// Each step pops the oldest queued cell, samples a target degree, inherits
/// port state from placed neighbors, removes cycles in tree mode, completes
/// the ports, and queues the cells behind every newly opened port.
///
/// # Example
///
/// ```
/// use pipe_gen::{GeneratorConfig, PipeGenerator, Termination};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let generator = PipeGenerator::new(GeneratorConfig::new(50).with_tree_mode(true))?;
/// let mut rng = StdRng::seed_from_u64(42);
/// let generation = generator.generate(&mut rng)?;
///
/// assert!(generation.table.len() <= 50);
/// if generation.termination == Termination::NodeBudgetReached {
///     assert_eq!(generation.table.len(), 50);
/// }
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PipeGenerator {
    config: GeneratorConfig,
    sampler: DegreeSampler,
}

impl PipeGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: GeneratorConfig) -> PipeResult<Self> {
        config.validate()?;
        let sampler = DegreeSampler::new(config.degrees())?;
        Ok(Self { config, sampler })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs a full generation with the given RNG.
    ///
    /// The RNG is the only source of randomness, so a seeded RNG makes the
    /// run reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::BrokenInvariant`] if internal bookkeeping becomes
    /// inconsistent. The run is aborted; no partial result is returned.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> PipeResult<Generation> {
        let budget = self.config.num_nodes();
        let mut table = NodeTable::with_capacity(budget);
        let mut frontier = Frontier::new(LatticeCoord::origin(), budget);
        let mut records = Vec::with_capacity(budget);

        debug!(
            "Generating pipe network: budget {} nodes, tree mode {}",
            budget,
            self.config.tree_mode()
        );

        while table.len() < budget {
            let Some(position) = frontier.pop() else {
                break;
            };
            let record = self.place_node(position, &mut table, rng)?;
            for cell in record
                .completion
                .opened
                .iter()
                .filter_map(|direction| position.checked_step(direction))
            {
                frontier.offer(cell, &table);
            }
            records.push(record);
        }

        let termination = if table.len() >= budget {
            Termination::NodeBudgetReached
        } else {
            Termination::FrontierExhausted
        };
        let stats = GenerationStats::from_records(&records);

        info!(
            "Generated {} nodes ({}): {} saturated, {} links severed, {} couplers, {} elbows",
            stats.nodes, termination, stats.saturated, stats.severed_links, stats.couplers, stats.elbows
        );

        if termination == Termination::FrontierExhausted {
            warn!(
                "Frontier exhausted after {} of {} nodes",
                table.len(),
                budget
            );
        }

        Ok(Generation {
            table,
            records,
            termination,
            stats,
        })
    }

    /// Places a single node at `position` and registers it in `table`.
    ///
    /// In tree mode this may close ports of nodes adjacent to `position`.
    ///
    /// # Errors
    ///
    /// - [`PipeError::PositionOccupied`] if `position` already holds a node
    /// - [`PipeError::BrokenInvariant`] on inconsistent bookkeeping
    pub fn place_node<R: Rng + ?Sized>(
        &self,
        position: LatticeCoord,
        table: &mut NodeTable,
        rng: &mut R,
    ) -> PipeResult<PlacementRecord> {
        if let Some(existing) = table.id_at(position) {
            return Err(PipeError::PositionOccupied { position, existing });
        }

        let target_degree = self.sampler.sample(rng);
        let mut forced = reconcile(position, table);
        let severed = if self.config.tree_mode() {
            resolve_cycles(position, &mut forced, table, rng)?
        } else {
            PortSet::empty()
        };
        let completion = complete_ports(target_degree, &forced, self.config.policy(), rng)?;

        let node = Node::finalized(position, completion.active(&forced));
        if !node.active().is_disjoint(forced.closed) {
            return Err(PipeError::broken_invariant(format!(
                "node at {position} opened a port its neighbor closed"
            )));
        }
        let id = table.insert(node)?;

        debug!(
            "Placed node {} at {}: target {}, forced {:?}/{:?}, opened {:?} ({:?})",
            id, position, target_degree, forced.active, forced.closed, completion.opened, completion.case
        );

        Ok(PlacementRecord {
            id,
            position,
            target_degree,
            forced,
            severed,
            completion,
        })
    }
}

/// Runs a generation from a configuration alone.
///
/// Uses the configured seed, or fresh entropy when none is set.
///
/// # Errors
///
/// Returns [`PipeError::InvalidConfig`] for an invalid configuration and
/// [`PipeError::BrokenInvariant`] if generation aborts.
///
/// # Example
///
/// ```
/// use pipe_gen::{GeneratorConfig, generate_network};
///
/// let config = GeneratorConfig::new(30).with_seed(7);
/// let a = generate_network(&config)?;
/// let b = generate_network(&config)?;
/// assert_eq!(a.table, b.table);
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
pub fn generate_network(config: &GeneratorConfig) -> PipeResult<Generation> {
    let generator = PipeGenerator::new(config.clone())?;
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generator.generate(&mut rng)
}
