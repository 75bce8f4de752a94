//! Constrained breadth-first generation of lattice pipe networks.
//!
//! Starting from the origin, nodes are placed one cell at a time in FIFO
//! order. Each node:
//!
//! 1. Samples a target port count from a [`DegreeDistribution`]
//! 2. Inherits port state from already-placed neighbors ([`reconcile`])
//! 3. In tree mode, severs all but one inherited link ([`resolve_cycles`])
//! 4. Opens extra ports until the target is met ([`complete_ports`])
//! 5. Queues the cells behind its newly opened ports ([`Frontier`])
//!
//! Every run is driven by a caller-supplied RNG, so a seeded RNG reproduces
//! the same network.
//!
//! # Example
//!
//! ```
//! use pipe_gen::{GeneratorConfig, PipeGenerator, PipeGraph};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = GeneratorConfig::new(100).with_tree_mode(true);
//! let generator = PipeGenerator::new(config)?;
//!
//! let mut rng = StdRng::seed_from_u64(2024);
//! let generation = generator.generate(&mut rng)?;
//!
//! let graph = PipeGraph::from_table(&generation.table);
//! assert!(graph.is_forest());
//! assert_eq!(graph.component_count(), 1);
//! # Ok::<(), pipe_types::PipeError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization of configuration and run summaries

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod complete;
mod config;
mod cycle;
mod frontier;
mod generator;
mod graph;
mod reconcile;
mod sampler;

pub use complete::{Completion, CompletionCase, complete_ports};
pub use config::{
    CompletionPolicy, CouplerElbowWeights, DegreeDistribution, GeneratorConfig, MAX_DEGREE,
};
pub use cycle::resolve_cycles;
pub use frontier::Frontier;
pub use generator::{
    Generation, GenerationStats, PipeGenerator, PlacementRecord, Termination, generate_network,
};
pub use graph::{GraphNode, PipeGraph};
pub use reconcile::{ForcedPorts, reconcile};
pub use sampler::DegreeSampler;
