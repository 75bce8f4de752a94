//! Core types for lattice pipe networks.
//!
//! A pipe network is a set of nodes placed on distinct cells of an integer
//! 3D lattice. Each node opens a subset of six directional ports; two nodes
//! are connected when they are face-adjacent and both opened the ports
//! facing each other.
//!
//! - [`Direction`] and [`Axis`] - The six port directions and their axes
//! - [`LatticeCoord`] - Integer lattice cell
//! - [`PortSet`] - Compact set of directions
//! - [`Node`] and [`NodeId`] - A placed node with its active and closed ports
//! - [`NodeTable`] - Node arena with a position index
//! - [`FittingKind`] - Fitting classification of a port configuration
//!
//! # Example
//!
//! ```
//! use pipe_types::{Direction, FittingKind, LatticeCoord, Node, NodeTable, PortSet};
//!
//! let mut table = NodeTable::new();
//! table.insert(Node::finalized(
//!     LatticeCoord::origin(),
//!     PortSet::from([Direction::PosX, Direction::PosY]),
//! ))?;
//!
//! let node = table.node_at(LatticeCoord::origin()).unwrap();
//! assert_eq!(node.fitting(), Some(FittingKind::Elbow));
//! # Ok::<(), pipe_types::PipeError>(())
//! ```
//!
//! # Layer 0 Crate
//!
//! This crate has no randomness and no I/O. Generation lives in `pipe-gen`,
//! persistence in `pipe-io`.
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod coord;
mod direction;
mod error;
mod fitting;
mod node;
mod ports;
mod table;

pub use coord::LatticeCoord;
pub use direction::{Axis, Direction};
pub use error::{PipeError, PipeResult};
pub use fitting::FittingKind;
pub use node::{Node, NodeId};
pub use ports::PortSet;
pub use table::NodeTable;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
