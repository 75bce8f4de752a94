//! JSON persistence for lattice pipe networks.
//!
//! Saves a generated [`NodeTable`](pipe_types::NodeTable) as a record-per-node
//! JSON object and loads it back without re-running generation, so a saved
//! network can be inspected or handed to mesh assembly later.
//!
//! # Example
//!
//! ```
//! use pipe_io::{from_json_str, to_json_string};
//! use pipe_types::{Direction, LatticeCoord, Node, NodeTable, PortSet};
//!
//! let mut table = NodeTable::new();
//! table.insert(Node::finalized(LatticeCoord::origin(), PortSet::from([Direction::PosX])))?;
//!
//! let json = to_json_string(&table)?;
//! assert_eq!(from_json_str(&json)?, table);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Layer 0 Crate
//!
//! This crate depends only on `pipe-types`; it does not need the generator.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod json;

pub use error::{PersistError, PersistResult};
pub use json::{from_json_str, load_json, read_json, save_json, to_json_string, write_json};
