//! Node-table JSON format.
//!
//! A network is stored as one JSON object keyed by decimal node id:
//!
//! ```json
//! {
//!   "0": {
//!     "position": [0, 0, 0],
//!     "opened_connection_list": ["x", "-z"],
//!     "closed_connection_list": ["-x", "y", "-y", "z"]
//!   }
//! }
//! ```
//!
//! These are the keys the network tools downstream of the generator read. The
//! reader also accepts `active_connection_list` for the opened list and
//! `invalid_connection_list` for the closed list. A missing closed list is
//! taken to be the complement of the active one.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pipe_types::{LatticeCoord, Node, NodeTable, PortSet};

use crate::error::{PersistError, PersistResult};

#[derive(Debug, Serialize)]
struct NodeRecordOut {
    position: LatticeCoord,
    opened_connection_list: PortSet,
    closed_connection_list: PortSet,
}

#[derive(Debug, Deserialize)]
struct NodeRecordIn {
    position: LatticeCoord,
    #[serde(alias = "active_connection_list")]
    opened_connection_list: PortSet,
    #[serde(default, alias = "invalid_connection_list")]
    closed_connection_list: Option<PortSet>,
}

impl NodeRecordIn {
    fn into_node(self, key: &str) -> PersistResult<Node> {
        let active = self.opened_connection_list;
        let Some(closed) = self.closed_connection_list else {
            return Ok(Node::finalized(self.position, active));
        };
        let overlap = active.intersection(closed);
        if !overlap.is_empty() {
            return Err(PersistError::invalid_node(
                key,
                format!("ports {overlap:?} are both active and closed"),
            ));
        }
        let missing = active.union(closed).complement();
        if !missing.is_empty() {
            return Err(PersistError::invalid_node(
                key,
                format!("ports {missing:?} are neither active nor closed"),
            ));
        }
        Ok(Node::from_parts(self.position, active, closed))
    }
}

/// Serializes a node table to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn to_json_string(table: &NodeTable) -> PersistResult<String> {
    Ok(serde_json::to_string_pretty(&records(table))?)
}

/// Writes a node table as JSON to `writer`.
///
/// # Errors
///
/// Returns [`PersistError::Json`] or [`PersistError::Io`] on failure.
pub fn write_json<W: Write>(table: &NodeTable, mut writer: W) -> PersistResult<()> {
    serde_json::to_writer_pretty(&mut writer, &records(table))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn records(table: &NodeTable) -> BTreeMap<usize, NodeRecordOut> {
    table
        .iter()
        .map(|(id, node)| {
            (
                id.index(),
                NodeRecordOut {
                    position: node.position(),
                    opened_connection_list: node.active(),
                    closed_connection_list: node.closed(),
                },
            )
        })
        .collect()
}

/// Parses a node table from JSON.
///
/// Nodes are ordered by numeric id and renumbered densely from zero, so a
/// file with ids `0, 2, 5` loads as `0, 1, 2`.
///
/// # Errors
///
/// - [`PersistError::Json`] if the text is not a JSON object of node records
///   or contains an unknown direction token
/// - [`PersistError::InvalidNode`] for a non-numeric or repeated id, or
///   inconsistent port lists
/// - [`PersistError::Table`] if two nodes share a position
///
/// # Example
///
/// ```
/// use pipe_io::from_json_str;
/// use pipe_types::{Direction, LatticeCoord};
///
/// let table = from_json_str(r#"{
///     "0": { "position": [0, 0, 0], "opened_connection_list": ["x"] },
///     "1": { "position": [1, 0, 0], "opened_connection_list": ["-x"] }
/// }"#)?;
///
/// let node = table.node_at(LatticeCoord::new(1, 0, 0)).unwrap();
/// assert!(node.active().contains(Direction::NegX));
/// assert_eq!(node.closed().len(), 5);
/// # Ok::<(), pipe_io::PersistError>(())
/// ```
pub fn from_json_str(json: &str) -> PersistResult<NodeTable> {
    let raw: BTreeMap<String, NodeRecordIn> = serde_json::from_str(json)?;
    build_table(raw)
}

/// Reads a node table from JSON in `reader`.
///
/// # Errors
///
/// Same as [`from_json_str`], plus [`PersistError::Io`].
pub fn read_json<R: Read>(reader: R) -> PersistResult<NodeTable> {
    let raw: BTreeMap<String, NodeRecordIn> = serde_json::from_reader(reader)?;
    build_table(raw)
}

fn build_table(raw: BTreeMap<String, NodeRecordIn>) -> PersistResult<NodeTable> {
    let mut numbered = BTreeMap::new();
    for (key, record) in raw {
        let id: usize = key
            .trim()
            .parse()
            .map_err(|_| PersistError::invalid_node(key.as_str(), "id is not a non-negative integer"))?;
        let node = record.into_node(&key)?;
        if numbered.insert(id, node).is_some() {
            return Err(PersistError::invalid_node(key, "id appears more than once"));
        }
    }

    let dense = numbered.keys().enumerate().all(|(i, &id)| i == id);
    if !dense {
        debug!("Renumbering {} nodes with sparse ids", numbered.len());
    }
    Ok(NodeTable::from_nodes(numbered.into_values())?)
}

/// Saves a node table to a JSON file.
///
/// # Errors
///
/// Returns [`PersistError::Io`] if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use pipe_io::save_json;
/// use pipe_types::NodeTable;
///
/// save_json(&NodeTable::new(), "network.json").unwrap();
/// ```
pub fn save_json<P: AsRef<Path>>(table: &NodeTable, path: P) -> PersistResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_json(table, BufWriter::new(file))?;
    info!("Saved {} nodes to {}", table.len(), path.display());
    Ok(())
}

/// Loads a node table from a JSON file.
///
/// # Errors
///
/// Returns [`PersistError::FileNotFound`] if the file does not exist, and
/// otherwise the same errors as [`read_json`].
///
/// # Example
///
/// ```no_run
/// use pipe_io::load_json;
///
/// let table = load_json("network.json").unwrap();
/// println!("Loaded {} nodes", table.len());
/// ```
pub fn load_json<P: AsRef<Path>>(path: P) -> PersistResult<NodeTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PersistError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PersistError::Io(e)
        }
    })?;
    let table = read_json(BufReader::new(file))?;
    info!("Loaded {} nodes from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pipe_types::{Direction, NodeId, PipeError};

    fn two_nodes() -> NodeTable {
        NodeTable::from_nodes([
            Node::finalized(LatticeCoord::origin(), PortSet::single(Direction::PosY)),
            Node::finalized(
                LatticeCoord::new(0, 1, 0),
                PortSet::from([Direction::NegY, Direction::PosZ]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_writes_expected_keys() {
        let json = to_json_string(&two_nodes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["1"];
        assert_eq!(first["position"], serde_json::json!([0, 1, 0]));
        assert_eq!(first["opened_connection_list"], serde_json::json!(["-y", "z"]));
        assert!(first.get("active_connection_list").is_none());
        assert_eq!(
            first["closed_connection_list"],
            serde_json::json!(["x", "-x", "y", "-z"])
        );
    }

    #[test]
    fn test_string_round_trip() {
        let table = two_nodes();
        let back = from_json_str(&to_json_string(&table).unwrap()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_sparse_ids_are_renumbered_in_order() {
        let table = from_json_str(
            r#"{
                "10": { "position": [0, 0, 2], "active_connection_list": ["-z"] },
                "2":  { "position": [0, 0, 0], "active_connection_list": ["z"] },
                "5":  { "position": [0, 0, 1], "active_connection_list": ["z", "-z"] }
            }"#,
        )
        .unwrap();
        let positions: Vec<_> = table.iter().map(|(_, n)| n.position().z).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(table.id_at(LatticeCoord::new(0, 0, 2)), Some(NodeId::new(2)));
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let err = from_json_str(r#"{ "a": { "position": [0, 0, 0], "active_connection_list": [] } }"#)
            .unwrap_err();
        assert!(matches!(err, PersistError::InvalidNode { ref id, .. } if id == "a"));
    }

    #[test]
    fn test_repeated_id_rejected() {
        let err = from_json_str(
            r#"{
                "1":  { "position": [0, 0, 0], "active_connection_list": [] },
                "01": { "position": [1, 0, 0], "active_connection_list": [] }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, PersistError::InvalidNode { .. }));
    }

    #[test]
    fn test_overlapping_lists_rejected() {
        let err = from_json_str(
            r#"{ "0": {
                "position": [0, 0, 0],
                "active_connection_list": ["x"],
                "closed_connection_list": ["x", "-x", "y", "-y", "z", "-z"]
            } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both active and closed"));
    }

    #[test]
    fn test_incomplete_lists_rejected() {
        let err = from_json_str(
            r#"{ "0": {
                "position": [0, 0, 0],
                "active_connection_list": ["x"],
                "closed_connection_list": ["-x"]
            } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("neither active nor closed"));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = from_json_str(r#"{ "0": { "position": [0, 0, 0], "active_connection_list": ["w"] } }"#)
            .unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }

    #[test]
    fn test_shared_position_rejected() {
        let err = from_json_str(
            r#"{
                "0": { "position": [3, 3, 3], "active_connection_list": [] },
                "1": { "position": [3, 3, 3], "active_connection_list": [] }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PersistError::Table(PipeError::PositionOccupied { .. })
        ));
    }

    #[test]
    fn test_opposite_lattice_edges_stay_apart() {
        let table = from_json_str(
            r#"{
                "0": { "position": [2147483647, 0, 0], "opened_connection_list": ["x"] },
                "1": { "position": [-2147483648, 0, 0], "opened_connection_list": ["-x"] }
            }"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        let far = table.get(NodeId::new(0)).unwrap().position();
        let near = table.get(NodeId::new(1)).unwrap().position();
        assert_eq!(far.direction_to(near), None);
        assert_eq!(far.checked_step(Direction::PosX), None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PersistError::FileNotFound { .. }));
    }
}
