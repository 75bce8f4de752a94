//! Cycle removal for tree-mode generation.
//!
//! A node placed next to two or more nodes that already point at its cell
//! would join parts of the network that are already connected, closing a
//! loop. The resolver keeps one of those links, picked uniformly at random,
//! and severs the rest on both sides.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use pipe_types::{LatticeCoord, NodeTable, PipeError, PipeResult, PortSet};

use crate::reconcile::ForcedPorts;

/// Collapses `forced.active` to at most one direction.
///
/// Every discarded direction `d` is moved to `forced.closed` and the
/// neighbor at `position + d` has its `-d` port closed through
/// [`NodeTable::close_port`]. Only neighbors of `position` are touched and no
/// port is ever re-opened.
///
/// Returns the severed directions (empty when nothing had to change).
///
/// # Errors
///
/// Returns [`PipeError::BrokenInvariant`] if a forced-active direction has no
/// neighbor node or the neighbor's facing port is not active. Either means
/// reconciliation and the table disagree.
///
/// # Example
///
/// ```
/// use pipe_gen::{reconcile, resolve_cycles};
/// use pipe_types::{Direction, LatticeCoord, Node, NodeTable, PortSet};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut table = NodeTable::new();
/// table.insert(Node::finalized(LatticeCoord::new(-1, 0, 0), PortSet::from([Direction::PosX])))?;
/// table.insert(Node::finalized(LatticeCoord::new(1, 0, 0), PortSet::from([Direction::NegX])))?;
///
/// let position = LatticeCoord::origin();
/// let mut forced = reconcile(position, &table);
/// assert_eq!(forced.active.len(), 2);
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let severed = resolve_cycles(position, &mut forced, &mut table, &mut rng)?;
///
/// assert_eq!(forced.active.len(), 1);
/// assert_eq!(severed.len(), 1);
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
pub fn resolve_cycles<R: Rng + ?Sized>(
    position: LatticeCoord,
    forced: &mut ForcedPorts,
    table: &mut NodeTable,
    rng: &mut R,
) -> PipeResult<PortSet> {
    if forced.active.len() <= 1 {
        return Ok(PortSet::empty());
    }

    let candidates = forced.active.to_vec();
    let keep = *candidates.choose(rng).ok_or_else(|| {
        PipeError::broken_invariant(format!("no forced-active port to keep at {position}"))
    })?;
    let severed = forced.active.difference(PortSet::single(keep));

    // Every neighbor is looked up and checked before any port is closed, so a
    // failure leaves the table untouched.
    let mut targets = Vec::with_capacity(severed.len());
    for direction in severed.iter() {
        let facing = direction.opposite();
        let neighbor = position
            .checked_step(direction)
            .and_then(|cell| table.id_at(cell))
            .filter(|&id| table.get(id).is_some_and(|n| n.active().contains(facing)))
            .ok_or_else(|| {
                PipeError::broken_invariant(format!(
                    "forced-active port {direction} at {position} has no neighbor with an open facing port"
                ))
            })?;
        targets.push((neighbor, facing));
    }
    for (neighbor, facing) in targets {
        table.close_port(neighbor, facing)?;
    }
    forced.closed = forced.closed.union(severed);
    forced.active = PortSet::single(keep);

    debug!(
        "Resolved cycle at {}: kept {}, severed {:?}",
        position, keep, severed
    );
    Ok(severed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use pipe_types::{Direction, Node, NodeId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn place(table: &mut NodeTable, at: [i32; 3], active: &[Direction]) -> NodeId {
        table
            .insert(Node::finalized(at.into(), active.iter().copied().collect()))
            .unwrap()
    }

    #[test]
    fn test_single_forced_port_is_untouched() {
        let mut table = NodeTable::new();
        place(&mut table, [0, 0, 0], &[Direction::PosX]);
        let position = LatticeCoord::new(1, 0, 0);
        let mut forced = reconcile(position, &table);
        let before = forced;
        let mut rng = StdRng::seed_from_u64(0);
        let severed = resolve_cycles(position, &mut forced, &mut table, &mut rng).unwrap();
        assert!(severed.is_empty());
        assert_eq!(forced, before);
    }

    #[test]
    fn test_severed_ports_are_mirrored_on_neighbors() {
        // Three nodes all pointing at the origin.
        let mut table = NodeTable::new();
        let a = place(&mut table, [1, 0, 0], &[Direction::NegX, Direction::PosX]);
        let b = place(&mut table, [0, 1, 0], &[Direction::NegY]);
        let c = place(&mut table, [0, 0, -1], &[Direction::PosZ, Direction::NegY]);

        let position = LatticeCoord::origin();
        let mut forced = reconcile(position, &table);
        assert_eq!(forced.active.len(), 3);

        let mut rng = StdRng::seed_from_u64(11);
        let severed = resolve_cycles(position, &mut forced, &mut table, &mut rng).unwrap();

        assert_eq!(severed.len(), 2);
        assert_eq!(forced.active.len(), 1);
        assert!(forced.active.is_disjoint(forced.closed));
        assert_eq!(forced.closed, severed);

        for (id, dir) in [(a, Direction::PosX), (b, Direction::PosY), (c, Direction::NegZ)] {
            let neighbor = table.get(id).unwrap();
            assert!(neighbor.is_finalized());
            let facing = dir.opposite();
            if severed.contains(dir) {
                assert!(neighbor.closed().contains(facing));
            } else {
                assert!(neighbor.active().contains(facing));
                assert!(forced.active.contains(dir));
            }
        }
        // Unrelated ports survive.
        assert!(table.get(a).unwrap().active().contains(Direction::PosX));
        assert!(table.get(c).unwrap().active().contains(Direction::NegY));

        // Reconciling again now sees exactly one open link.
        let again = reconcile(position, &table);
        assert_eq!(again.active, forced.active);
    }

    #[test]
    fn test_keep_choice_varies_with_seed() {
        let mut kept = PortSet::empty();
        for seed in 0..64 {
            let mut table = NodeTable::new();
            place(&mut table, [1, 0, 0], &[Direction::NegX]);
            place(&mut table, [-1, 0, 0], &[Direction::PosX]);
            let position = LatticeCoord::origin();
            let mut forced = reconcile(position, &table);
            let mut rng = StdRng::seed_from_u64(seed);
            resolve_cycles(position, &mut forced, &mut table, &mut rng).unwrap();
            kept = kept.union(forced.active);
        }
        assert_eq!(kept, PortSet::from([Direction::PosX, Direction::NegX]));
    }

    #[test]
    fn test_failed_resolution_leaves_table_untouched() {
        // One real neighbor on +x, none on +y. Whichever link is kept, the
        // missing one must be detected before the real one is severed.
        for seed in 0..16 {
            let mut table = NodeTable::new();
            let real = place(&mut table, [1, 0, 0], &[Direction::NegX]);
            let before = table.clone();
            let position = LatticeCoord::origin();
            let mut forced = ForcedPorts {
                active: PortSet::from([Direction::PosX, Direction::PosY, Direction::PosZ]),
                closed: PortSet::empty(),
            };
            let snapshot = forced;
            let mut rng = StdRng::seed_from_u64(seed);
            let err = resolve_cycles(position, &mut forced, &mut table, &mut rng).unwrap_err();
            assert!(matches!(err, PipeError::BrokenInvariant(_)));
            assert_eq!(table, before);
            assert_eq!(forced, snapshot);
            assert!(table.get(real).unwrap().active().contains(Direction::NegX));
        }
    }

    #[test]
    fn test_missing_neighbor_is_broken_invariant() {
        let mut table = NodeTable::new();
        let position = LatticeCoord::origin();
        let mut forced = ForcedPorts {
            active: PortSet::from([Direction::PosX, Direction::PosY]),
            closed: PortSet::empty(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = resolve_cycles(position, &mut forced, &mut table, &mut rng).unwrap_err();
        assert!(matches!(err, PipeError::BrokenInvariant(_)));
    }
}
