//! Port completion: choosing which extra ports a node opens.
//!
//! Given a target degree and the ports forced by neighbors, the engine
//! decides how many undetermined ports to open and which ones:
//!
//! 1. Target already met: open nothing.
//! 2. Not enough undetermined ports to reach the target: open all of them.
//! 3. One forced port and one port needed: a weighted choice between the
//!    straight continuation (coupler) and a bend (elbow).
//! 4. Otherwise: open the needed number uniformly without replacement.

use rand::Rng;
use rand::seq::SliceRandom;

use pipe_types::{Direction, PipeError, PipeResult, PortSet};

use crate::config::CompletionPolicy;
use crate::reconcile::ForcedPorts;

/// Which branch of the completion rules produced a node's ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionCase {
    /// Forced ports already meet the target.
    TargetMet,
    /// The target was unreachable; every undetermined port was opened.
    Saturated,
    /// Ambiguous two-port case resolved straight through.
    Coupler,
    /// Ambiguous two-port case resolved as a bend.
    Elbow,
    /// Ambiguous two-port case with only one kind of outcome available.
    SingleChoice,
    /// Uniform selection without replacement.
    Uniform,
}

/// Result of port completion for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Ports opened on top of the forced-active ones.
    pub opened: PortSet,
    /// Branch taken.
    pub case: CompletionCase,
    /// Number of undetermined ports at completion time.
    pub selectable: usize,
}

impl Completion {
    /// Final active ports: forced-active plus opened.
    #[must_use]
    pub const fn active(&self, forced: &ForcedPorts) -> PortSet {
        forced.active.union(self.opened)
    }
}

/// Chooses the ports a node opens beyond the forced-active ones.
///
/// `opened` is always a subset of `forced.undetermined()`.
///
/// # Errors
///
/// - [`PipeError::BrokenInvariant`] if a draw is required from an empty
///   pool. The branch conditions rule this out, so hitting it means the
///   forced ports were inconsistent.
/// - [`PipeError::InvalidConfig`] if the coupler/elbow weights do not give a
///   probability.
///
/// # Example
///
/// ```
/// use pipe_gen::{complete_ports, CompletionCase, CompletionPolicy, CouplerElbowWeights, ForcedPorts};
/// use pipe_types::{Direction, PortSet};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let forced = ForcedPorts {
///     active: PortSet::single(Direction::NegX),
///     closed: PortSet::empty(),
/// };
/// let policy = CompletionPolicy {
///     coupler_elbow: CouplerElbowWeights::always_coupler(),
///     special_cases: true,
/// };
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let completion = complete_ports(2, &forced, &policy, &mut rng)?;
/// assert_eq!(completion.case, CompletionCase::Coupler);
/// assert_eq!(completion.opened, PortSet::single(Direction::PosX));
/// # Ok::<(), pipe_types::PipeError>(())
/// ```
pub fn complete_ports<R: Rng + ?Sized>(
    target_degree: usize,
    forced: &ForcedPorts,
    policy: &CompletionPolicy,
    rng: &mut R,
) -> PipeResult<Completion> {
    let selectable = forced.undetermined();
    let available = selectable.len();
    let done = |opened: PortSet, case: CompletionCase| Completion {
        opened,
        case,
        selectable: available,
    };

    let need = target_degree.saturating_sub(forced.active.len());
    if need == 0 {
        return Ok(done(PortSet::empty(), CompletionCase::TargetMet));
    }
    if need > available {
        return Ok(done(selectable, CompletionCase::Saturated));
    }

    if policy.special_cases && need == 1 && forced.active.len() == 1 {
        let straight = forced
            .active
            .iter()
            .next()
            .map(Direction::opposite)
            .ok_or_else(|| PipeError::broken_invariant("forced-active set lost its port"))?;

        if selectable.contains(straight) && available > 1 {
            let p = policy.coupler_elbow.coupler_probability();
            if !(0.0..=1.0).contains(&p) {
                return Err(PipeError::invalid_config(format!(
                    "coupler probability {p} is not in [0, 1]"
                )));
            }
            if rng.gen_bool(p) {
                return Ok(done(PortSet::single(straight), CompletionCase::Coupler));
            }
            let bend = pick_one(selectable.difference(PortSet::single(straight)), rng)?;
            return Ok(done(PortSet::single(bend), CompletionCase::Elbow));
        }

        let only = pick_one(selectable, rng)?;
        return Ok(done(PortSet::single(only), CompletionCase::SingleChoice));
    }

    let pool = selectable.to_vec();
    let opened: PortSet = pool.choose_multiple(rng, need).copied().collect();
    if opened.len() != need {
        return Err(PipeError::broken_invariant(format!(
            "drew {} of {need} ports from a pool of {available}",
            opened.len()
        )));
    }
    Ok(done(opened, CompletionCase::Uniform))
}

fn pick_one<R: Rng + ?Sized>(pool: PortSet, rng: &mut R) -> PipeResult<Direction> {
    pool.to_vec()
        .choose(rng)
        .copied()
        .ok_or_else(|| PipeError::broken_invariant("cannot draw a port from an empty pool"))
}
