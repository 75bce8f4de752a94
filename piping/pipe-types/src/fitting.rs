//! Fitting classification of a node's port configuration.
//!
//! Mesh assembly picks one asset per node from the node's active ports.
//! This module only names the fitting; it carries no geometry.

use std::fmt;

use crate::direction::Axis;
use crate::ports::PortSet;

/// The kind of fitting a port configuration calls for.
///
/// Every non-empty [`PortSet`] maps to exactly one kind.
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, FittingKind, PortSet};
///
/// let straight = PortSet::from([Direction::PosX, Direction::NegX]);
/// let bent = PortSet::from([Direction::PosX, Direction::PosZ]);
///
/// assert_eq!(FittingKind::classify(straight), Some(FittingKind::Coupler));
/// assert_eq!(FittingKind::classify(bent), Some(FittingKind::Elbow));
/// assert_eq!(FittingKind::classify(PortSet::empty()), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FittingKind {
    /// One port: a dead end.
    Cap,
    /// Two ports on the same axis: a straight pass-through.
    Coupler,
    /// Two ports on different axes: a 90 degree bend.
    Elbow,
    /// Three ports, two of them on the same axis.
    Tee,
    /// Three ports, one on each axis.
    ThreeWayElbow,
    /// Four ports forming two straight runs.
    Cross,
    /// Four ports: one straight run plus one port on each other axis.
    FourWayTee,
    /// Five ports.
    FiveWayTee,
    /// All six ports.
    Hexagonal,
}

impl FittingKind {
    /// All fitting kinds, ordered by port count.
    pub const ALL: [Self; 9] = [
        Self::Cap,
        Self::Coupler,
        Self::Elbow,
        Self::Tee,
        Self::ThreeWayElbow,
        Self::Cross,
        Self::FourWayTee,
        Self::FiveWayTee,
        Self::Hexagonal,
    ];

    /// Classifies a port configuration. Returns `None` for the empty set.
    #[must_use]
    pub fn classify(ports: PortSet) -> Option<Self> {
        let straight_runs = Axis::ALL
            .into_iter()
            .filter(|axis| axis.directions().into_iter().all(|d| ports.contains(d)))
            .count();

        let kind = match (ports.len(), straight_runs) {
            (0, _) => return None,
            (1, _) => Self::Cap,
            (2, 1) => Self::Coupler,
            (2, _) => Self::Elbow,
            (3, 1) => Self::Tee,
            (3, _) => Self::ThreeWayElbow,
            (4, 2) => Self::Cross,
            (4, _) => Self::FourWayTee,
            (5, _) => Self::FiveWayTee,
            _ => Self::Hexagonal,
        };
        Some(kind)
    }

    /// Number of ports this fitting has.
    #[must_use]
    pub const fn port_count(self) -> usize {
        match self {
            Self::Cap => 1,
            Self::Coupler | Self::Elbow => 2,
            Self::Tee | Self::ThreeWayElbow => 3,
            Self::Cross | Self::FourWayTee => 4,
            Self::FiveWayTee => 5,
            Self::Hexagonal => 6,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cap => "cap",
            Self::Coupler => "coupler",
            Self::Elbow => "elbow",
            Self::Tee => "tee",
            Self::ThreeWayElbow => "three-way elbow",
            Self::Cross => "cross",
            Self::FourWayTee => "four-way tee",
            Self::FiveWayTee => "five-way tee",
            Self::Hexagonal => "hexagonal",
        }
    }
}

impl fmt::Display for FittingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
