//! Compact sets of port directions.

use std::fmt;

use crate::direction::Direction;

/// A set of [`Direction`]s stored as a six-bit mask.
///
/// Iteration always follows the canonical order of [`Direction::ALL`].
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, PortSet};
///
/// let mut ports = PortSet::empty();
/// ports.insert(Direction::PosZ);
/// ports.insert(Direction::NegX);
///
/// assert_eq!(ports.len(), 2);
/// assert_eq!(ports.complement().len(), 4);
/// assert_eq!(
///     ports.iter().collect::<Vec<_>>(),
///     vec![Direction::NegX, Direction::PosZ],
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PortSet(u8);

impl PortSet {
    const MASK: u8 = 0b0011_1111;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set of all six directions.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// A set holding a single direction.
    #[must_use]
    pub const fn single(direction: Direction) -> Self {
        Self(Self::bit(direction))
    }

    const fn bit(direction: Direction) -> u8 {
        1 << direction.index()
    }

    /// Adds a direction. Returns `true` if it was not already present.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let added = !self.contains(direction);
        self.0 |= Self::bit(direction);
        added
    }

    /// Removes a direction. Returns `true` if it was present.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let present = self.contains(direction);
        self.0 &= !Self::bit(direction);
        present
    }

    /// Returns `true` if the direction is in the set.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if all six directions are present.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == Self::MASK
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Set intersection.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Directions in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Directions not in `self`.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    /// Returns `true` if the two sets share no direction.
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Iterates the directions in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }

    /// Collects the directions into a vector in canonical order.
    #[must_use]
    pub fn to_vec(self) -> Vec<Direction> {
        self.iter().collect()
    }
}

impl FromIterator<Direction> for PortSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::empty();
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl<const N: usize> From<[Direction; N]> for PortSet {
    fn from(directions: [Direction; N]) -> Self {
        directions.into_iter().collect()
    }
}

impl Extend<Direction> for PortSet {
    fn extend<I: IntoIterator<Item = Direction>>(&mut self, iter: I) {
        for d in iter {
            self.insert(d);
        }
    }
}

impl fmt::Debug for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Direction::token)).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PortSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PortSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let directions = Vec::<Direction>::deserialize(deserializer)?;
        Ok(directions.into_iter().collect())
    }
}
