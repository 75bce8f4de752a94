//! Integer lattice coordinates.

use std::fmt;

use nalgebra::Point3;

use crate::direction::Direction;

/// A cell of the integer pipe lattice.
///
/// The coordinate is the identity key of a cell: two nodes never share one.
///
/// # Example
///
/// ```
/// use pipe_types::{Direction, LatticeCoord};
///
/// let origin = LatticeCoord::origin();
/// let next = origin.checked_step(Direction::PosX).unwrap();
/// assert_eq!(next, LatticeCoord::new(1, 0, 0));
/// assert_eq!(next.direction_to(origin), Some(Direction::NegX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[i32; 3]", into = "[i32; 3]"))]
pub struct LatticeCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl LatticeCoord {
    /// Creates a new lattice coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The seed cell of every generation run.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the neighboring cell one step away in `direction`, or `None`
    /// if that step leaves the `i32` lattice.
    #[must_use]
    pub const fn checked_step(self, direction: Direction) -> Option<Self> {
        let [dx, dy, dz] = direction.delta();
        match (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) {
            (Some(x), Some(y), Some(z)) => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    /// Iterates the face neighbors in canonical direction order, paired with
    /// the direction leading to them. Cells at the lattice edge have fewer
    /// than six.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Self)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.checked_step(d).map(|n| (d, n)))
    }

    /// Returns the direction leading from `self` to a face-adjacent `other`.
    ///
    /// Returns `None` when the cells are not face-adjacent.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.checked_step(d) == Some(other))
    }

    /// Manhattan (L1) distance between two cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to a world-space point, with `scale` world units per cell.
    ///
    /// # Example
    ///
    /// ```
    /// use pipe_types::LatticeCoord;
    /// use nalgebra::Point3;
    ///
    /// let p = LatticeCoord::new(1, -2, 3).to_point(0.5);
    /// assert_eq!(p, Point3::new(0.5, -1.0, 1.5));
    /// ```
    #[must_use]
    pub fn to_point(self, scale: f64) -> Point3<f64> {
        Point3::new(
            f64::from(self.x) * scale,
            f64::from(self.y) * scale,
            f64::from(self.z) * scale,
        )
    }
}

impl From<[i32; 3]> for LatticeCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<LatticeCoord> for [i32; 3] {
    fn from(coord: LatticeCoord) -> Self {
        coord.as_array()
    }
}

impl From<(i32, i32, i32)> for LatticeCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
