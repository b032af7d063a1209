//! Grid coordinate type.
//!
//! The store floor is a rectangular grid addressed by `(x, z)`, the two
//! horizontal axes of the 3-D store model the layouts come from.  Coordinates
//! are signed so that neighbour arithmetic at the border never wraps; bounds
//! are enforced by the grid, not by this type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One square cell of the store floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

/// Neighbour offsets in enumeration order: east, west, north, south.
///
/// Path search visits neighbours in exactly this order, so ties between
/// equally short paths always resolve the same way.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Cell {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Manhattan (L1) distance: the number of 4-connected steps between two
    /// cells on an empty floor.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// The four orthogonal neighbours in [`NEIGHBOUR_OFFSETS`] order.
    ///
    /// May yield cells outside the grid; callers filter by bounds.
    #[inline]
    pub fn neighbours(self) -> impl Iterator<Item = Cell> {
        NEIGHBOUR_OFFSETS
            .into_iter()
            .map(move |(dx, dz)| Cell::new(self.x + dx, self.z + dz))
    }

    /// `true` if the cell lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.z >= 0 && (self.x as u32) < width && (self.z as u32) < height
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, z): (i32, i32)) -> Self {
        Cell::new(x, z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
