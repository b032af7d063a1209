//! Path search trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The movement executor and the agent state machine call path search through
//! the [`Pathfinder`] trait, so a weighted or congestion-aware search can be
//! swapped in without touching either.  The default [`BfsPathfinder`] finds a
//! shortest 4-connected path.
//!
//! # Determinism
//!
//! Neighbours are expanded in the fixed east, west, north, south order of
//! [`Cell::neighbours`], so identical occupancy always yields the identical
//! path.

use std::collections::VecDeque;

use sf_core::Cell;

use crate::{FloorGrid, SpatialError, SpatialResult};

// ── GridPath ──────────────────────────────────────────────────────────────────

/// An ordered walk from `start` to `goal`, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPath {
    pub cells: Vec<Cell>,
}

impl GridPath {
    /// The single-cell path of an agent already at its goal.
    pub fn trivial(cell: Cell) -> Self {
        Self { cells: vec![cell] }
    }

    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (`len - 1`).
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Contract
///
/// - `start == goal` yields a single-cell path.
/// - Occupied cells are blocked, except the goal, which is always enterable.
/// - The start cell is never checked for occupancy (the caller stands on it).
/// - A start or goal off the floor is [`SpatialError::OutOfBounds`].
/// - Disconnected endpoints are [`SpatialError::NoPath`].
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every worker thread of a cohort.
pub trait Pathfinder: Send + Sync {
    fn find_path(&self, grid: &FloorGrid, start: Cell, goal: Cell) -> SpatialResult<GridPath>;
}

// ── BfsPathfinder ─────────────────────────────────────────────────────────────

/// Unweighted breadth-first search over the 4-connected floor.
#[derive(Copy, Clone, Debug, Default)]
pub struct BfsPathfinder;

impl Pathfinder for BfsPathfinder {
    fn find_path(&self, grid: &FloorGrid, start: Cell, goal: Cell) -> SpatialResult<GridPath> {
        bfs(grid, start, goal)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

/// Row-major index of an in-bounds cell.
#[inline]
fn slot(grid: &FloorGrid, cell: Cell) -> usize {
    cell.z as usize * grid.width() as usize + cell.x as usize
}

fn bfs(grid: &FloorGrid, start: Cell, goal: Cell) -> SpatialResult<GridPath> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    if start == goal {
        return Ok(GridPath::trivial(start));
    }

    let n = grid.width() as usize * grid.height() as usize;
    // prev[i] = cell we reached slot i from; `None` for unreached cells.
    let mut prev: Vec<Option<Cell>> = vec![None; n];
    let mut seen = vec![false; n];
    seen[slot(grid, start)] = true;

    let mut frontier = VecDeque::from([start]);
    while let Some(cell) = frontier.pop_front() {
        for next in cell.neighbours() {
            if !grid.in_bounds(next) {
                continue;
            }
            let i = slot(grid, next);
            if seen[i] || (next != goal && grid.is_occupied(next)) {
                continue;
            }
            seen[i] = true;
            prev[i] = Some(cell);
            if next == goal {
                return Ok(reconstruct(grid, &prev, start, goal));
            }
            frontier.push_back(next);
        }
    }

    Err(SpatialError::NoPath { from: start, to: goal })
}

fn reconstruct(grid: &FloorGrid, prev: &[Option<Cell>], start: Cell, goal: Cell) -> GridPath {
    let mut cells = vec![goal];
    let mut cur = goal;
    while cur != start {
        match prev[slot(grid, cur)] {
            Some(p) => {
                cells.push(p);
                cur = p;
            }
            None => break,
        }
    }
    cells.reverse();
    GridPath { cells }
}
