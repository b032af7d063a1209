//! Floor occupancy and visit counters.
//!
//! # Occupancy model
//!
//! Two layers make up "occupied":
//!
//! - **fixtures**: every shelf-footprint cell and every register cell.  Static
//!   for the whole run.
//! - **agents**: cells a customer currently stands on, as a per-cell count.
//!
//! A floor cell never holds more than one customer; the movement executor
//! checks [`FloorGrid::is_occupied`] before every claim.  Fixture cells are
//! only ever entered as a path goal (standing "at" a shelf or register), which
//! is not an exclusive claim, so several customers may be counted there.
//!
//! Visit counters are monotonic for the whole run; [`FloorGrid::reset`] clears
//! agent occupancy only.

use rustc_hash::{FxHashMap, FxHashSet};

use sf_core::{Cell, ShelfId};

use crate::{SpatialError, SpatialResult, StoreLayout};

pub struct FloorGrid {
    width:    u32,
    height:   u32,
    fixtures: FxHashSet<Cell>,
    agents:   FxHashMap<Cell, u32>,
    visits:   FxHashMap<Cell, u64>,
}

impl FloorGrid {
    /// An empty floor with no fixtures.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fixtures: FxHashSet::default(),
            agents:   FxHashMap::default(),
            visits:   FxHashMap::default(),
        }
    }

    /// A floor with the given static obstacles.  Cells outside the floor are
    /// ignored.
    pub fn with_fixtures(width: u32, height: u32, fixtures: impl IntoIterator<Item = Cell>) -> Self {
        let mut grid = Self::new(width, height);
        grid.fixtures = fixtures.into_iter().filter(|c| c.within(width, height)).collect();
        grid
    }

    /// Seed fixtures from the placed shelves' footprints and every register.
    pub fn for_layout(layout: &StoreLayout, placed: &[ShelfId], width: u32, height: u32) -> Self {
        let shelf_cells = placed.iter().flat_map(|&id| layout.shelf(id).footprint());
        let register_cells = layout.registers.iter().map(|r| r.cell());
        Self::with_fixtures(width, height, shelf_cells.chain(register_cells))
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.within(self.width, self.height)
    }

    pub fn check_bounds(&self, cell: Cell) -> SpatialResult<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds { cell, width: self.width, height: self.height })
        }
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_fixture(&self, cell: Cell) -> bool {
        self.fixtures.contains(&cell)
    }

    /// `true` if the cell is a fixture or a customer stands on it.
    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.is_fixture(cell) || self.agents.contains_key(&cell)
    }

    /// Customers currently counted on `cell`.
    #[inline]
    pub fn agents_at(&self, cell: Cell) -> u32 {
        self.agents.get(&cell).copied().unwrap_or(0)
    }

    /// Record a customer standing on `cell`.
    pub fn occupy(&mut self, cell: Cell) {
        *self.agents.entry(cell).or_insert(0) += 1;
    }

    /// Record a customer leaving `cell`.  Releasing a free cell is a no-op.
    pub fn release(&mut self, cell: Cell) {
        if let Some(count) = self.agents.get_mut(&cell) {
            *count -= 1;
            if *count == 0 {
                self.agents.remove(&cell);
            }
        }
    }

    /// Total customers on the floor.
    pub fn agent_count(&self) -> u32 {
        self.agents.values().sum()
    }

    /// Drop all agent occupancy, keeping fixtures and visit counters.
    pub fn reset(&mut self) {
        self.agents.clear();
    }

    // ── Visits ────────────────────────────────────────────────────────────

    #[inline]
    pub fn record_visit(&mut self, cell: Cell) {
        *self.visits.entry(cell).or_insert(0) += 1;
    }

    #[inline]
    pub fn visits(&self, cell: Cell) -> u64 {
        self.visits.get(&cell).copied().unwrap_or(0)
    }

    pub fn visit_counts(&self) -> &FxHashMap<Cell, u64> {
        &self.visits
    }

    pub fn total_visits(&self) -> u64 {
        self.visits.values().sum()
    }
}
