//! State shared by every customer of a cohort.
//!
//! Everything customers mutate concurrently lives in one [`SharedFloor`]
//! behind one mutex.  Each call to [`Floor::with`] is one atomic section;
//! nothing else in the run is shared and mutable.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use sf_behavior::Triggers;
use sf_mobility::FloorAccess;
use sf_spatial::FloorGrid;

use crate::RegisterQueue;

// ── GlobalStats ───────────────────────────────────────────────────────────────

/// Run-wide counters that are not derivable from the outcomes alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_purchases:   u64,
    pub motive_triggers:   u64,
    pub fear_triggers:     u64,
    pub discount_triggers: u64,
    pub breakdowns:        u64,
}

impl GlobalStats {
    pub fn count_triggers(&mut self, triggers: Triggers) {
        self.motive_triggers += u64::from(triggers.motive);
        self.fear_triggers += u64::from(triggers.fear);
        self.discount_triggers += u64::from(triggers.discount);
    }
}

// ── SharedFloor ───────────────────────────────────────────────────────────────

pub struct SharedFloor {
    pub grid:            FloorGrid,
    /// One queue per register, indexed by `RegisterId`.
    pub queues:          Vec<RegisterQueue>,
    /// Planned arrivals per shelf, indexed by `ShelfId`.
    pub shelf_arrivals:  Vec<u64>,
    /// `shelf_arrivals` as it stood when the current cohort started.  Shelf
    /// quality is read from here so that it does not depend on the order in
    /// which the cohort's customers reach their shelves.
    pub cohort_arrivals: Vec<u64>,
    /// Completed purchases per shelf, indexed by `ShelfId`.
    pub shelf_purchases: Vec<u64>,
    pub stats:           GlobalStats,
}

impl SharedFloor {
    pub fn new(grid: FloorGrid, registers: usize, shelves: usize) -> Self {
        Self {
            grid,
            queues:          vec![RegisterQueue::default(); registers],
            shelf_arrivals:  vec![0; shelves],
            cohort_arrivals: vec![0; shelves],
            shelf_purchases: vec![0; shelves],
            stats:           GlobalStats::default(),
        }
    }

    /// Clear customers off the floor and out of the queues before the next
    /// cohort, and freeze the shelf arrivals it will see.  Counters carry over.
    pub fn reset_for_cohort(&mut self) {
        self.grid.reset();
        self.cohort_arrivals.clone_from(&self.shelf_arrivals);
        for queue in &mut self.queues {
            queue.clear();
        }
    }
}

// ── Floor ─────────────────────────────────────────────────────────────────────

/// The lock around [`SharedFloor`].
pub struct Floor {
    inner: Mutex<SharedFloor>,
}

impl Floor {
    pub fn new(shared: SharedFloor) -> Self {
        Self { inner: Mutex::new(shared) }
    }

    /// Run `f` as one atomic section.
    ///
    /// A poisoned lock is recovered; every section leaves the counters and
    /// occupancy in a consistent state before it can panic.
    pub fn with<T>(&self, f: impl FnOnce(&mut SharedFloor) -> T) -> T {
        let mut shared = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut shared)
    }

    pub fn into_inner(self) -> SharedFloor {
        self.inner.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FloorAccess for Floor {
    fn with_floor<T>(&self, f: impl FnOnce(&mut FloorGrid) -> T) -> T {
        self.with(|shared| f(&mut shared.grid))
    }
}
