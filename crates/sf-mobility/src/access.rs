//! Lock-scoped access to the shared floor.

use std::sync::Mutex;

use sf_spatial::FloorGrid;

/// Something that owns a [`FloorGrid`] behind a lock.
///
/// Every call to [`with_floor`](Self::with_floor) is one atomic section: the
/// movement executor checks and claims a cell inside a single call, so no two
/// customers can claim the same floor cell.
pub trait FloorAccess: Sync {
    fn with_floor<T>(&self, f: impl FnOnce(&mut FloorGrid) -> T) -> T;
}

/// A bare locked grid, for callers that keep no other shared state.
///
/// A poisoned lock is recovered: the grid is only mutated through whole
/// claim/release pairs, so it is consistent even if a holder panicked.
impl FloorAccess for Mutex<FloorGrid> {
    fn with_floor<T>(&self, f: impl FnOnce(&mut FloorGrid) -> T) -> T {
        let mut grid = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut grid)
    }
}
