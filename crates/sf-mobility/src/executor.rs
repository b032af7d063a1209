//! Cell-by-cell movement along a planned path.

use tracing::debug;

use sf_agent::PathEntry;
use sf_core::{Cell, SimConfig, SimTime};
use sf_spatial::{GridPath, Pathfinder, SpatialResult};

use crate::{FloorAccess, MobilityError, MobilityResult};

// ── MoveOutcome ───────────────────────────────────────────────────────────────

/// How a walk ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// Reached the goal.
    Ok,
    /// A step took the clock past closing time.  That step is still logged.
    StoreClosed,
    /// Blocked, and re-planning failed or ran out of attempts.
    NoPath,
}

/// Result of [`MovementExecutor::advance`].
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// Cell the customer ends on (and holds).
    pub position: Cell,
    pub time:     SimTime,
    pub status:   MoveStatus,
    /// One step entry per cell entered, in order.
    pub log:      Vec<PathEntry>,
    /// Re-plans performed on the way.
    pub reroutes: u32,
}

// ── MovementExecutor ──────────────────────────────────────────────────────────

/// Walks customers along [`GridPath`]s against the shared floor.
///
/// # Type parameter
///
/// `P` is the path search used for re-planning (e.g.
/// [`sf_spatial::BfsPathfinder`]); the same instance plans the initial paths
/// through [`plan`](Self::plan).
pub struct MovementExecutor<P: Pathfinder> {
    pub pathfinder:   P,
    cell_duration_ms: u64,
    close:            SimTime,
    max_reroutes:     u32,
}

enum Step {
    Moved,
    Blocked(SpatialResult<GridPath>),
}

impl<P: Pathfinder> MovementExecutor<P> {
    pub fn new(pathfinder: P, cell_duration_ms: u64, close: SimTime, max_reroutes: u32) -> Self {
        Self { pathfinder, cell_duration_ms, close, max_reroutes }
    }

    pub fn from_config(pathfinder: P, cfg: &SimConfig) -> Self {
        Self::new(pathfinder, cfg.grid.cell_duration_ms, cfg.hours.close, cfg.movement.max_reroutes)
    }

    #[inline]
    pub fn cell_duration_ms(&self) -> u64 {
        self.cell_duration_ms
    }

    /// Plan a path against the current occupancy, under the floor lock.
    pub fn plan<F: FloorAccess>(&self, floor: &F, from: Cell, to: Cell) -> SpatialResult<GridPath> {
        floor.with_floor(|grid| self.pathfinder.find_path(grid, from, to))
    }

    /// Walk `path` starting at `now`.
    ///
    /// The caller already holds the first cell; it is neither re-claimed nor
    /// logged.  Each later cell is checked and claimed in one lock section:
    ///
    /// - if it is occupied and is not the goal, the rest of the walk is
    ///   re-planned from the current cell under that same lock, at most
    ///   `max_reroutes` times;
    /// - otherwise the previous cell is released, the new one claimed and
    ///   visited, and the clock advances by one cell duration.
    ///
    /// The goal is always enterable; goals are fixtures (shelves and
    /// registers), where standing is not an exclusive claim.
    pub fn advance<F: FloorAccess>(
        &self,
        floor: &F,
        path:  GridPath,
        now:   SimTime,
    ) -> MobilityResult<MoveOutcome> {
        let (Some(start), Some(goal)) = (path.start(), path.goal()) else {
            return Err(MobilityError::EmptyPath);
        };

        let mut cells    = path.cells;
        let mut next_idx = 1;
        let mut position = start;
        let mut time     = now;
        let mut reroutes = 0;
        let mut log      = Vec::with_capacity(cells.len().saturating_sub(1));

        while next_idx < cells.len() {
            let next = cells[next_idx];
            let step = floor.with_floor(|grid| {
                if next != goal && grid.is_occupied(next) {
                    return Step::Blocked(self.pathfinder.find_path(grid, position, goal));
                }
                grid.release(position);
                grid.occupy(next);
                grid.record_visit(next);
                Step::Moved
            });

            match step {
                Step::Moved => {
                    position = next;
                    time = time + self.cell_duration_ms;
                    log.push(PathEntry::step(position, time));
                    if time > self.close {
                        return Ok(MoveOutcome {
                            position,
                            time,
                            status: MoveStatus::StoreClosed,
                            log,
                            reroutes,
                        });
                    }
                    next_idx += 1;
                }
                Step::Blocked(replanned) => {
                    reroutes += 1;
                    match replanned {
                        Ok(p) if reroutes <= self.max_reroutes && p.len() >= 2 => {
                            debug!(at = %position, blocked = %next, goal = %goal, reroutes, "re-routed");
                            cells = p.cells;
                            next_idx = 1;
                        }
                        _ => {
                            debug!(at = %position, blocked = %next, goal = %goal, reroutes, "no way around");
                            return Ok(MoveOutcome {
                                position,
                                time,
                                status: MoveStatus::NoPath,
                                log,
                                reroutes,
                            });
                        }
                    }
                }
            }
        }

        Ok(MoveOutcome { position, time, status: MoveStatus::Ok, log, reroutes })
    }
}
