//! Arrival assignment and cohort construction.
//!
//! # Arrival model
//!
//! Profiles that carry an `arrival_time` keep it.  The others are shuffled
//! with the run RNG; the first `floor(n × peak_fraction)` arrive uniformly in
//! the peak window, the rest uniformly over the remaining opening hours
//! (`[open, peak_start) ∪ [peak_end, close)`, weighted by length).
//!
//! # Cohorts
//!
//! | Cohort    | Arrivals                    |
//! |-----------|-----------------------------|
//! | Morning   | before `peak_start`         |
//! | Peak      | `[peak_start, peak_end)`    |
//! | Evening   | from `peak_end` on          |

use tracing::debug;

use sf_agent::AgentProfile;
use sf_core::{AgentId, ArrivalConfig, SimRng, SimTime, StoreHours};

use crate::{ArrivalQueue, Cohort, CohortKind, ScheduleError, ScheduleResult};

pub struct Scheduler {
    hours:    StoreHours,
    arrivals: ArrivalConfig,
}

impl Scheduler {
    pub fn new(hours: StoreHours, arrivals: ArrivalConfig) -> ScheduleResult<Self> {
        if !(0.0..=1.0).contains(&arrivals.peak_fraction) {
            return Err(ScheduleError::PeakFraction(arrivals.peak_fraction));
        }
        let ordered = hours.open <= arrivals.peak_start
            && arrivals.peak_start <= arrivals.peak_end
            && arrivals.peak_end <= hours.close;
        if !ordered {
            return Err(ScheduleError::PeakOutsideHours {
                start: arrivals.peak_start,
                end:   arrivals.peak_end,
                open:  hours.open,
                close: hours.close,
            });
        }
        Ok(Self { hours, arrivals })
    }

    /// `[start, end)` of a cohort window; `None` for open-ended.
    pub fn window(&self, kind: CohortKind) -> (Option<SimTime>, Option<SimTime>) {
        match kind {
            CohortKind::Morning => (None, Some(self.arrivals.peak_start)),
            CohortKind::Peak => (Some(self.arrivals.peak_start), Some(self.arrivals.peak_end)),
            CohortKind::Evening => (Some(self.arrivals.peak_end), None),
        }
    }

    /// Arrival time of every profile, indexed by `AgentId`.
    pub fn assign_arrivals(&self, profiles: &[AgentProfile], rng: &mut SimRng) -> Vec<SimTime> {
        let mut arrivals: Vec<SimTime> = profiles
            .iter()
            .map(|p| p.arrival_time.unwrap_or(self.hours.open))
            .collect();

        let mut unassigned: Vec<AgentId> = profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival_time.is_none())
            .map(|(i, _)| AgentId(i as u32))
            .collect();
        rng.shuffle(&mut unassigned);

        let peak_count = (unassigned.len() as f64 * self.arrivals.peak_fraction).floor() as usize;
        let (peak, rest) = unassigned.split_at(peak_count);

        let open       = self.hours.open.as_millis() as f64;
        let close      = self.hours.close.as_millis() as f64;
        let peak_start = self.arrivals.peak_start.as_millis() as f64;
        let peak_end   = self.arrivals.peak_end.as_millis() as f64;

        for agent in peak {
            arrivals[agent.index()] = SimTime(rng.uniform(peak_start, peak_end).floor() as u64);
        }

        let before = peak_start - open;
        let off_peak = before + (close - peak_end);
        for agent in rest {
            let r = rng.uniform(0.0, off_peak);
            let t = if r < before { open + r } else { peak_end + (r - before) };
            arrivals[agent.index()] = SimTime(t.floor() as u64);
        }

        debug!(
            total = profiles.len(),
            assigned = unassigned.len(),
            peak = peak_count,
            "arrival times assigned"
        );
        arrivals
    }

    /// Split customers into Morning, Peak and Evening cohorts, dropping empty
    /// ones.  Members are in arrival order.
    pub fn cohorts(&self, arrivals: &[SimTime]) -> Vec<Cohort> {
        let mut queue = ArrivalQueue::from_arrivals(arrivals);
        let mut cohorts = Vec::with_capacity(CohortKind::ALL.len());
        for kind in CohortKind::ALL {
            let (_, end) = self.window(kind);
            let members = queue.drain_until(end);
            if !members.is_empty() {
                cohorts.push(Cohort { kind, members });
            }
        }
        cohorts
    }
}
