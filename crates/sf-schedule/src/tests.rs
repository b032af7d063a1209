//! Unit tests for sf-schedule.

use sf_agent::{AgentProfile, ProfileBuilder};
use sf_core::{ArrivalConfig, StoreHours};

use crate::Scheduler;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scheduler() -> Scheduler {
    Scheduler::new(StoreHours::default(), ArrivalConfig::default()).unwrap()
}

fn anonymous(n: usize) -> Vec<AgentProfile> {
    (0..n).map(|i| AgentProfile::new(format!("c{i}"))).collect()
}

// ── ArrivalQueue ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_queue {
    use sf_core::{AgentId, SimTime};

    use crate::ArrivalQueue;

    #[test]
    fn drains_in_time_order() {
        let mut q = ArrivalQueue::new();
        q.push(SimTime(30), AgentId(0));
        q.push(SimTime(10), AgentId(1));
        q.push(SimTime(10), AgentId(2));
        q.push(SimTime(20), AgentId(3));
        assert_eq!(q.len(), 4);

        let first = q.drain_until(Some(SimTime(20)));
        assert_eq!(first, vec![(SimTime(10), AgentId(1)), (SimTime(10), AgentId(2))]);
        assert_eq!(q.len(), 2);

        let rest = q.drain_until(None);
        assert_eq!(rest, vec![(SimTime(20), AgentId(3)), (SimTime(30), AgentId(0))]);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_of_empty_window() {
        let mut q = ArrivalQueue::from_arrivals(&[SimTime(50)]);
        assert!(q.drain_until(Some(SimTime(50))).is_empty(), "end is exclusive");
        assert_eq!(q.len(), 1);
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use sf_core::{AgentId, ArrivalConfig, SimRng, SimTime, StoreHours};

    use super::*;
    use crate::{CohortKind, ScheduleError};

    #[test]
    fn rejects_peak_outside_hours() {
        let mut arrivals = ArrivalConfig::default();
        arrivals.peak_end = SimTime::from_hms(21, 0, 0);
        let err = Scheduler::new(StoreHours::default(), arrivals).err();
        assert!(matches!(err, Some(ScheduleError::PeakOutsideHours { .. })));

        let mut arrivals = ArrivalConfig::default();
        arrivals.peak_fraction = 2.0;
        assert!(Scheduler::new(StoreHours::default(), arrivals).is_err());
    }

    #[test]
    fn explicit_arrivals_are_kept() {
        let profiles = vec![
            ProfileBuilder::new("a").arriving_at(SimTime::from_hms(9, 30, 0)).build(),
            AgentProfile::new("b"),
        ];
        let arrivals = scheduler().assign_arrivals(&profiles, &mut SimRng::new(1));
        assert_eq!(arrivals[0], SimTime::from_hms(9, 30, 0));
        let hours = StoreHours::default();
        assert!(arrivals[1] >= hours.open && arrivals[1] < hours.close);
    }

    #[test]
    fn peak_share_follows_fraction() {
        let profiles = anonymous(100);
        let arrivals = scheduler().assign_arrivals(&profiles, &mut SimRng::new(7));
        let cfg = ArrivalConfig::default();
        let in_peak = arrivals
            .iter()
            .filter(|t| **t >= cfg.peak_start && **t < cfg.peak_end)
            .count();
        // Exactly 40 are drawn in the window; off-peak draws never land there.
        assert_eq!(in_peak, 40);
        let hours = StoreHours::default();
        assert!(arrivals.iter().all(|t| *t >= hours.open && *t < hours.close));
    }

    #[test]
    fn assignment_is_seeded() {
        let profiles = anonymous(30);
        let a = scheduler().assign_arrivals(&profiles, &mut SimRng::new(99));
        let b = scheduler().assign_arrivals(&profiles, &mut SimRng::new(99));
        let c = scheduler().assign_arrivals(&profiles, &mut SimRng::new(100));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn cohorts_split_on_peak_window() {
        let arrivals = vec![
            SimTime::from_hms(15, 0, 0), // 0: evening
            SimTime::from_hms(8, 0, 0),  // 1: morning
            SimTime::from_hms(12, 0, 0), // 2: peak (start inclusive)
            SimTime::from_hms(14, 0, 0), // 3: evening (end exclusive)
            SimTime::from_hms(11, 0, 0), // 4: morning
        ];
        let cohorts = scheduler().cohorts(&arrivals);
        let kinds: Vec<CohortKind> = cohorts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, CohortKind::ALL.to_vec());

        let members = |i: usize| cohorts[i].members.iter().map(|&(_, a)| a).collect::<Vec<_>>();
        assert_eq!(members(0), vec![AgentId(1), AgentId(4)]);
        assert_eq!(members(1), vec![AgentId(2)]);
        assert_eq!(members(2), vec![AgentId(3), AgentId(0)]);
        assert_eq!(cohorts[2].first_arrival(), Some(SimTime::from_hms(14, 0, 0)));
        assert_eq!(cohorts[2].members.last().map(|&(t, _)| t), Some(SimTime::from_hms(15, 0, 0)));
    }

    #[test]
    fn empty_cohorts_are_dropped() {
        let arrivals = vec![SimTime::from_hms(9, 0, 0)];
        let cohorts = scheduler().cohorts(&arrivals);
        assert_eq!(cohorts.len(), 1);
        assert_eq!(cohorts[0].kind, CohortKind::Morning);
        assert!(scheduler().cohorts(&[]).is_empty());
    }
}

// ── Pacer ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pacing {
    use std::time::Duration;

    use sf_core::PacingConfig;

    use crate::Pacer;

    #[test]
    fn off_by_default() {
        let pacer = Pacer::new(&PacingConfig::default());
        assert!(!pacer.is_enabled());
        assert_eq!(pacer.pause_for(3_600_000), Duration::ZERO);
        assert!(!Pacer::off().is_enabled());
    }

    #[test]
    fn scaled_and_capped() {
        let pacer = Pacer::new(&PacingConfig { realtime_scale: 0.001, max_pause_ms: 500 });
        assert_eq!(pacer.pause_for(60_000), Duration::from_millis(60));
        assert_eq!(pacer.pause_for(3_600_000), Duration::from_millis(500));
    }
}
