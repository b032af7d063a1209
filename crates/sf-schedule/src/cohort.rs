//! Arrival-time cohorts.

use std::fmt;

use sf_core::{AgentId, SimTime};

/// The three arrival windows of a trading day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CohortKind {
    /// Before the rush.
    Morning,
    /// During the rush window.
    Peak,
    /// After the rush.
    Evening,
}

impl CohortKind {
    pub const ALL: [CohortKind; 3] = [CohortKind::Morning, CohortKind::Peak, CohortKind::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            CohortKind::Morning => "morning",
            CohortKind::Peak => "peak",
            CohortKind::Evening => "evening",
        }
    }
}

impl fmt::Display for CohortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch of customers simulated concurrently.
#[derive(Clone, Debug)]
pub struct Cohort {
    pub kind:    CohortKind,
    /// Arrival times and agents, in arrival order.
    pub members: Vec<(SimTime, AgentId)>,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn first_arrival(&self) -> Option<SimTime> {
        self.members.first().map(|(t, _)| *t)
    }
}
