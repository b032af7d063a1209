//! `ArrivalQueue`: customers ordered by arrival time.
//!
//! A `BTreeMap<SimTime, Vec<AgentId>>`: cohorts are cut from the front with
//! [`drain_until`](ArrivalQueue::drain_until), so building every cohort of a
//! day is one ordered pass.  Customers arriving at the same instant keep
//! their insertion order.

use std::collections::BTreeMap;

use sf_core::{AgentId, SimTime};

#[derive(Default)]
pub struct ArrivalQueue {
    inner: BTreeMap<SimTime, Vec<AgentId>>,
    /// Cached total agent count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every agent at its arrival time; `arrivals` is indexed by `AgentId`.
    pub fn from_arrivals(arrivals: &[SimTime]) -> Self {
        let mut queue = Self::new();
        for (i, &t) in arrivals.iter().enumerate() {
            queue.push(t, AgentId(i as u32));
        }
        queue
    }

    pub fn push(&mut self, time: SimTime, agent: AgentId) {
        self.inner.entry(time).or_default().push(agent);
        self.total += 1;
    }

    /// Remove and return every agent arriving strictly before `end`, in
    /// arrival order.  `None` drains everything.
    pub fn drain_until(&mut self, end: Option<SimTime>) -> Vec<(SimTime, AgentId)> {
        let rest = match end {
            Some(end) => self.inner.split_off(&end),
            None => BTreeMap::new(),
        };
        let drained = std::mem::replace(&mut self.inner, rest);
        let out: Vec<(SimTime, AgentId)> = drained
            .into_iter()
            .flat_map(|(t, agents)| agents.into_iter().map(move |a| (t, a)))
            .collect();
        self.total -= out.len();
        out
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
