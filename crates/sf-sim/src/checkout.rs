//! Register queues and register choice.

use sf_core::{AgentId, Cell, RegisterId};
use sf_spatial::Register;

/// Customers waiting at (or being served by) one register.
///
/// Capacity is enforced by [`join`](Self::join), which runs inside the floor
/// lock, so the queue never grows past the configured maximum.
#[derive(Clone, Debug, Default)]
pub struct RegisterQueue {
    members: Vec<AgentId>,
    peak:    usize,
    served:  u64,
}

impl RegisterQueue {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Longest the queue has been this run.
    #[inline]
    pub fn peak_length(&self) -> usize {
        self.peak
    }

    /// Customers that have finished queueing here this run.
    #[inline]
    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn is_full(&self, capacity: usize) -> bool {
        self.members.len() >= capacity
    }

    /// Append `agent` unless the queue is full.  Returns the queue length
    /// including the newcomer.
    pub fn join(&mut self, agent: AgentId, capacity: usize) -> Option<usize> {
        if self.is_full(capacity) {
            return None;
        }
        self.members.push(agent);
        self.peak = self.peak.max(self.members.len());
        Some(self.members.len())
    }

    /// Remove `agent` after being served.  Unknown agents are ignored.
    pub fn leave(&mut self, agent: AgentId) {
        if let Some(pos) = self.members.iter().position(|&a| a == agent) {
            self.members.remove(pos);
            self.served += 1;
        }
    }

    /// Empty the queue between cohorts; peak and served counts are kept.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

/// Pick the register minimising `manhattan(from, register) + queue length`.
/// Ties go to the lowest index; `None` only when there are no registers.
pub fn choose_register(registers: &[Register], queues: &[RegisterQueue], from: Cell) -> Option<RegisterId> {
    registers
        .iter()
        .zip(queues)
        .enumerate()
        .min_by_key(|(i, (register, queue))| {
            (from.manhattan(register.cell()) as usize + queue.len(), *i)
        })
        .map(|(i, _)| RegisterId(i as u32))
}

/// Time spent queueing behind `position - 1` customers, plus one's own
/// service.
#[inline]
pub fn queue_wait_ms(position: usize, service_time_ms: u64) -> u64 {
    position as u64 * service_time_ms
}
