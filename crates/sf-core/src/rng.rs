//! Deterministic per-agent and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! A run is seeded exactly once (`SimConfig::seed`).  From that seed:
//!
//! - the run-level [`SimRng`] draws arrival times and shuffles profiles;
//! - every customer gets its own [`AgentRng`] seeded by
//!   `seed XOR (agent_id * MIXING_CONSTANT)`.
//!
//! Because each customer owns its stream, the purchase, breakdown and
//! spontaneous-purchase draws an agent makes do not depend on how the worker
//! threads of a cohort interleave.  The mixing constant is the 64-bit
//! fractional part of the golden ratio, spreading consecutive ids across the
//! seed space.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// One customer's private random stream.
///
/// Created inside the agent's task and dropped with it; never shared.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run seed and the customer's id.
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Bernoulli draw: `true` when a uniform sample in `[0, 1)` falls below `p`.
    ///
    /// `p <= 0` never succeeds and `p >= 1` always does.
    #[inline]
    pub fn draw_below(&mut self, p: f64) -> bool {
        self.0.r#gen::<f64>() < p
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Choose a random element; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG used only on the scheduler thread (arrival assignment).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[lo, hi)`; returns `lo` for an empty range.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo { self.0.gen_range(lo..hi) } else { lo }
    }

    /// Shuffle a slice in place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
