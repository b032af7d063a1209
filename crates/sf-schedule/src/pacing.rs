//! Optional real-time pacing between cohorts.
//!
//! Pacing only slows the wall clock down for observers watching a run; it
//! never feeds back into simulated time.

use std::time::Duration;

use sf_core::PacingConfig;

#[derive(Copy, Clone, Debug)]
pub struct Pacer {
    scale:        f64,
    max_pause_ms: u64,
}

impl Pacer {
    pub fn new(cfg: &PacingConfig) -> Self {
        Self { scale: cfg.realtime_scale, max_pause_ms: cfg.max_pause_ms }
    }

    /// A pacer that never sleeps.
    pub fn off() -> Self {
        Self { scale: 0.0, max_pause_ms: 0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.scale > 0.0 && self.max_pause_ms > 0
    }

    /// Wall-clock pause for a simulated gap of `gap_ms`, capped.
    pub fn pause_for(&self, gap_ms: u64) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }
        let ms = (gap_ms as f64 * self.scale).min(self.max_pause_ms as f64);
        Duration::from_millis(ms.max(0.0) as u64)
    }

    /// Sleep the calling thread for [`pause_for`](Self::pause_for).
    pub fn pause(&self, gap_ms: u64) {
        let pause = self.pause_for(gap_ms);
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}
