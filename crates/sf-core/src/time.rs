//! Simulated store clock.
//!
//! # Design
//!
//! Time is a `SimTime`: milliseconds since midnight of the simulated day.
//! Integer milliseconds keep per-cell movement arithmetic exact (0.6 s per
//! cell accumulates without floating-point drift), so "each step advances the
//! clock by exactly one cell duration" holds bit-for-bit.
//!
//! On the wire (`serde`) a `SimTime` is seconds since midnight as a number,
//! which is what the store's reporting tools plot.  Configuration files may
//! also write it as `"HH:MM"` or `"HH:MM:SS"`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CoreError;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated time of day, in milliseconds since midnight.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        SimTime(ms)
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        SimTime(secs * 1_000)
    }

    #[inline]
    pub const fn from_hms(h: u64, m: u64, s: u64) -> Self {
        SimTime::from_secs(h * 3_600 + m * 60 + s)
    }

    /// Fractional seconds; negative or non-finite input saturates to midnight.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            SimTime((secs * 1_000.0).round() as u64)
        } else {
            SimTime::MIDNIGHT
        }
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// The time `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Parse `"HH:MM"` or `"HH:MM:SS"`.
    pub fn parse_clock(s: &str) -> Result<SimTime, CoreError> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(CoreError::Parse(format!(
                "invalid clock time {s:?}: expected \"HH:MM\" or \"HH:MM:SS\""
            )));
        }
        let mut fields = [0u64; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| CoreError::Parse(format!("invalid clock time {s:?}")))?;
        }
        let [h, m, sec] = fields;
        if h > 24 || m > 59 || sec > 59 {
            return Err(CoreError::Parse(format!("clock time {s:?} out of range")));
        }
        Ok(SimTime::from_hms(h, m, sec))
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0 / 1_000;
        let (h, m, s) = (total_secs / 3_600, (total_secs % 3_600) / 60, total_secs % 60);
        let ms = self.0 % 1_000;
        if ms == 0 {
            write!(f, "{h:02}:{m:02}:{s:02}")
        } else {
            write!(f, "{h:02}:{m:02}:{s:02}.{ms:03}")
        }
    }
}

impl Serialize for SimTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

impl<'de> Deserialize<'de> for SimTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Secs(f64),
            Clock(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Secs(secs) if secs >= 0.0 => Ok(SimTime::from_secs_f64(secs)),
            Repr::Secs(secs) => Err(serde::de::Error::custom(format!(
                "negative time of day: {secs}"
            ))),
            Repr::Clock(s) => SimTime::parse_clock(&s).map_err(serde::de::Error::custom),
        }
    }
}

// ── StoreHours ────────────────────────────────────────────────────────────────

/// Opening and closing time of the simulated store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHours {
    pub open:  SimTime,
    pub close: SimTime,
}

impl StoreHours {
    /// `true` once `t` is strictly past closing time.
    #[inline]
    pub fn is_closed_at(&self, t: SimTime) -> bool {
        t > self.close
    }

    /// Length of the trading day in milliseconds.
    #[inline]
    pub fn span_ms(&self) -> u64 {
        self.close.since(self.open)
    }
}

impl Default for StoreHours {
    fn default() -> Self {
        Self {
            open:  SimTime::from_hms(8, 0, 0),
            close: SimTime::from_hms(20, 0, 0),
        }
    }
}
