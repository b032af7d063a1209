//! `sf-core`: foundational types for the `shopfloor` retail simulation.
//!
//! This crate is a dependency of every other `sf-*` crate.  It has no `sf-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ShelfId`, `RegisterId`                        |
//! | [`cell`]    | `Cell` grid coordinate, Manhattan distance, neighbours    |
//! | [`time`]    | `SimTime` (ms since midnight), `StoreHours`               |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (run-level)              |
//! | [`config`]  | `SimConfig` and its TOML-loadable sections                |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{
    ArrivalConfig, CheckoutConfig, GridConfig, MovementConfig, PacingConfig, PurchaseConfig,
    RecommendationConfig, SimConfig, SpontaneousConfig, MAX_GRID_DIM,
};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, RegisterId, ShelfId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimTime, StoreHours};
