//! `sf-schedule`: when customers arrive and how they are batched.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                |
//! |-------------------|---------------------------------------------------------|
//! | [`scheduler`]     | `Scheduler`: arrival assignment, cohort construction    |
//! | [`cohort`]        | `CohortKind` (morning/peak/evening), `Cohort`           |
//! | [`arrival_queue`] | `ArrivalQueue` (`BTreeMap<SimTime, Vec<AgentId>>`)      |
//! | [`pacing`]        | `Pacer`: optional wall-clock pauses between cohorts     |
//! | [`error`]         | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Cohort model (summary)
//!
//! Cohorts run strictly in chronological order.  Every customer of a cohort
//! is simulated concurrently against the shared floor; the next cohort only
//! starts once all of them have finished.

pub mod arrival_queue;
pub mod cohort;
pub mod error;
pub mod pacing;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use arrival_queue::ArrivalQueue;
pub use cohort::{Cohort, CohortKind};
pub use error::{ScheduleError, ScheduleResult};
pub use pacing::Pacer;
pub use scheduler::Scheduler;
