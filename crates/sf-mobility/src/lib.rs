//! `sf-mobility`: moving customers across the shared floor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`access`]   | `FloorAccess`: lock-scoped access to the shared `FloorGrid`     |
//! | [`executor`] | `MovementExecutor<P>`, `MoveOutcome`, `MoveStatus`              |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model (step-and-claim)
//!
//! A walk is a sequence of one-cell steps.  Each step is an atomic section
//! over the floor lock: check the next cell, then either claim it (release
//! the previous cell, record a visit, advance the clock by one cell duration)
//! or re-plan around the blocker.  Customers of one cohort therefore never
//! act on a stale view of occupancy, whatever the thread interleaving.

pub mod access;
pub mod error;
pub mod executor;


pub use access::FloorAccess;
pub use error::{MobilityError, MobilityResult};
pub use executor::{MoveOutcome, MoveStatus, MovementExecutor};
