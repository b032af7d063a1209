//! `sf-behavior`: purchase decision models.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`context`]  | `PurchaseContext<'a>`: profile, product, shelf quality, clock |
//! | [`model`]    | `PurchaseModel` trait, `PurchaseAssessment`, `Triggers`       |
//! | [`additive`] | `AdditivePurchaseModel`: the configurable default heuristic   |
//! | [`fixed`]    | `FixedChance`: constant probability, for tests and calibration |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Models only compute probabilities.  The agent state machine draws against
//! them with the customer's own `AgentRng` and does all bookkeeping, so a
//! model never touches shared state and can be called without the floor lock.

pub mod additive;
pub mod context;
pub mod error;
pub mod fixed;
pub mod model;

#[cfg(test)]
mod tests;

pub use additive::AdditivePurchaseModel;
pub use context::PurchaseContext;
pub use error::{BehaviorError, BehaviorResult};
pub use fixed::FixedChance;
pub use model::{PurchaseAssessment, PurchaseModel, Triggers};
