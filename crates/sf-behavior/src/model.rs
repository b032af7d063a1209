//! The `PurchaseModel` trait: the extension point for buying behaviour.

use crate::PurchaseContext;

/// Which behavioural signals fired during one assessment.
///
/// The run keeps a global count of each; they are counted on every
/// assessment, whether or not the customer then approaches the shelf.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Triggers {
    /// A value-seeking motive met a discounted product.
    pub motive:   bool,
    /// A no-discount fear met an undiscounted product.
    pub fear:     bool,
    /// The product carried a discount.
    pub discount: bool,
}

/// Result of [`PurchaseModel::assess`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PurchaseAssessment {
    /// Purchase probability, always in `[0, 1]`.
    pub chance:   f64,
    pub triggers: Triggers,
}

/// Pluggable purchase decision.
///
/// # Thread safety
///
/// One model instance is shared by every worker thread of a cohort, so
/// implementations must be `Send + Sync` and keep no per-customer state.
/// Randomness is applied by the caller with the customer's own RNG; models
/// only produce probabilities.
pub trait PurchaseModel: Send + Sync {
    /// Probability that the customer buys `ctx.product`.
    fn assess(&self, ctx: &PurchaseContext<'_>) -> PurchaseAssessment;

    /// Customers walk to a shelf only when `chance >= approach_threshold()`.
    ///
    /// Default: `0.0` (always approach).
    fn approach_threshold(&self) -> f64 {
        0.0
    }

    /// Discoverability of a shelf that has been reached `arrivals` times so
    /// far this run.
    ///
    /// Default: `1.0` (every shelf is fully discoverable).
    fn shelf_quality(&self, _arrivals: u64) -> f64 {
        1.0
    }
}
