//! A constant-probability model.

use crate::{BehaviorError, BehaviorResult, PurchaseAssessment, PurchaseContext, PurchaseModel, Triggers};

/// A [`PurchaseModel`] that ignores the customer and always returns the same
/// chance, with no approach threshold.
///
/// Useful in tests and for calibration runs that isolate walking and queueing
/// from buying behaviour.
#[derive(Copy, Clone, Debug)]
pub struct FixedChance(f64);

impl FixedChance {
    pub fn new(chance: f64) -> BehaviorResult<Self> {
        if (0.0..=1.0).contains(&chance) {
            Ok(Self(chance))
        } else {
            Err(BehaviorError::Config(format!("fixed chance {chance} is not in [0, 1]")))
        }
    }

    /// Every customer buys everything they reach.
    pub fn always() -> Self {
        Self(1.0)
    }

    /// Nobody buys anything.
    pub fn never() -> Self {
        Self(0.0)
    }
}

impl PurchaseModel for FixedChance {
    fn assess(&self, _ctx: &PurchaseContext<'_>) -> PurchaseAssessment {
        PurchaseAssessment { chance: self.0, triggers: Triggers::default() }
    }
}
