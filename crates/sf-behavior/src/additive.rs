//! The default additive purchase heuristic.
//!
//! ```text
//! chance = base × shelf_quality
//!        + motive_bonus            if a motive is value-seeking and the product is discounted
//!        − fear_penalty            if a fear is about missing discounts and the product is not
//!        + discount_bonus × d/10   for a current discount of d percent
//!        + preference_bonus        if the product is a preference
//!        + budget_factor × share   for the share of budget given to the category
//! ```
//!
//! clamped to `[0, 1]`.  The coefficients are heuristics, not measurements;
//! every one of them is a [`PurchaseConfig`] field.

use sf_core::PurchaseConfig;

use crate::{PurchaseAssessment, PurchaseContext, PurchaseModel, Triggers};

pub struct AdditivePurchaseModel {
    cfg: PurchaseConfig,
}

impl AdditivePurchaseModel {
    pub fn new(cfg: PurchaseConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PurchaseConfig {
        &self.cfg
    }
}

impl Default for AdditivePurchaseModel {
    fn default() -> Self {
        Self::new(PurchaseConfig::default())
    }
}

impl PurchaseModel for AdditivePurchaseModel {
    fn assess(&self, ctx: &PurchaseContext<'_>) -> PurchaseAssessment {
        let cfg = &self.cfg;
        let discount = ctx.product.discount_at(ctx.now);
        let discounted = discount > 0.0;

        let triggers = Triggers {
            motive:   discounted && ctx.profile.has_motive(&cfg.value_seeking_keywords),
            fear:     !discounted && ctx.profile.has_fear(&cfg.no_discount_fear_keywords),
            discount: discounted,
        };

        let mut chance = cfg.base_chance * ctx.shelf_quality.clamp(0.0, 1.0);
        if triggers.motive {
            chance += cfg.motive_bonus;
        }
        if triggers.fear {
            chance -= cfg.fear_penalty;
        }
        if discounted {
            chance += cfg.discount_bonus_per_10 * (discount / 10.0);
        }
        if ctx.profile.prefers(&ctx.product.name) {
            chance += cfg.preference_bonus;
        }
        chance += cfg.budget_bonus_factor * ctx.profile.allocation(ctx.category);

        // NaN from a pathological profile share collapses to "never buys".
        let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        PurchaseAssessment { chance, triggers }
    }

    fn approach_threshold(&self) -> f64 {
        self.cfg.min_chance_to_approach
    }

    /// Rises linearly from `min_shelf_quality` for an unvisited shelf to 1.0
    /// once the shelf has had `discovery_visits` arrivals.
    fn shelf_quality(&self, arrivals: u64) -> f64 {
        let min = self.cfg.min_shelf_quality;
        let discovered = (arrivals as f64 / self.cfg.discovery_visits.max(1) as f64).min(1.0);
        min + (1.0 - min) * discovered
    }
}
