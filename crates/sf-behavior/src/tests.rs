//! Unit tests for sf-behavior.

#[cfg(test)]
mod helpers {
    use sf_agent::AgentProfile;
    use sf_core::SimTime;
    use sf_spatial::ProductInfo;

    use crate::PurchaseContext;

    pub fn ctx<'a>(
        profile: &'a AgentProfile,
        category: &'a str,
        product: &'a ProductInfo,
        shelf_quality: f64,
    ) -> PurchaseContext<'a> {
        PurchaseContext { profile, category, product, shelf_quality, now: SimTime::from_hms(10, 0, 0) }
    }

    pub fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Additive model ────────────────────────────────────────────────────────────

#[cfg(test)]
mod additive {
    use sf_agent::{AgentProfile, ProfileBuilder};
    use sf_core::SimTime;
    use sf_spatial::ProductInfo;

    use super::helpers::{close, ctx};
    use crate::{AdditivePurchaseModel, PurchaseModel};

    #[test]
    fn plain_product_gets_base_times_quality() {
        let model = AdditivePurchaseModel::default();
        let profile = AgentProfile::new("a");
        let product = ProductInfo::new("milk");
        let a = model.assess(&ctx(&profile, "Dairy", &product, 1.0));
        assert!(close(a.chance, 0.2));
        let a = model.assess(&ctx(&profile, "Dairy", &product, 0.5));
        assert!(close(a.chance, 0.1));
        assert!(!a.triggers.motive && !a.triggers.fear && !a.triggers.discount);
    }

    #[test]
    fn milk_scenario_clears_the_approach_threshold() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a")
            .shopping_list(["milk"])
            .preference("milk")
            .budget("Dairy", 1.0)
            .build();
        let product = ProductInfo::new("milk");
        // Never-visited shelf.
        let quality = model.shelf_quality(0);
        let a = model.assess(&ctx(&profile, "Dairy", &product, quality));
        // 0.2 * 0.5 + 0.1 + 0.2 * 1.0
        assert!(close(a.chance, 0.4), "got {}", a.chance);
        assert!(a.chance >= model.approach_threshold());
    }

    #[test]
    fn motive_needs_a_discount() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a").motive("buy cheap").build();

        let plain = ProductInfo::new("tea");
        let a = model.assess(&ctx(&profile, "Tea", &plain, 1.0));
        assert!(!a.triggers.motive);

        let sale = ProductInfo::new("tea").with_discount(20.0);
        let a = model.assess(&ctx(&profile, "Tea", &sale, 1.0));
        assert!(a.triggers.motive && a.triggers.discount);
        // 0.2 + 0.3 motive + 0.1 * 2 discount
        assert!(close(a.chance, 0.7), "got {}", a.chance);
    }

    #[test]
    fn fear_penalises_undiscounted_products() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a").fear("нет скидок").build();

        let plain = ProductInfo::new("tea");
        let a = model.assess(&ctx(&profile, "Tea", &plain, 1.0));
        assert!(a.triggers.fear);
        assert_eq!(a.chance, 0.0, "0.2 - 0.3 clamps to zero");

        let sale = ProductInfo::new("tea").with_discount(10.0);
        let a = model.assess(&ctx(&profile, "Tea", &sale, 1.0));
        assert!(!a.triggers.fear);
    }

    #[test]
    fn expired_discount_does_not_count() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a").motive("cheap").build();
        let mut product = ProductInfo::new("tea").with_discount(50.0);
        product.time_discount_end = Some(SimTime::from_hms(9, 0, 0));
        let a = model.assess(&ctx(&profile, "Tea", &product, 1.0));
        assert!(!a.triggers.discount && !a.triggers.motive);
        assert!(close(a.chance, 0.2));
    }

    #[test]
    fn budget_and_preference_add_up() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a").preference("TEA").budget("tea", 0.5).build();
        let product = ProductInfo::new("tea");
        let a = model.assess(&ctx(&profile, "Tea", &product, 1.0));
        // 0.2 + 0.1 + 0.2 * 0.5
        assert!(close(a.chance, 0.4), "got {}", a.chance);
    }

    #[test]
    fn shelf_quality_ramps_to_one() {
        let model = AdditivePurchaseModel::default();
        assert!(close(model.shelf_quality(0), 0.5));
        assert!(close(model.shelf_quality(5), 0.75));
        assert!(close(model.shelf_quality(10), 1.0));
        assert!(close(model.shelf_quality(1_000), 1.0));
    }

    #[test]
    fn nan_budget_collapses_to_zero() {
        let model = AdditivePurchaseModel::default();
        let profile = ProfileBuilder::new("a").budget("Tea", f64::NAN).build();
        let product = ProductInfo::new("tea");
        assert_eq!(model.assess(&ctx(&profile, "Tea", &product, 1.0)).chance, 0.0);
    }
}

// ── Clamping property ─────────────────────────────────────────────────────────

#[cfg(test)]
mod clamping {
    use proptest::prelude::*;

    use sf_agent::ProfileBuilder;
    use sf_spatial::ProductInfo;

    use super::helpers::ctx;
    use crate::{AdditivePurchaseModel, PurchaseModel};

    proptest! {
        #[test]
        fn chance_is_always_a_probability(
            discount in -1.0e6f64..1.0e6,
            share in 0.0f64..1.0e6,
            quality in -10.0f64..10.0,
            cheap in any::<bool>(),
            afraid in any::<bool>(),
            prefers in any::<bool>(),
        ) {
            let mut builder = ProfileBuilder::new("p").budget("Cat", share);
            if cheap { builder = builder.motive("cheap"); }
            if afraid { builder = builder.fear("no discount"); }
            if prefers { builder = builder.preference("x"); }
            let profile = builder.build();
            let product = ProductInfo::new("x").with_discount(discount);

            let a = AdditivePurchaseModel::default().assess(&ctx(&profile, "Cat", &product, quality));
            prop_assert!((0.0..=1.0).contains(&a.chance), "chance {} out of range", a.chance);
        }
    }
}

// ── Fixed model ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod fixed {
    use sf_agent::AgentProfile;
    use sf_spatial::ProductInfo;

    use super::helpers::ctx;
    use crate::{FixedChance, PurchaseModel};

    #[test]
    fn constant_chance_and_no_threshold() {
        let profile = AgentProfile::new("a");
        let product = ProductInfo::new("x");
        let model = FixedChance::new(0.25).unwrap();
        assert_eq!(model.assess(&ctx(&profile, "C", &product, 0.0)).chance, 0.25);
        assert_eq!(model.approach_threshold(), 0.0);
        assert_eq!(model.shelf_quality(0), 1.0);
        assert_eq!(FixedChance::always().assess(&ctx(&profile, "C", &product, 0.0)).chance, 1.0);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(FixedChance::new(1.01).is_err());
        assert!(FixedChance::new(-0.5).is_err());
    }
}
