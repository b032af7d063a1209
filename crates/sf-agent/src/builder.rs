//! Fluent construction of [`AgentProfile`]s for tests, demos and embedders
//! that generate customers in code rather than JSON.
//!
//! ```rust
//! use sf_agent::ProfileBuilder;
//!
//! let shopper = ProfileBuilder::new("anna")
//!     .shopping_list(["milk", "bread"])
//!     .preference("milk")
//!     .budget("Dairy", 0.6)
//!     .build();
//!
//! assert_eq!(shopper.shopping_list.len(), 2);
//! assert!(shopper.prefers("MILK"));
//! ```

use sf_core::SimTime;

use crate::AgentProfile;

pub struct ProfileBuilder {
    profile: AgentProfile,
}

impl ProfileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { profile: AgentProfile::new(name) }
    }

    pub fn motive(mut self, motive: impl Into<String>) -> Self {
        self.profile.motives.push(motive.into());
        self
    }

    pub fn fear(mut self, fear: impl Into<String>) -> Self {
        self.profile.fears.push(fear.into());
        self
    }

    pub fn preference(mut self, product: impl Into<String>) -> Self {
        self.profile.preferences.push(product.into());
        self
    }

    /// Append items to the shopping list, keeping their order.
    pub fn shopping_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profile.shopping_list.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn budget(mut self, category: impl Into<String>, share: f64) -> Self {
        self.profile.budget_allocation.insert(category.into(), share);
        self
    }

    pub fn arriving_at(mut self, time: SimTime) -> Self {
        self.profile.arrival_time = Some(time);
        self
    }

    pub fn build(self) -> AgentProfile {
        self.profile
    }
}
