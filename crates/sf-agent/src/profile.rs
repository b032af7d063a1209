//! Customer profiles.
//!
//! Profiles come from an external generator and are consumed as-is.  Only the
//! JSON shape is checked; the content of motives, fears and preferences is
//! free text that the purchase model matches against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sf_core::SimTime;

/// One simulated customer's behavioural profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub motives: Vec<String>,
    #[serde(default)]
    pub fears: Vec<String>,
    /// Product names the customer likes.
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Item names to look for, in visiting order.
    #[serde(default)]
    pub shopping_list: Vec<String>,
    /// Category name to share of budget.
    #[serde(default)]
    pub budget_allocation: BTreeMap<String, f64>,
    /// When the customer walks in.  Assigned by the scheduler when absent.
    #[serde(default)]
    pub arrival_time: Option<SimTime>,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Budget share for `category`, matched case-insensitively; `0.0` when
    /// the category is not allocated.
    pub fn allocation(&self, category: &str) -> f64 {
        if let Some(share) = self.budget_allocation.get(category) {
            return *share;
        }
        let category = category.to_lowercase();
        self.budget_allocation
            .iter()
            .find(|(k, _)| k.to_lowercase() == category)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// `true` if `product` is one of the customer's preferences.
    pub fn prefers(&self, product: &str) -> bool {
        let product = product.trim().to_lowercase();
        self.preferences.iter().any(|p| p.trim().to_lowercase() == product)
    }

    /// `true` if any motive contains one of `keywords` (case-insensitive).
    pub fn has_motive(&self, keywords: &[String]) -> bool {
        contains_any(&self.motives, keywords)
    }

    /// `true` if any fear contains one of `keywords` (case-insensitive).
    pub fn has_fear(&self, keywords: &[String]) -> bool {
        contains_any(&self.fears, keywords)
    }
}

fn contains_any(phrases: &[String], keywords: &[String]) -> bool {
    phrases.iter().any(|phrase| {
        let phrase = phrase.to_lowercase();
        keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| phrase.contains(&k.to_lowercase()))
    })
}
