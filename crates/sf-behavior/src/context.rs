//! `PurchaseContext`: everything a purchase model may look at for one
//! customer standing in front of one product.

use sf_agent::AgentProfile;
use sf_core::SimTime;
use sf_spatial::ProductInfo;

/// Read-only inputs of one purchase decision.
///
/// Built by the agent state machine just before it decides whether to walk to
/// a shelf; borrowed for the duration of the call only.
#[derive(Copy, Clone, Debug)]
pub struct PurchaseContext<'a> {
    pub profile:       &'a AgentProfile,
    /// Category of the shelf stocking the product.
    pub category:      &'a str,
    pub product:       &'a ProductInfo,
    /// Discoverability of the shelf in `[0, 1]`, see
    /// [`PurchaseModel::shelf_quality`](crate::PurchaseModel::shelf_quality).
    pub shelf_quality: f64,
    /// Simulated time of the decision; discount windows are checked against it.
    pub now:           SimTime,
}
