//! Confirmed route-to-vehicle assignments

use serde::{Deserialize, Serialize};

/// A confirmed assignment of one vehicle to one route at a computed
/// cost.
///
/// Created only by the ledger once the operator confirms a best match;
/// never mutated afterwards. `route_id` and `vehicle_id` reference
/// records that live in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub allocation_id: u32,
    pub route_id: String,
    pub vehicle_id: String,
    pub cost: f64,
    /// Creation time, preformatted for display
    pub timestamp: String,
}
