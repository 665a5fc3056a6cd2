//! Multi-stop delivery records

use serde::{Deserialize, Serialize};

/// One stop on a delivery run: a city, the leg distance from the
/// previous stop, and the cargo dropped there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub city: String,
    /// Distance from the previous stop in km (positive)
    pub distance_km: f64,
    /// Cargo delivered at this stop in kg (positive)
    pub cargo_kg: f64,
}

/// A single vehicle run visiting an ordered sequence of stops.
///
/// Stop order is visiting order. The totals are the sums over the
/// stops and satisfy `total_cargo_kg <= capacity` of the referenced
/// vehicle; the builder enforces this during construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiStopDelivery {
    pub delivery_id: String,
    pub vehicle_id: String,
    pub stops: Vec<Stop>,
    pub total_distance_km: f64,
    pub total_cargo_kg: f64,
    pub cost: f64,
    /// Creation time, preformatted for display
    pub timestamp: String,
}
