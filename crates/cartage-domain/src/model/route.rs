//! Route records

use serde::{Deserialize, Serialize};

/// A fixed source→destination path with a distance and cargo demand.
///
/// Immutable after creation. Identity is the `id` alone; two routes
/// with the same id compare equal regardless of their other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub source: String,
    pub destination: String,
    /// Distance in km (positive)
    pub distance_km: f64,
    /// Cargo demand in kg (positive)
    pub cargo_kg: f64,
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}

impl std::hash::Hash for Route {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
