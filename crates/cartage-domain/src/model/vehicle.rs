//! Vehicle records

use cartage_types::ValidationError;
use serde::{Deserialize, Serialize};

/// Vehicle body kind. Purely descriptive; trucks and vans follow the
/// same capacity and cost rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Truck,
    Van,
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Truck => "Truck",
            VehicleKind::Van => "Van",
        }
    }
}

impl std::str::FromStr for VehicleKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("truck") {
            Ok(VehicleKind::Truck)
        } else if s.eq_ignore_ascii_case("van") {
            Ok(VehicleKind::Van)
        } else {
            Err(ValidationError::UnknownVehicleKind(s.to_string()))
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A capacity/mileage/rate-bearing transport unit.
///
/// All numeric fields are positive; input validation guarantees this
/// before a vehicle is constructed, so the cost model can divide by
/// `mileage_km_per_l` freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub kind: VehicleKind,
    /// Maximum payload in kg
    pub capacity_kg: f64,
    /// Fuel economy in km per litre
    pub mileage_km_per_l: f64,
    /// Fuel price per litre
    pub rate_per_l: f64,
}
