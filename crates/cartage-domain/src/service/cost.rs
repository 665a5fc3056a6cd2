//! Fuel cost model

use crate::model::Vehicle;

/// Litres of fuel needed to cover `distance_km` with the given
/// vehicle.
pub fn fuel_needed(distance_km: f64, vehicle: &Vehicle) -> f64 {
    distance_km / vehicle.mileage_km_per_l
}

/// Transport cost for `distance_km` with the given vehicle: fuel
/// needed times the fuel rate. Pure; vehicle mileage is positive by
/// construction so there is no error path.
pub fn transport_cost(distance_km: f64, vehicle: &Vehicle) -> f64 {
    fuel_needed(distance_km, vehicle) * vehicle.rate_per_l
}
