//! Incremental construction of multi-stop delivery runs
//!
//! A run goes through three states: accumulating stops in a
//! [`DeliveryBuilder`], closed into a [`DeliverySummary`] once at
//! least one stop is in, then either confirmed into a
//! [`MultiStopDelivery`] or dropped. Nothing is persisted until the
//! confirmed record reaches the ledger, so an abandoned run leaves no
//! trace.

use crate::model::{display_timestamp, MultiStopDelivery, Stop, Vehicle};
use crate::service::cost::{fuel_needed, transport_cost};

/// Why a stop was not accepted. Rejection never changes the running
/// totals; the caller may retry with a different stop.
#[derive(Debug, Clone, PartialEq)]
pub enum StopRejection {
    /// Distance or cargo was zero or negative
    NonPositive,
    /// Accepting the stop would push total cargo past the vehicle
    /// capacity
    CapacityExceeded {
        attempted_kg: f64,
        capacity_kg: f64,
    },
}

impl std::fmt::Display for StopRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopRejection::NonPositive => {
                write!(f, "Distance and cargo must be positive")
            }
            StopRejection::CapacityExceeded {
                attempted_kg,
                capacity_kg,
            } => write!(
                f,
                "Total cargo ({:.0} kg) exceeds vehicle capacity ({:.0} kg)",
                attempted_kg, capacity_kg
            ),
        }
    }
}

/// Accumulates stops for a single vehicle run, holding the running
/// cargo and distance totals under the vehicle's capacity ceiling.
#[derive(Debug)]
pub struct DeliveryBuilder {
    delivery_id: String,
    vehicle: Vehicle,
    stops: Vec<Stop>,
    total_distance_km: f64,
    total_cargo_kg: f64,
}

impl DeliveryBuilder {
    pub fn new(delivery_id: String, vehicle: Vehicle) -> Self {
        Self {
            delivery_id,
            vehicle,
            stops: Vec::new(),
            total_distance_km: 0.0,
            total_cargo_kg: 0.0,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_cargo_kg(&self) -> f64 {
        self.total_cargo_kg
    }

    /// Try to append a stop. The cargo total is checked against the
    /// vehicle capacity before anything is recorded, so a rejected
    /// stop leaves the builder exactly as it was.
    pub fn add_stop(
        &mut self,
        city: String,
        distance_km: f64,
        cargo_kg: f64,
    ) -> Result<(), StopRejection> {
        if distance_km <= 0.0 || cargo_kg <= 0.0 {
            return Err(StopRejection::NonPositive);
        }
        let attempted_kg = self.total_cargo_kg + cargo_kg;
        if attempted_kg > self.vehicle.capacity_kg {
            return Err(StopRejection::CapacityExceeded {
                attempted_kg,
                capacity_kg: self.vehicle.capacity_kg,
            });
        }
        self.total_cargo_kg = attempted_kg;
        self.total_distance_km += distance_km;
        self.stops.push(Stop {
            city,
            distance_km,
            cargo_kg,
        });
        Ok(())
    }

    /// Close the run and compute its aggregate cost from the total
    /// distance.
    ///
    /// Fails when no stop has been accepted yet; the builder is handed
    /// back unchanged so the caller can keep accumulating.
    pub fn finish(self) -> Result<DeliverySummary, DeliveryBuilder> {
        if self.stops.is_empty() {
            return Err(self);
        }
        let cost = transport_cost(self.total_distance_km, &self.vehicle);
        Ok(DeliverySummary {
            delivery_id: self.delivery_id,
            vehicle: self.vehicle,
            stops: self.stops,
            total_distance_km: self.total_distance_km,
            total_cargo_kg: self.total_cargo_kg,
            cost,
        })
    }
}

/// A finished but not yet confirmed run. Confirming stamps the
/// creation time and yields the record to store; dropping the summary
/// discards the run with no trace.
#[derive(Debug)]
pub struct DeliverySummary {
    delivery_id: String,
    vehicle: Vehicle,
    stops: Vec<Stop>,
    total_distance_km: f64,
    total_cargo_kg: f64,
    cost: f64,
}

impl DeliverySummary {
    pub fn delivery_id(&self) -> &str {
        &self.delivery_id
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_cargo_kg(&self) -> f64 {
        self.total_cargo_kg
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Litres of fuel the run will need, for the summary report
    pub fn fuel_needed_l(&self) -> f64 {
        fuel_needed(self.total_distance_km, &self.vehicle)
    }

    pub fn confirm(self) -> MultiStopDelivery {
        MultiStopDelivery {
            delivery_id: self.delivery_id,
            vehicle_id: self.vehicle.id,
            stops: self.stops,
            total_distance_km: self.total_distance_km,
            total_cargo_kg: self.total_cargo_kg,
            cost: self.cost,
            timestamp: display_timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VehicleKind;

    fn vehicle(capacity_kg: f64) -> Vehicle {
        Vehicle {
            id: "T1".to_string(),
            kind: VehicleKind::Truck,
            capacity_kg,
            mileage_km_per_l: 5.0,
            rate_per_l: 90.0,
        }
    }

    fn builder(capacity_kg: f64) -> DeliveryBuilder {
        DeliveryBuilder::new("D1".to_string(), vehicle(capacity_kg))
    }

    #[test]
    fn test_accepted_stop_advances_totals() {
        let mut b = builder(1000.0);
        b.add_stop("Pune".to_string(), 50.0, 600.0).unwrap();
        assert_eq!(b.stop_count(), 1);
        assert!((b.total_cargo_kg() - 600.0).abs() < 0.01);
        assert!((b.total_distance_km() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_capacity_overflow_is_rejected_and_rolls_nothing_back() {
        let mut b = builder(1000.0);
        b.add_stop("Pune".to_string(), 50.0, 600.0).unwrap();

        let err = b.add_stop("Nashik".to_string(), 30.0, 500.0).unwrap_err();
        assert_eq!(
            err,
            StopRejection::CapacityExceeded {
                attempted_kg: 1100.0,
                capacity_kg: 1000.0
            }
        );
        // totals unchanged by the rejection
        assert_eq!(b.stop_count(), 1);
        assert!((b.total_cargo_kg() - 600.0).abs() < 0.01);
        assert!((b.total_distance_km() - 50.0).abs() < 0.01);

        // a smaller stop still fits afterwards
        b.add_stop("Nashik".to_string(), 30.0, 400.0).unwrap();
        assert!((b.total_cargo_kg() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_non_positive_stop_is_rejected() {
        let mut b = builder(1000.0);
        assert_eq!(
            b.add_stop("Pune".to_string(), 0.0, 100.0),
            Err(StopRejection::NonPositive)
        );
        assert_eq!(
            b.add_stop("Pune".to_string(), 10.0, -5.0),
            Err(StopRejection::NonPositive)
        );
        assert_eq!(b.stop_count(), 0);
    }

    #[test]
    fn test_cargo_never_exceeds_capacity_over_any_sequence() {
        let mut b = builder(1000.0);
        for (dist, cargo) in [(10.0, 300.0), (5.0, 300.0), (8.0, 500.0), (3.0, 300.0)] {
            let _ = b.add_stop("X".to_string(), dist, cargo);
            assert!(b.total_cargo_kg() <= 1000.0 + 1e-9);
        }
    }

    #[test]
    fn test_finish_rejected_with_no_stops() {
        let b = builder(1000.0);
        let b = b.finish().unwrap_err();
        // builder comes back usable
        assert_eq!(b.stop_count(), 0);
    }

    #[test]
    fn test_finish_computes_cost_from_total_distance() {
        let mut b = builder(1000.0);
        b.add_stop("Pune".to_string(), 60.0, 400.0).unwrap();
        b.add_stop("Nashik".to_string(), 40.0, 300.0).unwrap();
        let summary = b.finish().unwrap();
        // 100 km / 5 km/L * 90 = 1800
        assert!((summary.cost() - 1800.0).abs() < 0.01);
        assert!((summary.fuel_needed_l() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_confirm_preserves_stop_order_and_totals() {
        let mut b = builder(1000.0);
        b.add_stop("Pune".to_string(), 60.0, 400.0).unwrap();
        b.add_stop("Nashik".to_string(), 40.0, 300.0).unwrap();
        let delivery = b.finish().unwrap().confirm();

        assert_eq!(delivery.delivery_id, "D1");
        assert_eq!(delivery.vehicle_id, "T1");
        let cities: Vec<_> = delivery.stops.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(cities, ["Pune", "Nashik"]);
        assert!((delivery.total_cargo_kg - 700.0).abs() < 0.01);
        assert!((delivery.total_distance_km - 100.0).abs() < 0.01);
        assert!(!delivery.timestamp.is_empty());
    }

    #[test]
    fn test_stop_exactly_filling_capacity_is_accepted() {
        let mut b = builder(1000.0);
        b.add_stop("Pune".to_string(), 10.0, 1000.0).unwrap();
        assert_eq!(b.stop_count(), 1);
    }
}
