//! In-memory working set for the cartage ledger
//!
//! The [`Ledger`] owns the live collections of routes, vehicles,
//! allocations, and multi-stop deliveries, plus the allocation id
//! counter. Persistence lives elsewhere; the ledger never touches the
//! filesystem.

use cartage_domain::model::{display_timestamp, Allocation, MultiStopDelivery, Route, Vehicle};
use cartage_types::ValidationError;
use serde::Serialize;

/// First id handed out by a fresh ledger
const FIRST_ALLOCATION_ID: u32 = 1001;

/// Aggregate figures over the allocation history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub count: usize,
    pub total_revenue: f64,
    /// `None` when there are no allocations yet (shown as "N/A")
    pub average_cost: Option<f64>,
}

#[derive(Debug)]
pub struct Ledger {
    routes: Vec<Route>,
    vehicles: Vec<Vehicle>,
    allocations: Vec<Allocation>,
    deliveries: Vec<MultiStopDelivery>,
    next_allocation_id: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            vehicles: Vec::new(),
            allocations: Vec::new(),
            deliveries: Vec::new(),
            next_allocation_id: FIRST_ALLOCATION_ID,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn deliveries(&self) -> &[MultiStopDelivery] {
        &self.deliveries
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn delivery(&self, id: &str) -> Option<&MultiStopDelivery> {
        self.deliveries.iter().find(|d| d.delivery_id == id)
    }

    /// Add a route, rejecting duplicate ids without mutating the
    /// ledger.
    pub fn add_route(&mut self, route: Route) -> Result<(), ValidationError> {
        if self.route(&route.id).is_some() {
            return Err(ValidationError::DuplicateId {
                entity: "Route",
                id: route.id,
            });
        }
        self.routes.push(route);
        Ok(())
    }

    /// Add a vehicle, rejecting duplicate ids without mutating the
    /// ledger.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<(), ValidationError> {
        if self.vehicle(&vehicle.id).is_some() {
            return Err(ValidationError::DuplicateId {
                entity: "Vehicle",
                id: vehicle.id,
            });
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Record a confirmed allocation: assign the next id, stamp the
    /// creation time, append. Returns the assigned id. Confirmation
    /// policy (asking the operator) belongs to the shell; by the time
    /// this is called the decision has been made.
    pub fn confirm_allocation(&mut self, route_id: String, vehicle_id: String, cost: f64) -> u32 {
        let allocation_id = self.next_allocation_id;
        self.next_allocation_id += 1;
        self.allocations.push(Allocation {
            allocation_id,
            route_id,
            vehicle_id,
            cost,
            timestamp: display_timestamp(),
        });
        allocation_id
    }

    /// Re-insert an allocation loaded from disk, keeping its persisted
    /// id and bumping the counter past it so new allocations continue
    /// from `max(observed) + 1`.
    pub fn restore_allocation(&mut self, allocation: Allocation) {
        if allocation.allocation_id >= self.next_allocation_id {
            self.next_allocation_id = allocation.allocation_id + 1;
        }
        self.allocations.push(allocation);
    }

    /// Add a confirmed multi-stop delivery, rejecting duplicate ids.
    pub fn add_delivery(&mut self, delivery: MultiStopDelivery) -> Result<(), ValidationError> {
        if self.delivery(&delivery.delivery_id).is_some() {
            return Err(ValidationError::DuplicateId {
                entity: "Delivery",
                id: delivery.delivery_id,
            });
        }
        self.deliveries.push(delivery);
        Ok(())
    }

    /// Revenue aggregate over the allocation history. The average is
    /// `None` when there is nothing to average.
    pub fn allocation_summary(&self) -> AllocationSummary {
        let count = self.allocations.len();
        let total_revenue: f64 = self.allocations.iter().map(|a| a.cost).sum();
        let average_cost = if count > 0 {
            Some(total_revenue / count as f64)
        } else {
            None
        };
        AllocationSummary {
            count,
            total_revenue,
            average_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartage_domain::model::VehicleKind;

    fn route(id: &str) -> Route {
        Route {
            id: id.to_string(),
            source: "A".to_string(),
            destination: "B".to_string(),
            distance_km: 100.0,
            cargo_kg: 500.0,
        }
    }

    fn vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            kind: VehicleKind::Van,
            capacity_kg: 800.0,
            mileage_km_per_l: 12.0,
            rate_per_l: 95.0,
        }
    }

    #[test]
    fn test_allocation_ids_start_at_1001_and_increase() {
        let mut ledger = Ledger::new();
        let first = ledger.confirm_allocation("R1".to_string(), "T1".to_string(), 100.0);
        let second = ledger.confirm_allocation("R2".to_string(), "T1".to_string(), 200.0);
        assert_eq!(first, 1001);
        assert_eq!(second, 1002);
    }

    #[test]
    fn test_counter_resumes_past_restored_ids() {
        let mut ledger = Ledger::new();
        for id in [1001, 1002, 1003] {
            ledger.restore_allocation(Allocation {
                allocation_id: id,
                route_id: "R1".to_string(),
                vehicle_id: "T1".to_string(),
                cost: 50.0,
                timestamp: "2026-08-01 09:00:00".to_string(),
            });
        }
        let next = ledger.confirm_allocation("R1".to_string(), "T1".to_string(), 75.0);
        assert_eq!(next, 1004);
    }

    #[test]
    fn test_duplicate_route_id_rejected() {
        let mut ledger = Ledger::new();
        ledger.add_route(route("R1")).unwrap();
        let err = ledger.add_route(route("R1")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateId {
                entity: "Route",
                id: "R1".to_string()
            }
        );
        assert_eq!(ledger.routes().len(), 1);
    }

    #[test]
    fn test_duplicate_vehicle_id_rejected() {
        let mut ledger = Ledger::new();
        ledger.add_vehicle(vehicle("V1")).unwrap();
        assert!(ledger.add_vehicle(vehicle("V1")).is_err());
        assert_eq!(ledger.vehicles().len(), 1);
    }

    #[test]
    fn test_summary_empty_ledger_has_no_average() {
        let summary = Ledger::new().allocation_summary();
        assert_eq!(summary.count, 0);
        assert!((summary.total_revenue - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.average_cost, None);
    }

    #[test]
    fn test_summary_totals_and_average() {
        let mut ledger = Ledger::new();
        ledger.confirm_allocation("R1".to_string(), "T1".to_string(), 1800.0);
        ledger.confirm_allocation("R2".to_string(), "T1".to_string(), 200.0);
        let summary = ledger.allocation_summary();
        assert_eq!(summary.count, 2);
        assert!((summary.total_revenue - 2000.0).abs() < 0.01);
        assert!((summary.average_cost.unwrap() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_lookups_by_id() {
        let mut ledger = Ledger::new();
        ledger.add_route(route("R1")).unwrap();
        ledger.add_vehicle(vehicle("V1")).unwrap();
        assert!(ledger.route("R1").is_some());
        assert!(ledger.route("R9").is_none());
        assert_eq!(ledger.vehicle("V1").unwrap().capacity_kg, 800.0);
    }
}
