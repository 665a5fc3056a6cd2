//! Best-match selection between routes and vehicles

use crate::model::{Route, Vehicle};
use crate::service::cost::transport_cost;

/// The cheapest eligible vehicle for a route, with its computed cost.
#[derive(Debug, Clone)]
pub struct BestMatch {
    pub vehicle: Vehicle,
    pub cost: f64,
}

/// Pick the minimum-cost vehicle among those with enough capacity for
/// the route's cargo.
///
/// Returns `None` when no vehicle is eligible; the caller reports that
/// as an informational outcome, not an error. Equal costs resolve to
/// the earliest vehicle in `vehicles`. Selection is per-route and
/// greedy: a vehicle is not consumed by a match and may win several
/// routes.
pub fn find_best_match(route: &Route, vehicles: &[Vehicle]) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;
    for vehicle in vehicles {
        if vehicle.capacity_kg < route.cargo_kg {
            continue;
        }
        let cost = transport_cost(route.distance_km, vehicle);
        let beats_current = match best {
            Some(ref b) => cost < b.cost,
            None => true,
        };
        if beats_current {
            best = Some(BestMatch {
                vehicle: vehicle.clone(),
                cost,
            });
        }
    }
    best
}
