//! CSV persistence for the four ledger tables
//!
//! Each table is an independent CSV file with a header row. Loading
//! is lenient: a missing file means an empty table, malformed rows
//! are skipped with a warning, and allocation/delivery rows whose
//! route or vehicle reference does not resolve are dropped. Saving
//! rewrites every table whole, best-effort per table.
//!
//! Load order matters: vehicles and routes first, then the records
//! that reference them.

use std::path::Path;

use cartage_domain::model::{Allocation, MultiStopDelivery, Route, Stop, Vehicle};
use cartage_store::Ledger;
use cartage_types::{Error, Result};

pub const VEHICLES_FILE: &str = "vehicles.csv";
pub const ROUTES_FILE: &str = "routes.csv";
pub const ALLOCATIONS_FILE: &str = "allocations.csv";
pub const DELIVERIES_FILE: &str = "multi_stop_deliveries.csv";

/// Separator between stops in the Stops column; fields within a stop
/// are joined with ':' as `city:distance:cargo`.
const STOP_SEPARATOR: char = '|';

fn csv_error(e: csv::Error) -> Error {
    Error::Csv(e.to_string())
}

// ---------------------------------------------------------------- load

/// Load the full ledger from `data_dir`. Never fails: unreadable
/// tables load as empty, bad rows are skipped with a warning on
/// stderr.
pub fn load_ledger(data_dir: &Path) -> Ledger {
    let mut ledger = Ledger::new();
    load_vehicles(&data_dir.join(VEHICLES_FILE), &mut ledger);
    load_routes(&data_dir.join(ROUTES_FILE), &mut ledger);
    load_allocations(&data_dir.join(ALLOCATIONS_FILE), &mut ledger);
    load_deliveries(&data_dir.join(DELIVERIES_FILE), &mut ledger);
    ledger
}

/// Read all data rows of a table, skipping the header. Rows the csv
/// reader itself cannot produce are skipped with a warning.
fn read_table(path: &Path) -> Vec<csv::StringRecord> {
    if !path.exists() {
        return Vec::new();
    }
    let mut reader = match csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
    {
        Ok(reader) => reader,
        // treat an unreadable file like an absent one
        Err(_) => return Vec::new(),
    };
    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                eprintln!("Warning: skipping unreadable row in {}: {}", path.display(), e)
            }
        }
    }
    records
}

fn load_vehicles(path: &Path, ledger: &mut Ledger) {
    for record in read_table(path) {
        match parse_vehicle(&record) {
            Some(vehicle) => {
                if let Err(e) = ledger.add_vehicle(vehicle) {
                    eprintln!("Warning: skipping vehicle record: {}", e);
                }
            }
            None => eprintln!("Warning: skipping invalid vehicle record: {:?}", record),
        }
    }
}

fn load_routes(path: &Path, ledger: &mut Ledger) {
    for record in read_table(path) {
        match parse_route(&record) {
            Some(route) => {
                if let Err(e) = ledger.add_route(route) {
                    eprintln!("Warning: skipping route record: {}", e);
                }
            }
            None => eprintln!("Warning: skipping invalid route record: {:?}", record),
        }
    }
}

fn load_allocations(path: &Path, ledger: &mut Ledger) {
    for record in read_table(path) {
        let Some(allocation) = parse_allocation(&record) else {
            eprintln!("Warning: skipping invalid allocation record: {:?}", record);
            continue;
        };
        // a reference that no longer resolves drops the row
        if ledger.route(&allocation.route_id).is_none()
            || ledger.vehicle(&allocation.vehicle_id).is_none()
        {
            continue;
        }
        ledger.restore_allocation(allocation);
    }
}

fn load_deliveries(path: &Path, ledger: &mut Ledger) {
    for record in read_table(path) {
        let Some(delivery) = parse_delivery(&record) else {
            eprintln!("Warning: skipping invalid delivery record: {:?}", record);
            continue;
        };
        if ledger.vehicle(&delivery.vehicle_id).is_none() {
            continue;
        }
        if let Err(e) = ledger.add_delivery(delivery) {
            eprintln!("Warning: skipping delivery record: {}", e);
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_positive(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| *v > 0.0)
}

fn parse_vehicle(record: &csv::StringRecord) -> Option<Vehicle> {
    if record.len() < 5 {
        return None;
    }
    Some(Vehicle {
        id: non_empty(record.get(0)?)?,
        kind: record.get(1)?.parse().ok()?,
        capacity_kg: parse_positive(record.get(2)?)?,
        mileage_km_per_l: parse_positive(record.get(3)?)?,
        rate_per_l: parse_positive(record.get(4)?)?,
    })
}

fn parse_route(record: &csv::StringRecord) -> Option<Route> {
    if record.len() < 5 {
        return None;
    }
    Some(Route {
        id: non_empty(record.get(0)?)?,
        distance_km: parse_positive(record.get(1)?)?,
        cargo_kg: parse_positive(record.get(2)?)?,
        source: record.get(3)?.to_string(),
        destination: record.get(4)?.to_string(),
    })
}

fn parse_allocation(record: &csv::StringRecord) -> Option<Allocation> {
    if record.len() < 5 {
        return None;
    }
    Some(Allocation {
        allocation_id: record.get(0)?.parse().ok()?,
        route_id: non_empty(record.get(1)?)?,
        vehicle_id: non_empty(record.get(2)?)?,
        cost: record.get(3)?.parse().ok()?,
        timestamp: record.get(4)?.to_string(),
    })
}

fn parse_delivery(record: &csv::StringRecord) -> Option<MultiStopDelivery> {
    if record.len() < 7 {
        return None;
    }
    Some(MultiStopDelivery {
        delivery_id: non_empty(record.get(0)?)?,
        vehicle_id: non_empty(record.get(1)?)?,
        stops: parse_stops(record.get(2)?)?,
        total_distance_km: parse_positive(record.get(3)?)?,
        total_cargo_kg: parse_positive(record.get(4)?)?,
        cost: record.get(5)?.parse().ok()?,
        timestamp: record.get(6)?.to_string(),
    })
}

fn parse_stops(field: &str) -> Option<Vec<Stop>> {
    let mut stops = Vec::new();
    for entry in field.split(STOP_SEPARATOR) {
        let mut parts = entry.splitn(3, ':');
        stops.push(Stop {
            city: non_empty(parts.next()?)?,
            distance_km: parse_positive(parts.next()?)?,
            cargo_kg: parse_positive(parts.next()?)?,
        });
    }
    if stops.is_empty() {
        None
    } else {
        Some(stops)
    }
}

// ---------------------------------------------------------------- save

/// Rewrite all four tables under `data_dir`. Each table is saved
/// independently; a failure is reported on stderr and the remaining
/// tables are still written. Returns the number of tables that could
/// not be saved.
pub fn save_ledger(ledger: &Ledger, data_dir: &Path) -> usize {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        eprintln!("Error creating {}: {}", data_dir.display(), e);
        return 4;
    }
    let results = [
        (VEHICLES_FILE, save_vehicles(ledger, &data_dir.join(VEHICLES_FILE))),
        (ROUTES_FILE, save_routes(ledger, &data_dir.join(ROUTES_FILE))),
        (
            ALLOCATIONS_FILE,
            save_allocations(ledger, &data_dir.join(ALLOCATIONS_FILE)),
        ),
        (
            DELIVERIES_FILE,
            save_deliveries(ledger, &data_dir.join(DELIVERIES_FILE)),
        ),
    ];
    let mut failures = 0;
    for (file, result) in results {
        if let Err(e) = result {
            eprintln!("Error saving {}: {}", file, e);
            failures += 1;
        }
    }
    failures
}

fn save_vehicles(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["ID", "Type", "Capacity", "Mileage", "Rate"])
        .map_err(csv_error)?;
    for v in ledger.vehicles() {
        writer
            .write_record(&[
                v.id.clone(),
                v.kind.label().to_string(),
                format!("{:.1}", v.capacity_kg),
                format!("{:.2}", v.mileage_km_per_l),
                format!("{:.2}", v.rate_per_l),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn save_routes(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["ID", "Distance", "Cargo", "Source", "Destination"])
        .map_err(csv_error)?;
    for r in ledger.routes() {
        writer
            .write_record(&[
                r.id.clone(),
                format!("{:.1}", r.distance_km),
                format!("{:.1}", r.cargo_kg),
                r.source.clone(),
                r.destination.clone(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn save_allocations(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["AllocationID", "RouteID", "VehicleID", "Cost", "Timestamp"])
        .map_err(csv_error)?;
    for a in ledger.allocations() {
        writer
            .write_record(&[
                a.allocation_id.to_string(),
                a.route_id.clone(),
                a.vehicle_id.clone(),
                format!("{:.2}", a.cost),
                a.timestamp.clone(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn save_deliveries(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record([
            "DeliveryID",
            "VehicleID",
            "Stops",
            "TotalDistance",
            "TotalCargo",
            "Cost",
            "Timestamp",
        ])
        .map_err(csv_error)?;
    for d in ledger.deliveries() {
        writer
            .write_record(&[
                d.delivery_id.clone(),
                d.vehicle_id.clone(),
                format_stops(&d.stops),
                format!("{:.1}", d.total_distance_km),
                format!("{:.1}", d.total_cargo_kg),
                format!("{:.2}", d.cost),
                d.timestamp.clone(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_stops(stops: &[Stop]) -> String {
    stops
        .iter()
        .map(|s| format!("{}:{:.1}:{:.1}", s.city, s.distance_km, s.cargo_kg))
        .collect::<Vec<_>>()
        .join(&STOP_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartage_domain::model::VehicleKind;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_vehicle(Vehicle {
                id: "T1".to_string(),
                kind: VehicleKind::Truck,
                capacity_kg: 1000.0,
                mileage_km_per_l: 5.0,
                rate_per_l: 90.0,
            })
            .unwrap();
        ledger
            .add_vehicle(Vehicle {
                id: "V1".to_string(),
                kind: VehicleKind::Van,
                capacity_kg: 800.0,
                mileage_km_per_l: 12.0,
                rate_per_l: 95.0,
            })
            .unwrap();
        ledger
            .add_route(Route {
                id: "R1".to_string(),
                source: "Mumbai, Fort".to_string(),
                destination: "Pune".to_string(),
                distance_km: 150.0,
                cargo_kg: 500.0,
            })
            .unwrap();
        ledger.confirm_allocation("R1".to_string(), "T1".to_string(), 2700.0);
        ledger
            .add_delivery(MultiStopDelivery {
                delivery_id: "D1".to_string(),
                vehicle_id: "V1".to_string(),
                stops: vec![
                    Stop {
                        city: "Thane".to_string(),
                        distance_km: 25.0,
                        cargo_kg: 300.0,
                    },
                    Stop {
                        city: "Nashik".to_string(),
                        distance_km: 140.0,
                        cargo_kg: 450.0,
                    },
                ],
                total_distance_km: 165.0,
                total_cargo_kg: 750.0,
                cost: 1306.25,
                timestamp: "2026-08-01 09:15:00".to_string(),
            })
            .unwrap();
        ledger
    }

    #[test]
    fn test_round_trip_preserves_all_tables() {
        let dir = tempdir().unwrap();
        let original = sample_ledger();
        assert_eq!(save_ledger(&original, dir.path()), 0);

        let loaded = load_ledger(dir.path());
        assert_eq!(loaded.vehicles().len(), 2);
        assert_eq!(loaded.routes().len(), 1);
        assert_eq!(loaded.allocations().len(), 1);
        assert_eq!(loaded.deliveries().len(), 1);

        let vehicle = loaded.vehicle("T1").unwrap();
        assert_eq!(vehicle.kind, VehicleKind::Truck);
        assert!((vehicle.mileage_km_per_l - 5.0).abs() < 0.01);

        // quoted free text with a comma survives
        let route = loaded.route("R1").unwrap();
        assert_eq!(route.source, "Mumbai, Fort");

        let allocation = &loaded.allocations()[0];
        assert_eq!(allocation.allocation_id, 1001);
        assert_eq!(allocation.route_id, "R1");
        assert!((allocation.cost - 2700.0).abs() < 0.01);

        let delivery = loaded.delivery("D1").unwrap();
        let cities: Vec<_> = delivery.stops.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(cities, ["Thane", "Nashik"]);
        assert!((delivery.stops[1].cargo_kg - 450.0).abs() < 0.1);
        assert!((delivery.total_cargo_kg - 750.0).abs() < 0.1);
        assert_eq!(delivery.timestamp, "2026-08-01 09:15:00");
    }

    #[test]
    fn test_counter_resumes_after_reload() {
        let dir = tempdir().unwrap();
        save_ledger(&sample_ledger(), dir.path());

        let mut loaded = load_ledger(dir.path());
        let next = loaded.confirm_allocation("R1".to_string(), "V1".to_string(), 100.0);
        assert_eq!(next, 1002);
    }

    #[test]
    fn test_missing_files_load_as_empty_ledger() {
        let dir = tempdir().unwrap();
        let ledger = load_ledger(dir.path());
        assert!(ledger.vehicles().is_empty());
        assert!(ledger.routes().is_empty());
        assert!(ledger.allocations().is_empty());
        assert!(ledger.deliveries().is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped_individually() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(VEHICLES_FILE),
            "ID,Type,Capacity,Mileage,Rate\n\
             T1,Truck,1000.0,5.00,90.00\n\
             T2,Truck,not-a-number,5.00,90.00\n\
             T3,Truck,1000.0\n\
             T4,Hovercraft,1000.0,5.00,90.00\n\
             V1,Van,800.0,12.00,95.00\n",
        )
        .unwrap();

        let ledger = load_ledger(dir.path());
        let ids: Vec<_> = ledger.vehicles().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["T1", "V1"]);
    }

    #[test]
    fn test_allocation_with_dangling_reference_is_dropped() {
        let dir = tempdir().unwrap();
        save_ledger(&sample_ledger(), dir.path());
        // R9 was never a route
        std::fs::write(
            dir.path().join(ALLOCATIONS_FILE),
            "AllocationID,RouteID,VehicleID,Cost,Timestamp\n\
             1001,R9,T1,2700.00,2026-08-01 09:00:00\n\
             1002,R1,T1,2700.00,2026-08-01 09:01:00\n",
        )
        .unwrap();

        let ledger = load_ledger(dir.path());
        assert_eq!(ledger.allocations().len(), 1);
        assert_eq!(ledger.allocations()[0].allocation_id, 1002);
    }

    #[test]
    fn test_delivery_with_bad_stops_field_is_skipped() {
        let dir = tempdir().unwrap();
        save_ledger(&sample_ledger(), dir.path());
        std::fs::write(
            dir.path().join(DELIVERIES_FILE),
            "DeliveryID,VehicleID,Stops,TotalDistance,TotalCargo,Cost,Timestamp\n\
             D1,V1,just-a-city-name,165.0,750.0,1306.25,2026-08-01 09:15:00\n\
             D2,V1,Thane:25.0:300.0,25.0,300.0,197.92,2026-08-01 09:20:00\n",
        )
        .unwrap();

        let ledger = load_ledger(dir.path());
        assert_eq!(ledger.deliveries().len(), 1);
        assert_eq!(ledger.deliveries()[0].delivery_id, "D2");
    }

    #[test]
    fn test_duplicate_ids_in_file_keep_first_occurrence() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(ROUTES_FILE),
            "ID,Distance,Cargo,Source,Destination\n\
             R1,100.0,500.0,A,B\n\
             R1,200.0,900.0,C,D\n",
        )
        .unwrap();

        let ledger = load_ledger(dir.path());
        assert_eq!(ledger.routes().len(), 1);
        assert!((ledger.route("R1").unwrap().distance_km - 100.0).abs() < 0.01);
    }
}
