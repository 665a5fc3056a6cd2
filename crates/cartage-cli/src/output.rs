//! Output formatting for ledger reports

use cartage_domain::model::Vehicle;
use cartage_domain::service::DeliverySummary;
use cartage_store::Ledger;
use cartage_types::{OutputFormat, Result};

/// Routes and vehicles overview (menu action 1)
pub fn print_data(ledger: &Ledger, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "routes": ledger.routes(),
            "vehicles": ledger.vehicles(),
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("ROUTES");
    println!("{}", "=".repeat(80));
    println!(
        "{:<6} | {:<15} -> {:<15} | {:>10} | {:>10}",
        "ID", "Source", "Destination", "Distance", "Cargo (kg)"
    );
    println!("{}", "-".repeat(80));
    if ledger.routes().is_empty() {
        println!("No routes available.");
    } else {
        for r in ledger.routes() {
            println!(
                "{:<6} | {:<15} -> {:<15} | {:>10.1} | {:>10.1}",
                r.id, r.source, r.destination, r.distance_km, r.cargo_kg
            );
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("VEHICLES");
    println!("{}", "=".repeat(80));
    println!(
        "{:<6} | {:<6} | {:>13} | {:>10} | {:>12}",
        "ID", "Type", "Capacity (kg)", "Mileage", "Rate (per L)"
    );
    println!("{}", "-".repeat(80));
    if ledger.vehicles().is_empty() {
        println!("No vehicles available.");
    } else {
        for v in ledger.vehicles() {
            println!(
                "{:<6} | {:<6} | {:>13.1} | {:>10.2} | {:>12.2}",
                v.id, v.kind, v.capacity_kg, v.mileage_km_per_l, v.rate_per_l
            );
        }
    }
    Ok(())
}

/// Allocation history with the revenue aggregate (menu action 6)
pub fn print_allocations(ledger: &Ledger, format: OutputFormat) -> Result<()> {
    let summary = ledger.allocation_summary();

    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "allocations": ledger.allocations(),
            "summary": summary,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("ALLOCATION HISTORY");
    println!("{}", "=".repeat(80));
    if ledger.allocations().is_empty() {
        println!("No allocations yet.");
        return Ok(());
    }
    println!(
        "{:<6} | {:<8} | {:<8} | {:>12} | {:<20}",
        "ID", "Route", "Vehicle", "Cost", "Timestamp"
    );
    println!("{}", "-".repeat(80));
    for a in ledger.allocations() {
        println!(
            "{:<6} | {:<8} | {:<8} | {:>12.2} | {:<20}",
            a.allocation_id, a.route_id, a.vehicle_id, a.cost, a.timestamp
        );
    }
    println!("{}", "-".repeat(80));
    let average = match summary.average_cost {
        Some(avg) => format!("{:.2}", avg),
        None => "N/A".to_string(),
    };
    println!(
        "Total Revenue: {:.2} | Allocations: {} | Avg: {}",
        summary.total_revenue, summary.count, average
    );
    Ok(())
}

/// Multi-stop delivery history (menu action 7)
pub fn print_deliveries(ledger: &Ledger, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "deliveries": ledger.deliveries(),
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("MULTI-STOP DELIVERY HISTORY");
    println!("{}", "=".repeat(80));
    if ledger.deliveries().is_empty() {
        println!("No multi-stop deliveries yet.");
        return Ok(());
    }
    for d in ledger.deliveries() {
        println!(
            "\nDelivery {} | Vehicle: {} | Stops: {}",
            d.delivery_id,
            d.vehicle_id,
            d.stops.len()
        );
        println!("{}", "-".repeat(80));
        for (i, stop) in d.stops.iter().enumerate() {
            println!(
                "   Stop {}: {} | Distance: {:.1} km | Cargo: {:.1} kg",
                i + 1,
                stop.city,
                stop.distance_km,
                stop.cargo_kg
            );
        }
        println!(
            "   Total Distance: {:.1} km | Total Cargo: {:.1} kg | Cost: {:.2}",
            d.total_distance_km, d.total_cargo_kg, d.cost
        );
        println!("   Timestamp: {}", d.timestamp);
    }
    Ok(())
}

/// Numbered vehicle list for the multi-stop selection prompt
pub fn print_vehicle_menu(vehicles: &[Vehicle]) {
    println!("\nAvailable vehicles:");
    for (i, v) in vehicles.iter().enumerate() {
        println!(
            "{}. {} ({}) - Capacity: {:.0} kg, Mileage: {:.2} km/L",
            i + 1,
            v.id,
            v.kind,
            v.capacity_kg,
            v.mileage_km_per_l
        );
    }
}

/// Finished-run summary shown before the confirm prompt
pub fn print_delivery_summary(summary: &DeliverySummary) {
    println!("\n{}", "=".repeat(70));
    println!("MULTI-STOP DELIVERY SUMMARY");
    println!("{}", "=".repeat(70));
    println!("Delivery ID:    {}", summary.delivery_id());
    println!(
        "Vehicle:        {} ({})",
        summary.vehicle().id,
        summary.vehicle().kind
    );
    println!("Total Stops:    {}", summary.stops().len());
    println!(
        "Total Cargo:    {:.0} kg / {:.0} kg capacity",
        summary.total_cargo_kg(),
        summary.vehicle().capacity_kg
    );
    println!("Total Distance: {:.1} km", summary.total_distance_km());
    println!("Fuel Needed:    {:.2} L", summary.fuel_needed_l());
    println!("Estimated Cost: {:.2}", summary.cost());
    println!("{}", "=".repeat(70));
}
