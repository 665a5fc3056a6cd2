//! Interactive menu shell
//!
//! The shell owns all prompting and printing; decisions come from the
//! domain services and the ledger. It is generic over the input
//! reader so tests can drive it with scripted lines.

use std::io::{self, BufRead, Write};

use cartage_domain::model::{Route, Vehicle, VehicleKind};
use cartage_domain::service::{find_best_match, DeliveryBuilder};
use cartage_store::Ledger;
use cartage_types::{OutputFormat, Result, ValidationError};

use crate::output;

pub struct Shell<R> {
    input: R,
    format: OutputFormat,
}

impl<R: BufRead> Shell<R> {
    pub fn new(input: R, format: OutputFormat) -> Self {
        Self { input, format }
    }

    /// Run the menu loop until the operator picks exit or input runs
    /// out. The caller saves the ledger afterwards.
    pub fn run(&mut self, ledger: &mut Ledger) -> Result<()> {
        println!("Transport Logistics Ledger");
        println!("==========================");
        loop {
            print_menu();
            let Some(choice) = self.read_line()? else { break };
            match choice.as_str() {
                "1" => output::print_data(ledger, self.format)?,
                "2" => self.add_route(ledger)?,
                "3" => self.add_vehicle(ledger)?,
                "4" => self.best_matches(ledger)?,
                "5" => self.build_delivery(ledger)?,
                "6" => output::print_allocations(ledger, self.format)?,
                "7" => output::print_deliveries(ledger, self.format)?,
                "8" => break,
                _ => println!("Invalid choice (1-8). Please try again."),
            }
        }
        Ok(())
    }

    /// Next trimmed input line; `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;
        self.read_line()
    }

    /// Prompt for a required free-text value. `None` aborts the
    /// current action.
    fn prompt_required(
        &mut self,
        message: &str,
        field: &'static str,
    ) -> io::Result<Option<String>> {
        let Some(value) = self.prompt(message)? else { return Ok(None) };
        if value.is_empty() {
            println!("{}", ValidationError::EmptyField { field });
            return Ok(None);
        }
        Ok(Some(value))
    }

    /// Prompt for a value that must parse as a positive number.
    /// `None` aborts the current action.
    fn prompt_positive(&mut self, message: &str, field: &'static str) -> io::Result<Option<f64>> {
        let Some(raw) = self.prompt(message)? else { return Ok(None) };
        match raw.parse::<f64>() {
            Ok(value) if value > 0.0 => Ok(Some(value)),
            Ok(_) => {
                println!("{}", ValidationError::NonPositive { field });
                Ok(None)
            }
            Err(_) => {
                println!("{}", ValidationError::NotANumber(raw));
                Ok(None)
            }
        }
    }

    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let answer = self.prompt(message)?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }

    fn add_route(&mut self, ledger: &mut Ledger) -> Result<()> {
        println!("\n--- Add New Route ---");
        let Some(id) = self.prompt_required("Route ID: ", "Route ID")? else { return Ok(()) };
        if ledger.route(&id).is_some() {
            println!("{}", ValidationError::DuplicateId { entity: "Route", id });
            return Ok(());
        }
        let Some(source) = self.prompt_required("Source city: ", "Source")? else {
            return Ok(());
        };
        let Some(destination) = self.prompt_required("Destination city: ", "Destination")? else {
            return Ok(());
        };
        let Some(distance_km) = self.prompt_positive("Distance (km): ", "Distance")? else {
            return Ok(());
        };
        let Some(cargo_kg) = self.prompt_positive("Cargo (kg): ", "Cargo")? else {
            return Ok(());
        };
        match ledger.add_route(Route {
            id,
            source,
            destination,
            distance_km,
            cargo_kg,
        }) {
            Ok(()) => println!("Route added."),
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    fn add_vehicle(&mut self, ledger: &mut Ledger) -> Result<()> {
        println!("\n--- Add New Vehicle ---");
        let Some(raw_kind) = self.prompt_required("Vehicle type (Truck/Van): ", "Vehicle type")?
        else {
            return Ok(());
        };
        let kind: VehicleKind = match raw_kind.parse() {
            Ok(kind) => kind,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };
        let Some(id) = self.prompt_required("Vehicle ID: ", "Vehicle ID")? else {
            return Ok(());
        };
        if ledger.vehicle(&id).is_some() {
            println!("{}", ValidationError::DuplicateId { entity: "Vehicle", id });
            return Ok(());
        }
        let Some(capacity_kg) = self.prompt_positive("Capacity (kg): ", "Capacity")? else {
            return Ok(());
        };
        let Some(mileage_km_per_l) = self.prompt_positive("Mileage (km/L): ", "Mileage")? else {
            return Ok(());
        };
        let Some(rate_per_l) = self.prompt_positive("Rate (per L fuel): ", "Rate")? else {
            return Ok(());
        };
        match ledger.add_vehicle(Vehicle {
            id,
            kind,
            capacity_kg,
            mileage_km_per_l,
            rate_per_l,
        }) {
            Ok(()) => println!("Vehicle added."),
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    /// Menu action 4: cheapest eligible vehicle per route, each with
    /// its own confirmation. Greedy and independent per route; an
    /// allocation does not take the vehicle out of the running for
    /// the next route.
    fn best_matches(&mut self, ledger: &mut Ledger) -> Result<()> {
        if ledger.routes().is_empty() || ledger.vehicles().is_empty() {
            println!("Need at least one route and one vehicle first.");
            return Ok(());
        }
        println!("\n{}", "=".repeat(80));
        println!("ROUTE PLANNING - BEST MATCHES");
        println!("{}", "=".repeat(80));

        let routes = ledger.routes().to_vec();
        for route in routes {
            println!("\n{}", "-".repeat(80));
            println!(
                "Route {}: {} -> {} | Distance: {:.1} km | Cargo: {:.1} kg",
                route.id, route.source, route.destination, route.distance_km, route.cargo_kg
            );
            let Some(best) = find_best_match(&route, ledger.vehicles()) else {
                println!("No vehicle has sufficient capacity for this route.");
                continue;
            };
            println!(
                "Best match: {} ({}) | Cost: {:.2} | Capacity: {:.1} kg",
                best.vehicle.id, best.vehicle.kind, best.cost, best.vehicle.capacity_kg
            );
            if self.confirm("Confirm allocation? (y/n): ")? {
                let id = ledger.confirm_allocation(route.id, best.vehicle.id, best.cost);
                println!("Allocation {} saved.", id);
            }
        }
        Ok(())
    }

    /// Menu action 5: accumulate stops onto one vehicle run, show the
    /// summary, and commit only on explicit confirmation.
    fn build_delivery(&mut self, ledger: &mut Ledger) -> Result<()> {
        if ledger.vehicles().is_empty() {
            println!("Add at least one vehicle first.");
            return Ok(());
        }
        println!("\n{}", "=".repeat(70));
        println!("MULTI-STOP DELIVERY - ONE VEHICLE, MULTIPLE STOPS");
        println!("{}", "=".repeat(70));
        output::print_vehicle_menu(ledger.vehicles());

        let max = ledger.vehicles().len();
        let message = format!("\nSelect vehicle (1-{}): ", max);
        let Some(raw) = self.prompt(&message)? else { return Ok(()) };
        let vehicle = match raw.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => ledger.vehicles()[n - 1].clone(),
            Ok(_) => {
                println!("{}", ValidationError::SelectionOutOfRange { max });
                return Ok(());
            }
            Err(_) => {
                println!("{}", ValidationError::NotANumber(raw));
                return Ok(());
            }
        };

        let Some(delivery_id) = self.prompt_required("Delivery ID: ", "Delivery ID")? else {
            return Ok(());
        };
        if ledger.delivery(&delivery_id).is_some() {
            println!(
                "{}",
                ValidationError::DuplicateId {
                    entity: "Delivery",
                    id: delivery_id
                }
            );
            return Ok(());
        }

        let mut builder = DeliveryBuilder::new(delivery_id, vehicle);
        println!("\nAdd delivery stops (empty city name to finish):");
        loop {
            let message = format!("\nStop {} - City: ", builder.stop_count() + 1);
            // input running out mid-build discards the run
            let Some(city) = self.prompt(&message)? else { return Ok(()) };
            if city.is_empty() {
                if builder.stop_count() == 0 {
                    println!("Must add at least one stop.");
                    continue;
                }
                break;
            }
            let Some(raw) = self.prompt("Distance from previous (km): ")? else {
                return Ok(());
            };
            let Ok(distance_km) = raw.parse::<f64>() else {
                println!("{}", ValidationError::NotANumber(raw));
                continue;
            };
            let Some(raw) = self.prompt("Cargo to deliver (kg): ")? else { return Ok(()) };
            let Ok(cargo_kg) = raw.parse::<f64>() else {
                println!("{}", ValidationError::NotANumber(raw));
                continue;
            };
            match builder.add_stop(city, distance_km, cargo_kg) {
                Ok(()) => println!(
                    "Stop added | Total: {:.0} kg, {:.1} km",
                    builder.total_cargo_kg(),
                    builder.total_distance_km()
                ),
                Err(rejection) => println!("{}", rejection),
            }
        }

        // the loop above only breaks with at least one stop in
        let Ok(summary) = builder.finish() else { return Ok(()) };
        output::print_delivery_summary(&summary);
        if self.confirm("\nConfirm this multi-stop delivery? (y/n): ")? {
            match ledger.add_delivery(summary.confirm()) {
                Ok(()) => println!("Multi-stop delivery saved."),
                Err(e) => println!("{}", e),
            }
        } else {
            println!("Discarded.");
        }
        Ok(())
    }
}

fn print_menu() {
    println!("\n{}", "=".repeat(60));
    println!("1. View Data                 2. Add Route");
    println!("3. Add Vehicle               4. Compute Best Matches");
    println!("5. Multi-Stop Delivery       6. View Allocations");
    println!("7. View Multi-Stop History   8. Save & Exit");
    println!("{}", "=".repeat(60));
    print!("Choice (1-8): ");
    let _ = io::stdout().flush();
}
