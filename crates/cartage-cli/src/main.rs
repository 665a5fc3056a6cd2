//! Cartage - interactive ledger for delivery routes, vehicles, and
//! cost-based allocations

use clap::Parser;

use cartage_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cartage_cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
