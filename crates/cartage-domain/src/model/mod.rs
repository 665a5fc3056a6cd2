//! Domain model types

pub mod allocation;
pub mod delivery;
pub mod route;
pub mod vehicle;

pub use allocation::Allocation;
pub use delivery::{MultiStopDelivery, Stop};
pub use route::Route;
pub use vehicle::{Vehicle, VehicleKind};

/// Creation timestamp in the fixed display format used across the
/// ledger. Timestamps are opaque display data and are never compared.
pub fn display_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
