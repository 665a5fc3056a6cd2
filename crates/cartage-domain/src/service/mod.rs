//! Domain services

pub mod cost;
pub mod delivery_builder;
pub mod matcher;

pub use cost::{fuel_needed, transport_cost};
pub use delivery_builder::{DeliveryBuilder, DeliverySummary, StopRejection};
pub use matcher::{find_best_match, BestMatch};
