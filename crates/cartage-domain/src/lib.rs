//! Domain layer for the cartage ledger
//!
//! Entity models plus the three decision services: the fuel cost
//! model, best-match vehicle selection, and the multi-stop delivery
//! builder.

pub mod model;
pub mod service;
