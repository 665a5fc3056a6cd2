//! Infrastructure layer for cartage - flat-file persistence

pub mod persistence;

pub use persistence::{load_ledger, save_ledger};
