//! Error types for cartage

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// A domain constraint violated by an operator-supplied value.
///
/// These are reported to the operator and abort the current action
/// without mutating any state; they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{entity} ID '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Vehicle type must be 'Truck' or 'Van', got '{0}'")]
    UnknownVehicleKind(String),

    #[error("Selection out of range (1-{max})")]
    SelectionOutOfRange { max: usize },

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
