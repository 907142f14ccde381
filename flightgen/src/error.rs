//! Error types for flightgen

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for flightgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for flightgen
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error(
        "Cannot cover flight {flight_number} on {date}: all {passengers} passengers are already booked that day"
    )]
    InfeasibleAssignment {
        date: NaiveDate,
        flight_number: String,
        passengers: usize,
    },

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to flightgen errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert YAML credential errors to flightgen errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}

/// Convert TOML deserialization errors to flightgen errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
