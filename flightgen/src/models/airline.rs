//! Reference data: airlines and airports

use flightgen_macros::Record;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::validation;
use crate::models::Validate;

/// An operating airline keyed by its two-character IATA code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "airline")]
pub struct Airline {
    #[record(primary_key, sql_type = "VARCHAR(2)")]
    pub iata: String,
    #[record(sql_type = "VARCHAR(100)")]
    pub name: String,
    #[record(sql_type = "VARCHAR(100)")]
    pub country: Option<String>,
    #[record(sql_type = "VARCHAR(100)")]
    pub region: Option<String>,
}

impl Validate for Airline {
    fn validate(&self) -> Result<()> {
        validation::airline_code(&self.iata)?;
        validation::not_blank("airline name", &self.name)
    }
}

/// An airport keyed by its three-letter IATA code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "airport")]
pub struct Airport {
    #[record(primary_key, sql_type = "VARCHAR(3)")]
    pub iata: String,
    #[record(sql_type = "VARCHAR(100)")]
    pub name: String,
    #[record(sql_type = "VARCHAR(100)")]
    pub city: Option<String>,
    #[record(sql_type = "VARCHAR(100)")]
    pub country: Option<String>,
    #[record(sql_type = "VARCHAR(100)")]
    pub region: Option<String>,
}

impl Validate for Airport {
    fn validate(&self) -> Result<()> {
        validation::airport_code(&self.iata)?;
        validation::not_blank("airport name", &self.name)
    }
}
