//! Scheduled flights

use chrono::NaiveDate;
use flightgen_macros::Record;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::validation;
use crate::models::Validate;

/// A single flight on a single calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "flight_details")]
pub struct FlightDetails {
    #[record(primary_key, sql_type = "VARCHAR(8)")]
    pub flight_number: String,
    #[record(sql_type = "VARCHAR(3)", references = "airport(iata)")]
    pub departure_iata: String,
    #[record(sql_type = "VARCHAR(3)", references = "airport(iata)")]
    pub arrival_iata: String,
    #[record(sql_type = "VARCHAR(2)", references = "airline(iata)")]
    pub airline_iata: String,
    #[record(sql_type = "DATE")]
    pub flight_date: NaiveDate,
}

impl Validate for FlightDetails {
    fn validate(&self) -> Result<()> {
        validation::flight_number(&self.flight_number)?;
        validation::airline_code(&self.airline_iata)?;
        validation::airport_code(&self.departure_iata)?;
        validation::airport_code(&self.arrival_iata)?;

        if !self.flight_number.starts_with(&self.airline_iata) {
            return Err(Error::ValidationError(format!(
                "flight {} is not prefixed by its airline {}",
                self.flight_number, self.airline_iata
            )));
        }

        if self.departure_iata == self.arrival_iata {
            return Err(Error::ValidationError(format!(
                "flight {} departs from and arrives at {}",
                self.flight_number, self.departure_iata
            )));
        }

        Ok(())
    }
}
