//! Passengers

use chrono::NaiveDate;
use flightgen_macros::Record;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::validation;
use crate::models::Validate;

/// Identifier handed to the booking assigner
pub type PassengerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "passenger")]
pub struct Passenger {
    #[record(primary_key, sql_type = "BIGINT")]
    pub passenger_id: PassengerId,
    #[record(sql_type = "VARCHAR(100)")]
    pub family_name: String,
    #[record(sql_type = "VARCHAR(100)")]
    pub given_name: String,
    #[record(sql_type = "VARCHAR(1)")]
    pub gender: String,
    #[record(sql_type = "DATE")]
    pub date_of_birth: NaiveDate,
    #[record(sql_type = "VARCHAR(255)")]
    pub email: String,
    #[record(sql_type = "VARCHAR(50)")]
    pub phone_number: String,
}

impl Validate for Passenger {
    fn validate(&self) -> Result<()> {
        validation::positive_id("passenger_id", self.passenger_id)?;
        validation::not_blank("family name", &self.family_name)?;
        validation::not_blank("given name", &self.given_name)?;
        validation::email(&self.email)?;

        if self.gender != "M" && self.gender != "F" {
            return Err(Error::ValidationError(format!(
                "passenger {} has unknown gender {:?}",
                self.passenger_id, self.gender
            )));
        }

        Ok(())
    }
}
