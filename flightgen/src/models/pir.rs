//! Property irregularity reports for mishandled bags

use chrono::{NaiveDate, NaiveTime};
use flightgen_macros::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::models::passenger::PassengerId;
use crate::models::validation;
use crate::models::{SqlValue, Validate};

/// What happened to the bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PirType {
    Lost,
    Delayed,
    Damaged,
}

impl PirType {
    pub const ALL: [PirType; 3] = [PirType::Lost, PirType::Delayed, PirType::Damaged];

    pub fn as_str(&self) -> &'static str {
        match self {
            PirType::Lost => "lost",
            PirType::Delayed => "delayed",
            PirType::Damaged => "damaged",
        }
    }
}

impl fmt::Display for PirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&PirType> for SqlValue {
    fn from(value: &PirType) -> Self {
        SqlValue::Text(value.as_str().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "pir_report", unique = "bag_luggage_id")]
pub struct PirReport {
    #[record(primary_key, sql_type = "BIGINT")]
    pub id: i64,
    #[record(sql_type = "BIGINT", references = "booked_luggage(id)")]
    pub bag_luggage_id: i64,
    #[record(sql_type = "BIGINT", references = "passenger(passenger_id)")]
    pub passenger_id: PassengerId,
    #[record(sql_type = "BIGINT", references = "booked_flight(id)")]
    pub booked_flight_id: i64,
    #[record(sql_type = "VARCHAR(3)", references = "airport(iata)")]
    pub airport_iata: String,
    #[record(sql_type = "VARCHAR(2)", references = "airline(iata)")]
    pub airline_iata: String,
    #[record(sql_type = "DATE")]
    pub pir_date: NaiveDate,
    #[record(sql_type = "TIME")]
    pub pir_time: NaiveTime,
    #[record(sql_type = "VARCHAR(16)")]
    pub pir_type: PirType,
}

impl Validate for PirReport {
    fn validate(&self) -> Result<()> {
        validation::positive_id("pir report id", self.id)?;
        validation::positive_id("bag_luggage_id", self.bag_luggage_id)?;
        validation::airport_code(&self.airport_iata)?;
        validation::airline_code(&self.airline_iata)
    }
}
