//! Bookings and checked luggage

use chrono::NaiveDate;
use flightgen_macros::Record;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::passenger::PassengerId;
use crate::models::validation;
use crate::models::Validate;

/// One passenger placed on one flight for its date
///
/// This is what the booking assigner produces; it becomes a
/// [`BookedFlight`] once it is given a row id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub passenger_id: PassengerId,
    pub flight_number: String,
    pub flight_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "booked_flight", unique = "passenger_id, flight_date")]
pub struct BookedFlight {
    #[record(primary_key, sql_type = "BIGINT")]
    pub id: i64,
    #[record(sql_type = "BIGINT", references = "passenger(passenger_id)")]
    pub passenger_id: PassengerId,
    #[record(sql_type = "VARCHAR(8)", references = "flight_details(flight_number)")]
    pub flight_number: String,
    #[record(sql_type = "DATE")]
    pub flight_date: NaiveDate,
}

impl BookedFlight {
    /// Number assignments consecutively starting at `first_id`
    pub fn from_assignments(assignments: Vec<Assignment>, first_id: i64) -> Vec<Self> {
        assignments
            .into_iter()
            .zip(first_id..)
            .map(|(assignment, id)| Self {
                id,
                passenger_id: assignment.passenger_id,
                flight_number: assignment.flight_number,
                flight_date: assignment.flight_date,
            })
            .collect()
    }
}

impl Validate for BookedFlight {
    fn validate(&self) -> Result<()> {
        validation::positive_id("booked flight id", self.id)?;
        validation::positive_id("passenger_id", self.passenger_id)?;
        validation::flight_number(&self.flight_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, Record)]
#[record(table = "booked_luggage", unique = "bag_tag")]
pub struct BookedLuggage {
    #[record(primary_key, sql_type = "BIGINT")]
    pub id: i64,
    #[record(sql_type = "VARCHAR(10)")]
    pub bag_tag: String,
    #[record(sql_type = "BIGINT", references = "passenger(passenger_id)")]
    pub passenger_id: PassengerId,
    #[record(sql_type = "BIGINT", references = "booked_flight(id)")]
    pub booked_flight_id: i64,
    #[record(sql_type = "INTEGER")]
    pub weight_kg: i32,
    #[record(sql_type = "VARCHAR(20)")]
    pub dimensions_cm: String,
}

impl Validate for BookedLuggage {
    fn validate(&self) -> Result<()> {
        validation::positive_id("luggage id", self.id)?;
        validation::positive_id("booked_flight_id", self.booked_flight_id)?;
        validation::bag_tag(&self.bag_tag)
    }
}
