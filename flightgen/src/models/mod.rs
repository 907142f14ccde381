//! Models module for flightgen
//!
//! This module holds the records generated and persisted by flightgen.

pub mod airline;
pub mod booking;
pub mod flight;
pub mod passenger;
pub mod pir;
pub mod record;
pub mod registry;
pub mod validation;

// Re-export key types
pub use airline::{Airline, Airport};
pub use booking::{Assignment, BookedFlight, BookedLuggage};
pub use flight::FlightDetails;
pub use passenger::{Passenger, PassengerId};
pub use pir::{PirReport, PirType};
pub use record::{ColumnDef, Record, SqlValue, Validate};
pub use registry::{TableInfo, TableRegistry};
