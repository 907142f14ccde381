//! CSV input and output
//!
//! Reference data (airlines, airports) is read from CSV files, and generated
//! records can be exported to CSV alongside being loaded into the database.

pub mod export;
pub mod reference;

pub use export::{append_records, write_records};
pub use reference::{read_airlines, read_airports};
