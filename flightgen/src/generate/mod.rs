//! Generators for synthetic airline-operations data
//!
//! Each generator takes its randomness from an RNG passed in by the caller.

pub mod booking;
pub mod flights;
pub mod luggage;
pub mod passengers;
pub mod pir;

// Re-export key types
pub use booking::{BookingAssigner, BookingLedger, DEFAULT_MAX_CAPACITY};
pub use flights::FlightDetailsGenerator;
pub use luggage::LuggageGenerator;
pub use passengers::PassengerGenerator;
pub use pir::PirGenerator;
