//! Database module for flightgen
//!
//! This module handles database connections, table creation and loading.

pub mod connection;
pub mod executor;
pub mod history;
pub mod schema;
pub mod store;

// Re-export key types
pub use connection::{DatabaseConnection, Dialect};
pub use history::LoadHistory;
