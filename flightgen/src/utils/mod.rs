//! Utilities for flightgen
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{clean_email, normalize_header, title_case};
