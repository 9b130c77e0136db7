//! File output writers.

pub mod json;

// Re-export main functions
pub use json::{read_profile, write_profile};
