//! Parsing of raw profiler dump files into per-thread graphs.

pub mod dump;
pub mod names;

// Re-export main types
pub use dump::DumpParser;
pub use names::NameTable;
