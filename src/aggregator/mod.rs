//! Merging of per-thread function timing graphs into ensemble profiles.
//!
//! This module transforms parsed per-thread dumps into:
//! - Per-thread flat and call-graph statistics
//! - Cross-thread / cross-run ensemble aggregates with absence padding
//!
//! Merges preserve exact sum / count / sum-of-squares identities and are
//! associative and commutative, so contribution order never changes totals.

pub mod ensemble;
pub mod function;
pub mod thread;
pub mod value;

// Re-export main types
pub use ensemble::EnsembleStatistics;
pub use function::{ChildEntry, EdgeSeed, EntryState, FunctionEntry};
pub use thread::ThreadStatistics;
pub use value::{EnsembleValue, ZeroCountPolicy};
