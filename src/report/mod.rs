//! Report generation: text profiles and the exportable profile schema.

pub mod schema;
pub mod text;

// Re-export main types and functions
pub use schema::{EdgeProfile, FunctionProfile, Profile};
pub use text::{assign_ranks, render_thread_report, ReportOptions};
