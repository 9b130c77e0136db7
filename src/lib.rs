//! Ensemble Prof
//!
//! Call-graph profile aggregation across threads and nodes.
//! Parses profiler dump files, merges them into ensemble statistics,
//! and renders gprof-style flat and call-graph reports.
//!
//! This crate provides the core implementation for the
//! `ensemble-prof` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install ensemble-prof
//! ensemble-prof --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod discovery;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
