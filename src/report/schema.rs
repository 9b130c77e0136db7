//! Serde schema for exported profiles.
//!
//! This is the outward surface of the aggregator: ranked functions with
//! their own statistics plus full parent/child edge maps for call-graph
//! traversal.

use crate::aggregator::{ChildEntry, FunctionEntry, ThreadStatistics};
use serde::{Deserialize, Serialize};

/// A complete exported profile for one graph (a thread, a node, or all)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version (e.g., "1.0.0")
    pub version: String,

    /// Base name of the dump files this profile came from
    pub base_name: String,

    /// Node label ("all" for the cross-node total)
    pub node: String,

    /// Sum of self times over every function
    pub total_measured_time: f64,

    /// Functions in rank order (rank 1 = most self time)
    pub functions: Vec<FunctionProfile>,

    /// ISO 8601 timestamp
    pub generated_at: String,
}

/// One function's statistics within a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionProfile {
    pub id: u64,
    pub name: String,
    pub rank: usize,
    pub calls: f64,
    pub total_time: f64,
    pub total_time_self: f64,
    pub total_time_no_recurse: f64,
    pub total_time_in_children: f64,
    pub total_time_recurse: f64,
    /// Mean time per call
    pub avg: f64,
    /// Per-call standard deviation
    pub std_dev: f64,
    /// Share of the total measured time attributed to self time
    pub percent_time: f64,
    /// Caller function ids
    pub parents: Vec<u64>,
    /// Outgoing edges, heaviest first
    pub children: Vec<EdgeProfile>,
}

/// One caller→callee edge within a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeProfile {
    pub callee_id: u64,
    pub callee_name: String,
    pub calls: f64,
    pub total_time: f64,
    pub time_self: f64,
    pub time_in_children: f64,
    pub time_in_children_no_recurse: f64,
    pub time_recurse: f64,
}

impl Profile {
    /// Build a profile from a finalized, rank-assigned thread graph
    pub fn from_thread(
        thread: &ThreadStatistics,
        base_name: &str,
        node: &str,
        version: &str,
    ) -> Self {
        let total = thread.total_measured_time();
        let mut functions: Vec<FunctionProfile> = thread
            .entries()
            .values()
            .map(|entry| FunctionProfile::from_entry(entry, total))
            .collect();
        functions.sort_by_key(|f| f.rank);

        Self {
            version: version.to_string(),
            base_name: base_name.to_string(),
            node: node.to_string(),
            total_measured_time: total,
            functions,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl FunctionProfile {
    fn from_entry(entry: &FunctionEntry, total_measured_time: f64) -> Self {
        let mut children: Vec<EdgeProfile> =
            entry.children().values().map(EdgeProfile::from_edge).collect();
        children.sort_by(|a, b| {
            b.time_self
                .partial_cmp(&a.time_self)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let percent_time = if total_measured_time > 0.0 {
            entry.total_self().total() / total_measured_time * 100.0
        } else {
            0.0
        };

        Self {
            id: entry.id(),
            name: entry.name().to_string(),
            rank: entry.rank(),
            calls: entry.count().total(),
            total_time: entry.total_time().total(),
            total_time_self: entry.total_self().total(),
            total_time_no_recurse: entry.total_no_recurse().total(),
            total_time_in_children: entry.total_in_children().total(),
            total_time_recurse: entry.total_recurse().total(),
            avg: entry.avg(),
            std_dev: entry.std_dev(),
            percent_time,
            parents: entry.parents().iter().copied().collect(),
            children,
        }
    }
}

impl EdgeProfile {
    fn from_edge(edge: &ChildEntry) -> Self {
        Self {
            callee_id: edge.callee_id(),
            callee_name: edge.callee_name().to_string(),
            calls: edge.count().total(),
            total_time: edge.total_time().total(),
            time_self: edge.total_self().total(),
            time_in_children: edge.total_in_children().total(),
            time_in_children_no_recurse: edge.total_in_children_no_recurse().total(),
            time_recurse: edge.total_recurse().total(),
        }
    }
}
