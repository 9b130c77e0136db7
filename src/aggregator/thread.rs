//! Per-thread graph container: an arena of `FunctionEntry` keyed by id.
//!
//! One `ThreadStatistics` is built per raw dump file. Merging two thread
//! graphs pads functions that only one side observed with zero-weighted
//! samples, so cross-run averages are never biased toward the runs in which
//! a function happened to execute.

use super::function::{ChildEntry, FunctionEntry};
use crate::utils::error::InvariantViolation;
use log::debug;
use std::collections::BTreeMap;

/// All functions observed by one execution thread (or a synthetic merge of
/// many threads)
///
/// **Public** - produced by the parser, merged by ensembles
#[derive(Debug, Clone)]
pub struct ThreadStatistics {
    file_label: String,
    thread_label: String,
    entries: BTreeMap<u64, FunctionEntry>,
    /// Number of raw per-thread dumps already folded into this graph
    instance_count: u64,
}

impl ThreadStatistics {
    pub fn new(file_label: impl Into<String>, thread_label: impl Into<String>) -> Self {
        Self {
            file_label: file_label.into(),
            thread_label: thread_label.into(),
            entries: BTreeMap::new(),
            instance_count: 1,
        }
    }

    /// Fetch a function entry, creating an uninitialized one on first sight
    pub fn get_or_create_entry(&mut self, id: u64, name: &str) -> &mut FunctionEntry {
        self.entries
            .entry(id)
            .or_insert_with(|| FunctionEntry::new(id, name))
    }

    /// Wire a parsed edge into the graph
    ///
    /// Ensures the callee exists (uninitialized if its self record has not
    /// arrived yet), records the caller in the callee's parent set, links
    /// the edge to its parent, and hands ownership to the calling function.
    pub fn register_edge(
        &mut self,
        parent_id: u64,
        parent_name: &str,
        mut child: ChildEntry,
    ) -> Result<(), InvariantViolation> {
        let callee_id = child.callee_id();
        let callee_name = child.callee_name().to_string();
        self.get_or_create_entry(callee_id, &callee_name)
            .add_parent(parent_id);
        child.attach_parent(parent_id)?;
        self.get_or_create_entry(parent_id, parent_name)
            .add_child(child)
    }

    /// Merge another thread graph into this one
    ///
    /// Functions on both sides merge entry-wise; functions only in `other`
    /// are created and backfilled with this graph's instance weight;
    /// functions only here are padded with `other`'s weight.
    pub fn add_instance(&mut self, other: &ThreadStatistics) -> Result<(), InvariantViolation> {
        debug!(
            "Merging thread {} ({} functions) into {} ({} functions)",
            other.thread_label,
            other.entries.len(),
            self.thread_label,
            self.entries.len()
        );

        for (id, other_entry) in &other.entries {
            match self.entries.get_mut(id) {
                Some(entry) => entry.add_instance(other_entry)?,
                None => {
                    let mut entry = FunctionEntry::new(*id, other_entry.name());
                    // One zero-weighted self sample, then one more for every
                    // other dump already folded in.
                    entry.set(0.0, 0.0, 0.0)?;
                    entry.add_empty_instances(self.instance_count - 1);
                    entry.add_instance(other_entry)?;
                    self.entries.insert(*id, entry);
                }
            }
        }
        for (id, entry) in self.entries.iter_mut() {
            if !other.entries.contains_key(id) {
                entry.add_empty_instances(other.instance_count);
            }
        }
        self.instance_count += other.instance_count;
        Ok(())
    }

    /// Finalize every function in the graph
    pub fn calculate_statistics(&mut self) -> Result<(), InvariantViolation> {
        for entry in self.entries.values_mut() {
            entry.calculate_statistics()?;
        }
        Ok(())
    }

    /// Sum of self times over the whole graph: the total measured time
    pub fn total_measured_time(&self) -> f64 {
        self.entries.values().map(|e| e.total_self().total()).sum()
    }

    pub fn file_label(&self) -> &str {
        &self.file_label
    }

    pub fn thread_label(&self) -> &str {
        &self.thread_label
    }

    pub fn relabel(&mut self, file_label: impl Into<String>, thread_label: impl Into<String>) {
        self.file_label = file_label.into();
        self.thread_label = thread_label.into();
    }

    pub fn instance_count(&self) -> u64 {
        self.instance_count
    }

    pub fn entries(&self) -> &BTreeMap<u64, FunctionEntry> {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut BTreeMap<u64, FunctionEntry> {
        &mut self.entries
    }

    pub fn entry(&self, id: u64) -> Option<&FunctionEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
