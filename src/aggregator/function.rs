//! Call-graph nodes and edges: `FunctionEntry` and `ChildEntry`.
//!
//! A `FunctionEntry` is one profiled routine inside one thread graph; a
//! `ChildEntry` is one caller→callee edge owned by its calling function.
//! All relational links are function ids resolved through the owning
//! `ThreadStatistics` arena, never direct references, so a whole graph can
//! be cloned or dropped as a unit.

use super::value::EnsembleValue;
use crate::utils::error::InvariantViolation;
use std::collections::{BTreeMap, BTreeSet};

/// Lifecycle of a graph entity.
///
/// `set` (or verbatim adoption during a merge) moves Uninitialized →
/// Initialized; `calculate_statistics` moves Initialized → Computed; any
/// mutating merge or pad drops Computed back to Initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Uninitialized,
    Initialized,
    Computed,
}

/// The 7 numeric seeds of an edge record, in dump order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSeed {
    pub count: f64,
    pub total_time: f64,
    pub total_time_sq: f64,
    pub total_in_children: f64,
    pub total_in_children_sq: f64,
    pub total_recurse: f64,
    pub total_recurse_sq: f64,
}

/// Per-call mean and standard deviation from summed time / squared time /
/// call count, with the zero-count guard and variance clamp.
fn per_call_stats(time: &EnsembleValue, time_sq: &EnsembleValue, count: &EnsembleValue) -> (f64, f64) {
    let calls = count.total();
    if calls == 0.0 {
        return (0.0, 0.0);
    }
    let avg = time.total() / calls;
    let variance = time_sq.total() / calls - avg * avg;
    (avg, variance.max(0.0).sqrt())
}

/// One caller→callee edge within a single thread graph
///
/// **Public** - owned by the calling `FunctionEntry`, read by the report
#[derive(Debug, Clone)]
pub struct ChildEntry {
    parent_id: Option<u64>,
    callee_id: u64,
    callee_name: String,

    count: EnsembleValue,
    total_time: EnsembleValue,
    total_time_sq: EnsembleValue,
    total_in_children: EnsembleValue,
    total_in_children_sq: EnsembleValue,
    total_recurse: EnsembleValue,
    total_recurse_sq: EnsembleValue,

    // Derived at construction, then merged pointwise like everything else
    total_self: EnsembleValue,
    total_in_children_no_recurse: EnsembleValue,

    state: EntryState,
}

impl ChildEntry {
    /// Create an edge from its 7 dump seeds
    ///
    /// The edge is unlinked until `attach_parent` is called.
    pub fn from_seed(callee_id: u64, callee_name: impl Into<String>, seed: EdgeSeed) -> Self {
        Self {
            parent_id: None,
            callee_id,
            callee_name: callee_name.into(),
            count: EnsembleValue::from_scalar(seed.count),
            total_time: EnsembleValue::from_scalar(seed.total_time),
            total_time_sq: EnsembleValue::from_scalar(seed.total_time_sq),
            total_in_children: EnsembleValue::from_scalar(seed.total_in_children),
            total_in_children_sq: EnsembleValue::from_scalar(seed.total_in_children_sq),
            total_recurse: EnsembleValue::from_scalar(seed.total_recurse),
            total_recurse_sq: EnsembleValue::from_scalar(seed.total_recurse_sq),
            total_self: EnsembleValue::from_scalar(seed.total_time - seed.total_in_children),
            total_in_children_no_recurse: EnsembleValue::from_scalar(
                seed.total_in_children - seed.total_recurse,
            ),
            state: EntryState::Initialized,
        }
    }

    /// Create an all-zero edge holding no observations
    ///
    /// Used to backfill an edge that other sibling threads recorded but this
    /// graph never saw.
    pub fn empty(callee_id: u64, callee_name: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            callee_id,
            callee_name: callee_name.into(),
            count: EnsembleValue::zero(),
            total_time: EnsembleValue::zero(),
            total_time_sq: EnsembleValue::zero(),
            total_in_children: EnsembleValue::zero(),
            total_in_children_sq: EnsembleValue::zero(),
            total_recurse: EnsembleValue::zero(),
            total_recurse_sq: EnsembleValue::zero(),
            total_self: EnsembleValue::zero(),
            total_in_children_no_recurse: EnsembleValue::zero(),
            state: EntryState::Initialized,
        }
    }

    /// Link this edge to its calling function, exactly once
    pub fn attach_parent(&mut self, parent_id: u64) -> Result<(), InvariantViolation> {
        if let Some(existing) = self.parent_id {
            return Err(InvariantViolation::ParentAlreadyLinked {
                parent: existing,
                callee: self.callee_id,
            });
        }
        self.parent_id = Some(parent_id);
        Ok(())
    }

    /// Merge the same edge from another thread graph into this one
    pub fn add_instance(&mut self, other: &ChildEntry) -> Result<(), InvariantViolation> {
        if self.parent_id != other.parent_id || self.callee_id != other.callee_id {
            return Err(InvariantViolation::EdgeIdMismatch {
                expected_parent: self.parent_id,
                expected_callee: self.callee_id,
                found_parent: other.parent_id,
                found_callee: other.callee_id,
            });
        }
        self.count.add(&other.count);
        self.total_time.add(&other.total_time);
        self.total_time_sq.add(&other.total_time_sq);
        self.total_in_children.add(&other.total_in_children);
        self.total_in_children_sq.add(&other.total_in_children_sq);
        self.total_recurse.add(&other.total_recurse);
        self.total_recurse_sq.add(&other.total_recurse_sq);
        self.total_self.add(&other.total_self);
        self.total_in_children_no_recurse
            .add(&other.total_in_children_no_recurse);
        self.state = EntryState::Initialized;
        Ok(())
    }

    /// Pad every field with `count` zero-weighted observations
    pub fn add_empty_instances(&mut self, count: u64) {
        self.count.add_weighted(0.0, count);
        self.total_time.add_weighted(0.0, count);
        self.total_time_sq.add_weighted(0.0, count);
        self.total_in_children.add_weighted(0.0, count);
        self.total_in_children_sq.add_weighted(0.0, count);
        self.total_recurse.add_weighted(0.0, count);
        self.total_recurse_sq.add_weighted(0.0, count);
        self.total_self.add_weighted(0.0, count);
        self.total_in_children_no_recurse.add_weighted(0.0, count);
        self.state = EntryState::Initialized;
    }

    /// Finalize derived statistics for this edge
    pub fn calculate_statistics(&mut self) {
        self.state = EntryState::Computed;
    }

    /// Mean time per call across all merged observations
    pub fn avg(&self) -> f64 {
        per_call_stats(&self.total_time, &self.total_time_sq, &self.count).0
    }

    /// Per-call standard deviation across all merged observations
    pub fn std_dev(&self) -> f64 {
        per_call_stats(&self.total_time, &self.total_time_sq, &self.count).1
    }

    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    pub fn callee_id(&self) -> u64 {
        self.callee_id
    }

    pub fn callee_name(&self) -> &str {
        &self.callee_name
    }

    pub fn count(&self) -> &EnsembleValue {
        &self.count
    }

    pub fn total_time(&self) -> &EnsembleValue {
        &self.total_time
    }

    pub fn total_time_sq(&self) -> &EnsembleValue {
        &self.total_time_sq
    }

    pub fn total_in_children(&self) -> &EnsembleValue {
        &self.total_in_children
    }

    pub fn total_recurse(&self) -> &EnsembleValue {
        &self.total_recurse
    }

    pub fn total_self(&self) -> &EnsembleValue {
        &self.total_self
    }

    pub fn total_in_children_no_recurse(&self) -> &EnsembleValue {
        &self.total_in_children_no_recurse
    }

    pub fn state(&self) -> EntryState {
        self.state
    }
}

/// One profiled routine within a thread graph
///
/// **Public** - owned by `ThreadStatistics`, read by the report
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    id: u64,
    name: String,

    count: EnsembleValue,
    total_time: EnsembleValue,
    total_time_sq: EnsembleValue,

    // Derived
    total_self: EnsembleValue,
    total_in_children: EnsembleValue,
    total_recurse: EnsembleValue,
    total_no_recurse: EnsembleValue,
    total_in_children_no_recurse: EnsembleValue,

    /// Caller function ids (weak, resolved through the owning arena)
    parents: BTreeSet<u64>,
    /// Outgoing edges keyed by callee id
    children: BTreeMap<u64, ChildEntry>,

    state: EntryState,
    /// Set once this entry has absorbed another thread's instance; children
    /// must be fully known before that point.
    merged: bool,

    /// Assigned at report time only
    rank: usize,
}

impl FunctionEntry {
    /// Create an uninitialized entry; own statistics arrive via `set`
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            count: EnsembleValue::zero(),
            total_time: EnsembleValue::zero(),
            total_time_sq: EnsembleValue::zero(),
            total_self: EnsembleValue::zero(),
            total_in_children: EnsembleValue::zero(),
            total_recurse: EnsembleValue::zero(),
            total_no_recurse: EnsembleValue::zero(),
            total_in_children_no_recurse: EnsembleValue::zero(),
            parents: BTreeSet::new(),
            children: BTreeMap::new(),
            state: EntryState::Uninitialized,
            merged: false,
            rank: 0,
        }
    }

    /// One-time population of own statistics from a self record
    ///
    /// # Errors
    /// `InvariantViolation::AlreadyInitialized` if called twice.
    pub fn set(&mut self, calls: f64, total_time: f64, total_time_sq: f64) -> Result<(), InvariantViolation> {
        if self.state != EntryState::Uninitialized {
            return Err(InvariantViolation::AlreadyInitialized { id: self.id });
        }
        self.count.set(calls);
        self.total_time.set(total_time);
        self.total_time_sq.set(total_time_sq);
        // Edges may already be registered when the self record arrives late.
        self.total_self
            .set(total_time - self.total_in_children.total());
        self.total_no_recurse
            .set(total_time - self.total_recurse.total());
        self.state = EntryState::Initialized;
        Ok(())
    }

    /// Record a caller of this function (idempotent)
    pub fn add_parent(&mut self, parent_id: u64) {
        self.parents.insert(parent_id);
    }

    /// Register an outgoing edge
    ///
    /// Updates the children/recursion accumulators, and the self/no-recurse
    /// times when own statistics are already set.
    ///
    /// # Errors
    /// * `ChildAfterMerge` once this entry has absorbed an ensemble merge
    /// * `DuplicateChild` for a second edge to the same callee
    pub fn add_child(&mut self, child: ChildEntry) -> Result<(), InvariantViolation> {
        if self.merged {
            return Err(InvariantViolation::ChildAfterMerge { parent: self.id });
        }
        if self.children.contains_key(&child.callee_id) {
            return Err(InvariantViolation::DuplicateChild {
                parent: self.id,
                callee: child.callee_id,
            });
        }

        self.total_in_children
            .set(self.total_in_children.total() + child.total_time.total());
        self.total_recurse
            .set(self.total_recurse.total() + child.total_recurse.total());
        self.total_in_children_no_recurse.set(
            self.total_in_children_no_recurse.total() + child.total_time.total()
                - child.total_recurse.total(),
        );
        if self.state != EntryState::Uninitialized {
            self.total_self
                .set(self.total_time.total() - self.total_in_children.total());
            self.total_no_recurse
                .set(self.total_time.total() - self.total_recurse.total());
            self.state = EntryState::Initialized;
        }

        self.children.insert(child.callee_id, child);
        Ok(())
    }

    /// Merge the same function from another thread graph into this one
    ///
    /// An uninitialized entry adopts the other's own statistics verbatim;
    /// an initialized entry merges pointwise. Children present on only one
    /// side are padded with the opposite side's instance weight so averages
    /// stay unbiased.
    pub fn add_instance(&mut self, other: &FunctionEntry) -> Result<(), InvariantViolation> {
        if self.id != other.id {
            return Err(InvariantViolation::FunctionIdMismatch {
                expected: self.id,
                found: other.id,
            });
        }

        // Instance weights before any merging; count.count == total_time.count
        // by construction, any field would do.
        let self_weight = self.count.count();
        let other_weight = other.count.count();

        if self.state == EntryState::Uninitialized {
            self.count = other.count.clone();
            self.total_time = other.total_time.clone();
            self.total_time_sq = other.total_time_sq.clone();
            self.total_self = other.total_self.clone();
            self.total_in_children = other.total_in_children.clone();
            self.total_recurse = other.total_recurse.clone();
            self.total_no_recurse = other.total_no_recurse.clone();
            self.total_in_children_no_recurse = other.total_in_children_no_recurse.clone();
        } else {
            self.count.add(&other.count);
            self.total_time.add(&other.total_time);
            self.total_time_sq.add(&other.total_time_sq);
            self.total_self.add(&other.total_self);
            self.total_in_children.add(&other.total_in_children);
            self.total_recurse.add(&other.total_recurse);
            self.total_no_recurse.add(&other.total_no_recurse);
            self.total_in_children_no_recurse
                .add(&other.total_in_children_no_recurse);
        }
        self.parents.extend(other.parents.iter().copied());

        for (callee_id, other_child) in &other.children {
            match self.children.get_mut(callee_id) {
                Some(child) => child.add_instance(other_child)?,
                None => {
                    let mut child = ChildEntry::empty(*callee_id, other_child.callee_name.clone());
                    child.attach_parent(self.id)?;
                    child.add_empty_instances(self_weight);
                    child.add_instance(other_child)?;
                    self.children.insert(*callee_id, child);
                }
            }
        }
        for (callee_id, child) in self.children.iter_mut() {
            if !other.children.contains_key(callee_id) {
                child.add_empty_instances(other_weight);
            }
        }

        self.merged = true;
        self.state = EntryState::Initialized;
        Ok(())
    }

    /// Pad own statistics and every edge with `count` zero-weighted samples
    pub fn add_empty_instances(&mut self, count: u64) {
        self.count.add_weighted(0.0, count);
        self.total_time.add_weighted(0.0, count);
        self.total_time_sq.add_weighted(0.0, count);
        self.total_self.add_weighted(0.0, count);
        self.total_in_children.add_weighted(0.0, count);
        self.total_recurse.add_weighted(0.0, count);
        self.total_no_recurse.add_weighted(0.0, count);
        self.total_in_children_no_recurse.add_weighted(0.0, count);
        for child in self.children.values_mut() {
            child.add_empty_instances(count);
        }
        self.merged = true;
        self.state = EntryState::Initialized;
    }

    /// Finalize this function and all of its edges
    ///
    /// # Errors
    /// `InvariantViolation::NotInitialized` if no self record was ever seen.
    pub fn calculate_statistics(&mut self) -> Result<(), InvariantViolation> {
        match self.state {
            EntryState::Computed => return Ok(()),
            EntryState::Uninitialized => {
                return Err(InvariantViolation::NotInitialized { id: self.id })
            }
            EntryState::Initialized => {}
        }
        for child in self.children.values_mut() {
            child.calculate_statistics();
        }
        self.state = EntryState::Computed;
        Ok(())
    }

    /// Mean time per call across all merged observations
    pub fn avg(&self) -> f64 {
        per_call_stats(&self.total_time, &self.total_time_sq, &self.count).0
    }

    /// Per-call standard deviation across all merged observations
    pub fn std_dev(&self) -> f64 {
        per_call_stats(&self.total_time, &self.total_time_sq, &self.count).1
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> &EnsembleValue {
        &self.count
    }

    pub fn total_time(&self) -> &EnsembleValue {
        &self.total_time
    }

    pub fn total_time_sq(&self) -> &EnsembleValue {
        &self.total_time_sq
    }

    pub fn total_self(&self) -> &EnsembleValue {
        &self.total_self
    }

    pub fn total_in_children(&self) -> &EnsembleValue {
        &self.total_in_children
    }

    pub fn total_recurse(&self) -> &EnsembleValue {
        &self.total_recurse
    }

    pub fn total_no_recurse(&self) -> &EnsembleValue {
        &self.total_no_recurse
    }

    pub fn total_in_children_no_recurse(&self) -> &EnsembleValue {
        &self.total_in_children_no_recurse
    }

    pub fn parents(&self) -> &BTreeSet<u64> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeMap<u64, ChildEntry> {
        &self.children
    }

    pub fn child(&self, callee_id: u64) -> Option<&ChildEntry> {
        self.children.get(&callee_id)
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state != EntryState::Uninitialized
    }

    pub fn has_multiple_instances(&self) -> bool {
        self.merged
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(count: f64, total: f64, sq: f64, child: f64, child_sq: f64, rec: f64, rec_sq: f64) -> EdgeSeed {
        EdgeSeed {
            count,
            total_time: total,
            total_time_sq: sq,
            total_in_children: child,
            total_in_children_sq: child_sq,
            total_recurse: rec,
            total_recurse_sq: rec_sq,
        }
    }

    #[test]
    fn test_child_entry_derived_seeds() {
        let child = ChildEntry::from_seed(1, "callee", seed(5.0, 30.0, 200.0, 10.0, 40.0, 2.0, 4.0));
        assert_eq!(child.total_self().total(), 20.0);
        assert_eq!(child.total_in_children_no_recurse().total(), 8.0);
    }

    #[test]
    fn test_attach_parent_twice_fails() {
        let mut child = ChildEntry::from_seed(1, "callee", seed(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0));
        child.attach_parent(0).unwrap();
        assert!(matches!(
            child.attach_parent(2),
            Err(InvariantViolation::ParentAlreadyLinked { parent: 0, callee: 1 })
        ));
    }

    #[test]
    fn test_set_twice_fails() {
        let mut entry = FunctionEntry::new(0, "main");
        entry.set(5.0, 50.0, 550.0).unwrap();
        assert!(matches!(
            entry.set(1.0, 1.0, 1.0),
            Err(InvariantViolation::AlreadyInitialized { id: 0 })
        ));
    }

    #[test]
    fn test_self_time_accounts_for_children() {
        let mut entry = FunctionEntry::new(0, "main");
        entry.set(5.0, 50.0, 550.0).unwrap();
        let mut child = ChildEntry::from_seed(1, "leaf", seed(5.0, 30.0, 200.0, 10.0, 40.0, 0.0, 0.0));
        child.attach_parent(0).unwrap();
        entry.add_child(child).unwrap();

        assert_eq!(entry.total_in_children().total(), 30.0);
        assert_eq!(entry.total_self().total(), 20.0);
        assert_eq!(entry.total_no_recurse().total(), 50.0);
    }

    #[test]
    fn test_self_record_after_edges() {
        // Edges first, self record second: identities must still hold.
        let mut entry = FunctionEntry::new(0, "main");
        let mut child = ChildEntry::from_seed(1, "leaf", seed(2.0, 12.0, 80.0, 0.0, 0.0, 4.0, 16.0));
        child.attach_parent(0).unwrap();
        entry.add_child(child).unwrap();
        entry.set(3.0, 40.0, 600.0).unwrap();

        assert_eq!(entry.total_self().total(), 40.0 - 12.0);
        assert_eq!(entry.total_no_recurse().total(), 40.0 - 4.0);
    }

    #[test]
    fn test_duplicate_child_fails() {
        let mut entry = FunctionEntry::new(0, "main");
        entry.set(1.0, 1.0, 1.0).unwrap();
        let mut a = ChildEntry::from_seed(1, "leaf", seed(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0));
        a.attach_parent(0).unwrap();
        entry.add_child(a).unwrap();
        let mut b = ChildEntry::from_seed(1, "leaf", seed(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0));
        b.attach_parent(0).unwrap();
        assert!(matches!(
            entry.add_child(b),
            Err(InvariantViolation::DuplicateChild { parent: 0, callee: 1 })
        ));
    }

    #[test]
    fn test_add_child_after_merge_fails() {
        let mut entry = FunctionEntry::new(0, "main");
        entry.set(1.0, 10.0, 100.0).unwrap();
        let mut other = FunctionEntry::new(0, "main");
        other.set(1.0, 20.0, 400.0).unwrap();
        entry.add_instance(&other).unwrap();

        let mut late = ChildEntry::from_seed(1, "leaf", seed(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0));
        late.attach_parent(0).unwrap();
        assert!(matches!(
            entry.add_child(late),
            Err(InvariantViolation::ChildAfterMerge { parent: 0 })
        ));
    }

    #[test]
    fn test_add_instance_id_mismatch_fails() {
        let mut a = FunctionEntry::new(0, "a");
        a.set(1.0, 1.0, 1.0).unwrap();
        let mut b = FunctionEntry::new(1, "b");
        b.set(1.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            a.add_instance(&b),
            Err(InvariantViolation::FunctionIdMismatch { expected: 0, found: 1 })
        ));
    }

    #[test]
    fn test_add_instance_backfills_missing_child() {
        let mut a = FunctionEntry::new(0, "main");
        a.set(4.0, 40.0, 400.0).unwrap();

        let mut b = FunctionEntry::new(0, "main");
        b.set(2.0, 20.0, 200.0).unwrap();
        let mut edge = ChildEntry::from_seed(1, "leaf", seed(2.0, 6.0, 18.0, 0.0, 0.0, 0.0, 0.0));
        edge.attach_parent(0).unwrap();
        b.add_child(edge).unwrap();

        a.add_instance(&b).unwrap();

        // The backfilled edge carries a's one zero-weighted sample plus b's.
        let child = a.child(1).expect("edge backfilled");
        assert_eq!(child.count().count(), 2);
        assert_eq!(child.total_time().total(), 6.0);
        assert!(a.has_multiple_instances());
    }

    #[test]
    fn test_add_instance_pads_absent_side() {
        let mut a = FunctionEntry::new(0, "main");
        a.set(4.0, 40.0, 400.0).unwrap();
        let mut edge = ChildEntry::from_seed(1, "leaf", seed(4.0, 8.0, 16.0, 0.0, 0.0, 0.0, 0.0));
        edge.attach_parent(0).unwrap();
        a.add_child(edge).unwrap();

        let mut b = FunctionEntry::new(0, "main");
        b.set(2.0, 20.0, 200.0).unwrap();

        a.add_instance(&b).unwrap();

        // b never saw the edge: totals unchanged, weight grown by b's sample.
        let child = a.child(1).expect("edge kept");
        assert_eq!(child.total_time().total(), 8.0);
        assert_eq!(child.count().count(), 2);
    }

    #[test]
    fn test_uninitialized_adopts_verbatim() {
        let mut fresh = FunctionEntry::new(0, "main");
        let mut other = FunctionEntry::new(0, "main");
        other.set(3.0, 30.0, 300.0).unwrap();
        let mut edge = ChildEntry::from_seed(1, "leaf", seed(3.0, 9.0, 27.0, 0.0, 0.0, 0.0, 0.0));
        edge.attach_parent(0).unwrap();
        other.add_child(edge).unwrap();

        fresh.add_instance(&other).unwrap();

        assert_eq!(fresh.total_time().total(), 30.0);
        assert_eq!(fresh.count().count(), 1);
        let child = fresh.child(1).expect("edge adopted");
        assert_eq!(child.total_time().total(), 9.0);
        assert_eq!(child.count().count(), 1);
    }

    #[test]
    fn test_calculate_statistics_requires_init() {
        let mut entry = FunctionEntry::new(0, "main");
        assert!(matches!(
            entry.calculate_statistics(),
            Err(InvariantViolation::NotInitialized { id: 0 })
        ));
    }

    #[test]
    fn test_per_call_avg_and_std_dev() {
        let mut entry = FunctionEntry::new(0, "main");
        // 5 calls, 50 total, 550 sum of squares: avg 10, var 110 - 100 = 10
        entry.set(5.0, 50.0, 550.0).unwrap();
        entry.calculate_statistics().unwrap();
        assert_eq!(entry.avg(), 10.0);
        assert!((entry.std_dev() - 10.0_f64.sqrt()).abs() < 1e-12);
    }
}
