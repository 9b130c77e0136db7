//! Ensemble reduction: a named group of thread graphs folded into one.
//!
//! The first contributed thread is deep-copied into a synthetic "gathering"
//! graph; every further thread merges into that copy. Contributed threads
//! are never mutated, so the same per-thread graph can feed several
//! ensembles and still be reported on its own afterwards.

use super::thread::ThreadStatistics;
use crate::utils::error::InvariantViolation;
use log::debug;

/// Statistics of several threads (a node, or all threads of a run)
///
/// **Public** - built by the analyze command, read by the report
#[derive(Debug, Clone)]
pub struct EnsembleStatistics {
    base_name: String,
    node_label: String,
    /// File labels of every contributed thread, in contribution order
    contributed: Vec<String>,
    gathering: Option<ThreadStatistics>,
}

impl EnsembleStatistics {
    pub fn new(base_name: impl Into<String>, node_label: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            node_label: node_label.into(),
            contributed: Vec::new(),
            gathering: None,
        }
    }

    /// Fold a thread graph into this ensemble
    ///
    /// The caller's graph is only read; the first contribution seeds the
    /// gathering graph as a deep copy relabeled for this node.
    pub fn add_thread_statistics(
        &mut self,
        thread: &ThreadStatistics,
    ) -> Result<(), InvariantViolation> {
        match &mut self.gathering {
            None => {
                debug!(
                    "Seeding ensemble {:?} from thread {}",
                    self.base_name,
                    thread.file_label()
                );
                let mut gathering = thread.clone();
                gathering.relabel(
                    format!("_gatherthread_node_{}", self.node_label),
                    format!("Node {}", self.node_label),
                );
                self.gathering = Some(gathering);
            }
            Some(gathering) => gathering.add_instance(thread)?,
        }
        self.contributed.push(thread.file_label().to_string());
        Ok(())
    }

    /// Finalize the gathered graph
    pub fn calculate_statistics(&mut self) -> Result<(), InvariantViolation> {
        if let Some(gathering) = &mut self.gathering {
            gathering.calculate_statistics()?;
        }
        Ok(())
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn node_label(&self) -> &str {
        &self.node_label
    }

    pub fn contributed(&self) -> &[String] {
        &self.contributed
    }

    /// The merged graph, None until the first thread is contributed
    pub fn gathering_thread(&self) -> Option<&ThreadStatistics> {
        self.gathering.as_ref()
    }

    pub fn gathering_thread_mut(&mut self) -> Option<&mut ThreadStatistics> {
        self.gathering.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread(label: &str, total: f64) -> ThreadStatistics {
        let mut t = ThreadStatistics::new(format!("profiler_{}", label), label);
        t.get_or_create_entry(0, "main").set(2.0, total, total * total).unwrap();
        t
    }

    #[test]
    fn test_first_add_deep_copies() {
        let t0 = thread("0", 10.0);
        let mut ensemble = EnsembleStatistics::new("all", "all");
        ensemble.add_thread_statistics(&t0).unwrap();

        // The original is untouched and the copy is relabeled.
        assert_eq!(t0.thread_label(), "0");
        let gathering = ensemble.gathering_thread().unwrap();
        assert_eq!(gathering.thread_label(), "Node all");
        assert_eq!(gathering.entry(0).unwrap().total_time().total(), 10.0);
    }

    #[test]
    fn test_contributed_threads_never_mutated() {
        let t0 = thread("0", 10.0);
        let t1 = thread("1", 20.0);
        let mut ensemble = EnsembleStatistics::new("all", "all");
        ensemble.add_thread_statistics(&t0).unwrap();
        ensemble.add_thread_statistics(&t1).unwrap();

        assert_eq!(t0.entry(0).unwrap().total_time().total(), 10.0);
        assert_eq!(t1.entry(0).unwrap().total_time().total(), 20.0);
        assert_eq!(t0.instance_count(), 1);

        let gathering = ensemble.gathering_thread().unwrap();
        assert_eq!(gathering.entry(0).unwrap().total_time().total(), 30.0);
        assert_eq!(gathering.instance_count(), 2);
        assert_eq!(ensemble.contributed().len(), 2);
    }

    #[test]
    fn test_calculate_statistics_on_empty_ensemble() {
        let mut ensemble = EnsembleStatistics::new("all", "all");
        assert!(ensemble.calculate_statistics().is_ok());
    }
}
