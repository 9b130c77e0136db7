//! Discovery of profiler dump files on disk.
//!
//! Dump files are named `<base><node>-<thread>` when the run spanned
//! multiple nodes, or `<base><thread>` otherwise. Node and thread
//! selections come from the CLI as selectors: `*` (scan the directory),
//! `start:end` (half-open integer range), or a comma-separated label list.

use crate::utils::error::ParseError;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A node or thread selection parsed from CLI text
///
/// **Public** - constructed by the CLI, consumed by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `*`: every matching file in the directory
    All,
    /// `start:end`: half-open integer range
    Range(u64, u64),
    /// Comma-separated labels, kept verbatim
    List(Vec<String>),
}

impl Selector {
    /// Expand to concrete labels, or None for a directory scan
    fn labels(&self) -> Option<Vec<String>> {
        match self {
            Selector::All => None,
            Selector::Range(start, end) => Some((*start..*end).map(|i| i.to_string()).collect()),
            Selector::List(labels) => Some(labels.clone()),
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Selector::All);
        }
        if let Some((start, end)) = s.split_once(':') {
            let start: u64 = start
                .parse()
                .map_err(|_| format!("invalid range start {:?}", start))?;
            let end: u64 = end
                .parse()
                .map_err(|_| format!("invalid range end {:?}", end))?;
            return Ok(Selector::Range(start, end));
        }
        let labels: Vec<String> = s.split(',').map(str::to_string).collect();
        if labels.iter().any(String::is_empty) {
            return Err(format!("empty label in selector {:?}", s));
        }
        Ok(Selector::List(labels))
    }
}

/// One node's worth of dump files: a file-name prefix plus a display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub base_name: String,
    pub node_label: String,
}

/// Determine the node groups to analyze
///
/// With no node selector a single anonymous group uses `base` directly.
/// With `*`, directory entries matching `^<base>(<node>)-` define the set.
///
/// # Errors
/// `ParseError::Io` if the directory cannot be scanned.
pub fn node_groups(
    dir: &Path,
    base: &str,
    nodes: Option<&Selector>,
) -> Result<Vec<NodeGroup>, ParseError> {
    let Some(selector) = nodes else {
        return Ok(vec![NodeGroup {
            base_name: base.to_string(),
            node_label: String::new(),
        }]);
    };

    let groups: Vec<NodeGroup> = match selector.labels() {
        Some(labels) => labels
            .into_iter()
            .map(|label| NodeGroup {
                base_name: format!("{}{}-", base, label),
                node_label: label,
            })
            .collect(),
        None => {
            let pattern = Regex::new(&format!("^{}([^-]*)-", regex::escape(base)))
                .expect("node scan pattern compiles");
            let mut labels = Vec::new();
            for name in list_dir(dir)? {
                if let Some(caps) = pattern.captures(&name) {
                    let label = caps[1].to_string();
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
            }
            labels.sort();
            labels
                .into_iter()
                .map(|label| NodeGroup {
                    base_name: format!("{}{}-", base, label),
                    node_label: label,
                })
                .collect()
        }
    };
    debug!("Discovered {} node group(s) for base {:?}", groups.len(), base);
    Ok(groups)
}

/// Determine the dump files of one node group
///
/// Returns `(path, thread_label)` pairs. With `*`, every directory entry
/// starting with the group's base name matches; the rest of the file name
/// is the thread label.
pub fn thread_files(
    dir: &Path,
    group: &NodeGroup,
    threads: &Selector,
) -> Result<Vec<(PathBuf, String)>, ParseError> {
    let files = match threads.labels() {
        Some(labels) => labels
            .into_iter()
            .map(|label| (dir.join(format!("{}{}", group.base_name, label)), label))
            .collect(),
        None => {
            let pattern = Regex::new(&format!("^{}(.+)$", regex::escape(&group.base_name)))
                .expect("thread scan pattern compiles");
            let mut found = Vec::new();
            for name in list_dir(dir)? {
                if let Some(caps) = pattern.captures(&name) {
                    found.push((dir.join(&name), caps[1].to_string()));
                }
            }
            found.sort();
            found
        }
    };
    debug!(
        "Node {:?}: {} dump file(s) selected",
        group.node_label,
        files.len()
    );
    Ok(files)
}

/// File names in a directory, sorted for reproducible discovery order
///
/// **Private** - internal helper
fn list_dir(dir: &Path) -> Result<Vec<String>, ParseError> {
    let to_io = |source| ParseError::Io {
        file: dir.display().to_string(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_io)? {
        let entry = entry.map_err(to_io)?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
