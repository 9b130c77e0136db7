//! Parser for per-thread profiler dump files.
//!
//! A dump is a sequence of text lines of two kinds:
//! - `DEF <name> <id>` declares the display name of a function id
//! - `ENTRY <p>:<c> = count(..), sum(..), sumSq(..)[, sumChild(..),
//!   sumSqChild(..), sumRecurse(..), sumSqRecurse(..)]`
//!
//! A self record (`p == c`) carries exactly the first three fields; an edge
//! record (`p != c`) carries all seven. Anything else is a fatal parse
//! error — there is no partial-result recovery.

use super::names::NameTable;
use crate::aggregator::{ChildEntry, EdgeSeed, ThreadStatistics};
use crate::utils::error::ParseError;
use log::debug;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DEF_PATTERN: &str = r"^DEF ([A-Za-z_0-9]+) ([0-9]+)$";
const ENTRY_PATTERN: &str = r"^ENTRY ([0-9]+):([0-9]+) = count\(([0-9]+)\), sum\(([0-9.]+)\), sumSq\(([0-9.]+)\)(?:$|, sumChild\(([0-9.]+)\), sumSqChild\(([0-9.]+)\), sumRecurse\(([0-9.]+)\), sumSqRecurse\(([0-9.]+)\)$)";

/// Line-grammar parser for profiler dumps
///
/// **Public** - compile the grammar once, parse many files
#[derive(Debug)]
pub struct DumpParser {
    def_re: Regex,
    entry_re: Regex,
}

impl Default for DumpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpParser {
    pub fn new() -> Self {
        Self {
            def_re: Regex::new(DEF_PATTERN).expect("DEF grammar compiles"),
            entry_re: Regex::new(ENTRY_PATTERN).expect("ENTRY grammar compiles"),
        }
    }

    /// Parse one dump file into a thread graph
    ///
    /// # Arguments
    /// * `path` - dump file to read
    /// * `thread_label` - display label of the thread this file belongs to
    /// * `names` - shared name table, updated by DEF lines
    ///
    /// # Errors
    /// `ParseError::Io` on read failures, otherwise the first malformed
    /// line aborts with its file name and line number.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        thread_label: &str,
        names: &mut NameTable,
    ) -> Result<ThreadStatistics, ParseError> {
        let path = path.as_ref();
        let file_label = path.to_string_lossy().to_string();
        let file = File::open(path).map_err(|source| ParseError::Io {
            file: file_label.clone(),
            source,
        })?;
        self.parse_reader(BufReader::new(file), &file_label, thread_label, names)
    }

    /// Parse dump text from any buffered reader
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
        file_label: &str,
        thread_label: &str,
        names: &mut NameTable,
    ) -> Result<ThreadStatistics, ParseError> {
        let mut thread = ThreadStatistics::new(file_label, thread_label);
        let mut records = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ParseError::Io {
                file: file_label.to_string(),
                source,
            })?;
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                continue;
            }
            self.parse_line(trimmed, file_label, line_number, &mut thread, names)?;
            records += 1;
        }

        debug!(
            "Parsed {} records, {} functions from {}",
            records,
            thread.len(),
            file_label
        );
        Ok(thread)
    }

    /// Parse dump text held in memory (tests, pre-read files)
    pub fn parse_str(
        &self,
        content: &str,
        file_label: &str,
        thread_label: &str,
        names: &mut NameTable,
    ) -> Result<ThreadStatistics, ParseError> {
        self.parse_reader(content.as_bytes(), file_label, thread_label, names)
    }

    /// Dispatch one non-blank line to the DEF or ENTRY grammar
    ///
    /// **Private** - internal helper for parse_reader
    fn parse_line(
        &self,
        line: &str,
        file: &str,
        line_number: usize,
        thread: &mut ThreadStatistics,
        names: &mut NameTable,
    ) -> Result<(), ParseError> {
        let malformed = || ParseError::MalformedLine {
            file: file.to_string(),
            line_number,
            line: line.to_string(),
        };

        if let Some(caps) = self.def_re.captures(line) {
            let name = &caps[1];
            let id: u64 = caps[2].parse().map_err(|_| malformed())?;
            names.define(id, name);
            return Ok(());
        }

        let caps = self.entry_re.captures(line).ok_or_else(malformed)?;
        let parent_id: u64 = caps[1].parse().map_err(|_| malformed())?;
        let child_id: u64 = caps[2].parse().map_err(|_| malformed())?;
        let count: u64 = caps[3].parse().map_err(|_| malformed())?;
        let sum: f64 = caps[4].parse().map_err(|_| malformed())?;
        let sum_sq: f64 = caps[5].parse().map_err(|_| malformed())?;
        let extras = match (caps.get(6), caps.get(7), caps.get(8), caps.get(9)) {
            (Some(a), Some(b), Some(c), Some(d)) => {
                let parse = |m: regex::Match| m.as_str().parse::<f64>().map_err(|_| malformed());
                Some((parse(a)?, parse(b)?, parse(c)?, parse(d)?))
            }
            _ => None,
        };

        if parent_id == child_id {
            if extras.is_some() {
                return Err(ParseError::UnexpectedChildFields {
                    file: file.to_string(),
                    line_number,
                });
            }
            let parent_name = names.get(parent_id).to_string();
            thread
                .get_or_create_entry(parent_id, &parent_name)
                .set(count as f64, sum, sum_sq)?;
        } else {
            let (sum_child, sum_sq_child, sum_recurse, sum_sq_recurse) =
                extras.ok_or(ParseError::MissingChildFields {
                    file: file.to_string(),
                    line_number,
                })?;
            let child = ChildEntry::from_seed(
                child_id,
                names.get(child_id),
                EdgeSeed {
                    count: count as f64,
                    total_time: sum,
                    total_time_sq: sum_sq,
                    total_in_children: sum_child,
                    total_in_children_sq: sum_sq_child,
                    total_recurse: sum_recurse,
                    total_recurse_sq: sum_sq_recurse,
                },
            );
            let parent_name = names.get(parent_id).to_string();
            thread.register_edge(parent_id, &parent_name, child)?;
        }
        Ok(())
    }
}
