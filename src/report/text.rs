//! Text rendering of flat and call-graph profiles.
//!
//! Output follows the classic gprof layout: a flat profile ranked by self
//! time, then a call-graph section listing each function with its callers
//! above and its callees below. Reports render to a `String` so they can
//! be printed, logged, or asserted on in tests.

use crate::aggregator::{FunctionEntry, ThreadStatistics};
use log::debug;
use std::cmp::Ordering;

/// Rendering options for a thread report
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Include cross-sample (avg, std dev) detail rows
    pub full_stats: bool,
    /// Include the recursion column
    pub recurse: bool,
    /// Cap on reported functions; 0 means all
    pub top: usize,
}

/// Assign ranks by descending self time, starting at 1
///
/// Ranks are presentation state only; they are recomputed for every report.
pub fn assign_ranks(thread: &mut ThreadStatistics) {
    let mut ordered: Vec<(u64, f64)> = thread
        .entries()
        .values()
        .map(|e| (e.id(), e.total_self().total()))
        .collect();
    ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    for (rank, (id, _)) in ordered.into_iter().enumerate() {
        if let Some(entry) = thread.entries_mut().get_mut(&id) {
            entry.set_rank(rank + 1);
        }
    }
}

/// Render the flat and call-graph profiles of one graph
///
/// **Public** - main entry point for text reporting
///
/// # Arguments
/// * `header` - section header line (thread, node, or total)
/// * `thread` - a finalized, rank-assigned graph
/// * `opts` - rendering options
pub fn render_thread_report(header: &str, thread: &ThreadStatistics, opts: &ReportOptions) -> String {
    let total_time = thread.total_measured_time();
    debug!(
        "Rendering report {:?}: {} functions, {:.6} total measured time",
        header,
        thread.len(),
        total_time
    );

    let mut flat: Vec<&FunctionEntry> = thread.entries().values().collect();
    flat.sort_by(|a, b| {
        b.total_self()
            .total()
            .partial_cmp(&a.total_self().total())
            .unwrap_or(Ordering::Equal)
    });
    if opts.top > 0 {
        flat.truncate(opts.top);
    }

    let mut graph: Vec<&FunctionEntry> = thread.entries().values().collect();
    graph.sort_by(|a, b| {
        b.total_time()
            .total()
            .partial_cmp(&a.total_time().total())
            .unwrap_or(Ordering::Equal)
    });
    if opts.top > 0 {
        graph.truncate(opts.top);
    }

    let mut out = String::new();
    out.push_str(header);
    out.push('\n');
    out.push_str(&format!("\tTotal measured time: {:.6}\n", total_time));

    render_flat_profile(&mut out, &flat, total_time, opts);
    render_call_graph(&mut out, &graph, thread, total_time, opts);
    out
}

/// Flat profile: one row per function, ranked by self time
///
/// **Private** - internal helper for render_thread_report
fn render_flat_profile(out: &mut String, flat: &[&FunctionEntry], total_time: f64, opts: &ReportOptions) {
    out.push_str("\t--- Flat profile ---\n");
    out.push_str(&format!(
        "{:>6}  {:^16} {}{:^16}  {:^12}  {:^16}  {:^16}\n",
        "%Time",
        "Cum ms",
        recurse_header(opts),
        "Self ms",
        "Calls",
        "Avg (Cum)",
        "Std Dev (Cum)"
    ));

    for entry in flat {
        let percent = percent_of(entry.total_self().total(), total_time);
        out.push_str(&format!(
            "{:>6.2}  {:^16.6} {}{:^16.6}  {:^12}  {:^16.6}  {:^16.6}  {} {} [{}]\n",
            percent,
            entry.total_no_recurse().total(),
            recurse_column(entry.total_recurse().total(), opts),
            entry.total_self().total(),
            entry.count().total() as u64,
            entry.avg(),
            entry.std_dev(),
            entry.name(),
            if entry.total_recurse().total() != 0.0 { "R" } else { " " },
            entry.rank()
        ));
        if opts.full_stats {
            out.push_str(&format!(
                "        ({:.6}, {:.6}) cum  ({:.6}, {:.6}) self  ({:.6}, {:.6}) calls\n",
                entry.total_no_recurse().avg(),
                entry.total_no_recurse().std_dev(),
                entry.total_self().avg(),
                entry.total_self().std_dev(),
                entry.count().avg(),
                entry.count().std_dev()
            ));
        }
    }
}

/// Call-graph profile: callers above, entry row, callees below
///
/// **Private** - internal helper for render_thread_report
fn render_call_graph(
    out: &mut String,
    graph: &[&FunctionEntry],
    thread: &ThreadStatistics,
    total_time: f64,
    opts: &ReportOptions,
) {
    out.push_str("\n\t--- Call-graph profile ---\n");
    out.push_str(&format!(
        "{:>6}  {:>6}  {:^16}  {:^16} {}{:^25}\n",
        "Index", "%Time", "Self", "Descendant", recurse_header(opts), "Called"
    ));

    for entry in graph {
        // Callers: every parent's edge down to this function, heaviest first
        let mut caller_rows: Vec<(&FunctionEntry, &crate::aggregator::ChildEntry)> = entry
            .parents()
            .iter()
            .filter_map(|pid| {
                thread
                    .entry(*pid)
                    .and_then(|parent| parent.child(entry.id()).map(|edge| (parent, edge)))
            })
            .collect();
        caller_rows.sort_by(|a, b| {
            b.1.total_time()
                .total()
                .partial_cmp(&a.1.total_time().total())
                .unwrap_or(Ordering::Equal)
        });
        for (parent, edge) in caller_rows {
            out.push_str(&format!(
                "{:>14}  {:^16.6}  {:^16.6} {}{:>11}/{:<11}  {} [{}]\n",
                "",
                edge.total_self().total(),
                edge.total_in_children().total(),
                recurse_placeholder(opts),
                edge.count().total() as u64,
                entry.count().total() as u64,
                parent.name(),
                parent.rank()
            ));
            if opts.full_stats {
                out.push_str(&edge_stats_row(
                    edge.total_self(),
                    edge.total_in_children(),
                    edge.count(),
                ));
            }
        }

        // The function's own row
        out.push_str(&format!(
            "[{:>4}]  {:>6.2}  {:^16.6}  {:^16.6} {}{:^25}  {} [{}]\n",
            entry.rank(),
            percent_of(entry.total_no_recurse().total(), total_time),
            entry.total_self().total(),
            entry.total_in_children_no_recurse().total(),
            recurse_column(entry.total_recurse().total(), opts),
            entry.count().total() as u64,
            entry.name(),
            entry.rank()
        ));
        if opts.full_stats {
            out.push_str(&edge_stats_row(
                entry.total_self(),
                entry.total_in_children_no_recurse(),
                entry.count(),
            ));
        }

        // Callees, heaviest self time first
        let mut callee_rows: Vec<&crate::aggregator::ChildEntry> =
            entry.children().values().collect();
        callee_rows.sort_by(|a, b| {
            b.total_self()
                .total()
                .partial_cmp(&a.total_self().total())
                .unwrap_or(Ordering::Equal)
        });
        for edge in callee_rows {
            let callee = thread.entry(edge.callee_id());
            let (callee_calls, callee_name, callee_rank) = match callee {
                Some(c) => (c.count().total() as u64, c.name().to_string(), c.rank()),
                None => (0, edge.callee_name().to_string(), 0),
            };
            out.push_str(&format!(
                "{:>14}  {:^16.6}  {:^16.6} {}{:>11}/{:<11}  {} [{}]\n",
                "",
                edge.total_self().total(),
                edge.total_in_children_no_recurse().total(),
                recurse_column(edge.total_recurse().total(), opts),
                edge.count().total() as u64,
                callee_calls,
                callee_name,
                callee_rank
            ));
            if opts.full_stats {
                out.push_str(&edge_stats_row(
                    edge.total_self(),
                    edge.total_in_children_no_recurse(),
                    edge.count(),
                ));
            }
        }

        out.push_str(&"-".repeat(110));
        out.push('\n');
    }
}

/// Cross-sample (avg, std dev) detail row under a call-graph line
fn edge_stats_row(
    total_self: &crate::aggregator::EnsembleValue,
    descendant: &crate::aggregator::EnsembleValue,
    count: &crate::aggregator::EnsembleValue,
) -> String {
    format!(
        "        ({:.6}, {:.6}) self  ({:.6}, {:.6}) descendant  ({:.6}, {:.6}) calls\n",
        total_self.avg(),
        total_self.std_dev(),
        descendant.avg(),
        descendant.std_dev(),
        count.avg(),
        count.std_dev()
    )
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

fn recurse_header(opts: &ReportOptions) -> String {
    if opts.recurse {
        format!("{:^18} ", "Recurse")
    } else {
        String::new()
    }
}

fn recurse_column(recurse: f64, opts: &ReportOptions) -> String {
    if !opts.recurse {
        return String::new();
    }
    if recurse != 0.0 {
        format!("{:^18} ", format!("[{:.6}]", recurse))
    } else {
        format!("{:^18} ", "")
    }
}

fn recurse_placeholder(opts: &ReportOptions) -> String {
    if opts.recurse {
        format!("{:^18} ", "")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{ChildEntry, EdgeSeed};

    fn sample_thread() -> ThreadStatistics {
        let mut t = ThreadStatistics::new("profiler_0", "0");
        t.get_or_create_entry(0, "main").set(5.0, 50.0, 550.0).unwrap();
        t.get_or_create_entry(1, "leaf").set(5.0, 30.0, 200.0).unwrap();
        let edge = ChildEntry::from_seed(
            1,
            "leaf",
            EdgeSeed {
                count: 5.0,
                total_time: 30.0,
                total_time_sq: 200.0,
                total_in_children: 10.0,
                total_in_children_sq: 40.0,
                total_recurse: 0.0,
                total_recurse_sq: 0.0,
            },
        );
        t.register_edge(0, "main", edge).unwrap();
        t.calculate_statistics().unwrap();
        t
    }

    #[test]
    fn test_assign_ranks_by_self_time() {
        let mut t = sample_thread();
        assign_ranks(&mut t);
        // main self = 20, leaf self = 30: leaf ranks first
        assert_eq!(t.entry(1).unwrap().rank(), 1);
        assert_eq!(t.entry(0).unwrap().rank(), 2);
    }

    #[test]
    fn test_report_contains_sections_and_names() {
        let mut t = sample_thread();
        assign_ranks(&mut t);
        let report = render_thread_report("#### Thread 0 ####", &t, &ReportOptions::default());
        assert!(report.contains("#### Thread 0 ####"));
        assert!(report.contains("Flat profile"));
        assert!(report.contains("Call-graph profile"));
        assert!(report.contains("main"));
        assert!(report.contains("leaf"));
        assert!(report.contains("Total measured time: 50.000000"));
    }

    #[test]
    fn test_full_stats_adds_detail_rows() {
        let mut t = sample_thread();
        assign_ranks(&mut t);
        let plain = render_thread_report("h", &t, &ReportOptions::default());
        let full = render_thread_report(
            "h",
            &t,
            &ReportOptions {
                full_stats: true,
                ..Default::default()
            },
        );
        assert!(full.len() > plain.len());
        assert!(full.contains("calls"));
    }

    #[test]
    fn test_full_stats_adds_call_graph_detail_rows() {
        let mut t = sample_thread();
        assign_ranks(&mut t);
        let plain = render_thread_report("h", &t, &ReportOptions::default());
        let full = render_thread_report(
            "h",
            &t,
            &ReportOptions {
                full_stats: true,
                ..Default::default()
            },
        );

        let plain_graph = plain.split("Call-graph").nth(1).unwrap();
        let full_graph = full.split("Call-graph").nth(1).unwrap();
        // Caller, own, and callee rows all gain (avg, std dev) detail lines.
        assert!(!plain_graph.contains("descendant"));
        assert!(full_graph.contains("descendant"));
        assert!(full_graph.matches("descendant").count() >= 3);
    }

    #[test]
    fn test_top_caps_flat_rows() {
        let mut t = sample_thread();
        assign_ranks(&mut t);
        let capped = render_thread_report(
            "h",
            &t,
            &ReportOptions {
                top: 1,
                ..Default::default()
            },
        );
        // Only the top-ranked function appears in the flat section before
        // the call-graph header.
        let flat_section = capped.split("Call-graph").next().unwrap();
        assert!(flat_section.contains("leaf"));
        assert!(!flat_section.contains("main"));
    }
}
