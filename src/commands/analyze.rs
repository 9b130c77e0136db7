//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Discovers dump files for the selected nodes and threads
//! 2. Parses each file into a per-thread graph
//! 3. Folds every graph into its node ensemble and the "all" ensemble
//! 4. Finalizes statistics
//! 5. Renders per-thread, per-node, and total reports
//! 6. Optionally exports the total profile as JSON

use crate::aggregator::EnsembleStatistics;
use crate::discovery::{node_groups, thread_files, NodeGroup, Selector};
use crate::output::write_profile;
use crate::parser::{DumpParser, NameTable};
use crate::report::{assign_ranks, render_thread_report, Profile, ReportOptions};
use crate::utils::config::{ALL_ENSEMBLE, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing the dump files
    pub dir: PathBuf,

    /// Base name of the dump files
    pub base_file: String,

    /// Thread selection
    pub threads: Selector,

    /// Node selection (None = single anonymous node)
    pub nodes: Option<Selector>,

    /// Report cross-sample averages and deviations for ensemble totals
    pub full_stats: bool,

    /// Report recursion columns
    pub recurse: bool,

    /// Optional JSON export path for the total profile
    pub json_output: Option<PathBuf>,

    /// Cap on reported functions; 0 means all
    pub top: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            base_file: crate::utils::config::DEFAULT_BASE_FILE.to_string(),
            threads: Selector::Range(0, 4),
            nodes: None,
            full_stats: false,
            recurse: false,
            json_output: None,
            top: 0,
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.base_file.is_empty() {
        anyhow::bail!("Base file name cannot be empty");
    }

    if let Selector::Range(start, end) = &args.threads {
        if start >= end {
            anyhow::bail!("Thread range {}:{} is empty", start, end);
        }
    }
    if let Some(Selector::Range(start, end)) = &args.nodes {
        if start >= end {
            anyhow::bail!("Node range {}:{} is empty", start, end);
        }
    }

    if args.top > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Discovery or read failures on dump files
/// * Malformed dump records (fatal, no partial output)
/// * JSON export failures
pub fn execute_analyze(args: AnalyzeArgs) -> Result<String> {
    let start_time = Instant::now();

    info!(
        "Analyzing dumps {:?}* in {}",
        args.base_file,
        args.dir.display()
    );

    // Step 1: discover node groups and their dump files
    let groups = node_groups(&args.dir, &args.base_file, args.nodes.as_ref())
        .context("Failed to discover node groups")?;
    if groups.is_empty() {
        anyhow::bail!("No node groups match base name {:?}", args.base_file);
    }
    let multi_node = groups.len() > 1;

    // Step 2/3: parse every file, feeding the ensembles as we go
    let parser = DumpParser::new();
    let mut names = NameTable::new();
    let mut all = EnsembleStatistics::new(ALL_ENSEMBLE, ALL_ENSEMBLE);
    let mut node_ensembles: Vec<EnsembleStatistics> = if multi_node {
        groups
            .iter()
            .map(|g| EnsembleStatistics::new(&g.base_name, &g.node_label))
            .collect()
    } else {
        Vec::new()
    };
    let mut node_threads: Vec<(NodeGroup, Vec<crate::aggregator::ThreadStatistics>)> = Vec::new();

    for (index, group) in groups.iter().enumerate() {
        let files = thread_files(&args.dir, group, &args.threads)
            .context("Failed to enumerate dump files")?;
        if files.is_empty() {
            anyhow::bail!("No dump files match {:?}", group.base_name);
        }

        let mut threads = Vec::with_capacity(files.len());
        for (path, thread_label) in files {
            info!("Processing file {}...", path.display());
            let thread = parser
                .parse_file(&path, &thread_label, &mut names)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            all.add_thread_statistics(&thread)?;
            if let Some(ensemble) = node_ensembles.get_mut(index) {
                ensemble.add_thread_statistics(&thread)?;
            }
            threads.push(thread);
        }
        node_threads.push((group.clone(), threads));
    }

    // Step 4: finalize everything
    info!("Done processing all files, computing all statistics...");
    for (_, threads) in &mut node_threads {
        for thread in threads.iter_mut() {
            thread.calculate_statistics()?;
        }
    }
    for ensemble in &mut node_ensembles {
        ensemble.calculate_statistics()?;
    }
    all.calculate_statistics()?;

    // Step 5: render reports in the classic order: threads, node totals,
    // grand total
    debug!("Rendering reports for {} node group(s)", node_threads.len());
    let ensemble_opts = ReportOptions {
        full_stats: args.full_stats,
        recurse: args.recurse,
        top: args.top,
    };
    let thread_opts = ReportOptions {
        full_stats: false,
        recurse: args.recurse,
        top: args.top,
    };

    let mut out = String::new();
    for (index, (group, threads)) in node_threads.iter_mut().enumerate() {
        if multi_node {
            out.push_str(&format!(
                "############### Node {} ################\n",
                group.node_label
            ));
        }
        for thread in threads.iter_mut() {
            assign_ranks(thread);
            let header = format!("#### Thread {} ####", thread.thread_label());
            out.push_str(&render_thread_report(&header, thread, &thread_opts));
            out.push('\n');
        }
        if multi_node {
            let header = format!("#### Node {} total ####", group.node_label);
            let ensemble = &mut node_ensembles[index];
            if let Some(gathering) = ensemble.gathering_thread_mut() {
                assign_ranks(gathering);
                out.push_str(&render_thread_report(&header, gathering, &ensemble_opts));
                out.push('\n');
            }
        }
    }

    let total_header = if multi_node {
        "############### TOTAL ################"
    } else {
        "#### TOTAL ####"
    };
    let gathering = all
        .gathering_thread_mut()
        .context("No dump files were aggregated")?;
    assign_ranks(gathering);
    out.push_str(&render_thread_report(total_header, gathering, &ensemble_opts));

    // Step 6: optional JSON export of the total profile
    if let Some(json_path) = &args.json_output {
        let profile = Profile::from_thread(gathering, &args.base_file, ALL_ENSEMBLE, SCHEMA_VERSION);
        write_profile(&profile, json_path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dump(dir: &std::path::Path, name: &str, main_sum: f64) {
        let content = format!(
            "DEF main 0\nDEF leaf 1\n\
             ENTRY 0:0 = count(5), sum({main}), sumSq({sq})\n\
             ENTRY 1:1 = count(5), sum(10.0), sumSq(20.0)\n\
             ENTRY 0:1 = count(5), sum(10.0), sumSq(20.0), sumChild(0.0), sumSqChild(0.0), sumRecurse(0.0), sumSqRecurse(0.0)\n",
            main = main_sum,
            sq = main_sum * main_sum
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_validate_args_defaults_ok() {
        assert!(validate_args(&AnalyzeArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_base() {
        let args = AnalyzeArgs {
            base_file: String::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_thread_range() {
        let args = AnalyzeArgs {
            threads: Selector::Range(4, 4),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_too_large() {
        let args = AnalyzeArgs {
            top: 2000,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_execute_analyze_single_node() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "profiler_0", 50.0);
        write_dump(dir.path(), "profiler_1", 30.0);

        let report = execute_analyze(AnalyzeArgs {
            dir: dir.path().to_path_buf(),
            threads: Selector::Range(0, 2),
            ..Default::default()
        })
        .unwrap();

        assert!(report.contains("#### Thread 0 ####"));
        assert!(report.contains("#### Thread 1 ####"));
        assert!(report.contains("#### TOTAL ####"));
        // totals fold both threads: main self 40 + 20, leaf self 10 + 10
        assert!(report.contains("Total measured time: 80.000000"));
    }

    #[test]
    fn test_execute_analyze_multi_node() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "profiler_0-0", 50.0);
        write_dump(dir.path(), "profiler_1-0", 30.0);

        let report = execute_analyze(AnalyzeArgs {
            dir: dir.path().to_path_buf(),
            threads: Selector::Range(0, 1),
            nodes: Some(Selector::All),
            ..Default::default()
        })
        .unwrap();

        assert!(report.contains("Node 0"));
        assert!(report.contains("Node 1"));
        assert!(report.contains("############### TOTAL ################"));
    }

    #[test]
    fn test_execute_analyze_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute_analyze(AnalyzeArgs {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_analyze_json_export() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "profiler_0", 50.0);
        let json_path = dir.path().join("profile.json");

        execute_analyze(AnalyzeArgs {
            dir: dir.path().to_path_buf(),
            threads: Selector::Range(0, 1),
            json_output: Some(json_path.clone()),
            ..Default::default()
        })
        .unwrap();

        let profile = crate::output::read_profile(&json_path).unwrap();
        assert_eq!(profile.node, "all");
        assert_eq!(profile.functions.len(), 2);
        assert_eq!(profile.functions[0].rank, 1);
    }
}
