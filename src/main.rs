//! Ensemble Prof CLI
//!
//! A call-graph profile aggregator. Merges per-thread profiler dumps
//! across threads and nodes and prints gprof-style reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ensemble_prof::commands::{execute_analyze, validate_args, AnalyzeArgs};
use ensemble_prof::discovery::Selector;
use ensemble_prof::utils::config::{DEFAULT_BASE_FILE, DEFAULT_THREADS, SCHEMA_VERSION};

/// Ensemble Prof - call-graph profile aggregation
#[derive(Parser, Debug)]
#[command(name = "ensemble-prof")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate profiler dumps and print reports
    Analyze {
        /// Directory containing the dump files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Base name of the dump files
        #[arg(short, long, default_value = DEFAULT_BASE_FILE)]
        base_file: String,

        /// Threads to aggregate: "*", a range "a:b", or a list "0,1,2"
        #[arg(short, long, default_value = DEFAULT_THREADS)]
        thread: Selector,

        /// Nodes to aggregate: "*", a range "a:b", or a list "0,1,2"
        #[arg(short, long)]
        node: Option<Selector>,

        /// Print cross-sample averages and deviations for totals
        #[arg(long)]
        stats: bool,

        /// Print recursion columns
        #[arg(long)]
        recurse: bool,

        /// Write the total profile as JSON to this path
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Limit reports to the N hottest functions (0 = all)
        #[arg(long, default_value = "0")]
        top: usize,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            dir,
            base_file,
            thread,
            node,
            stats,
            recurse,
            json,
            top,
        } => {
            let args = AnalyzeArgs {
                dir,
                base_file,
                threads: thread,
                nodes: node,
                full_stats: stats,
                recurse,
                json_output: json,
                top,
            };

            // Validate args first
            validate_args(&args)?;

            let report = execute_analyze(args)?;
            print!("{}", report);
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a profile JSON file
///
/// **Private** - internal command implementation
fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    use ensemble_prof::output::read_profile;

    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)?;

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Base name: {}", profile.base_name);
    println!("  Node: {}", profile.node);
    println!("  Functions: {}", profile.functions.len());
    println!("  Total measured time: {:.6}", profile.total_measured_time);

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Ensemble Prof v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call-graph profile aggregation across threads and nodes.");
}
