//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default base name of profiler dump files
pub const DEFAULT_BASE_FILE: &str = "profiler_";

/// Default thread selector (threads 0 through 3)
pub const DEFAULT_THREADS: &str = "0:4";

/// Ensemble name that accumulates every thread of every node
pub const ALL_ENSEMBLE: &str = "all";
