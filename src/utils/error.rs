//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and parsing profiler dump files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{file}:{line_number}: malformed record: {line:?}")]
    MalformedLine {
        file: String,
        line_number: usize,
        line: String,
    },

    #[error("{file}:{line_number}: self record must not carry child/recurse fields")]
    UnexpectedChildFields { file: String, line_number: usize },

    #[error("{file}:{line_number}: edge record is missing child/recurse fields")]
    MissingChildFields { file: String, line_number: usize },

    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Internal invariant violations during graph construction or merging.
///
/// These signal a bug in the caller (or corrupt edge wiring in a dump),
/// never a recoverable data condition.
#[derive(Error, Debug)]
pub enum InvariantViolation {
    #[error("function {id} statistics set twice")]
    AlreadyInitialized { id: u64 },

    #[error("function {id} statistics used before initialization")]
    NotInitialized { id: u64 },

    #[error("cannot merge function {expected} with function {found}")]
    FunctionIdMismatch { expected: u64, found: u64 },

    #[error("cannot merge edge {expected_parent:?}->{expected_callee} with edge {found_parent:?}->{found_callee}")]
    EdgeIdMismatch {
        expected_parent: Option<u64>,
        expected_callee: u64,
        found_parent: Option<u64>,
        found_callee: u64,
    },

    #[error("edge to {callee} already linked to parent {parent}")]
    ParentAlreadyLinked { parent: u64, callee: u64 },

    #[error("function {parent} already has an edge to {callee}")]
    DuplicateChild { parent: u64, callee: u64 },

    #[error("function {parent} cannot gain children after an ensemble merge")]
    ChildAfterMerge { parent: u64 },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
