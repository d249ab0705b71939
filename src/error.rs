use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures for the reporting pipelines.
///
/// Per-entry traversal problems never appear here: the scanner records
/// them as skips and keeps walking. These variants are the conditions
/// that stop a whole run.
#[derive(Debug, Error)]
pub enum CensusError {
    /// The scan root or input file does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The scan root or input file cannot be opened at all.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// An input file failed mid-read.
    #[error("cannot read {}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A census CSV row does not match the expected schema.
    #[error("malformed row at line {line} in {}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// An output file could not be created or written.
    #[error("cannot write {}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The user interrupted the run.
    #[error("operation interrupted")]
    Interrupted,
}
