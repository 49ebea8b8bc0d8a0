//! Error types for hoplat-sources.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Nothing left to analyze after resolving every input. Fatal for a run.
    #[error("no input log files found")]
    NoInputs,

    #[error("failed to read log file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
