//! Error types for the stream replayer

use std::io;
use std::path::PathBuf;

use shared_types::BitVectorError;
use thiserror::Error;

/// Errors that can occur while replaying a sample log
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to open sample log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read sample log at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] BitVectorError),
}
