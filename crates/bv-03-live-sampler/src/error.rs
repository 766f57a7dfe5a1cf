//! Error types for live sampling

use std::io;
use std::path::PathBuf;

use shared_types::{BitVectorError, RunConfigError};
use thiserror::Error;

/// Errors raised by a sample source
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Sample source unavailable: {0}")]
    Unavailable(String),

    #[error("Sample source failed: {0}")]
    Failed(String),

    #[error("Invalid sample request: {0}")]
    InvalidRequest(String),
}

/// Errors from the durable sample log
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to open sample log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sample log already has a writer ({path})")]
    AlreadyLocked { path: PathBuf },

    #[error("Failed to append to sample log: {0}")]
    Write(#[source] io::Error),

    #[error("Refusing to log malformed sample: {0}")]
    MalformedSample(#[from] BitVectorError),
}

/// Errors that end a live run
///
/// Reaching the sample budget, a deadline or a cancellation request is not
/// an error; those are reported through `RunStatus`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid run configuration: {0}")]
    InvalidConfig(#[from] RunConfigError),

    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] BitVectorError),

    #[error("Sample source failed during preparation: {0}")]
    Prepare(#[source] SourceError),

    #[error("Sample source failed on batch {batch} after {samples_accepted} samples: {source}")]
    Source {
        batch: u64,
        samples_accepted: u64,
        #[source]
        source: SourceError,
    },

    #[error("Sample source exhausted on batch {batch}: requested {requested}, received {received}")]
    SourceExhausted {
        batch: u64,
        requested: u32,
        received: u32,
    },

    #[error("Sample log failure: {0}")]
    Log(#[from] LogError),
}
