//! Error types for parameter sweeps
//!
//! A failing grid cell is never a `SweepError`; it is recorded in its
//! `SweepResult` and the sweep moves on.

use std::io;
use std::path::PathBuf;

use shared_types::{BitVectorError, RunConfigError};
use thiserror::Error;

use crate::domain::SweepAxis;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Grid axis {0} has no values")]
    EmptyAxis(SweepAxis),

    #[error("Grid axis {axis} lists {value} more than once")]
    DuplicateAxisValue { axis: SweepAxis, value: String },

    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(#[from] RunConfigError),

    #[error("Invalid sweep settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] BitVectorError),

    #[error("Failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sample log {path} already has content; use a fresh log directory")]
    StaleLog { path: PathBuf },

    #[error("Two grid cells map to the same log file {0}")]
    CellKeyCollision(String),

    #[error("Cannot pivot {0} against itself")]
    SameAxis(SweepAxis),

    #[error("Two results share the pivot cell for {0}")]
    DuplicateCell(String),

    #[error("Failed to export report: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
