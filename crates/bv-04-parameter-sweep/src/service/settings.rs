//! Settings shared by every cell of a sweep.

use std::path::PathBuf;

use bv_03_live_sampler::RunControl;
use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// Warm-up batches timed per cell in `LatencyMode::Warmup`.
pub const DEFAULT_WARMUP_BATCHES: u32 = 3;

/// How the per-sample latency of a cell is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LatencyMode {
    /// Wall-clock time of the convergence run divided by its samples.
    #[default]
    FromRun,
    /// Mean over `batches` timed batches drawn before the convergence run.
    /// Those batches are not logged.
    Warmup { batches: u32 },
}

#[derive(Clone, Debug)]
pub struct SweepSettings {
    /// Directory for per-cell logs (`<cell_key>.samples`). `None` keeps
    /// samples in memory.
    pub log_dir: Option<PathBuf>,
    pub latency_mode: LatencyMode,
    /// Cells run at the same time. Results keep grid order regardless.
    ///
    /// Cells are polled as futures on the calling task, and the file log
    /// syncs each sample synchronously, so with a log directory set a slow
    /// disk stalls every in-flight cell.
    pub max_concurrent_cells: usize,
    /// Budget, deadline and cancellation applied to every cell.
    pub control: RunControl,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            log_dir: None,
            latency_mode: LatencyMode::FromRun,
            max_concurrent_cells: 1,
            control: RunControl::default(),
        }
    }
}

impl SweepSettings {
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn with_latency_mode(mut self, mode: LatencyMode) -> Self {
        self.latency_mode = mode;
        self
    }

    pub fn with_max_concurrent_cells(mut self, cells: usize) -> Self {
        self.max_concurrent_cells = cells;
        self
    }

    pub fn with_control(mut self, control: RunControl) -> Self {
        self.control = control;
        self
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if self.max_concurrent_cells == 0 {
            return Err(SweepError::InvalidSettings(
                "max_concurrent_cells must be at least 1".into(),
            ));
        }
        if self.latency_mode == (LatencyMode::Warmup { batches: 0 }) {
            return Err(SweepError::InvalidSettings(
                "warm-up needs at least one batch".into(),
            ));
        }
        Ok(())
    }
}
