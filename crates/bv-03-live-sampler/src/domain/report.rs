//! # Run Report
//!
//! Summary of one live run. Only a `Converged` run has a time-to-target and
//! a samples-to-target; every other terminal status leaves them empty.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::BitVector;

/// Why a run stopped without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The tie-inclusive consensus equals the target.
    Converged,
    /// The sample budget was spent first.
    BudgetExhausted,
    /// Cancellation was requested between batches.
    Cancelled,
    /// The wall-clock deadline passed between batches.
    DeadlineReached,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStatus::Converged => "converged",
            RunStatus::BudgetExhausted => "budget exhausted",
            RunStatus::Cancelled => "cancelled",
            RunStatus::DeadlineReached => "deadline reached",
        };
        f.write_str(name)
    }
}

/// Outcome of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub status: RunStatus,
    /// Well-formed samples counted (and logged).
    pub samples_accepted: u64,
    /// Malformed samples dropped.
    pub samples_skipped: u64,
    /// Batches requested from the source.
    pub batches: u64,
    /// Wall-clock time from the first batch request until the run stopped.
    pub elapsed: Duration,
    /// Time spent in `SampleSource::prepare`.
    pub setup_time: Duration,
    /// Tie-inclusive consensus at the time the run stopped.
    pub consensus: BitVector,
}

impl RunReport {
    pub fn converged(&self) -> bool {
        self.status == RunStatus::Converged
    }

    /// Accepted samples at first convergence.
    pub fn samples_to_target(&self) -> Option<u64> {
        self.converged().then_some(self.samples_accepted)
    }

    /// Wall-clock time to first convergence, excluding setup.
    pub fn time_to_target(&self) -> Option<Duration> {
        self.converged().then_some(self.elapsed)
    }

    /// Mean wall-clock time per accepted sample. Zero when nothing was
    /// accepted.
    pub fn average_sample_latency(&self) -> Duration {
        match u32::try_from(self.samples_accepted) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.elapsed / n,
            Err(_) => Duration::from_secs_f64(
                self.elapsed.as_secs_f64() / self.samples_accepted as f64,
            ),
        }
    }
}
