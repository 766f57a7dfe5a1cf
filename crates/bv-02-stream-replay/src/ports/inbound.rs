//! Inbound Ports (Driving Ports)
//!
//! Path-based API used by the runtime to analyse persisted sample logs.

use std::path::Path;

use shared_types::TargetVector;

use crate::domain::{DuplicateReport, FinalMajority, ReplayOutcome};
use crate::error::ReplayError;

/// Offline analysis of an append-only sample log (Driving Port)
pub trait LogAnalysisApi: Send + Sync {
    /// Replay the log until the consensus matches `target`.
    ///
    /// Reaching the end of the log without convergence is not an error.
    fn replay_until_target(
        &self,
        log: &Path,
        target: &TargetVector,
    ) -> Result<ReplayOutcome, ReplayError>;

    /// Samples that occur more than once.
    fn duplicates(&self, log: &Path) -> Result<DuplicateReport, ReplayError>;

    /// Tie-exclusive majority over the whole log.
    fn majority(&self, log: &Path) -> Result<FinalMajority, ReplayError>;
}
