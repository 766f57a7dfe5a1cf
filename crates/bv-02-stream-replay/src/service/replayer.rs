//! # Stream Replayer
//!
//! Feeds a persisted sample log through a fresh `ConsensusEngine`.
//!
//! Blank lines and lines of the wrong width are skipped and counted; they
//! never contribute to the processed count. This keeps logs with stray
//! trailing newlines or a torn final write replayable.

use std::io::BufRead;
use std::path::Path;

use bv_01_consensus_engine::ConsensusEngine;
use shared_types::{LogLine, TargetVector};
use tracing::{debug, info};

use crate::adapters::{open_log, SampleLogReader};
use crate::domain::{DuplicateReport, FinalMajority, ReplayOutcome};
use crate::error::ReplayError;
use crate::ports::LogAnalysisApi;

/// Replays sample logs of a fixed width.
#[derive(Clone, Debug)]
pub struct StreamReplayer {
    width: usize,
}

impl StreamReplayer {
    /// Create a replayer for logs of `width`-symbol samples.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Configured sample width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Replay until the tie-inclusive consensus equals `target`.
    ///
    /// Returns the number of accepted samples at first convergence, or the
    /// total accepted when the log ends first.
    pub fn run<R: BufRead>(
        &self,
        reader: R,
        target: &TargetVector,
    ) -> Result<ReplayOutcome, ReplayError> {
        target.expect_width(self.width)?;

        let mut engine = ConsensusEngine::new(self.width);
        let mut skipped_lines = 0u64;
        let mut converged = false;

        for entry in SampleLogReader::new(reader, self.width) {
            let entry = entry?;
            match entry.content {
                LogLine::Sample(sample) => {
                    let _ = engine.update(&sample);
                    if engine.has_converged(target) {
                        converged = true;
                        break;
                    }
                }
                LogLine::Blank => skipped_lines += 1,
                LogLine::Malformed(reason) => {
                    debug!("[bv-02] Skipping line {}: {}", entry.line, reason);
                    skipped_lines += 1;
                }
            }
        }

        let outcome = ReplayOutcome {
            samples_processed: engine.accepted(),
            skipped_lines,
            converged,
            consensus: engine.current_consensus(),
            min_margin: engine.min_margin(),
        };
        if converged {
            info!(
                "[bv-02] Target reached after {} samples",
                outcome.samples_processed
            );
        } else {
            info!(
                "[bv-02] Log exhausted after {} samples without reaching target",
                outcome.samples_processed
            );
        }
        Ok(outcome)
    }

    /// Count every well-formed sample and keep those seen more than once.
    pub fn find_duplicates<R: BufRead>(&self, reader: R) -> Result<DuplicateReport, ReplayError> {
        let mut counts = DuplicateReport::new();
        for entry in SampleLogReader::new(reader, self.width) {
            if let LogLine::Sample(sample) = entry?.content {
                *counts.entry(sample).or_insert(0) += 1;
            }
        }
        counts.retain(|_, count| *count > 1);
        Ok(counts)
    }

    /// One-pass tie-exclusive majority over the whole log.
    pub fn final_majority<R: BufRead>(&self, reader: R) -> Result<FinalMajority, ReplayError> {
        let mut engine = ConsensusEngine::new(self.width);
        let mut skipped_lines = 0u64;
        for entry in SampleLogReader::new(reader, self.width) {
            match entry?.content {
                LogLine::Sample(sample) => {
                    let _ = engine.update(&sample);
                }
                LogLine::Blank | LogLine::Malformed(_) => skipped_lines += 1,
            }
        }
        info!("[bv-02] Total samples processed: {}", engine.accepted());
        Ok(FinalMajority {
            majority: engine.majority_so_far(),
            samples_processed: engine.accepted(),
            skipped_lines,
        })
    }

    /// Engine state after replaying the whole log, for callers that need the
    /// raw counts.
    pub fn accumulate<R: BufRead>(&self, reader: R) -> Result<ConsensusEngine, ReplayError> {
        let mut engine = ConsensusEngine::new(self.width);
        for entry in SampleLogReader::new(reader, self.width) {
            if let LogLine::Sample(sample) = entry?.content {
                let _ = engine.update(&sample);
            }
        }
        Ok(engine)
    }
}

impl LogAnalysisApi for StreamReplayer {
    fn replay_until_target(
        &self,
        log: &Path,
        target: &TargetVector,
    ) -> Result<ReplayOutcome, ReplayError> {
        self.run(open_log(log)?, target)
    }

    fn duplicates(&self, log: &Path) -> Result<DuplicateReport, ReplayError> {
        self.find_duplicates(open_log(log)?)
    }

    fn majority(&self, log: &Path) -> Result<FinalMajority, ReplayError> {
        self.final_majority(open_log(log)?)
    }
}
