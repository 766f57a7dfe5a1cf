//! Replay results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::BitVector;

/// Result of replaying a log against a target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Accepted samples up to and including the converging one, or all
    /// accepted samples when the target was never reached
    pub samples_processed: u64,
    /// Blank or malformed lines passed over before stopping
    pub skipped_lines: u64,
    /// Whether the tie-inclusive consensus reached the target
    pub converged: bool,
    /// Tie-inclusive consensus at the point replay stopped
    pub consensus: BitVector,
    /// Smallest per-position margin at the point replay stopped
    pub min_margin: Option<u64>,
}

/// Tie-exclusive majority over a whole log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalMajority {
    /// Majority vector; tied positions are omitted
    pub majority: BitVector,
    /// Accepted samples
    pub samples_processed: u64,
    /// Blank or malformed lines
    pub skipped_lines: u64,
}

impl FinalMajority {
    /// Whether every position produced a vote.
    pub fn is_complete(&self, width: usize) -> bool {
        self.majority.len() == width
    }
}

/// Samples occurring more than once, with their occurrence counts.
pub type DuplicateReport = BTreeMap<BitVector, u64>;
