//! # Consensus Engine
//!
//! Incremental majority vote over a stream of fixed-width bit-vectors.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: for every position, `zeros + ones == accepted()`.
//! - **INVARIANT-2**: counts never decrease during a run.
//! - **INVARIANT-3**: the consensus at a position depends only on the
//!   multiset of symbols seen there, not on arrival order.

use shared_types::{BitVector, TargetVector};
use tracing::warn;

use crate::domain::counter::{BitPositionCounter, PositionCounts};
use crate::domain::policy::TiePolicy;
use crate::error::ConsensusError;

/// Result of feeding one sample to the engine.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The sample was counted at every position.
    Accepted,
    /// The sample had the wrong width and was dropped.
    Skipped { expected: usize, actual: usize },
}

impl UpdateOutcome {
    /// Whether the sample was counted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpdateOutcome::Accepted)
    }
}

/// Streaming majority-vote consensus over bit-vectors of width `N`.
#[derive(Clone, Debug)]
pub struct ConsensusEngine {
    counters: Vec<BitPositionCounter>,
    accepted: u64,
    skipped: u64,
}

impl ConsensusEngine {
    /// Create an engine for vectors of `width` symbols.
    pub fn new(width: usize) -> Self {
        Self {
            counters: vec![BitPositionCounter::new(); width],
            accepted: 0,
            skipped: 0,
        }
    }

    /// Configured vector width `N`.
    pub fn width(&self) -> usize {
        self.counters.len()
    }

    /// Valid samples counted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Malformed samples dropped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Count one sample. Wrong-width samples are dropped with a warning.
    pub fn update(&mut self, sample: &BitVector) -> UpdateOutcome {
        if sample.len() != self.width() {
            self.skipped += 1;
            warn!(
                "[bv-01] Skipping malformed sample: expected {} symbols, got {}",
                self.width(),
                sample.len()
            );
            return UpdateOutcome::Skipped {
                expected: self.width(),
                actual: sample.len(),
            };
        }
        for (counter, bit) in self.counters.iter_mut().zip(sample.bits()) {
            counter.update(bit);
        }
        self.accepted += 1;
        UpdateOutcome::Accepted
    }

    /// Tie-inclusive consensus (ties resolve to `1`). Always full width.
    pub fn current_consensus(&self) -> BitVector {
        self.consensus_with(TiePolicy::PreferOne)
    }

    /// Tie-exclusive majority so far; tied positions are omitted, so the
    /// result may be shorter than `N`. Reporting only.
    pub fn majority_so_far(&self) -> BitVector {
        self.consensus_with(TiePolicy::Abstain)
    }

    /// Consensus derived under an explicit tie policy.
    pub fn consensus_with(&self, policy: TiePolicy) -> BitVector {
        BitVector::from_bits(self.counters.iter().filter_map(|c| c.vote(policy)))
    }

    /// Whether the tie-inclusive consensus equals `target`.
    pub fn has_converged(&self, target: &TargetVector) -> bool {
        target.len() == self.width()
            && self
                .counters
                .iter()
                .zip(target.bits())
                .all(|(counter, bit)| counter.vote(TiePolicy::PreferOne) == Some(bit))
    }

    /// Per-position counts.
    pub fn position_counts(&self) -> Vec<PositionCounts> {
        self.counters.iter().map(|c| c.snapshot()).collect()
    }

    /// Per-position `|ones - zeros|`.
    pub fn margins(&self) -> Vec<u64> {
        self.counters.iter().map(|c| c.snapshot().margin()).collect()
    }

    /// Smallest margin across all positions, `None` for width 0.
    pub fn min_margin(&self) -> Option<u64> {
        self.counters.iter().map(|c| c.snapshot().margin()).min()
    }

    /// Add another engine's counts into this one.
    pub fn merge(&mut self, other: &ConsensusEngine) -> Result<(), ConsensusError> {
        if other.width() != self.width() {
            return Err(ConsensusError::WidthMismatch {
                expected: self.width(),
                actual: other.width(),
            });
        }
        for (mine, theirs) in self.counters.iter_mut().zip(&other.counters) {
            mine.absorb(theirs);
        }
        self.accepted += other.accepted;
        self.skipped += other.skipped;
        Ok(())
    }
}
