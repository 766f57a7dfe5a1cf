//! # Bit Position Counter
//!
//! Per-position symbol frequencies. Counts only ever increase.

use serde::{Deserialize, Serialize};

use crate::domain::policy::TiePolicy;

/// Snapshot of one position's counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCounts {
    /// Samples that had `0` at this position
    pub zeros: u64,
    /// Samples that had `1` at this position
    pub ones: u64,
}

impl PositionCounts {
    /// Total samples that contributed to this position.
    pub fn total(&self) -> u64 {
        self.zeros + self.ones
    }

    /// Absolute difference between the two counts.
    pub fn margin(&self) -> u64 {
        self.ones.abs_diff(self.zeros)
    }
}

/// Running zero/one counter for a single bit position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitPositionCounter {
    counts: PositionCounts,
}

impl BitPositionCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed symbol.
    pub fn update(&mut self, bit: bool) {
        if bit {
            self.counts.ones += 1;
        } else {
            self.counts.zeros += 1;
        }
    }

    /// Current counts.
    pub fn snapshot(&self) -> PositionCounts {
        self.counts
    }

    /// Majority symbol under `policy`; `None` means the position abstains.
    pub fn vote(&self, policy: TiePolicy) -> Option<bool> {
        let PositionCounts { zeros, ones } = self.counts;
        match policy {
            TiePolicy::PreferOne => Some(ones >= zeros),
            TiePolicy::Abstain => match ones.cmp(&zeros) {
                std::cmp::Ordering::Greater => Some(true),
                std::cmp::Ordering::Less => Some(false),
                std::cmp::Ordering::Equal => None,
            },
        }
    }

    /// Add another counter's observations into this one.
    pub(crate) fn absorb(&mut self, other: &BitPositionCounter) {
        self.counts.zeros += other.counts.zeros;
        self.counts.ones += other.counts.ones;
    }
}
