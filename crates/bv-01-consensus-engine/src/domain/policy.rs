//! # Tie Policies
//!
//! How a position with equal zero and one counts is resolved. The policies
//! are kept separate on purpose: switching one for another changes the
//! reported majority of existing logs.

use serde::{Deserialize, Serialize};

/// Resolution of an exact tie at one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Tie resolves to `1`. Drives convergence checks.
    #[default]
    PreferOne,
    /// Tie produces no vote; the derived vector may be shorter than `N`.
    /// Reporting only.
    Abstain,
}

impl TiePolicy {
    /// Whether vectors derived under this policy always have full width.
    pub fn is_total(self) -> bool {
        matches!(self, TiePolicy::PreferOne)
    }
}
