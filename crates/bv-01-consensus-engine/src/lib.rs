//! # BV-01 Consensus Engine
//!
//! Streaming majority vote over fixed-width bit-vector samples.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `BitPositionCounter`: zero/one counts for one position
//!   - `ConsensusEngine`: owns one counter per position, consumes samples
//!   - `TiePolicy`: tie-inclusive (`PreferOne`) and tie-exclusive (`Abstain`)
//!
//! ## Tie Policies
//!
//! Two policies are supported side by side:
//!
//! - `PreferOne`: a tied position votes `1`. This is the policy behind
//!   `current_consensus()` and `has_converged()`.
//! - `Abstain`: a tied position casts no vote, so `majority_so_far()` may be
//!   shorter than `N`. Used for reporting only.
//!
//! ## Usage Example
//!
//! ```
//! use bv_01_consensus_engine::ConsensusEngine;
//! use shared_types::BitVector;
//!
//! let target: BitVector = "1111".parse().unwrap();
//! let mut engine = ConsensusEngine::new(4);
//!
//! let _ = engine.update(&"0000".parse().unwrap());
//! assert!(!engine.has_converged(&target));
//!
//! let _ = engine.update(&"1111".parse().unwrap());
//! assert!(engine.has_converged(&target));
//! ```

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{BitPositionCounter, ConsensusEngine, PositionCounts, TiePolicy, UpdateOutcome};
pub use error::ConsensusError;
