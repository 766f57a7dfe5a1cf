//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Per-position symbol counters
//! - Tie policies
//! - The streaming consensus engine
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod counter;
pub mod engine;
pub mod policy;

pub use counter::{BitPositionCounter, PositionCounts};
pub use engine::{ConsensusEngine, UpdateOutcome};
pub use policy::TiePolicy;
