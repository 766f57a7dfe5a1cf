//! Domain Layer - Replay results
//!
//! RULES:
//! - No I/O operations

pub mod outcome;

pub use outcome::{DuplicateReport, FinalMajority, ReplayOutcome};
