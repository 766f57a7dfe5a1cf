//! Error types for the consensus engine

use thiserror::Error;

/// Errors that can occur when combining consensus state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("Engine width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}
