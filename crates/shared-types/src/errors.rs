//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while constructing or checking a `BitVector`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitVectorError {
    /// A symbol other than `0` or `1` was found.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    /// The vector does not have the configured width.
    #[error("Width mismatch: expected {expected} symbols, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// Errors raised while parsing a simplification sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimplifySequenceError {
    /// The sequence has no symbols.
    #[error("Simplify sequence is empty")]
    Empty,

    /// A symbol outside the simplification alphabet.
    #[error("Unknown simplify symbol {0:?} (allowed: A, D, C, R, S)")]
    UnknownSymbol(char),

    /// The same symbol appears twice.
    #[error("Simplify symbol {0:?} repeated")]
    RepeatedSymbol(char),
}

/// Errors raised by `RunConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunConfigError {
    #[error("Sample batch size must be at least 1")]
    ZeroBatchSize,

    #[error("Group size must be at least 1")]
    ZeroGroupSize,

    #[error("Optimizer name cannot be empty")]
    EmptyOptimizer,
}
