//! # Run Configuration
//!
//! `RunConfig` is one cell of a parameter grid. Its fields are opaque to the
//! consensus core: they are forwarded to the sample source and used as grid
//! axes and log keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RunConfigError, SimplifySequenceError};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// One symbol of the simplification alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimplifySymbol {
    /// Anti-diagonal reduction
    A,
    /// Diagonal reduction
    D,
    /// Column reduction
    C,
    /// Rank simplification
    R,
    /// Split simplification
    S,
}

impl SimplifySymbol {
    /// Full alphabet in canonical order.
    pub const ALPHABET: [SimplifySymbol; 5] = [Self::A, Self::D, Self::C, Self::R, Self::S];

    /// Character form.
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::D => 'D',
            Self::C => 'C',
            Self::R => 'R',
            Self::S => 'S',
        }
    }

    /// Parse a single character.
    pub fn from_char(c: char) -> Result<Self, SimplifySequenceError> {
        match c {
            'A' => Ok(Self::A),
            'D' => Ok(Self::D),
            'C' => Ok(Self::C),
            'R' => Ok(Self::R),
            'S' => Ok(Self::S),
            other => Err(SimplifySequenceError::UnknownSymbol(other)),
        }
    }
}

/// Ordered, non-repeating subset of the simplification alphabet.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SimplifySequence(Vec<SimplifySymbol>);

impl SimplifySequence {
    /// Parse and validate a sequence such as `"ADCRS"`.
    pub fn parse(text: &str) -> Result<Self, SimplifySequenceError> {
        if text.is_empty() {
            return Err(SimplifySequenceError::Empty);
        }
        let mut symbols = Vec::with_capacity(text.len());
        for c in text.chars() {
            let symbol = SimplifySymbol::from_char(c)?;
            if symbols.contains(&symbol) {
                return Err(SimplifySequenceError::RepeatedSymbol(c));
            }
            symbols.push(symbol);
        }
        Ok(Self(symbols))
    }

    /// Symbols in application order.
    pub fn symbols(&self) -> &[SimplifySymbol] {
        &self.0
    }

    /// The seven sequences swept by default.
    pub fn default_sweep() -> Vec<SimplifySequence> {
        ["ADCRS", "DCRS", "CRS", "CR", "C", "RS", "S"]
            .iter()
            .filter_map(|s| Self::parse(s).ok())
            .collect()
    }
}

impl Default for SimplifySequence {
    fn default() -> Self {
        Self(SimplifySymbol::ALPHABET.to_vec())
    }
}

impl fmt::Display for SimplifySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for SimplifySequence {
    type Err = SimplifySequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SimplifySequence {
    type Error = SimplifySequenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SimplifySequence> for String {
    fn from(value: SimplifySequence) -> Self {
        value.to_string()
    }
}

/// Configuration of a single sampling run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunConfig {
    /// Samples requested from the source per batch
    pub sample_batch_size: u32,
    /// Grouping granularity forwarded to the source
    pub group_size: u32,
    /// Simplification policy forwarded to the source
    pub simplify_sequence: SimplifySequence,
    /// Internal optimizer identifier forwarded to the source
    pub optimizer: String,
    /// Deterministic seed for the source
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_batch_size: 1,
            group_size: 10,
            simplify_sequence: SimplifySequence::default(),
            optimizer: "optuna".to_string(),
            seed: DEFAULT_SEED,
        }
    }
}

impl RunConfig {
    /// Validate the fields the core relies on.
    pub fn validate(&self) -> Result<(), RunConfigError> {
        if self.sample_batch_size == 0 {
            return Err(RunConfigError::ZeroBatchSize);
        }
        if self.group_size == 0 {
            return Err(RunConfigError::ZeroGroupSize);
        }
        if self.optimizer.trim().is_empty() {
            return Err(RunConfigError::EmptyOptimizer);
        }
        Ok(())
    }

    /// Stable, filesystem-safe key identifying this configuration.
    pub fn cell_key(&self) -> String {
        let optimizer: String = self
            .optimizer
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!(
            "{}_{}_g{}_b{}",
            optimizer, self.simplify_sequence, self.group_size, self.sample_batch_size
        )
    }

    /// Builder-style method to set the batch size
    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.sample_batch_size = size;
        self
    }

    /// Builder-style method to set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "optimizer={}, simplify_sequence={}, group_size={}, sample_batch_size={}",
            self.optimizer, self.simplify_sequence, self.group_size, self.sample_batch_size
        )
    }
}
