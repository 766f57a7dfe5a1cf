//! # Core Entities
//!
//! `BitVector` is the unit of work for every subsystem: one sampling draw,
//! `N` symbols over `{0, 1}`, immutable once produced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BitVectorError;

/// Known correct vector a running consensus is compared against.
pub type TargetVector = BitVector;

/// An ordered sequence of binary symbols.
///
/// Stored in its textual form so it can be written to sample logs, keyed in
/// duplicate maps and compared against targets without re-encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitVector(String);

impl BitVector {
    /// Parse a bit-vector from `0`/`1` text.
    pub fn new(text: impl Into<String>) -> Result<Self, BitVectorError> {
        let text = text.into();
        if let Some((position, symbol)) = text
            .chars()
            .enumerate()
            .find(|(_, c)| *c != '0' && *c != '1')
        {
            return Err(BitVectorError::InvalidSymbol { position, symbol });
        }
        Ok(Self(text))
    }

    /// Build a bit-vector from booleans (`true` = `1`).
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self(bits.into_iter().map(|b| if b { '1' } else { '0' }).collect())
    }

    /// All-zero vector of the given width.
    pub fn zeros(width: usize) -> Self {
        Self("0".repeat(width))
    }

    /// All-one vector of the given width.
    pub fn ones(width: usize) -> Self {
        Self("1".repeat(width))
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbols in position order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Symbol at `position`, if in range.
    pub fn bit(&self, position: usize) -> Option<bool> {
        self.0.as_bytes().get(position).map(|b| *b == b'1')
    }

    /// Check that the vector has exactly `width` symbols.
    pub fn expect_width(&self, width: usize) -> Result<(), BitVectorError> {
        if self.len() == width {
            Ok(())
        } else {
            Err(BitVectorError::WidthMismatch {
                expected: width,
                actual: self.len(),
            })
        }
    }

    /// Number of positions at which `self` and `other` differ.
    ///
    /// Returns `None` when the widths differ.
    pub fn hamming_distance(&self, other: &BitVector) -> Option<usize> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.0
                .bytes()
                .zip(other.0.bytes())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BitVector {
    type Err = BitVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BitVector {
    type Error = BitVectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BitVector> for String {
    fn from(value: BitVector) -> Self {
        value.0
    }
}
