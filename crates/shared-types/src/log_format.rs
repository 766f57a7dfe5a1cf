//! # Sample Log Format
//!
//! UTF-8 text, one bit-vector per line, newline-terminated, append-only.
//! Readers tolerate blank and malformed lines (they are skipped and counted);
//! writers must only ever emit well-formed lines of the configured width.

use crate::entities::BitVector;
use crate::errors::BitVectorError;

/// Classification of one raw log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLine {
    /// A well-formed sample of the expected width.
    Sample(BitVector),
    /// Empty after trimming (e.g. a stray trailing newline).
    Blank,
    /// Wrong width or a non-binary symbol.
    Malformed(BitVectorError),
}

/// Classify a raw line against the expected `width`.
///
/// Surrounding whitespace (including `\r`) is trimmed first.
pub fn classify_line(raw: &str, width: usize) -> LogLine {
    let line = raw.trim();
    if line.is_empty() && width != 0 {
        return LogLine::Blank;
    }
    if line.chars().count() != width {
        return LogLine::Malformed(BitVectorError::WidthMismatch {
            expected: width,
            actual: line.chars().count(),
        });
    }
    match BitVector::new(line) {
        Ok(sample) => LogLine::Sample(sample),
        Err(err) => LogLine::Malformed(err),
    }
}

/// Render a sample as one newline-terminated log line.
pub fn format_line(sample: &BitVector) -> String {
    let mut line = String::with_capacity(sample.len() + 1);
    line.push_str(sample.as_str());
    line.push('\n');
    line
}
