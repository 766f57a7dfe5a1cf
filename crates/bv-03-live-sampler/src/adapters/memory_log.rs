//! In-memory `SampleSink` for tests and dry runs.

use shared_types::BitVector;

use crate::error::LogError;
use crate::ports::SampleSink;

/// Keeps every appended sample in a vector.
#[derive(Clone, Debug, Default)]
pub struct MemorySampleLog {
    width: Option<usize>,
    samples: Vec<BitVector>,
}

impl MemorySampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like `new`, but rejects samples that are not `width` symbols wide.
    pub fn with_width(width: usize) -> Self {
        Self {
            width: Some(width),
            samples: Vec::new(),
        }
    }

    pub fn samples(&self) -> &[BitVector] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<BitVector> {
        self.samples
    }

    /// Log contents in on-disk format.
    pub fn to_log_text(&self) -> String {
        self.samples.iter().map(shared_types::format_line).collect()
    }
}

impl SampleSink for MemorySampleLog {
    fn append(&mut self, sample: &BitVector) -> Result<(), LogError> {
        if let Some(width) = self.width {
            sample.expect_width(width)?;
        }
        self.samples.push(sample.clone());
        Ok(())
    }

    fn persisted(&self) -> u64 {
        self.samples.len() as u64
    }
}
