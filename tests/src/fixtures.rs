//! Shared test fixtures.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bv_03_live_sampler::{BatchRequest, NoisyTargetSource, SampleSource, SourceError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{BitVector, RunConfig};

/// Parse a bit-vector literal. Test helper.
pub fn bv(s: &str) -> BitVector {
    BitVector::new(s).expect("valid bit-vector literal")
}

/// `count` noisy copies of `target`, reproducible from `seed`.
pub fn noisy_stream(
    target: &BitVector,
    flip_probability: f64,
    count: usize,
    seed: u64,
) -> Vec<BitVector> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| BitVector::from_bits(target.bits().map(|b| b ^ rng.gen_bool(flip_probability))))
        .collect()
}

/// Log text for `samples`, one per line.
pub fn log_text(samples: &[BitVector]) -> String {
    samples.iter().map(shared_types::format_line).collect()
}

/// Wraps a `NoisyTargetSource` and fails every batch of one grid cell.
pub struct FailingCellSource {
    inner: NoisyTargetSource,
    fail_cell: String,
    calls: AtomicU64,
}

impl FailingCellSource {
    pub fn new(inner: NoisyTargetSource, fail_cell: &RunConfig) -> Self {
        Self {
            inner,
            fail_cell: fail_cell.cell_key(),
            calls: AtomicU64::new(0),
        }
    }

    /// Batches requested across all cells.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SampleSource for FailingCellSource {
    async fn prepare(&self, config: &RunConfig) -> Result<(), SourceError> {
        self.inner.prepare(config).await
    }

    async fn sample_batch(&self, request: BatchRequest) -> Result<Vec<BitVector>, SourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if request.config.cell_key() == self.fail_cell {
            return Err(SourceError::Unavailable(format!(
                "no backend for {}",
                self.fail_cell
            )));
        }
        self.inner.sample_batch(request).await
    }
}
