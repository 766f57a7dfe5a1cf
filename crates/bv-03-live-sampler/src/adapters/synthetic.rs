//! # Noisy Target Source
//!
//! Seeded stand-in for a real sampler: every sample is the target with each
//! bit flipped independently with probability `flip_probability`. While that
//! probability stays below one half the per-position majority converges on
//! the target.
//!
//! A batch is a pure function of `(seed, batch_index)`, so a run can be
//! restarted and reproduces the same stream.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{BitVector, RunConfig, TargetVector};
use tracing::debug;

use crate::error::SourceError;
use crate::ports::{BatchRequest, SampleSource};

/// Odd 64-bit constant used to spread batch indices across seeds.
const BATCH_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Synthetic source that draws noisy copies of a target.
#[derive(Clone, Debug)]
pub struct NoisyTargetSource {
    target: TargetVector,
    flip_probability: f64,
    sample_delay: Option<Duration>,
    setup_delay: Option<Duration>,
}

impl NoisyTargetSource {
    /// Source of noisy copies of `target`.
    ///
    /// # Errors
    ///
    /// `flip_probability` must lie in `[0, 1]`.
    pub fn new(target: TargetVector, flip_probability: f64) -> Result<Self, SourceError> {
        if !(0.0..=1.0).contains(&flip_probability) {
            return Err(SourceError::InvalidRequest(format!(
                "flip probability {} outside [0, 1]",
                flip_probability
            )));
        }
        Ok(Self {
            target,
            flip_probability,
            sample_delay: None,
            setup_delay: None,
        })
    }

    /// Sleep this long per sample drawn, to mimic a slow backend.
    pub fn with_sample_delay(mut self, delay: Duration) -> Self {
        self.sample_delay = Some(delay);
        self
    }

    /// Sleep this long in `prepare`.
    pub fn with_setup_delay(mut self, delay: Duration) -> Self {
        self.setup_delay = Some(delay);
        self
    }

    pub fn target(&self) -> &TargetVector {
        &self.target
    }

    fn draw(&self, seed: u64, batch_index: u64, count: u32) -> Vec<BitVector> {
        let mut rng =
            StdRng::seed_from_u64(seed.wrapping_add(batch_index.wrapping_mul(BATCH_SEED_STRIDE)));
        (0..count)
            .map(|_| {
                BitVector::from_bits(
                    self.target
                        .bits()
                        .map(|bit| bit ^ rng.gen_bool(self.flip_probability)),
                )
            })
            .collect()
    }
}

#[async_trait]
impl SampleSource for NoisyTargetSource {
    async fn prepare(&self, config: &RunConfig) -> Result<(), SourceError> {
        debug!("[bv-03] Preparing synthetic source for {}", config);
        if let Some(delay) = self.setup_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn sample_batch(&self, request: BatchRequest) -> Result<Vec<BitVector>, SourceError> {
        if let Some(delay) = self.sample_delay {
            tokio::time::sleep(delay * request.batch_size).await;
        }
        Ok(self.draw(request.seed, request.batch_index, request.batch_size))
    }
}
