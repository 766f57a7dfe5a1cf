//! # Outbound Ports
//!
//! What the runner needs from the outside world: somewhere to draw samples
//! from and somewhere durable to put them.

use async_trait::async_trait;
use shared_types::{BitVector, RunConfig};

use crate::error::{LogError, SourceError};

/// One request for a batch of samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRequest {
    /// Configuration of the run the batch belongs to.
    pub config: RunConfig,
    /// Samples wanted. Never more than the remaining budget.
    pub batch_size: u32,
    /// Run seed. Together with `batch_index` it fixes the batch contents for
    /// deterministic sources.
    pub seed: u64,
    /// 0-based index of this batch within the run.
    pub batch_index: u64,
}

/// A producer of bit-vector samples.
///
/// Sources are expected to return exactly `batch_size` samples. A shorter
/// batch means the source has nothing more to give.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// One-time setup for a configuration, e.g. compiling a circuit.
    ///
    /// Time spent here is reported separately and never counts towards
    /// time-to-target.
    async fn prepare(&self, _config: &RunConfig) -> Result<(), SourceError> {
        Ok(())
    }

    /// Draw one batch.
    async fn sample_batch(&self, request: BatchRequest) -> Result<Vec<BitVector>, SourceError>;
}

/// Durable, append-only destination for accepted samples.
pub trait SampleSink: Send {
    /// Persist one sample. Returns only once the sample is durable.
    fn append(&mut self, sample: &BitVector) -> Result<(), LogError>;

    /// Samples persisted through this sink.
    fn persisted(&self) -> u64;
}
