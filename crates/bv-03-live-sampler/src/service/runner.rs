//! # Live Sample Runner
//!
//! Pulls batches from a `SampleSource`, persists every well-formed sample,
//! and stops at the first sample after which the tie-inclusive consensus
//! equals the target.
//!
//! ## Per-sample order
//!
//! 1. append to the sink (durable before anything else happens)
//! 2. update the consensus engine
//! 3. check convergence
//!
//! Replaying the log afterwards therefore reproduces the same
//! samples-to-target. Samples after the converging one, including the rest
//! of its batch, are discarded and never logged.
//!
//! Malformed samples are dropped with a warning. They count against the
//! sample budget but are neither logged nor accepted.

use std::sync::Arc;
use std::time::Duration;

use bv_01_consensus_engine::ConsensusEngine;
use shared_types::{RunConfig, TargetVector};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{RunReport, RunStatus};
use crate::error::RunError;
use crate::ports::{BatchRequest, SampleSink, SampleSource};
use crate::service::control::RunControl;

/// Drives one source until convergence or a stop condition.
pub struct LiveSampleRunner<S: ?Sized> {
    source: Arc<S>,
    width: usize,
}

impl<S: SampleSource + ?Sized> LiveSampleRunner<S> {
    pub fn new(source: Arc<S>, width: usize) -> Self {
        Self { source, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Run one configuration against `target`, logging into `sink`.
    ///
    /// Prepares the source first; see `prepare` and `run_prepared`.
    ///
    /// # Errors
    ///
    /// A source failure, a short batch or a log failure ends the run with an
    /// error. Budget, deadline and cancellation end it with a report.
    pub async fn run(
        &self,
        config: &RunConfig,
        target: &TargetVector,
        sink: &mut dyn SampleSink,
        control: &RunControl,
    ) -> Result<RunReport, RunError> {
        target.expect_width(self.width)?;
        let setup_time = self.prepare(config).await?;
        self.run_prepared(config, target, sink, control, setup_time)
            .await
    }

    /// Validate `config` and let the source prepare for it.
    ///
    /// Returns the time spent preparing.
    pub async fn prepare(&self, config: &RunConfig) -> Result<Duration, RunError> {
        config.validate()?;
        let start = Instant::now();
        self.source
            .prepare(config)
            .await
            .map_err(RunError::Prepare)?;
        let setup_time = start.elapsed();
        debug!("[bv-03] Source prepared in {:.2?}", setup_time);
        Ok(setup_time)
    }

    /// Run against a source that `prepare` has already been called on.
    ///
    /// `setup_time` is carried into the report unchanged.
    pub async fn run_prepared(
        &self,
        config: &RunConfig,
        target: &TargetVector,
        sink: &mut dyn SampleSink,
        control: &RunControl,
        setup_time: Duration,
    ) -> Result<RunReport, RunError> {
        config.validate()?;
        target.expect_width(self.width)?;
        info!("[bv-03] Starting run: {}", config);

        let mut engine = ConsensusEngine::new(self.width);
        let mut drawn = 0u64;
        let mut batch_index = 0u64;
        let start = Instant::now();

        let status = loop {
            if control.is_cancelled() {
                break RunStatus::Cancelled;
            }
            if control.deadline.is_some_and(|d| start.elapsed() >= d) {
                break RunStatus::DeadlineReached;
            }
            let batch_size = match control.sample_budget {
                Some(budget) if drawn >= budget => break RunStatus::BudgetExhausted,
                Some(budget) => u32::try_from(budget - drawn)
                    .map_or(config.sample_batch_size, |left| {
                        left.min(config.sample_batch_size)
                    }),
                None => config.sample_batch_size,
            };

            let request = BatchRequest {
                config: config.clone(),
                batch_size,
                seed: config.seed,
                batch_index,
            };
            let batch_start = Instant::now();
            let mut batch = self.source.sample_batch(request).await.map_err(|source| {
                RunError::Source {
                    batch: batch_index,
                    samples_accepted: engine.accepted(),
                    source,
                }
            })?;
            let batch_latency = batch_start.elapsed();

            if batch.len() > batch_size as usize {
                debug!(
                    "[bv-03] Source returned {} samples for a batch of {}, dropping the excess",
                    batch.len(),
                    batch_size
                );
                batch.truncate(batch_size as usize);
            }
            let received = batch.len() as u32;
            let per_sample = match received {
                0 => Duration::ZERO,
                n => batch_latency / n,
            };

            let mut converged = false;
            for sample in &batch {
                drawn += 1;
                if sample.len() != self.width {
                    let _ = engine.update(sample);
                    continue;
                }
                sink.append(sample)?;
                let _ = engine.update(sample);
                debug!(
                    "[bv-03] Sample {}: {} in {:.2?}",
                    engine.accepted(),
                    sample,
                    per_sample
                );
                if control.progress_interval > 0
                    && engine.accepted() % control.progress_interval == 0
                {
                    info!(
                        "[bv-03] Processed {} samples in {:.2?}",
                        engine.accepted(),
                        start.elapsed()
                    );
                }
                if engine.has_converged(target) {
                    converged = true;
                    break;
                }
            }

            if converged {
                break RunStatus::Converged;
            }
            if received < batch_size {
                return Err(RunError::SourceExhausted {
                    batch: batch_index,
                    requested: batch_size,
                    received,
                });
            }
            batch_index += 1;
        };
        let elapsed = start.elapsed();
        let batches = match status {
            RunStatus::Converged => batch_index + 1,
            _ => batch_index,
        };

        let report = RunReport {
            status,
            samples_accepted: engine.accepted(),
            samples_skipped: engine.skipped(),
            batches,
            elapsed,
            setup_time,
            consensus: engine.current_consensus(),
        };
        info!(
            "[bv-03] Run {} after {} samples in {:.2?}",
            report.status, report.samples_accepted, report.elapsed
        );
        Ok(report)
    }

    /// Mean per-sample latency over `batches` dedicated batches.
    ///
    /// The batches reuse indices `0..batches` under the run seed and are not
    /// logged. The source must already be prepared for `config`.
    pub async fn measure_sample_latency(
        &self,
        config: &RunConfig,
        batches: u32,
    ) -> Result<Duration, RunError> {
        let mut total = Duration::ZERO;
        let mut samples = 0u64;
        for batch_index in 0..u64::from(batches) {
            let request = BatchRequest {
                config: config.clone(),
                batch_size: config.sample_batch_size,
                seed: config.seed,
                batch_index,
            };
            let start = Instant::now();
            let batch = self.source.sample_batch(request).await.map_err(|source| {
                RunError::Source {
                    batch: batch_index,
                    samples_accepted: 0,
                    source,
                }
            })?;
            total += start.elapsed();
            samples += batch.len() as u64;
        }
        Ok(match samples {
            0 => Duration::ZERO,
            n => Duration::from_secs_f64(total.as_secs_f64() / n as f64),
        })
    }
}
