//! # Sweep Harness
//!
//! Runs the live sampler once per grid cell and collects one
//! `SweepResult` per cell.
//!
//! ## Cell isolation
//!
//! Every cell gets its own runner, consensus engine and log. Nothing is
//! shared between cells except the source handle, which must be safe to
//! call concurrently. A cell that fails is recorded as failed and the sweep
//! continues.
//!
//! With `max_concurrent_cells > 1` cells overlap, but results are still
//! returned in grid order.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bv_03_live_sampler::{
    AppendOnlySampleLog, LiveSampleRunner, MemorySampleLog, RunError, SampleSink, SampleSource,
};
use futures::stream::{self, StreamExt};
use shared_types::{RunConfig, TargetVector};
use tracing::{info, warn};

use crate::adapters::format_duration;
use crate::domain::{CellMetrics, ParameterGrid, SweepResult};
use crate::error::SweepError;
use crate::ports::ParameterSweepApi;
use crate::service::settings::{LatencyMode, SweepSettings};

/// Log file extension for per-cell sample logs.
pub const CELL_LOG_EXTENSION: &str = "samples";

pub struct SweepHarness<S: ?Sized> {
    source: Arc<S>,
    target: TargetVector,
    settings: SweepSettings,
}

impl<S: SampleSource + ?Sized> SweepHarness<S> {
    /// Harness for vectors as wide as `target`.
    pub fn new(
        source: Arc<S>,
        target: TargetVector,
        settings: SweepSettings,
    ) -> Result<Self, SweepError> {
        settings.validate()?;
        Ok(Self {
            source,
            target,
            settings,
        })
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    pub fn target(&self) -> &TargetVector {
        &self.target
    }

    /// Where the log of `config` goes, if logs are kept on disk.
    pub fn cell_log_path(&self, config: &RunConfig) -> Option<PathBuf> {
        self.settings
            .log_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", config.cell_key(), CELL_LOG_EXTENSION)))
    }

    /// Run every cell of `grid`, in grid order.
    pub async fn run_grid(&self, grid: &ParameterGrid) -> Result<Vec<SweepResult>, SweepError> {
        grid.validate()?;
        let configs = grid.configs();
        self.prepare_log_dir(&configs)?;

        let total = configs.len();
        info!(
            "[bv-04] Sweeping {} cells, {} at a time",
            total, self.settings.max_concurrent_cells
        );

        let results: Vec<SweepResult> = stream::iter(configs.into_iter().enumerate())
            .map(|(index, config)| self.run_cell(index, total, config))
            .buffered(self.settings.max_concurrent_cells)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_failed()).count();
        let converged = results.iter().filter(|r| r.converged()).count();
        info!(
            "[bv-04] Sweep finished: {} cells, {} converged, {} failed",
            results.len(),
            converged,
            failed
        );
        Ok(results)
    }

    fn prepare_log_dir(&self, configs: &[RunConfig]) -> Result<(), SweepError> {
        let Some(dir) = &self.settings.log_dir else {
            return Ok(());
        };
        fs::create_dir_all(dir).map_err(|source| SweepError::LogDir {
            path: dir.clone(),
            source,
        })?;

        let mut seen = Vec::with_capacity(configs.len());
        for config in configs {
            let key = config.cell_key();
            if seen.contains(&key) {
                return Err(SweepError::CellKeyCollision(key));
            }
            let path = dir.join(format!("{}.{}", key, CELL_LOG_EXTENSION));
            if fs::metadata(&path).is_ok_and(|m| m.len() > 0) {
                return Err(SweepError::StaleLog { path });
            }
            seen.push(key);
        }
        Ok(())
    }

    async fn run_cell(&self, index: usize, total: usize, config: RunConfig) -> SweepResult {
        info!("[bv-04] Testing cell {}/{}: {}", index + 1, total, config);
        match self.try_run_cell(&config).await {
            Ok(metrics) => {
                info!(
                    "[bv-04]   -> {}: avg sample time {:.4} sec, time to target {}, samples {}",
                    metrics.status,
                    metrics.average_sample_latency,
                    metrics
                        .time_to_target
                        .map_or_else(|| "-".to_string(), format_duration),
                    metrics
                        .samples_to_target
                        .map_or_else(|| "-".to_string(), |n| n.to_string()),
                );
                SweepResult::completed(config, metrics)
            }
            Err(e) => {
                warn!("[bv-04] Failed for {}: {}", config, e);
                SweepResult::failed(config, e)
            }
        }
    }

    async fn try_run_cell(&self, config: &RunConfig) -> Result<CellMetrics, RunError> {
        let width = self.target.len();
        let runner = LiveSampleRunner::new(Arc::clone(&self.source), width);
        let mut sink: Box<dyn SampleSink> = match self.cell_log_path(config) {
            Some(path) => Box::new(AppendOnlySampleLog::open(path, width)?),
            None => Box::new(MemorySampleLog::with_width(width)),
        };

        let setup_time = runner.prepare(config).await?;
        let warmup = match self.settings.latency_mode {
            LatencyMode::FromRun => None,
            LatencyMode::Warmup { batches } => {
                Some(runner.measure_sample_latency(config, batches).await?)
            }
        };
        let report = runner
            .run_prepared(
                config,
                &self.target,
                sink.as_mut(),
                &self.settings.control,
                setup_time,
            )
            .await?;

        let latency = warmup.unwrap_or_else(|| report.average_sample_latency());
        Ok(CellMetrics::from_report(&report, latency.as_secs_f64()))
    }
}

#[async_trait]
impl<S: SampleSource + ?Sized> ParameterSweepApi for SweepHarness<S> {
    async fn sweep(&self, grid: &ParameterGrid) -> Result<Vec<SweepResult>, SweepError> {
        self.run_grid(grid).await
    }
}
