//! # Sweep Results
//!
//! One `SweepResult` per grid cell. Times are stored as seconds (`f64`) so
//! that exported reports are plain numbers.

use std::fmt;

use bv_03_live_sampler::{RunReport, RunStatus};
use serde::{Deserialize, Serialize};
use shared_types::RunConfig;

/// Metrics of a cell whose run finished without error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub status: RunStatus,
    /// Mean seconds per sample.
    pub average_sample_latency: f64,
    /// Seconds to first convergence, setup excluded.
    pub time_to_target: Option<f64>,
    pub samples_to_target: Option<u64>,
    pub samples_accepted: u64,
    pub samples_skipped: u64,
    /// Seconds spent preparing the source.
    pub setup_time: f64,
}

impl CellMetrics {
    /// Metrics from a run report, with the latency measured elsewhere.
    pub fn from_report(report: &RunReport, average_sample_latency: f64) -> Self {
        Self {
            status: report.status,
            average_sample_latency,
            time_to_target: report.time_to_target().map(|d| d.as_secs_f64()),
            samples_to_target: report.samples_to_target(),
            samples_accepted: report.samples_accepted,
            samples_skipped: report.samples_skipped,
            setup_time: report.setup_time.as_secs_f64(),
        }
    }
}

/// What happened in one cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CellOutcome {
    Completed(CellMetrics),
    Failed { error: String },
}

/// One row of a sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub config: RunConfig,
    pub outcome: CellOutcome,
}

impl SweepResult {
    pub fn completed(config: RunConfig, metrics: CellMetrics) -> Self {
        Self {
            config,
            outcome: CellOutcome::Completed(metrics),
        }
    }

    pub fn failed(config: RunConfig, error: impl fmt::Display) -> Self {
        Self {
            config,
            outcome: CellOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn metrics(&self) -> Option<&CellMetrics> {
        match &self.outcome {
            CellOutcome::Completed(metrics) => Some(metrics),
            CellOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CellOutcome::Completed(_) => None,
            CellOutcome::Failed { error } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error().is_some()
    }

    pub fn converged(&self) -> bool {
        self.metrics()
            .is_some_and(|m| m.status == RunStatus::Converged)
    }
}

/// Numeric column of a sweep, used as the value of a pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMetric {
    AverageSampleLatency,
    TimeToTarget,
    SamplesToTarget,
}

impl SweepMetric {
    pub const ALL: [SweepMetric; 3] = [
        SweepMetric::AverageSampleLatency,
        SweepMetric::TimeToTarget,
        SweepMetric::SamplesToTarget,
    ];

    /// Human-readable label with unit.
    pub fn label(self) -> &'static str {
        match self {
            SweepMetric::AverageSampleLatency => "Avg Sample Time (sec)",
            SweepMetric::TimeToTarget => "Time to Target (sec)",
            SweepMetric::SamplesToTarget => "Samples to Target",
        }
    }

    /// Metric value for `result`. `None` for failed cells and for
    /// target metrics of cells that did not converge.
    pub fn value(self, result: &SweepResult) -> Option<f64> {
        let metrics = result.metrics()?;
        match self {
            SweepMetric::AverageSampleLatency => Some(metrics.average_sample_latency),
            SweepMetric::TimeToTarget => metrics.time_to_target,
            SweepMetric::SamplesToTarget => metrics.samples_to_target.map(|n| n as f64),
        }
    }
}

impl fmt::Display for SweepMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::BitVector;
    use std::time::Duration;

    fn report(status: RunStatus) -> RunReport {
        RunReport {
            status,
            samples_accepted: 8,
            samples_skipped: 1,
            batches: 2,
            elapsed: Duration::from_secs(4),
            setup_time: Duration::from_millis(500),
            consensus: BitVector::new("10").unwrap(),
        }
    }

    #[test]
    fn test_metrics_from_converged_report() {
        let metrics = CellMetrics::from_report(&report(RunStatus::Converged), 0.5);
        assert_eq!(metrics.time_to_target, Some(4.0));
        assert_eq!(metrics.samples_to_target, Some(8));
        assert_eq!(metrics.setup_time, 0.5);
    }

    #[test]
    fn test_metric_values_for_unconverged_cell() {
        let result = SweepResult::completed(
            RunConfig::default(),
            CellMetrics::from_report(&report(RunStatus::BudgetExhausted), 0.5),
        );
        assert!(!result.converged());
        assert_eq!(SweepMetric::AverageSampleLatency.value(&result), Some(0.5));
        assert_eq!(SweepMetric::TimeToTarget.value(&result), None);
        assert_eq!(SweepMetric::SamplesToTarget.value(&result), None);
    }

    #[test]
    fn test_failed_cell_has_no_values() {
        let result = SweepResult::failed(RunConfig::default(), "backend down");
        assert!(result.is_failed());
        assert_eq!(result.error(), Some("backend down"));
        for metric in SweepMetric::ALL {
            assert_eq!(metric.value(&result), None);
        }
    }

    #[test]
    fn test_outcome_is_tagged_in_json() {
        let result = SweepResult::failed(RunConfig::default(), "boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"]["outcome"], "failed");
        assert_eq!(json["outcome"]["error"], "boom");
    }
}
