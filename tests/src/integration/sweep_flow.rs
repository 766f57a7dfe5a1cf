//! # Sweep Flow
//!
//! End to end: grid → harness → per-cell logs → report → export.
//!
//! ## Flow Tested
//!
//! 1. **Grid (bv-04) → Runner (bv-03)**: one isolated run per cell
//! 2. **Cell logs → Replay (bv-02)**: every cell log replays to its own
//!    samples-to-target
//! 3. **Report → JSON/pivots**: lossless, failed cells included

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use bv_02_stream_replay::{LogAnalysisApi, StreamReplayer};
    use bv_03_live_sampler::{NoisyTargetSource, RunControl};
    use bv_04_parameter_sweep::{
        to_json, ParameterGrid, ParameterSweepApi, SweepHarness, SweepMetric, SweepResult,
        SweepSettings,
    };
    use shared_types::{RunConfig, SimplifySequence};
    use tempfile::tempdir;

    use crate::fixtures::{bv, FailingCellSource};

    const TARGET: &str = "0110100110010110";

    fn grid(optimizers: &[&str], batch_sizes: &[u32]) -> ParameterGrid {
        ParameterGrid::builder()
            .optimizers(optimizers.iter().copied())
            .simplify_sequences([
                SimplifySequence::parse("CR").unwrap(),
                SimplifySequence::parse("S").unwrap(),
            ])
            .group_sizes([5, 10])
            .sample_batch_sizes(batch_sizes.iter().copied())
            .seed(3)
            .build()
            .unwrap()
    }

    fn noisy() -> NoisyTargetSource {
        NoisyTargetSource::new(bv(TARGET), 0.3).unwrap()
    }

    fn budgeted(settings: SweepSettings) -> SweepSettings {
        settings.with_control(RunControl::default().with_sample_budget(5_000))
    }

    // =========================================================================
    // ISOLATION
    // =========================================================================

    #[tokio::test]
    async fn test_two_by_two_grid_with_one_failing_cell() {
        let grid = ParameterGrid::builder()
            .optimizers(["optuna", "nevergrad"])
            .simplify_sequences([SimplifySequence::default()])
            .group_sizes([10])
            .sample_batch_sizes([1, 5])
            .build()
            .unwrap();
        let failing = grid.configs()[2].clone();
        let source = Arc::new(FailingCellSource::new(noisy(), &failing));
        let harness =
            SweepHarness::new(source.clone(), bv(TARGET), budgeted(SweepSettings::default()))
                .unwrap();

        let results = harness.sweep(&grid).await.unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results.iter().filter(|r| r.is_failed()).count(), 1);
        assert!(results[2].is_failed());
        assert_eq!(results[2].config, failing);
        assert!(results[2].error().unwrap().contains("no backend"));
        assert!(source.calls() > 3);
    }

    #[tokio::test]
    async fn test_concurrent_sweep_matches_sequential() {
        let grid = grid(&["optuna", "nevergrad"], &[1, 5]);
        let sequential = SweepHarness::new(
            Arc::new(noisy()),
            bv(TARGET),
            budgeted(SweepSettings::default()),
        )
        .unwrap();
        let concurrent = SweepHarness::new(
            Arc::new(noisy()),
            bv(TARGET),
            budgeted(SweepSettings::default().with_max_concurrent_cells(4)),
        )
        .unwrap();

        let a = sequential.sweep(&grid).await.unwrap();
        let b = concurrent.sweep(&grid).await.unwrap();

        let key = |rs: &[SweepResult]| -> Vec<(RunConfig, Option<u64>)> {
            rs.iter()
                .map(|r| (r.config.clone(), r.metrics().and_then(|m| m.samples_to_target)))
                .collect()
        };
        assert_eq!(key(&a), key(&b));
        assert_eq!(a.len(), grid.len());
    }

    // =========================================================================
    // CELL LOGS
    // =========================================================================

    #[tokio::test]
    async fn test_every_cell_log_replays_to_its_result() {
        let dir = tempdir().unwrap();
        let grid = grid(&["optuna"], &[1, 10]);
        let harness = SweepHarness::new(
            Arc::new(noisy()),
            bv(TARGET),
            budgeted(SweepSettings::default().with_log_dir(dir.path())),
        )
        .unwrap();

        let results = harness.sweep(&grid).await.unwrap();
        let replayer = StreamReplayer::new(TARGET.len());

        for result in &results {
            let path = harness.cell_log_path(&result.config).unwrap();
            let outcome = replayer.replay_until_target(&path, &bv(TARGET)).unwrap();
            let metrics = result.metrics().unwrap();
            assert_eq!(outcome.converged, result.converged());
            assert_eq!(outcome.samples_processed, metrics.samples_accepted);
        }
    }

    // =========================================================================
    // REPORT
    // =========================================================================

    #[tokio::test]
    async fn test_report_is_lossless() {
        let grid = grid(&["optuna", "nevergrad"], &[1, 5]);
        let failing = grid.configs()[5].clone();
        let harness = SweepHarness::new(
            Arc::new(FailingCellSource::new(noisy(), &failing)),
            bv(TARGET),
            budgeted(SweepSettings::default()),
        )
        .unwrap();

        let results = harness.sweep(&grid).await.unwrap();
        let report = harness.report(results.clone());

        // JSON keeps every row, failed one included.
        let json = to_json(&report).unwrap();
        let parsed: Vec<SweepResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), grid.len());
        assert_eq!(parsed.iter().filter(|r| r.is_failed()).count(), 1);

        // Heatmaps place every row exactly once.
        for metric in SweepMetric::ALL {
            let panels = report.heatmaps(metric).unwrap();
            assert_eq!(panels.len(), 2 * 2);
            let cells: usize = panels.iter().map(|p| p.row_keys.len() * p.col_keys.len()).sum();
            assert_eq!(cells, grid.len());
        }

        // The failed cell is empty in its panel.
        let panels = report.heatmaps(SweepMetric::AverageSampleLatency).unwrap();
        let empty: usize = panels
            .iter()
            .flat_map(|p| p.cells.iter().flatten())
            .filter(|c| c.is_none())
            .count();
        assert_eq!(empty, 1);
    }

    #[tokio::test]
    async fn test_json_export_to_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("results.json");
        let grid = grid(&["optuna"], &[5]);
        let harness =
            SweepHarness::new(Arc::new(noisy()), bv(TARGET), budgeted(SweepSettings::default()))
                .unwrap();

        let report = harness.report(harness.sweep(&grid).await.unwrap());
        bv_04_parameter_sweep::write_json(&report, &out).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), grid.len());
        assert_eq!(value[0]["config"]["optimizer"], "optuna");
    }
}
