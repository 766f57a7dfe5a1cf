//! # Live Run and Replay
//!
//! A live run persists every accepted sample before counting it, so the log
//! it leaves behind must replay to the same result.
//!
//! ## Flow Tested
//!
//! 1. **Live (bv-03) → Log**: `LiveSampleRunner` appends to an
//!    `AppendOnlySampleLog`
//! 2. **Log → Replay (bv-02)**: `StreamReplayer` reads the file back
//! 3. **Replay → Engine (bv-01)**: counts and consensus match

#[cfg(test)]
mod tests {
    use std::fs::{self, OpenOptions};
    use std::io::{Cursor, Write};
    use std::sync::Arc;

    use bv_01_consensus_engine::ConsensusEngine;
    use bv_02_stream_replay::{LogAnalysisApi, StreamReplayer};
    use bv_03_live_sampler::{
        AppendOnlySampleLog, LiveSampleRunner, MemorySampleLog, NoisyTargetSource, RunControl,
        RunStatus,
    };
    use shared_types::RunConfig;
    use tempfile::tempdir;

    use crate::fixtures::{bv, log_text, noisy_stream};

    const TARGET: &str = "110101001011010101111001";

    // =========================================================================
    // LIVE -> REPLAY
    // =========================================================================

    #[tokio::test]
    async fn test_replay_matches_live_samples_to_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("live.samples");
        let target = bv(TARGET);
        let source = NoisyTargetSource::new(target.clone(), 0.3).unwrap();
        let runner = LiveSampleRunner::new(Arc::new(source), target.len());

        let mut log = AppendOnlySampleLog::open(&path, target.len()).unwrap();
        let report = runner
            .run(
                &RunConfig::default().with_batch_size(5),
                &target,
                &mut log,
                &RunControl::default().with_sample_budget(10_000),
            )
            .await
            .unwrap();
        drop(log);

        assert_eq!(report.status, RunStatus::Converged);
        let replayer = StreamReplayer::new(target.len());
        let outcome = replayer.replay_until_target(&path, &target).unwrap();
        assert!(outcome.converged);
        assert_eq!(Some(outcome.samples_processed), report.samples_to_target());
        assert_eq!(outcome.consensus, report.consensus);

        // Replay is idempotent.
        assert_eq!(replayer.replay_until_target(&path, &target).unwrap(), outcome);
    }

    #[tokio::test]
    async fn test_budget_exhausted_run_replays_without_convergence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stuck.samples");
        // Every bit flipped: the consensus moves away from the target.
        let target = bv("1010");
        let source = NoisyTargetSource::new(target.clone(), 1.0).unwrap();
        let runner = LiveSampleRunner::new(Arc::new(source), 4);

        let mut log = AppendOnlySampleLog::open(&path, 4).unwrap();
        let report = runner
            .run(
                &RunConfig::default().with_batch_size(3),
                &target,
                &mut log,
                &RunControl::default().with_sample_budget(7),
            )
            .await
            .unwrap();
        drop(log);

        assert_eq!(report.status, RunStatus::BudgetExhausted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0101\n".repeat(7));

        let outcome = StreamReplayer::new(4)
            .replay_until_target(&path, &target)
            .unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.samples_processed, 7);
    }

    #[tokio::test]
    async fn test_memory_log_and_file_log_agree() {
        let target = bv("0110");
        let source = Arc::new(NoisyTargetSource::new(target.clone(), 0.25).unwrap());
        let runner = LiveSampleRunner::new(source, 4);
        let control = RunControl::default().with_sample_budget(500);
        let config = RunConfig::default().with_batch_size(2).with_seed(11);

        let dir = tempdir().unwrap();
        let path = dir.path().join("a.samples");
        let mut file_log = AppendOnlySampleLog::open(&path, 4).unwrap();
        let mut memory_log = MemorySampleLog::new();

        runner.run(&config, &target, &mut file_log, &control).await.unwrap();
        runner.run(&config, &target, &mut memory_log, &control).await.unwrap();
        drop(file_log);

        assert_eq!(fs::read_to_string(&path).unwrap(), memory_log.to_log_text());
    }

    // =========================================================================
    // LOG DAMAGE
    // =========================================================================

    #[test]
    fn test_torn_final_write_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("torn.samples");
        fs::write(&path, "0000\n1111\n").unwrap();
        // Crash mid-append leaves a partial line.
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"11").unwrap();
        drop(file);

        let replayer = StreamReplayer::new(4);
        let outcome = replayer.replay_until_target(&path, &bv("0101")).unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.samples_processed, 2);
        assert_eq!(outcome.skipped_lines, 1);

        let majority = replayer.majority(&path).unwrap();
        assert_eq!(majority.samples_processed, 2);
        assert_eq!(majority.majority, bv(""));
    }

    #[test]
    fn test_duplicates_over_generated_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dups.samples");
        let samples = noisy_stream(&bv("101"), 0.2, 200, 5);
        fs::write(&path, log_text(&samples)).unwrap();

        let duplicates = StreamReplayer::new(3).duplicates(&path).unwrap();
        // Only 8 distinct 3-bit vectors exist, so most of them repeat.
        assert!(!duplicates.is_empty());
        assert!(duplicates.values().all(|&count| count > 1));
        let repeated: u64 = duplicates.values().sum();
        assert!(repeated <= 200);
    }

    // =========================================================================
    // SPLIT LOGS
    // =========================================================================

    #[test]
    fn test_merged_halves_equal_whole_log() {
        let samples = noisy_stream(&bv("11001010"), 0.4, 301, 17);
        let (left, right) = samples.split_at(150);
        let replayer = StreamReplayer::new(8);

        let whole = replayer.accumulate(Cursor::new(log_text(&samples))).unwrap();
        let mut merged: ConsensusEngine = replayer.accumulate(Cursor::new(log_text(left))).unwrap();
        merged
            .merge(&replayer.accumulate(Cursor::new(log_text(right))).unwrap())
            .unwrap();

        assert_eq!(merged.accepted(), whole.accepted());
        assert_eq!(merged.position_counts(), whole.position_counts());
        assert_eq!(merged.current_consensus(), whole.current_consensus());
    }
}
