//! Subcommand implementations.
//!
//! Results go to stdout; diagnostics go through `tracing`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bv_02_stream_replay::{LogAnalysisApi, StreamReplayer};
use bv_03_live_sampler::{AppendOnlySampleLog, LiveSampleRunner, RunControl};
use bv_04_parameter_sweep::{
    format_duration, render_heatmap, render_table, write_json, ParameterSweepApi, SweepHarness,
    SweepMetric,
};
use shared_types::RunConfig;
use tracing::info;

use crate::config::RuntimeConfig;

/// Live run against the synthetic source.
pub async fn live(config: &RuntimeConfig, log: Option<PathBuf>, control: RunControl) -> Result<()> {
    let path = log.unwrap_or_else(|| config.log_dir.join("live.samples"));
    let source = config
        .sample_source()
        .context("Failed to configure sample source")?;
    let runner = LiveSampleRunner::new(Arc::new(source), config.width);
    let mut sink = AppendOnlySampleLog::open(&path, config.width)
        .with_context(|| format!("Failed to open sample log {}", path.display()))?;

    let run_config = RunConfig {
        sample_batch_size: config.sample_batch_size,
        seed: config.seed,
        ..RunConfig::default()
    };
    info!("Logging samples to {}", path.display());
    let report = runner
        .run(&run_config, &config.target, &mut sink, &control)
        .await
        .context("Live run failed")?;

    match (report.samples_to_target(), report.time_to_target()) {
        (Some(samples), Some(elapsed)) => {
            println!("Target bitstring reached after {} samples.", samples);
            println!(
                "Time to reach target: {}",
                format_duration(elapsed.as_secs_f64())
            );
        }
        _ => {
            println!(
                "Target not reached ({}) after {} samples.",
                report.status, report.samples_accepted
            );
        }
    }
    println!("Consensus: {}", report.consensus);
    println!(
        "Average sample time: {:.4} seconds",
        report.average_sample_latency().as_secs_f64()
    );
    Ok(())
}

pub fn replay(config: &RuntimeConfig, log: &Path) -> Result<()> {
    let outcome = StreamReplayer::new(config.width)
        .replay_until_target(log, &config.target)
        .with_context(|| format!("Failed to replay {}", log.display()))?;

    if outcome.converged {
        println!(
            "Target bitstring reached after {} samples.",
            outcome.samples_processed
        );
    } else {
        println!(
            "Target bitstring not reached. Total samples processed: {}",
            outcome.samples_processed
        );
    }
    if outcome.skipped_lines > 0 {
        println!("Skipped lines: {}", outcome.skipped_lines);
    }
    Ok(())
}

pub fn duplicates(config: &RuntimeConfig, log: &Path) -> Result<()> {
    let duplicates = StreamReplayer::new(config.width)
        .duplicates(log)
        .with_context(|| format!("Failed to scan {}", log.display()))?;

    if duplicates.is_empty() {
        println!("No duplicate samples found.");
    } else {
        println!("Duplicate samples found:");
        for (sample, count) in &duplicates {
            println!("{}: {} times", sample, count);
        }
    }
    Ok(())
}

pub fn majority(config: &RuntimeConfig, log: &Path) -> Result<()> {
    let result = StreamReplayer::new(config.width)
        .majority(log)
        .with_context(|| format!("Failed to read {}", log.display()))?;

    println!("Total samples processed: {}", result.samples_processed);
    println!("Majority vote result: {}", result.majority);
    if !result.is_complete(config.width) {
        println!(
            "{} positions tied and were left out.",
            config.width - result.majority.len()
        );
    }
    Ok(())
}

pub async fn sweep(
    config: &RuntimeConfig,
    control: RunControl,
    output: Option<PathBuf>,
) -> Result<()> {
    let grid = config.grid().context("Invalid parameter grid")?;
    let source = config
        .sample_source()
        .context("Failed to configure sample source")?;
    let harness = SweepHarness::new(
        Arc::new(source),
        config.target.clone(),
        config.sweep_settings(control),
    )?;

    let results = harness.sweep(&grid).await.context("Sweep failed")?;
    let report = harness.report(results);

    println!("\nSummary of results:");
    print!("{}", render_table(&report));
    for metric in SweepMetric::ALL {
        for panel in report.heatmaps(metric)? {
            println!();
            print!("{}", render_heatmap(&panel));
        }
    }

    if let Some(path) = output {
        write_json(&report, &path)?;
        info!("Wrote {} results to {}", report.len(), path.display());
    }
    Ok(())
}
