//! # Report Export
//!
//! JSON and plain-text renderings of a `SweepReport`. Every row of the
//! report appears in both, failed cells included.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::{CellOutcome, PivotTable, SweepReport};
use crate::error::SweepError;

/// `"12.34 seconds"` under a minute, `"M minutes S.SS seconds"` otherwise.
pub fn format_duration(seconds: f64) -> String {
    // Round once, in centiseconds, so 59.999 carries into the next minute.
    let centis = (seconds * 100.0).round() as u64;
    if centis < 6000 {
        format!("{}.{:02} seconds", centis / 100, centis % 100)
    } else {
        let rest = centis % 6000;
        format!("{} minutes {}.{:02} seconds", centis / 6000, rest / 100, rest % 100)
    }
}

/// Pretty-printed JSON array of rows.
pub fn to_json(report: &SweepReport) -> Result<String, SweepError> {
    Ok(serde_json::to_string_pretty(report.rows())?)
}

pub fn write_json(report: &SweepReport, path: &Path) -> Result<(), SweepError> {
    let json = to_json(report)?;
    fs::write(path, json).map_err(|source| SweepError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Fixed-width summary table, one line per row.
pub fn render_table(report: &SweepReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<8} {:>5} {:>5}  {:>12}  {:<28} {:>8}  {}",
        "optimizer",
        "simplify",
        "group",
        "batch",
        "avg sample",
        "time to target",
        "samples",
        "status"
    );
    for row in report.rows() {
        let config = &row.config;
        let (latency, ttt, samples, status) = match &row.outcome {
            CellOutcome::Completed(m) => (
                format!("{:.4}", m.average_sample_latency),
                m.time_to_target.map_or_else(|| "-".into(), format_duration),
                m.samples_to_target.map_or_else(|| "-".into(), |n| n.to_string()),
                m.status.to_string(),
            ),
            CellOutcome::Failed { error } => (
                "-".into(),
                "-".into(),
                "-".into(),
                format!("failed: {}", error),
            ),
        };
        let _ = writeln!(
            out,
            "{:<12} {:<8} {:>5} {:>5}  {:>12}  {:<28} {:>8}  {}",
            config.optimizer,
            config.simplify_sequence.to_string(),
            config.group_size,
            config.sample_batch_size,
            latency,
            ttt,
            samples,
            status
        );
    }
    out
}

/// One pivot panel as a text grid; empty cells print as `-`.
pub fn render_heatmap(table: &PivotTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", table.title(), table.metric);
    let corner = format!(
        "{}\\{}",
        short(table.row_axis.name()),
        short(table.col_axis.name())
    );
    let _ = write!(out, "{:>10}", corner);
    for col in &table.col_keys {
        let _ = write!(out, " {:>10}", col.to_string());
    }
    out.push('\n');
    for (row_key, cells) in table.row_keys.iter().zip(&table.cells) {
        let _ = write!(out, "{:>10}", row_key.to_string());
        for cell in cells {
            match cell {
                Some(value) => {
                    let _ = write!(out, " {:>10.2}", value);
                }
                None => {
                    let _ = write!(out, " {:>10}", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}

fn short(axis: &str) -> &str {
    axis.split('_').next().unwrap_or(axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellMetrics, SweepMetric, SweepResult};
    use bv_03_live_sampler::RunStatus;
    use shared_types::RunConfig;

    fn report() -> SweepReport {
        SweepReport::new(vec![
            SweepResult::completed(
                RunConfig::default(),
                CellMetrics {
                    status: RunStatus::Converged,
                    average_sample_latency: 0.25,
                    time_to_target: Some(75.5),
                    samples_to_target: Some(302),
                    samples_accepted: 302,
                    samples_skipped: 0,
                    setup_time: 1.0,
                },
            ),
            SweepResult::failed(RunConfig::default().with_batch_size(5), "out of memory"),
        ])
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12.34), "12.34 seconds");
        assert_eq!(format_duration(59.99), "59.99 seconds");
        assert_eq!(format_duration(75.5), "1 minutes 15.50 seconds");
        assert_eq!(format_duration(3600.0), "60 minutes 0.00 seconds");
    }

    #[test]
    fn test_format_duration_rounds_across_minute_boundary() {
        assert_eq!(format_duration(59.999), "1 minutes 0.00 seconds");
        assert_eq!(format_duration(119.999), "2 minutes 0.00 seconds");
        assert_eq!(format_duration(0.004), "0.00 seconds");
    }

    #[test]
    fn test_json_keeps_every_row() {
        let json = to_json(&report()).unwrap();
        let rows: Vec<SweepResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows, report().into_rows());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        write_json(&report(), &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("out of memory"));
    }

    #[test]
    fn test_table_lists_failed_rows() {
        let table = render_table(&report());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("1 minutes 15.50 seconds"));
        assert!(lines[1].contains("302"));
        assert!(lines[2].contains("failed: out of memory"));
    }

    #[test]
    fn test_render_heatmap() {
        let panels = report().heatmaps(SweepMetric::SamplesToTarget).unwrap();
        let text = render_heatmap(&panels[0]);
        assert!(text.starts_with("optuna, ADCRS: Samples to Target"));
        assert!(text.contains("302.00"));
        assert!(text.contains('-'));
    }
}
