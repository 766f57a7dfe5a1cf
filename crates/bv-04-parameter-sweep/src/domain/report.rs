//! # Sweep Report
//!
//! Tabular view over sweep results: one row per cell, plus pivots that lay
//! a metric out against two axes with the other two axes fixed per panel.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: every result is a row exactly once, in sweep order.
//! - **INVARIANT-2**: a pivot places every result in exactly one
//!   `(panel, row, column)` cell; a collision is an error rather than an
//!   overwrite.
//! - **INVARIANT-3**: panel, row and column order is the order of first
//!   appearance in the rows, so pivots are reproducible.

use serde::{Deserialize, Serialize};

use crate::domain::grid::{AxisValue, SweepAxis};
use crate::domain::result::{SweepMetric, SweepResult};
use crate::error::SweepError;

/// One heatmap panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub metric: SweepMetric,
    /// Values of the two axes held fixed in this panel.
    pub panel: Vec<(SweepAxis, AxisValue)>,
    pub row_axis: SweepAxis,
    pub col_axis: SweepAxis,
    pub row_keys: Vec<AxisValue>,
    pub col_keys: Vec<AxisValue>,
    /// `cells[row][col]`; `None` for missing, failed or unconverged cells.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn get(&self, row: &AxisValue, col: &AxisValue) -> Option<f64> {
        let r = self.row_keys.iter().position(|k| k == row)?;
        let c = self.col_keys.iter().position(|k| k == col)?;
        self.cells[r][c]
    }

    /// Panel title, e.g. `optuna, CR`.
    pub fn title(&self) -> String {
        self.panel
            .iter()
            .map(|(_, value)| value.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// All results of one sweep.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    rows: Vec<SweepResult>,
}

impl SweepReport {
    pub fn new(rows: Vec<SweepResult>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SweepResult] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SweepResult> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn failed(&self) -> impl Iterator<Item = &SweepResult> {
        self.rows.iter().filter(|r| r.is_failed())
    }

    pub fn converged(&self) -> impl Iterator<Item = &SweepResult> {
        self.rows.iter().filter(|r| r.converged())
    }

    /// Lay `metric` out with `row_axis` down and `col_axis` across, one panel
    /// per combination of the remaining two axes.
    pub fn pivot(
        &self,
        metric: SweepMetric,
        row_axis: SweepAxis,
        col_axis: SweepAxis,
    ) -> Result<Vec<PivotTable>, SweepError> {
        if row_axis == col_axis {
            return Err(SweepError::SameAxis(row_axis));
        }
        let panel_axes: Vec<SweepAxis> = SweepAxis::ALL
            .into_iter()
            .filter(|a| *a != row_axis && *a != col_axis)
            .collect();

        // (panel key, rows of that panel) in first-appearance order
        let mut panels: Vec<(Vec<AxisValue>, Vec<&SweepResult>)> = Vec::new();
        for row in &self.rows {
            let key: Vec<AxisValue> = panel_axes.iter().map(|a| a.value_of(&row.config)).collect();
            match panels.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(row),
                None => panels.push((key, vec![row])),
            }
        }

        panels
            .into_iter()
            .map(|(key, members)| {
                let mut row_keys: Vec<AxisValue> = Vec::new();
                let mut col_keys: Vec<AxisValue> = Vec::new();
                for member in &members {
                    push_unique(&mut row_keys, row_axis.value_of(&member.config));
                    push_unique(&mut col_keys, col_axis.value_of(&member.config));
                }

                let mut cells = vec![vec![None; col_keys.len()]; row_keys.len()];
                let mut filled = vec![vec![false; col_keys.len()]; row_keys.len()];
                for member in &members {
                    let r = index_of(&row_keys, &row_axis.value_of(&member.config));
                    let c = index_of(&col_keys, &col_axis.value_of(&member.config));
                    if filled[r][c] {
                        return Err(SweepError::DuplicateCell(member.config.cell_key()));
                    }
                    filled[r][c] = true;
                    cells[r][c] = metric.value(member);
                }

                Ok(PivotTable {
                    metric,
                    panel: panel_axes.iter().copied().zip(key).collect(),
                    row_axis,
                    col_axis,
                    row_keys,
                    col_keys,
                    cells,
                })
            })
            .collect()
    }

    /// Panels per optimizer and simplify sequence, group size down, sample
    /// batch size across.
    pub fn heatmaps(&self, metric: SweepMetric) -> Result<Vec<PivotTable>, SweepError> {
        self.pivot(metric, SweepAxis::GroupSize, SweepAxis::SampleBatchSize)
    }
}

fn push_unique(keys: &mut Vec<AxisValue>, value: AxisValue) {
    if !keys.contains(&value) {
        keys.push(value);
    }
}

fn index_of(keys: &[AxisValue], value: &AxisValue) -> usize {
    keys.iter().position(|k| k == value).unwrap_or_default()
}
