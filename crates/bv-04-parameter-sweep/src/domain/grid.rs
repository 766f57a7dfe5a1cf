//! # Parameter Grid
//!
//! Cartesian product of the four configuration axes. Iteration nests the
//! axes in declaration order (optimizer outermost, sample batch size
//! innermost), so the cell order is fixed for a given grid.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: every axis is non-empty.
//! - **INVARIANT-2**: no axis lists a value twice, so every cell is a
//!   distinct `RunConfig`.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{RunConfig, SimplifySequence, DEFAULT_SEED};

use crate::error::SweepError;

/// Default optimizer axis.
pub const DEFAULT_OPTIMIZERS: [&str; 2] = ["optuna", "nevergrad"];
/// Default group size axis.
pub const DEFAULT_GROUP_SIZES: [u32; 5] = [5, 10, 15, 20, 25];
/// Default sample batch size axis.
pub const DEFAULT_SAMPLE_BATCH_SIZES: [u32; 3] = [1, 5, 10];

/// One configuration axis of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    Optimizer,
    SimplifySequence,
    GroupSize,
    SampleBatchSize,
}

impl SweepAxis {
    /// All axes in nesting order.
    pub const ALL: [SweepAxis; 4] = [
        SweepAxis::Optimizer,
        SweepAxis::SimplifySequence,
        SweepAxis::GroupSize,
        SweepAxis::SampleBatchSize,
    ];

    /// Column name used in exports.
    pub fn name(self) -> &'static str {
        match self {
            SweepAxis::Optimizer => "optimizer",
            SweepAxis::SimplifySequence => "simplify_sequence",
            SweepAxis::GroupSize => "group_size",
            SweepAxis::SampleBatchSize => "sample_batch_size",
        }
    }

    /// Value of this axis in `config`.
    pub fn value_of(self, config: &RunConfig) -> AxisValue {
        match self {
            SweepAxis::Optimizer => AxisValue::Text(config.optimizer.clone()),
            SweepAxis::SimplifySequence => {
                AxisValue::Text(config.simplify_sequence.to_string())
            }
            SweepAxis::GroupSize => AxisValue::Number(config.group_size),
            SweepAxis::SampleBatchSize => AxisValue::Number(config.sample_batch_size),
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one axis, used as a pivot key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(u32),
    Text(String),
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Number(n) => write!(f, "{}", n),
            AxisValue::Text(s) => f.write_str(s),
        }
    }
}

/// Validated configuration grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGrid {
    optimizers: Vec<String>,
    simplify_sequences: Vec<SimplifySequence>,
    group_sizes: Vec<u32>,
    sample_batch_sizes: Vec<u32>,
    seed: u64,
}

impl Default for ParameterGrid {
    /// The full default grid: 2 optimizers, 7 simplify sequences, 5 group
    /// sizes and 3 batch sizes (210 cells).
    fn default() -> Self {
        Self {
            optimizers: DEFAULT_OPTIMIZERS.iter().map(|s| s.to_string()).collect(),
            simplify_sequences: SimplifySequence::default_sweep(),
            group_sizes: DEFAULT_GROUP_SIZES.to_vec(),
            sample_batch_sizes: DEFAULT_SAMPLE_BATCH_SIZES.to_vec(),
            seed: DEFAULT_SEED,
        }
    }
}

impl ParameterGrid {
    pub fn builder() -> ParameterGridBuilder {
        ParameterGridBuilder::default()
    }

    pub fn optimizers(&self) -> &[String] {
        &self.optimizers
    }

    pub fn simplify_sequences(&self) -> &[SimplifySequence] {
        &self.simplify_sequences
    }

    pub fn group_sizes(&self) -> &[u32] {
        &self.group_sizes
    }

    pub fn sample_batch_sizes(&self) -> &[u32] {
        &self.sample_batch_sizes
    }

    /// Seed shared by every cell.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.optimizers.len()
            * self.simplify_sequences.len()
            * self.group_sizes.len()
            * self.sample_batch_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every cell, optimizer outermost and sample batch size innermost.
    pub fn configs(&self) -> Vec<RunConfig> {
        let mut configs = Vec::with_capacity(self.len());
        for optimizer in &self.optimizers {
            for simplify_sequence in &self.simplify_sequences {
                for &group_size in &self.group_sizes {
                    for &sample_batch_size in &self.sample_batch_sizes {
                        configs.push(RunConfig {
                            sample_batch_size,
                            group_size,
                            simplify_sequence: simplify_sequence.clone(),
                            optimizer: optimizer.clone(),
                            seed: self.seed,
                        });
                    }
                }
            }
        }
        configs
    }

    /// Check every axis and every cell.
    pub fn validate(&self) -> Result<(), SweepError> {
        check_axis(SweepAxis::Optimizer, &self.optimizers)?;
        check_axis(SweepAxis::SimplifySequence, &self.simplify_sequences)?;
        check_axis(SweepAxis::GroupSize, &self.group_sizes)?;
        check_axis(SweepAxis::SampleBatchSize, &self.sample_batch_sizes)?;
        for config in self.configs() {
            config.validate()?;
        }
        Ok(())
    }
}

fn check_axis<T: PartialEq + fmt::Display>(
    axis: SweepAxis,
    values: &[T],
) -> Result<(), SweepError> {
    if values.is_empty() {
        return Err(SweepError::EmptyAxis(axis));
    }
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(SweepError::DuplicateAxisValue {
                axis,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Builder for `ParameterGrid`. Unset axes fall back to the defaults.
#[derive(Clone, Debug, Default)]
pub struct ParameterGridBuilder {
    optimizers: Option<Vec<String>>,
    simplify_sequences: Option<Vec<SimplifySequence>>,
    group_sizes: Option<Vec<u32>>,
    sample_batch_sizes: Option<Vec<u32>>,
    seed: Option<u64>,
}

impl ParameterGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optimizers<I, S>(mut self, optimizers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optimizers = Some(optimizers.into_iter().map(Into::into).collect());
        self
    }

    pub fn simplify_sequences(
        mut self,
        sequences: impl IntoIterator<Item = SimplifySequence>,
    ) -> Self {
        self.simplify_sequences = Some(sequences.into_iter().collect());
        self
    }

    pub fn group_sizes(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.group_sizes = Some(sizes.into_iter().collect());
        self
    }

    pub fn sample_batch_sizes(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.sample_batch_sizes = Some(sizes.into_iter().collect());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the grid, validating all axes.
    pub fn build(self) -> Result<ParameterGrid, SweepError> {
        let defaults = ParameterGrid::default();
        let grid = ParameterGrid {
            optimizers: self.optimizers.unwrap_or(defaults.optimizers),
            simplify_sequences: self.simplify_sequences.unwrap_or(defaults.simplify_sequences),
            group_sizes: self.group_sizes.unwrap_or(defaults.group_sizes),
            sample_batch_sizes: self.sample_batch_sizes.unwrap_or(defaults.sample_batch_sizes),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        grid.validate()?;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> SimplifySequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_grid_size() {
        let grid = ParameterGrid::default();
        assert_eq!(grid.len(), 2 * 7 * 5 * 3);
        assert_eq!(grid.configs().len(), grid.len());
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_iteration_nests_axes_in_order() {
        let grid = ParameterGrid::builder()
            .optimizers(["a", "b"])
            .simplify_sequences([seq("CR")])
            .group_sizes([5, 10])
            .sample_batch_sizes([1, 2])
            .build()
            .unwrap();

        let keys: Vec<String> = grid.configs().iter().map(|c| c.cell_key()).collect();
        assert_eq!(
            keys,
            vec![
                "a_CR_g5_b1",
                "a_CR_g5_b2",
                "a_CR_g10_b1",
                "a_CR_g10_b2",
                "b_CR_g5_b1",
                "b_CR_g5_b2",
                "b_CR_g10_b1",
                "b_CR_g10_b2",
            ]
        );
    }

    #[test]
    fn test_seed_reaches_every_cell() {
        let grid = ParameterGrid::builder()
            .optimizers(["x"])
            .seed(9)
            .build()
            .unwrap();
        assert!(grid.configs().iter().all(|c| c.seed == 9));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let result = ParameterGrid::builder().group_sizes([]).build();
        assert!(matches!(
            result,
            Err(SweepError::EmptyAxis(SweepAxis::GroupSize))
        ));
    }

    #[test]
    fn test_duplicate_axis_value_rejected() {
        let result = ParameterGrid::builder().optimizers(["optuna", "optuna"]).build();
        assert!(matches!(
            result,
            Err(SweepError::DuplicateAxisValue {
                axis: SweepAxis::Optimizer,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = ParameterGrid::builder().sample_batch_sizes([0, 1]).build();
        assert!(matches!(result, Err(SweepError::InvalidConfig(_))));
    }

    #[test]
    fn test_axis_values() {
        let config = RunConfig::default();
        assert_eq!(
            SweepAxis::GroupSize.value_of(&config),
            AxisValue::Number(config.group_size)
        );
        assert_eq!(
            SweepAxis::SimplifySequence.value_of(&config).to_string(),
            "ADCRS"
        );
    }
}
