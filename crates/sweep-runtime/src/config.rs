//! # Runtime Configuration
//!
//! Layered: built-in defaults, then an optional JSON file, then `BV_*`
//! environment variables, then command-line flags. `validate()` runs once
//! all layers are applied.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bv_03_live_sampler::{NoisyTargetSource, RunControl, SourceError, DEFAULT_PROGRESS_INTERVAL};
use bv_04_parameter_sweep::{
    LatencyMode, ParameterGrid, SweepError, SweepSettings, DEFAULT_WARMUP_BATCHES,
};
use serde::{Deserialize, Serialize};
use shared_types::{BitVector, SimplifySequence, TargetVector, DEFAULT_SEED};
use thiserror::Error;
use tokio::sync::watch;

/// Default 60-bit target.
pub const DEFAULT_TARGET: &str = "110101001011010101111001011100001110101101111010100110110001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value {value:?} for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Grid(#[from] SweepError),
}

/// Parameters of the synthetic sample source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Probability that each bit of a sample is flipped.
    pub flip_probability: f64,
    pub sample_delay_ms: u64,
    pub setup_delay_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            flip_probability: 0.3,
            sample_delay_ms: 0,
            setup_delay_ms: 0,
        }
    }
}

/// Grid axes and harness settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub optimizers: Vec<String>,
    pub simplify_sequences: Vec<SimplifySequence>,
    pub group_sizes: Vec<u32>,
    pub sample_batch_sizes: Vec<u32>,
    pub max_concurrent_cells: usize,
    pub latency_mode: LatencyMode,
    /// Per-cell logs go here; `None` keeps them in memory.
    pub log_dir: Option<PathBuf>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let grid = ParameterGrid::default();
        Self {
            optimizers: grid.optimizers().to_vec(),
            simplify_sequences: grid.simplify_sequences().to_vec(),
            group_sizes: grid.group_sizes().to_vec(),
            sample_batch_sizes: grid.sample_batch_sizes().to_vec(),
            max_concurrent_cells: 1,
            latency_mode: LatencyMode::Warmup {
                batches: DEFAULT_WARMUP_BATCHES,
            },
            log_dir: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Sample width `N`.
    pub width: usize,
    pub target: TargetVector,
    /// Directory for live-run logs.
    pub log_dir: PathBuf,
    pub seed: u64,
    /// Samples per batch for `live`.
    pub sample_batch_size: u32,
    pub sample_budget: Option<u64>,
    pub deadline_secs: Option<u64>,
    pub progress_interval: u64,
    pub source: SourceConfig,
    pub sweep: SweepConfig,
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let target = BitVector::new(DEFAULT_TARGET).unwrap_or_default();
        Self {
            width: target.len(),
            target,
            log_dir: PathBuf::from("samples"),
            seed: DEFAULT_SEED,
            sample_batch_size: 1,
            sample_budget: None,
            deadline_secs: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            source: SourceConfig::default(),
            sweep: SweepConfig::default(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Defaults, overlaid with `path` if given, overlaid with the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read a JSON file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `BV_*` overrides from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup("BV_TARGET") {
            self.target = parse_env("BV_TARGET", value)?;
            if lookup("BV_WIDTH").is_none() {
                self.width = self.target.len();
            }
        }
        if let Some(value) = lookup("BV_WIDTH") {
            self.width = parse_env("BV_WIDTH", value)?;
        }
        if let Some(value) = lookup("BV_LOG_DIR") {
            self.log_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("BV_SAMPLE_BUDGET") {
            self.sample_budget = Some(parse_env("BV_SAMPLE_BUDGET", value)?);
        }
        if let Some(value) = lookup("BV_SWEEP_CONCURRENCY") {
            self.sweep.max_concurrent_cells = parse_env("BV_SWEEP_CONCURRENCY", value)?;
        }
        if let Some(value) = lookup("BV_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("BV_JSON_LOGS") {
            self.json_logs = value.eq_ignore_ascii_case("true") || value == "1";
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::Invalid("target must not be empty".into()));
        }
        if self.target.len() != self.width {
            return Err(ConfigError::Invalid(format!(
                "target has {} symbols but width is {}",
                self.target.len(),
                self.width
            )));
        }
        if self.sample_batch_size == 0 {
            return Err(ConfigError::Invalid("sample_batch_size must be at least 1".into()));
        }
        if self.sweep.max_concurrent_cells == 0 {
            return Err(ConfigError::Invalid("max_concurrent_cells must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.source.flip_probability) {
            return Err(ConfigError::Invalid(format!(
                "flip_probability {} outside [0, 1]",
                self.source.flip_probability
            )));
        }
        self.grid()?;
        self.sweep_settings(RunControl::default()).validate()?;
        Ok(())
    }

    /// Validated grid from the sweep axes.
    pub fn grid(&self) -> Result<ParameterGrid, SweepError> {
        ParameterGrid::builder()
            .optimizers(self.sweep.optimizers.iter().cloned())
            .simplify_sequences(self.sweep.simplify_sequences.iter().cloned())
            .group_sizes(self.sweep.group_sizes.iter().copied())
            .sample_batch_sizes(self.sweep.sample_batch_sizes.iter().copied())
            .seed(self.seed)
            .build()
    }

    pub fn run_control(&self, cancel: watch::Receiver<bool>) -> RunControl {
        let mut control = RunControl::default()
            .with_progress_interval(self.progress_interval)
            .with_cancel(cancel);
        if let Some(budget) = self.sample_budget {
            control = control.with_sample_budget(budget);
        }
        if let Some(secs) = self.deadline_secs {
            control = control.with_deadline(Duration::from_secs(secs));
        }
        control
    }

    pub fn sweep_settings(&self, control: RunControl) -> SweepSettings {
        let mut settings = SweepSettings::default()
            .with_latency_mode(self.sweep.latency_mode)
            .with_max_concurrent_cells(self.sweep.max_concurrent_cells)
            .with_control(control);
        if let Some(dir) = &self.sweep.log_dir {
            settings = settings.with_log_dir(dir);
        }
        settings
    }

    /// Synthetic source configured from `source`.
    pub fn sample_source(&self) -> Result<NoisyTargetSource, SourceError> {
        let mut source = NoisyTargetSource::new(self.target.clone(), self.source.flip_probability)?;
        if self.source.sample_delay_ms > 0 {
            source = source.with_sample_delay(Duration::from_millis(self.source.sample_delay_ms));
        }
        if self.source.setup_delay_ms > 0 {
            source = source.with_setup_delay(Duration::from_millis(self.source.setup_delay_ms));
        }
        Ok(source)
    }
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        reason: e.to_string(),
        value,
    })
}
