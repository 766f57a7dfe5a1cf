//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shared_types::BitVector;

use crate::config::RuntimeConfig;

/// Streaming majority-vote consensus over sampled bit-vectors
#[derive(Parser, Debug)]
#[command(name = "sweep-runtime")]
#[command(about = "Live consensus runs, sample-log analysis and parameter sweeps")]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Target bit-vector (also sets the width)
    #[arg(short, long, global = true)]
    pub target: Option<BitVector>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample from the synthetic source until the consensus reaches the target
    Live {
        /// Sample log to append to (default: <log_dir>/live.samples)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Samples per batch
        #[arg(long)]
        batch_size: Option<u32>,

        /// Stop after this many samples
        #[arg(long)]
        budget: Option<u64>,

        /// Stop after this many seconds
        #[arg(long)]
        deadline: Option<u64>,

        #[arg(long)]
        seed: Option<u64>,

        /// Per-bit flip probability of the synthetic source
        #[arg(long)]
        flip_probability: Option<f64>,
    },

    /// Replay a sample log until the consensus reaches the target
    Replay {
        log: PathBuf,
    },

    /// List samples that occur more than once in a log
    Duplicates {
        log: PathBuf,
    },

    /// Tie-exclusive majority over a whole log
    Majority {
        log: PathBuf,
    },

    /// Run every cell of the configured parameter grid
    Sweep {
        /// Keep per-cell sample logs in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Cells run concurrently
        #[arg(long)]
        concurrency: Option<usize>,

        /// Stop each cell after this many samples
        #[arg(long)]
        budget: Option<u64>,

        /// Write the results as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Apply flags on top of file and environment configuration.
    pub fn apply_overrides(&self, config: &mut RuntimeConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.json_logs {
            config.json_logs = true;
        }
        if let Some(target) = &self.target {
            config.target = target.clone();
            config.width = target.len();
        }
        match &self.command {
            Command::Live {
                batch_size,
                budget,
                deadline,
                seed,
                flip_probability,
                ..
            } => {
                if let Some(size) = batch_size {
                    config.sample_batch_size = *size;
                }
                if budget.is_some() {
                    config.sample_budget = *budget;
                }
                if deadline.is_some() {
                    config.deadline_secs = *deadline;
                }
                if let Some(seed) = seed {
                    config.seed = *seed;
                }
                if let Some(p) = flip_probability {
                    config.source.flip_probability = *p;
                }
            }
            Command::Sweep {
                log_dir,
                concurrency,
                budget,
                ..
            } => {
                if log_dir.is_some() {
                    config.sweep.log_dir = log_dir.clone();
                }
                if let Some(cells) = concurrency {
                    config.sweep.max_concurrent_cells = *cells;
                }
                if budget.is_some() {
                    config.sample_budget = *budget;
                }
            }
            Command::Replay { .. } | Command::Duplicates { .. } | Command::Majority { .. } => {}
        }
    }
}
