//! Sweep orchestration

pub mod harness;
pub mod settings;

pub use harness::SweepHarness;
pub use settings::{LatencyMode, SweepSettings, DEFAULT_WARMUP_BATCHES};
