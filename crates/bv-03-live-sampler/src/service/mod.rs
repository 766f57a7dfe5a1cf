//! Live sampling service

pub mod control;
pub mod runner;

pub use control::{CancelHandle, RunControl, DEFAULT_PROGRESS_INTERVAL};
pub use runner::LiveSampleRunner;
