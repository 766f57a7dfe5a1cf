//! Domain types for live runs

pub mod report;

pub use report::{RunReport, RunStatus};
