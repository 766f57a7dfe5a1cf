//! Adapters Layer
//!
//! - `log_reader`: buffered line reader over persisted sample logs

pub mod log_reader;

pub use log_reader::{open_log, NumberedLine, SampleLogReader};
