//! Adapters for the live sampler ports

pub mod append_log;
pub mod memory_log;
#[cfg(feature = "synthetic")]
pub mod synthetic;

pub use append_log::AppendOnlySampleLog;
pub use memory_log::MemorySampleLog;
#[cfg(feature = "synthetic")]
pub use synthetic::NoisyTargetSource;
