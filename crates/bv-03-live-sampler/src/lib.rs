//! # BV-03 Live Sampler
//!
//! Draws samples from a live source, persists each one, and stops as soon as
//! the running consensus matches the target.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `RunStatus`, `RunReport`
//! - **Ports Layer** (`ports/`): `SampleSource` and `SampleSink` driven ports
//! - **Service Layer** (`service/`): `LiveSampleRunner`, `RunControl`
//! - **Adapters Layer** (`adapters/`): fs2-locked `AppendOnlySampleLog`,
//!   `MemorySampleLog`, seeded `NoisyTargetSource` (feature `synthetic`)
//!
//! ## Invariants
//!
//! - Every accepted sample is durable in the log before it is counted.
//! - The count at convergence equals what a replay of the log reports.
//! - Budget, deadline and cancellation are honoured between batches.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use bv_03_live_sampler::{LiveSampleRunner, MemorySampleLog, NoisyTargetSource, RunControl};
//! use shared_types::{BitVector, RunConfig};
//!
//! # tokio_test_block(async {
//! let target: BitVector = "1011".parse().unwrap();
//! let source = NoisyTargetSource::new(target.clone(), 0.0).unwrap();
//! let runner = LiveSampleRunner::new(Arc::new(source), 4);
//! let mut log = MemorySampleLog::new();
//!
//! let report = runner
//!     .run(&RunConfig::default(), &target, &mut log, &RunControl::default())
//!     .await
//!     .unwrap();
//! assert_eq!(report.samples_to_target(), Some(1));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
#[cfg(feature = "synthetic")]
pub use adapters::NoisyTargetSource;
pub use adapters::{AppendOnlySampleLog, MemorySampleLog};
pub use domain::{RunReport, RunStatus};
pub use error::{LogError, RunError, SourceError};
pub use ports::{BatchRequest, SampleSink, SampleSource};
pub use service::{CancelHandle, LiveSampleRunner, RunControl, DEFAULT_PROGRESS_INTERVAL};
