//! # BV-02 Stream Replay
//!
//! Offline analysis of persisted, append-only sample logs.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): replay result types
//! - **Ports Layer** (`ports/`): `LogAnalysisApi` driving port (path based)
//! - **Service Layer** (`service/`): `StreamReplayer`
//! - **Adapters Layer** (`adapters/`): `SampleLogReader` line reader
//!
//! ## Operations
//!
//! - `run`: replay through a fresh engine, stopping at first convergence.
//!   Reaching the end of the log is a normal termination.
//! - `find_duplicates`: samples occurring more than once.
//! - `final_majority`: tie-exclusive majority over the whole log.
//!
//! ## Usage Example
//!
//! ```
//! use bv_02_stream_replay::StreamReplayer;
//! use std::io::Cursor;
//!
//! let replayer = StreamReplayer::new(4);
//! let log = Cursor::new("0000\n1111\n1111\n");
//! let outcome = replayer.run(log, &"1111".parse().unwrap()).unwrap();
//! assert_eq!(outcome.samples_processed, 2);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{open_log, SampleLogReader};
pub use domain::{DuplicateReport, FinalMajority, ReplayOutcome};
pub use error::ReplayError;
pub use ports::LogAnalysisApi;
pub use service::StreamReplayer;
