//! # BV-04 Parameter Sweep
//!
//! Benchmarks convergence of the live sampler across a Cartesian grid of
//! run configurations and tabulates the results.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `ParameterGrid`, `SweepResult`,
//!   `SweepReport` with pivots
//! - **Ports Layer** (`ports/`): `ParameterSweepApi` driving port
//! - **Service Layer** (`service/`): `SweepHarness`, `SweepSettings`
//! - **Adapters Layer** (`adapters/`): JSON and text exporters
//!
//! ## Guarantees
//!
//! - One result per grid cell, in grid order, even with concurrent cells.
//! - A failing cell is recorded and never aborts the sweep.
//! - Cells share nothing but the source handle.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use bv_03_live_sampler::NoisyTargetSource;
//! use bv_04_parameter_sweep::{ParameterGrid, ParameterSweepApi, SweepHarness, SweepSettings};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let target: shared_types::BitVector = "0110".parse().unwrap();
//! let source = Arc::new(NoisyTargetSource::new(target.clone(), 0.0).unwrap());
//! let grid = ParameterGrid::builder()
//!     .optimizers(["optuna"])
//!     .group_sizes([5, 10])
//!     .sample_batch_sizes([1])
//!     .build()
//!     .unwrap();
//!
//! let harness = SweepHarness::new(source, target, SweepSettings::default()).unwrap();
//! let results = harness.sweep(&grid).await.unwrap();
//! assert_eq!(results.len(), grid.len());
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{format_duration, render_heatmap, render_table, to_json, write_json};
pub use domain::{
    AxisValue, CellMetrics, CellOutcome, ParameterGrid, ParameterGridBuilder, PivotTable,
    SweepAxis, SweepMetric, SweepReport, SweepResult,
};
pub use error::SweepError;
pub use ports::ParameterSweepApi;
pub use service::{LatencyMode, SweepHarness, SweepSettings, DEFAULT_WARMUP_BATCHES};
