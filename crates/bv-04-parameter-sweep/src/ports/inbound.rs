//! # Inbound Ports
//!
//! Driving port used by the runtime binary.

use async_trait::async_trait;

use crate::domain::{ParameterGrid, SweepReport, SweepResult};
use crate::error::SweepError;

/// Benchmark convergence across a configuration grid.
#[async_trait]
pub trait ParameterSweepApi: Send + Sync {
    /// Run every cell of `grid` in grid order.
    ///
    /// Returns one result per cell. A failing cell is recorded, never
    /// returned as an error; errors here mean the sweep could not start.
    async fn sweep(&self, grid: &ParameterGrid) -> Result<Vec<SweepResult>, SweepError>;

    /// Tabulate results for pivoting and export.
    fn report(&self, results: Vec<SweepResult>) -> SweepReport {
        SweepReport::new(results)
    }
}
