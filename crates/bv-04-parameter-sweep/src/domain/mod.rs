//! Domain types for parameter sweeps

pub mod grid;
pub mod report;
pub mod result;

pub use grid::{AxisValue, ParameterGrid, ParameterGridBuilder, SweepAxis};
pub use report::{PivotTable, SweepReport};
pub use result::{CellMetrics, CellOutcome, SweepMetric, SweepResult};
