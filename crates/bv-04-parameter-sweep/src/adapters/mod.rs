//! Report exporters

pub mod export;

pub use export::{format_duration, render_heatmap, render_table, to_json, write_json};
