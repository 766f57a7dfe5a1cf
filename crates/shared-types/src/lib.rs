//! # Shared Types Crate
//!
//! This crate contains the entities every subsystem exchanges: the
//! `BitVector` sample, the `RunConfig` grid cell and the sample-log line
//! format.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Validated on Construction**: A `BitVector` only ever holds `0`/`1`;
//!   a `SimplifySequence` only ever holds alphabet symbols.
//! - **Opaque Configuration**: `RunConfig` fields are forwarded to the sample
//!   source untouched; the consensus core only uses them as keys.

pub mod config;
pub mod entities;
pub mod errors;
pub mod log_format;

pub use config::{RunConfig, SimplifySequence, SimplifySymbol, DEFAULT_SEED};
pub use entities::{BitVector, TargetVector};
pub use errors::*;
pub use log_format::{classify_line, format_line, LogLine};
