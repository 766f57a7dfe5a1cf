//! # Sweep Runtime
//!
//! Wiring for the `sweep-runtime` binary: layered configuration, the CLI
//! and one function per subcommand.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::{ConfigError, RuntimeConfig};
