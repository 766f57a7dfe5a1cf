//! Ports for parameter sweeps

pub mod inbound;

pub use inbound::ParameterSweepApi;
