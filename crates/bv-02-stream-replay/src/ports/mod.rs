//! Ports Layer
//!
//! Driving ports (inbound) for offline log analysis.

pub mod inbound;

pub use inbound::LogAnalysisApi;
