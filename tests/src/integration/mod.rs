//! Cross-crate integration flows.

pub mod live_replay;
pub mod sweep_flow;
