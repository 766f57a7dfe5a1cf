//! Service Layer
//!
//! Orchestrates log reading and the consensus engine.

pub mod replayer;

pub use replayer::StreamReplayer;
