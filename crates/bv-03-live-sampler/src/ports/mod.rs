//! Ports for the live sampler

pub mod outbound;

pub use outbound::{BatchRequest, SampleSink, SampleSource};
