//! # Bitvote Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared sources and sample generators
//! └── integration/      # Cross-crate flows
//!     ├── live_replay.rs    # live run -> log -> replay
//!     └── sweep_flow.rs     # grid -> harness -> report -> export
//!
//! tests/benches/
//! └── consensus_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bv-tests
//! cargo test -p bv-tests integration::sweep_flow
//!
//! # Benchmarks
//! cargo bench -p bv-tests
//! ```

pub mod fixtures;
pub mod integration;
