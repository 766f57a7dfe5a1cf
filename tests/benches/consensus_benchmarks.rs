//! # Consensus Benchmarks
//!
//! Throughput of the per-sample hot path: `ConsensusEngine::update` followed
//! by `has_converged`, and of replaying a log held in memory.

use std::io::Cursor;
use std::time::Duration;

use bv_01_consensus_engine::ConsensusEngine;
use bv_02_stream_replay::StreamReplayer;
use bv_tests::fixtures::{log_text, noisy_stream};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::BitVector;

const STREAM_LEN: usize = 10_000;

fn target(width: usize) -> BitVector {
    BitVector::from_bits((0..width).map(|i| i % 3 == 0))
}

// ============================================================================
// BV-01: update + convergence check
// ============================================================================

fn bench_update_and_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("bv-01-consensus-engine");
    group.measurement_time(Duration::from_secs(5));

    for width in [16usize, 60, 256] {
        let target = target(width);
        let stream = noisy_stream(&target, 0.45, STREAM_LEN, 42);

        group.throughput(Throughput::Elements(STREAM_LEN as u64));
        group.bench_with_input(BenchmarkId::new("update_and_check", width), &stream, |b, stream| {
            b.iter(|| {
                let mut engine = ConsensusEngine::new(width);
                let mut converged = 0u64;
                for sample in stream {
                    let _ = engine.update(sample);
                    if engine.has_converged(&target) {
                        converged += 1;
                    }
                }
                black_box(converged)
            })
        });
    }

    group.finish();
}

// ============================================================================
// BV-02: replay from an in-memory log
// ============================================================================

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("bv-02-stream-replay");

    let width = 60;
    let target = target(width);
    // Noise high enough that the replay reads most of the log.
    let text = log_text(&noisy_stream(&target, 0.49, STREAM_LEN, 7));
    let replayer = StreamReplayer::new(width);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("replay_until_target", |b| {
        b.iter(|| black_box(replayer.run(Cursor::new(text.as_bytes()), &target)))
    });
    group.bench_function("final_majority", |b| {
        b.iter(|| black_box(replayer.final_majority(Cursor::new(text.as_bytes()))))
    });

    group.finish();
}

criterion_group!(benches, bench_update_and_check, bench_replay);
criterion_main!(benches);
