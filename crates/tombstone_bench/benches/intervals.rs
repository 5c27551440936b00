//! Interval merge and store benchmarks.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use tombstone_bench::utils::{populated_store, random_intervals};
use tombstone_core::{Intervals, TombstoneReader};

/// Benchmark building an interval set from random intervals.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("intervals_merge");

    for count in [16, 256, 4096].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let batch = random_intervals(count, 1_000_000);

            b.iter(|| {
                let set: Intervals = black_box(&batch).iter().copied().collect();
                black_box(set);
            });
        });
    }

    group.finish();
}

/// Benchmark truncating a populated store.
fn bench_truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate_before");

    for series in [100u64, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(series), series, |b, &series| {
            b.iter_batched(
                || populated_store(series, 32),
                |stones| {
                    stones.truncate_before(black_box(1600));
                    black_box(stones.total());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge, bench_truncate);
criterion_main!(benches);
