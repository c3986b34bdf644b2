//! Order-statistics tree benchmarks (`put`, `select`, `rank`, `delete`).
//!
//! Shuffled key orders give logarithmic height; ascending and zig-zag orders
//! show the cost of the unbalanced worst case, so those run on the small tier
//! only.
#![allow(clippy::expect_used)]

use algokit_bench::{KeyOrder, SizeTier, generate_keys};
use algokit_core::Bst;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

fn build(keys: &[i64]) -> Bst<i64, i64> {
    keys.iter().map(|&k| (k, k)).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (name, tier) in [("S", SizeTier::Small), ("M", SizeTier::Medium)] {
        let keys = generate_keys(&tier.config(42));
        group.bench_function(BenchmarkId::new("shuffled", name), |b| {
            b.iter(|| build(&keys).len());
        });
    }

    for order in [KeyOrder::Ascending, KeyOrder::ZigZag] {
        let mut config = SizeTier::Small.config(42);
        config.key_order = order;
        let keys = generate_keys(&config);
        group.bench_function(BenchmarkId::new(format!("{order:?}"), "S"), |b| {
            b.iter(|| build(&keys).len());
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for (name, tier) in [("S", SizeTier::Small), ("M", SizeTier::Medium)] {
        let keys = generate_keys(&tier.config(42));
        let table = build(&keys);
        let len = table.len();

        group.bench_function(BenchmarkId::new("select_all", name), |b| {
            b.iter(|| {
                (0..len)
                    .map(|r| *table.select(r).expect("valid rank"))
                    .sum::<i64>()
            });
        });

        group.bench_function(BenchmarkId::new("rank_all", name), |b| {
            b.iter(|| keys.iter().map(|k| table.rank(k)).sum::<usize>());
        });

        group.bench_function(BenchmarkId::new("floor_ceiling", name), |b| {
            b.iter(|| {
                keys.iter()
                    .filter(|&&k| table.floor(&k).is_ok() && table.ceiling(&k).is_ok())
                    .count()
            });
        });
    }

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");

    for (name, tier) in [("S", SizeTier::Small), ("M", SizeTier::Medium)] {
        let keys = generate_keys(&tier.config(42));
        let order = generate_keys(&tier.config(7));
        let base = build(&keys);

        group.bench_function(BenchmarkId::new("drain_random", name), |b| {
            b.iter_batched(
                || base.clone(),
                |mut table| {
                    for k in &order {
                        table.delete(k);
                    }
                    table.is_empty()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_delete);
criterion_main!(benches);
