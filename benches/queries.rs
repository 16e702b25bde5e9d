//! Performance benchmarks for DAG construction and order queries.
//!
//! Run with: `cargo bench --bench queries`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Subset DAG, 256 sets | <50ms | Quadratic comparison plus reduction |
//! | Upset / downset | <100µs | Single DFS |
//! | Cached condensation | <10µs | LRU hit, fingerprint dominates |
//! | Cache contention | Linear scaling | Multi-threaded access |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use poset_kernel::{
    boolean_dag, downset, height, join, subset_dag, upset, CacheConfig, Condensation,
    CondensationCache, Dag,
};

/// Deterministic family of `count` sets over a universe of 12 items.
fn make_family(count: u32) -> Vec<BTreeSet<u32>> {
    (0..count)
        .map(|i| {
            let mask = i.wrapping_mul(2_654_435_761) >> 20;
            (0..12).filter(|bit| (mask >> bit) & 1 == 1).collect()
        })
        .collect()
}

fn make_boolean(n: u32) -> Dag<BTreeSet<u32>> {
    let universe: BTreeSet<u32> = (0..n).collect();
    boolean_dag(&universe).unwrap()
}

/// Benchmark subset DAG construction.
fn bench_subset_dag(c: &mut Criterion) {
    let mut group = c.benchmark_group("subset_dag");

    for count in [16, 64, 256] {
        let family = make_family(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("sets", count), &family, |b, family| {
            b.iter(|| subset_dag(black_box(family)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark reachability queries on boolean lattices.
fn bench_order_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_queries");

    for n in [4, 6, 8] {
        let dag = make_boolean(n);
        let middle: BTreeSet<u32> = (0..n / 2).collect();
        let left: BTreeSet<u32> = [0].into_iter().collect();
        let right: BTreeSet<u32> = [n - 1].into_iter().collect();

        group.bench_with_input(BenchmarkId::new("upset", n), &dag, |b, dag| {
            b.iter(|| upset(dag, black_box(&middle)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("downset", n), &dag, |b, dag| {
            b.iter(|| downset(dag, black_box(&middle)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("join", n), &dag, |b, dag| {
            b.iter(|| join(dag, black_box(&left), black_box(&right)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("height", n), &dag, |b, dag| {
            b.iter(|| height(black_box(dag)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark condensation built from scratch.
fn bench_cold_condensation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_condensation");

    for n in [4, 6, 8] {
        let dag = make_boolean(n);

        group.throughput(Throughput::Elements(dag.node_count() as u64));
        group.bench_with_input(BenchmarkId::new("boolean", n), &dag, |b, dag| {
            b.iter(|| Condensation::build(black_box(dag)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark condensation served from the cache.
fn bench_cached_condensation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_condensation");

    for n in [4, 6, 8] {
        let dag = make_boolean(n);
        let cache = CondensationCache::new(CacheConfig::default());

        // Warm the cache
        let warmup = cache.get_or_build(&dag).unwrap();
        assert!(!warmup.cache_hit);

        group.bench_with_input(BenchmarkId::new("boolean", n), &dag, |b, dag| {
            b.iter(|| {
                let result = cache.get_or_build(black_box(dag)).unwrap();
                assert!(result.cache_hit);
                result
            })
        });
    }

    group.finish();
}

/// Benchmark multi-threaded cache access.
fn bench_cache_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_contention");

    for num_threads in [1, 2, 4, 8] {
        let cache = Arc::new(CondensationCache::new(CacheConfig {
            max_entries: 64,
            enabled: true,
        }));
        let dags: Vec<_> = (0..num_threads)
            .map(|i| Arc::new(subset_dag(&make_family(32 + i)).unwrap()))
            .collect();

        for dag in &dags {
            cache.get_or_build(dag).unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("threads", num_threads),
            &num_threads,
            |b, _| {
                b.iter(|| {
                    let handles: Vec<_> = dags
                        .iter()
                        .map(|dag| {
                            let cache = Arc::clone(&cache);
                            let dag = Arc::clone(dag);
                            thread::spawn(move || {
                                for _ in 0..100 {
                                    let result = cache.get_or_build(&dag).unwrap();
                                    black_box(result);
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_subset_dag,
    bench_order_queries,
    bench_cold_condensation,
    bench_cached_condensation,
    bench_cache_contention,
);

criterion_main!(benches);
