//! Criterion micro-benchmarks for range queries, coverage selection and
//! the greedy dominating set.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vantage_select::{approximate, select_best_coverage, Strategy};
use vantage_space::{KdTree, ProximityGraph};
use vantage_test_utils::{random_cube_points, random_geo_points};

/// Benchmark: build a k-d tree over 10K points on the globe.
fn bench_kdtree_build_10k(c: &mut Criterion) {
    let points = random_geo_points(10_000, 42);

    c.bench_function("kdtree_build_10k", |b| {
        b.iter(|| black_box(KdTree::build(&points)));
    });
}

/// Benchmark: range query from every one of 10K globe points at 500 km.
fn bench_range_query_10k(c: &mut Criterion) {
    let points = random_geo_points(10_000, 42);
    let tree = KdTree::build(&points);

    c.bench_function("range_query_10k_r500", |b| {
        b.iter(|| {
            for p in &points {
                black_box(tree.range_query(p, 500.0).unwrap());
            }
        });
    });
}

/// Benchmark: brute-force vs indexed coverage at increasing set sizes.
fn bench_coverage_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage");
    for n in [100usize, 1_000, 4_000] {
        let points = random_cube_points(n, 100.0, 7);
        for strategy in [Strategy::BruteForce, Strategy::IndexAccelerated] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), n),
                &points,
                |b, points| {
                    b.iter(|| black_box(select_best_coverage(points, 10.0, strategy).unwrap()));
                },
            );
        }
    }
    group.finish();
}

/// Benchmark: grid search over a 20-unit cube at step 1.0 (9261 candidates).
fn bench_grid_search(c: &mut Criterion) {
    let points = random_cube_points(200, 10.0, 3);

    c.bench_function("grid_search_200_step1", |b| {
        b.iter(|| {
            black_box(
                select_best_coverage(&points, 3.0, Strategy::GridSearch { step: 1.0 }).unwrap(),
            )
        });
    });
}

/// Benchmark: greedy dominating set over a dense 2K-node graph.
fn bench_dominating_set_2k(c: &mut Criterion) {
    let points = random_cube_points(2_000, 50.0, 11);
    let graph = ProximityGraph::build(&points, 8.0).unwrap();

    c.bench_function("dominating_set_2k_r8", |b| {
        b.iter(|| black_box(approximate(&graph)));
    });
}

criterion_group!(
    benches,
    bench_kdtree_build_10k,
    bench_range_query_10k,
    bench_coverage_strategies,
    bench_grid_search,
    bench_dominating_set_2k
);
criterion_main!(benches);
