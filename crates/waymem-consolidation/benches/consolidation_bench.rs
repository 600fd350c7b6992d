//! Criterion benchmarks for bucket merge and proximity clustering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use test_fixtures::{event, fixed_time, waypoint_line};
use waymem_consolidation::{ConsolidationEngine, MergeEngine, ProximityClusterer};
use waymem_core::models::EventRecord;

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for n in [100usize, 1_000, 10_000] {
        let baseline = waypoint_line(n, 40.0);
        let incoming = waypoint_line(n, 24.0);
        let engine = MergeEngine::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| engine.merge_at(black_box(&baseline), black_box(&incoming), fixed_time()))
        });
    }
    group.finish();
}

fn bench_consolidate(c: &mut Criterion) {
    let baseline = test_fixtures::memory_set("bench", waypoint_line(2_000, 40.0));
    let engine = ConsolidationEngine::default();
    c.bench_function("consolidate_2000", |b| {
        b.iter(|| {
            engine.consolidate_at(
                "bench",
                Some(black_box(&baseline)),
                waypoint_line(2_000, 24.0),
                fixed_time(),
            )
        })
    });
}

fn bench_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");
    for n in [50usize, 500] {
        let events: Vec<EventRecord<()>> = (0..n)
            .map(|i| event((i % 25) as f64 * 90.0, (i / 25) as f64 * 90.0, 0.0, i as f64))
            .collect();
        let clusterer = ProximityClusterer::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| clusterer.cluster(black_box(events.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge, bench_consolidate, bench_cluster);
criterion_main!(benches);
