//! Brute-force vs k-d tree query benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdspace_core::{KdTree, Point, PointIndex, PointSet, Rect};

fn generate_points(count: usize) -> Vec<Point> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .filter_map(|_| Point::new(next(), next()).ok())
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [1_000, 10_000] {
        let points = generate_points(size);
        group.bench_with_input(BenchmarkId::new("brute", size), &points, |b, points| {
            b.iter(|| black_box(points.iter().copied().collect::<PointSet>()))
        });
        group.bench_with_input(BenchmarkId::new("kdtree", size), &points, |b, points| {
            b.iter(|| black_box(points.iter().copied().collect::<KdTree>()))
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let queries = generate_points(100);
    for size in [1_000, 10_000, 100_000] {
        let points = generate_points(size);
        let brute: PointSet = points.iter().copied().collect();
        let tree: KdTree = points.iter().copied().collect();

        group.bench_function(BenchmarkId::new("brute", size), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(brute.nearest(q));
                }
            })
        });
        group.bench_function(BenchmarkId::new("kdtree", size), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.nearest(q));
                }
            })
        });
    }
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let query = Rect::new(0.25, 0.25, 0.3, 0.3).expect("valid rect");
    for size in [1_000, 10_000, 100_000] {
        let points = generate_points(size);
        let brute: PointSet = points.iter().copied().collect();
        let tree: KdTree = points.iter().copied().collect();

        group.bench_function(BenchmarkId::new("brute", size), |b| {
            b.iter(|| black_box(brute.range(&query)))
        });
        group.bench_function(BenchmarkId::new("kdtree", size), |b| {
            b.iter(|| black_box(tree.range(&query)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_nearest, bench_range);
criterion_main!(benches);
