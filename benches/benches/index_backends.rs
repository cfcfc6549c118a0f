// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rosette_index::{BalancedKdTree, PointKdTree, QuadTree, SpatialIndex, SpatialQuery, TileGrid};

const DOMAIN: Rect = Rect::new(0.0, 0.0, 2000.0, 2000.0);

fn gen_uniform_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.random_range(0.0..2000.0), rng.random_range(0.0..2000.0)))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let c = Point::new(rng.random_range(100.0..1900.0), rng.random_range(100.0..1900.0));
        for _ in 0..per_cluster {
            let dx = rng.random_range(-0.5..0.5) * spread;
            let dy = rng.random_range(-0.5..0.5) * spread;
            out.push(c + Vec2::new(dx, dy));
        }
    }
    out
}

fn query_windows(count: usize, size: f64) -> Vec<Rect> {
    gen_uniform_points(count, 0xFACE_FEED_CAFE_BABE)
        .into_iter()
        .map(|c| Rect::from_center_size(c, (size, size)))
        .collect()
}

fn bench_mutable<I, F>(c: &mut Criterion, name: &str, make: F)
where
    I: SpatialIndex<u32>,
    F: Fn() -> I + Copy,
{
    let mut group = c.benchmark_group(name);
    for &n in &[1_000_usize, 10_000] {
        let points = gen_uniform_points(n, 0xCAFE_F00D_DEAD_BEEF);
        let windows = query_windows(64, 60.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_query_n{n}"), |b| {
            b.iter_batched(
                make,
                |mut idx| {
                    for (i, p) in points.iter().enumerate() {
                        let _ = idx.insert(*p, i as u32);
                    }
                    let hits: usize = windows.iter().map(|w| idx.query_range(*w).count()).sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("insert_remove_n{n}"), |b| {
            b.iter_batched(
                make,
                |mut idx| {
                    for (i, p) in points.iter().enumerate() {
                        let _ = idx.insert(*p, i as u32);
                    }
                    for (i, p) in points.iter().enumerate().step_by(2) {
                        let _ = idx.remove(*p, &(i as u32));
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    let points = gen_clustered_points(16, 500, 80.0);
    let windows = query_windows(64, 60.0);
    group.bench_function("insert_query_clustered", |b| {
        b.iter_batched(
            make,
            |mut idx| {
                for (i, p) in points.iter().enumerate() {
                    let _ = idx.insert(*p, i as u32);
                }
                let hits: usize = windows.iter().map(|w| idx.query_range(*w).count()).sum();
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    bench_mutable(c, "tile_grid", || TileGrid::new(DOMAIN, 32.0, 32.0));
}

fn bench_quadtree(c: &mut Criterion) {
    bench_mutable(c, "quadtree", || QuadTree::new(DOMAIN));
}

fn bench_kdtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree");
    for &n in &[1_000_usize, 10_000] {
        let points = gen_uniform_points(n, 0xBADC_F00D_1234_5678);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("build_balanced_n{n}"), |b| {
            b.iter(|| {
                let tree = BalancedKdTree::from_points(points.iter().copied().zip(0_u32..));
                black_box(tree.len());
            });
        });
        group.bench_function(format!("build_point_n{n}"), |b| {
            b.iter(|| {
                let tree = PointKdTree::from_points(points.iter().copied().zip(0_u32..));
                black_box(tree.len());
            });
        });

        let balanced = BalancedKdTree::from_points(points.iter().copied().zip(0_u32..));
        let windows = query_windows(64, 60.0);
        group.bench_function(format!("query_balanced_n{n}"), |b| {
            b.iter(|| {
                let hits: usize = windows.iter().map(|w| balanced.query_range(*w).count()).sum();
                black_box(hits);
            });
        });
        let probes = gen_uniform_points(256, 0x1234_5678_9ABC_DEF0);
        group.bench_function(format!("nearest_balanced_n{n}"), |b| {
            b.iter(|| {
                let total: f64 = probes
                    .iter()
                    .filter_map(|p| balanced.nearest_neighbor(*p))
                    .map(|nn| nn.distance)
                    .sum();
                black_box(total);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_quadtree, bench_kdtree);
criterion_main!(benches);
