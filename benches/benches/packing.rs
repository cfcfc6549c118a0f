// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rosette_index::QuadTree;
use rosette_pack::{CirclePacker, PackParams, RadiusPolicy, RelaxParams, relax_points};

fn params(wrap: bool, policy: RadiusPolicy) -> PackParams {
    PackParams::builder(Rect::new(0.0, 0.0, 800.0, 600.0))
        .radius(2.0, 40.0)
        .padding(1.0)
        .wrap(wrap)
        .radius_policy(policy)
        .circle_limit(500)
        .max_attempts(1_000_000)
        .build()
        .unwrap()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    group.sample_size(10);
    for (name, wrap, policy) in [
        ("maximal", false, RadiusPolicy::Maximal),
        ("maximal_wrap", true, RadiusPolicy::Maximal),
        ("decaying", false, RadiusPolicy::decaying()),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || CirclePacker::new(params(wrap, policy)),
                |mut packer| {
                    let summary = packer.pack(&mut StdRng::seed_from_u64(42));
                    black_box(summary);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.bench_function("maximal_quadtree", |b| {
        b.iter_batched(
            || {
                let params = params(false, RadiusPolicy::Maximal);
                let index = QuadTree::new(params.bounds().inflate(40.0, 40.0));
                CirclePacker::with_index(params, index)
            },
            |mut packer| {
                let summary = packer.pack(&mut StdRng::seed_from_u64(42));
                black_box(summary);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_relax(c: &mut Criterion) {
    let mut group = c.benchmark_group("relax");
    group.sample_size(10);
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Point> = (0..2_000)
        .map(|_| Point::new(rng.random_range(0.0..200.0), rng.random_range(0.0..200.0)))
        .collect();
    group.bench_function("n2000_20_passes", |b| {
        b.iter_batched(
            || points.clone(),
            |mut pts| {
                let passes = relax_points(&mut pts, &RelaxParams::new(2.0).max_iterations(20));
                black_box(passes);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_pack, bench_relax);
criterion_main!(benches);
