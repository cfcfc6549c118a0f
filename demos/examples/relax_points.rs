// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point relaxation.
//!
//! Scatter points in a small square, relax them, then size circles around the result.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p rosette_demos --example relax_points`

use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rosette_pack::{RelaxParams, circles_from_points, relax_points};

fn min_spacing(points: &[Point]) -> f64 {
    let mut best = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            best = best.min(a.distance(*b));
        }
    }
    best
}

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(11);
    let mut points: Vec<Point> = (0..200)
        .map(|_| Point::new(rng.random_range(0.0..40.0), rng.random_range(0.0..40.0)))
        .collect();
    println!("before: min spacing {:.3}", min_spacing(&points));

    let params = RelaxParams::new(2.0).max_iterations(500);
    let passes = relax_points(&mut points, &params);
    println!("after {passes} passes: min spacing {:.3}", min_spacing(&points));

    let circles = circles_from_points(&points, 4.0, 0.5);
    let mean = circles.iter().map(|c| c.radius).sum::<f64>() / circles.len() as f64;
    println!("{} circles, mean radius {mean:.3}", circles.len());
}
