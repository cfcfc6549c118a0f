// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iterative point relaxation: push overlapping discs apart until none overlap.

use kurbo::{Point, Rect, Vec2};
use log::{debug, trace};
use rosette_index::types::direction;
use rosette_index::{PointKdTree, SpatialQuery};

/// Settings for [`relax_points`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelaxParams {
    /// Radius of the disc around each point. Two points overlap when closer than twice this.
    pub radius: f64,
    /// Stop after this many passes. `None` runs until no pair overlaps.
    pub max_iterations: Option<usize>,
    /// Overlaps at or below this depth are ignored.
    pub min_overlap: f64,
}

impl RelaxParams {
    /// Default for [`min_overlap`](Self::min_overlap).
    pub const DEFAULT_MIN_OVERLAP: f64 = 0.001;

    /// Unbounded relaxation with the given disc radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            max_iterations: None,
            min_overlap: Self::DEFAULT_MIN_OVERLAP,
        }
    }

    /// Cap the number of passes.
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set the overlap tolerance.
    pub fn min_overlap(mut self, min_overlap: f64) -> Self {
        self.min_overlap = min_overlap;
        self
    }
}

/// Move `points` apart in place and return the number of passes that moved anything.
///
/// Every pass rebuilds a [`PointKdTree`] from the current positions, computes each
/// point's displacement from the old positions only, then applies them together.
/// A point overlapping `n` neighbors moves by the mean of `n` pushes, each half the
/// overlap depth and directed away from that neighbor. Coincident points separate
/// along the x axis, the lower index toward negative x.
pub fn relax_points(points: &mut [Point], params: &RelaxParams) -> usize {
    let reach = 4.0 * params.radius;
    let mut deltas = vec![Vec2::ZERO; points.len()];
    let mut iterations = 0;

    while params.max_iterations.is_none_or(|cap| iterations < cap) {
        let tree = PointKdTree::from_points(points.iter().copied().zip(0_usize..));
        let mut moving = 0_usize;

        for (i, p) in points.iter().enumerate() {
            let window = Rect::new(p.x - reach, p.y - reach, p.x + reach, p.y + reach);
            let mut push = Vec2::ZERO;
            let mut overlapping = 0_u32;
            for &j in tree.query_range(window) {
                if j == i {
                    continue;
                }
                let q = points[j];
                let overlap = 2.0 * params.radius - p.distance(q);
                if overlap > params.min_overlap {
                    let away = direction(q, *p).unwrap_or(if i < j {
                        Vec2::new(-1.0, 0.0)
                    } else {
                        Vec2::new(1.0, 0.0)
                    });
                    push += away * (overlap / 2.0);
                    overlapping += 1;
                }
            }
            if overlapping > 0 {
                deltas[i] = push / f64::from(overlapping);
                moving += 1;
            }
        }

        if moving == 0 {
            break;
        }
        for (p, d) in points.iter_mut().zip(deltas.iter_mut()) {
            *p += *d;
            *d = Vec2::ZERO;
        }
        iterations += 1;
        trace!("relaxation pass {iterations}: {moving} points moved");
    }

    debug!(
        "relaxed {} points in {iterations} passes (cap {:?})",
        points.len(),
        params.max_iterations
    );
    iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn total_overlap(points: &[Point], radius: f64) -> f64 {
        let mut total = 0.0;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                total += (2.0 * radius - a.distance(*b)).max(0.0);
            }
        }
        total
    }

    #[test]
    fn coincident_pair_separates_then_rests() {
        let mut pts = [Point::ZERO, Point::ZERO];
        let params = RelaxParams::new(1.0).max_iterations(10);
        let passes = relax_points(&mut pts, &params);
        assert_eq!(passes, 1);
        assert_eq!(pts, [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(pts[0].distance(pts[1]) >= 2.0);
        // Fixed point: nothing left to do.
        assert_eq!(relax_points(&mut pts, &params), 0);
        assert_eq!(pts, [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)]);
    }

    #[test]
    fn separated_points_do_not_move() {
        let mut pts = [Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(0.0, 5.0)];
        let before = pts;
        assert_eq!(relax_points(&mut pts, &RelaxParams::new(1.0)), 0);
        assert_eq!(pts, before);
    }

    #[test]
    fn shallow_overlap_is_tolerated() {
        let mut pts = [Point::new(0.0, 0.0), Point::new(1.9995, 0.0)];
        assert_eq!(relax_points(&mut pts, &RelaxParams::new(1.0)), 0);
        let strict = RelaxParams::new(1.0).min_overlap(0.0).max_iterations(1);
        assert_eq!(relax_points(&mut pts, &strict), 1);
        assert!(pts[0].distance(pts[1]) > 1.9999);
    }

    #[test]
    fn updates_are_simultaneous() {
        let mut forward = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let mut backward = [Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
        relax_points(&mut forward, &RelaxParams::new(1.0).max_iterations(1));
        relax_points(&mut backward, &RelaxParams::new(1.0).max_iterations(1));
        assert_eq!(forward, [Point::new(-0.5, 0.0), Point::new(1.5, 0.0)]);
        assert_eq!(backward, [forward[1], forward[0]]);
    }

    #[test]
    fn iteration_cap_is_honored() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut pts: Vec<Point> = (0..60)
            .map(|_| Point::new(rng.random_range(0.0..5.0), rng.random_range(0.0..5.0)))
            .collect();
        let passes = relax_points(&mut pts, &RelaxParams::new(1.0).max_iterations(3));
        assert_eq!(passes, 3);
        assert_eq!(pts.len(), 60);
        assert_eq!(relax_points(&mut pts, &RelaxParams::new(1.0).max_iterations(0)), 0);
    }

    #[test]
    fn dense_cluster_spreads_out() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut pts: Vec<Point> = (0..40)
            .map(|_| Point::new(rng.random_range(0.0..8.0), rng.random_range(0.0..8.0)))
            .collect();
        let before = total_overlap(&pts, 1.0);
        relax_points(&mut pts, &RelaxParams::new(1.0).max_iterations(50));
        let after = total_overlap(&pts, 1.0);
        assert!(after < before * 0.5, "overlap {before} -> {after}");
    }
}
