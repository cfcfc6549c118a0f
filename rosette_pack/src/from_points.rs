// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy circle sizing for a fixed set of centers.

use kurbo::{Circle, Point, Rect};
use rosette_index::{PointKdTree, SpatialQuery};

/// Share of `max_radius` given to a point with no neighbor within reach.
const ISOLATED_SHARE: f64 = 0.7;

/// Give every point the largest radius that keeps it clear of the circles sized so far.
///
/// Points are sized in order. Every radius starts at `min_radius`, so a point only
/// yields to later points by that much. A point's radius is the distance to the
/// nearest other circle's edge, found within a square of side `4 * max_radius`;
/// points with no neighbor there get `0.7 * max_radius`. Results are clamped to
/// `[0, max_radius]`.
pub fn circles_from_points(points: &[Point], max_radius: f64, min_radius: f64) -> Vec<Circle> {
    if points.is_empty() {
        return Vec::new();
    }
    let upper = max_radius.max(0.0);
    let tree = PointKdTree::from_points(points.iter().copied().zip(0_usize..));
    let mut radii = vec![min_radius; points.len()];
    let side = 4.0 * max_radius;

    for (i, p) in points.iter().enumerate() {
        let window = Rect::from_center_size(*p, (side, side));
        let room = tree
            .query_range(window)
            .filter(|&&j| j != i)
            .map(|&j| p.distance(points[j]) - radii[j])
            .min_by(f64::total_cmp)
            .unwrap_or(ISOLATED_SHARE * max_radius);
        radii[i] = room.clamp(0.0, upper);
    }

    points
        .iter()
        .zip(radii)
        .map(|(p, r)| Circle::new(*p, r))
        .collect()
}
