// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small geometry helpers shared by the backends.

use core::cmp::Ordering;

use kurbo::{Point, Vec2};

/// Coordinate axis used by k-d tree splits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// The coordinate of `p` along this axis.
    #[inline]
    pub fn of(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

/// Precision used when grouping k-d tree keys: coordinates are rounded to 1/1000.
pub const KEY_PRECISION: f64 = 1000.0;

/// Round a point to [`KEY_PRECISION`] so near-identical coordinates share a key.
///
/// Halfway cases round to the even neighbor, so `0.0625` keys as `0.062`.
#[inline]
pub fn round_key(p: Point) -> Point {
    Point::new(
        round_ties_even(p.x * KEY_PRECISION) / KEY_PRECISION,
        round_ties_even(p.y * KEY_PRECISION) / KEY_PRECISION,
    )
}

/// Round to the nearest integer, ties to even.
///
/// Adding and subtracting 2^52 leaves no fractional bits, so the FPU's
/// round-to-nearest-even mode does the work. Larger magnitudes are already integral.
#[inline]
fn round_ties_even(v: f64) -> f64 {
    const SHIFT: f64 = 4_503_599_627_370_496.0;
    if v >= SHIFT || v <= -SHIFT {
        v
    } else if v >= 0.0 {
        (v + SHIFT) - SHIFT
    } else {
        (v - SHIFT) + SHIFT
    }
}

/// Floor a point component-wise after scaling by the cell size and convert to cell indices.
#[inline]
pub(crate) fn cell_of(p: Point, cell_w: f64, cell_h: f64) -> (i64, i64) {
    let f = Point::new(p.x / cell_w, p.y / cell_h).floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell indices outside i64 are saturated; such grids are unusable anyway."
    )]
    (f.x as i64, f.y as i64)
}

/// Lexicographic (x, then y) total order on points.
pub(crate) fn cmp_xy(a: Point, b: Point) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Distance from `p` to the axis-aligned line `axis = value`.
#[inline]
pub(crate) fn plane_distance(axis: Axis, value: f64, p: Point) -> f64 {
    let c = axis.of(p);
    if c < value { value - c } else { c - value }
}

/// Unit vector pointing from `from` to `to`, or `None` if the points coincide.
#[inline]
pub fn direction(from: Point, to: Point) -> Option<Vec2> {
    let d = to - from;
    let len = d.hypot();
    (len > 0.0).then(|| d / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_key_groups_sub_millimeter_noise() {
        let a = round_key(Point::new(-48.557_443_410_882_3, 79.9));
        let b = round_key(Point::new(-48.557_443_410_882_31, 79.9));
        assert_eq!(a, b);
        assert_eq!(a, Point::new(-48.557, 79.9));
    }

    #[test]
    fn halfway_keys_round_to_even() {
        for (v, r) in [
            (0.5, 0.0),
            (1.5, 2.0),
            (2.5, 2.0),
            (-2.5, -2.0),
            (-3.5, -4.0),
            (2.499, 2.0),
            (2.501, 3.0),
            (-0.7, -1.0),
            (1e17 + 2.0, 1e17 + 2.0),
        ] {
            assert_eq!(round_ties_even(v), r, "{v}");
        }
        // 1/16 and 3/16 scale to exact halves.
        assert_eq!(round_key(Point::new(0.0625, -0.1875)), Point::new(0.062, -0.188));
    }

    #[test]
    fn cell_of_uses_floor_semantics() {
        assert_eq!(cell_of(Point::new(10.0, 0.0), 10.0, 10.0), (1, 0));
        assert_eq!(cell_of(Point::new(9.999, 19.0), 10.0, 10.0), (0, 1));
        assert_eq!(cell_of(Point::new(-0.5, -10.0), 10.0, 10.0), (-1, -1));
    }

    #[test]
    fn plane_distance_is_unsigned() {
        let p = Point::new(3.0, -2.0);
        assert_eq!(plane_distance(Axis::X, 5.0, p), 2.0);
        assert_eq!(plane_distance(Axis::Y, -5.0, p), 3.0);
    }
}
