// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform tile grid. Constant-time insert/remove, range queries touch only overlapping tiles.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::index::{SpatialIndex, SpatialQuery};
use crate::types::cell_of;

/// Uniform tile grid over a fixed domain.
///
/// Each entry lives in exactly one bucket keyed by `(floor(x / tile_w), floor(y / tile_h))`,
/// so a point on a tile boundary belongs to the upper tile. Tiles are anchored at the
/// coordinate origin, not at the domain corner.
pub struct TileGrid<P> {
    bounds: Rect,
    tile_w: f64,
    tile_h: f64,
    buckets: BTreeMap<(i64, i64), Vec<(Point, P)>>,
    len: usize,
}

impl<P> TileGrid<P> {
    /// Create an empty grid covering `bounds` with the given tile size.
    ///
    /// Panics if either tile dimension is not strictly positive.
    pub fn new(bounds: Rect, tile_w: f64, tile_h: f64) -> Self {
        assert!(tile_w > 0.0 && tile_h > 0.0, "tile sizes must be positive");
        Self {
            bounds: bounds.abs(),
            tile_w,
            tile_h,
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// The domain this grid accepts points in.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Tile width and height.
    pub fn tile_size(&self) -> (f64, f64) {
        (self.tile_w, self.tile_h)
    }

    fn key_for(&self, p: Point) -> (i64, i64) {
        cell_of(p, self.tile_w, self.tile_h)
    }

    /// Inclusive tile span covering `rect`, clamped to the tiles of the domain.
    fn span_for(&self, rect: Rect) -> Option<((i64, i64), (i64, i64))> {
        let (min_x, min_y) = self.key_for(Point::new(rect.x0, rect.y0));
        let (max_x, max_y) = self.key_for(Point::new(rect.x1, rect.y1));
        let (dom_min_x, dom_min_y) = self.key_for(Point::new(self.bounds.x0, self.bounds.y0));
        let (dom_max_x, dom_max_y) = self.key_for(Point::new(self.bounds.x1, self.bounds.y1));
        let lo = (min_x.max(dom_min_x), min_y.max(dom_min_y));
        let hi = (max_x.min(dom_max_x), max_y.min(dom_max_y));
        (lo.0 <= hi.0 && lo.1 <= hi.1).then_some((lo, hi))
    }
}

impl<P> SpatialQuery<P> for TileGrid<P> {
    fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        self.buckets
            .get(&self.key_for(point))
            .is_some_and(|bucket| bucket.iter().any(|(p, _)| *p == point))
    }

    fn query_range<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = &'a P> + 'a>
    where
        P: 'a,
    {
        let mut out = Vec::new();
        if let Some((lo, hi)) = self.span_for(rect) {
            for y in lo.1..=hi.1 {
                for x in lo.0..=hi.0 {
                    if let Some(bucket) = self.buckets.get(&(x, y)) {
                        out.extend(
                            bucket
                                .iter()
                                .filter(|(p, _)| rect.contains(*p))
                                .map(|(_, item)| item),
                        );
                    }
                }
            }
        }
        Box::new(out.into_iter())
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<P: PartialEq> SpatialIndex<P> for TileGrid<P> {
    fn insert(&mut self, point: Point, item: P) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let key = self.key_for(point);
        self.buckets.entry(key).or_default().push((point, item));
        self.len += 1;
        true
    }

    fn remove(&mut self, point: Point, item: &P) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let key = self.key_for(point);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|(p, v)| *p == point && v == item) else {
            return false;
        };
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        true
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

impl<P> Debug for TileGrid<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileGrid")
            .field("bounds", &self.bounds)
            .field("tile_w", &self.tile_w)
            .field("tile_h", &self.tile_h)
            .field("occupied_tiles", &self.buckets.len())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sorted(it: impl Iterator<Item = u32>) -> Vec<u32> {
        let mut v: Vec<_> = it.collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn insert_query_remove() {
        let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, 10.0);
        assert!(grid.is_empty());
        assert!(grid.insert(Point::new(25.0, 25.0), 1_u32));
        assert!(grid.insert(Point::new(75.0, 25.0), 2));
        assert_eq!(grid.len(), 2);
        assert!(grid.is_not_empty());

        let all = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(sorted(grid.query_range(all).copied()), vec![1, 2]);
        assert_eq!(
            sorted(grid.query_range(Rect::new(0.0, 0.0, 50.0, 100.0)).copied()),
            vec![1]
        );
        assert_eq!(grid.query_range(Rect::new(50.0, 50.0, 150.0, 100.0)).count(), 0);

        assert!(!grid.remove(Point::new(25.0, 25.0), &3));
        assert!(grid.remove(Point::new(25.0, 25.0), &1));
        assert_eq!(sorted(grid.query_range(all).copied()), vec![2]);
        assert!(grid.remove(Point::new(75.0, 25.0), &2));
        assert!(grid.is_empty());
    }

    #[test]
    fn out_of_domain_is_a_silent_miss() {
        let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, 10.0);
        assert!(!grid.insert(Point::new(175.0, -25.0), 3_u32));
        assert!(!grid.remove(Point::new(175.0, -25.0), &3));
        assert!(!grid.contains(Point::new(175.0, -25.0)));
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn boundary_points_belong_to_upper_tile() {
        let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, 10.0);
        grid.insert(Point::new(10.0, 5.0), 1_u32);
        grid.insert(Point::new(9.5, 5.0), 2);
        // The query's left edge sits exactly on the boundary between tiles 0 and 1.
        let hits = sorted(grid.query_range(Rect::new(10.0, 0.0, 15.0, 10.0)).copied());
        assert_eq!(hits, vec![1]);
        let hits = sorted(grid.query_range(Rect::new(9.0, 0.0, 10.0, 10.0)).copied());
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn partial_tile_overlap_still_matches() {
        let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 100.0, 100.0), 25.0, 25.0);
        grid.insert(Point::new(49.0, 49.0), 7_u32);
        let hits: Vec<_> = grid
            .query_range(Rect::new(48.0, 48.0, 60.0, 60.0))
            .copied()
            .collect();
        assert_eq!(hits, vec![7]);
    }

    #[test]
    fn duplicate_points_and_payloads() {
        let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0, 1.0);
        let p = Point::new(3.0, 3.0);
        assert!(grid.insert(p, 'a'));
        assert!(grid.insert(p, 'a'));
        assert!(grid.insert(p, 'b'));
        assert!(grid.contains(p));
        assert!(!grid.contains(Point::new(3.5, 3.5)));
        assert_eq!(grid.query_range(Rect::new(0.0, 0.0, 10.0, 10.0)).count(), 3);
        assert!(grid.remove(p, &'a'));
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.query_range(Rect::new(0.0, 0.0, 10.0, 10.0)).count(), 2);
        grid.clear();
        assert!(grid.is_empty());
        assert!(!grid.contains(p));
    }

    #[test]
    fn negative_domain_coordinates() {
        let mut grid = TileGrid::new(Rect::new(-50.0, -50.0, 50.0, 50.0), 8.0, 8.0);
        assert!(grid.insert(Point::new(-49.0, -1.0), 1_u32));
        assert!(grid.insert(Point::new(0.0, 0.0), 2));
        let hits = sorted(grid.query_range(Rect::new(-50.0, -8.0, 0.5, 0.5)).copied());
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "tile sizes must be positive")]
    fn zero_tile_size_panics() {
        let _ = TileGrid::<u32>::new(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, 1.0);
    }
}
