// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index basics.
//!
//! Fill a tile grid and a quadtree with the same points, query a window, then build
//! a k-d tree from the survivors and ask for a nearest neighbor.
//!
//! Run:
//! - `cargo run -p rosette_demos --example index_basics`

use kurbo::{Point, Rect};
use rosette_index::{BalancedKdTree, QuadTree, SpatialIndex, SpatialQuery, TileGrid};

fn main() {
    let domain = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut grid = TileGrid::new(domain, 10.0, 10.0);
    let mut quad = QuadTree::new(domain);

    let points = [
        ("a", Point::new(12.0, 12.0)),
        ("b", Point::new(18.0, 14.0)),
        ("c", Point::new(55.0, 40.0)),
        ("d", Point::new(90.0, 90.0)),
        ("e", Point::new(150.0, 10.0)),
    ];
    for (name, p) in points {
        let in_grid = grid.insert(p, name);
        let in_quad = quad.insert(p, name);
        println!("insert {name} at {p:?}: grid {in_grid}, quadtree {in_quad}");
    }

    let window = Rect::new(0.0, 0.0, 60.0, 60.0);
    let mut from_grid: Vec<_> = grid.query_range(window).copied().collect();
    let mut from_quad: Vec<_> = quad.query_range(window).copied().collect();
    from_grid.sort_unstable();
    from_quad.sort_unstable();
    println!("window {window:?}: {from_grid:?}");
    assert_eq!(from_grid, from_quad, "both mutable indexes see the same window");

    grid.remove(Point::new(18.0, 14.0), &"b");
    println!("after removing b: {} entries", grid.len());

    let tree = BalancedKdTree::from_points(points.iter().copied().map(|(n, p)| (p, n)));
    if let Some(nn) = tree.nearest_neighbor(Point::new(50.0, 50.0)) {
        println!("nearest to (50, 50): {:?} at distance {:.2}", nn.values, nn.distance);
    }
}
