// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rosette Index: point-keyed 2D spatial indexes.
//!
//! Rosette Index is the retrieval layer under circle packing and point relaxation.
//!
//! - Store payloads keyed by a [`kurbo::Point`]; several payloads may share a point.
//! - Query every payload whose point lies in a [`kurbo::Rect`] (half-open, as [`Rect::contains`](kurbo::Rect::contains)).
//! - Mutable indexes ([`TileGrid`], [`QuadTree`]) support insert/remove over a fixed domain.
//! - Build-once k-d trees ([`BalancedKdTree`], [`PointKdTree`]) are constructed from a snapshot.
//!
//! The read side is the [`SpatialQuery`] trait and the write side is [`SpatialIndex`].
//! The k-d trees only implement [`SpatialQuery`], so mutating one does not compile:
//! rebuild it instead.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use rosette_index::{SpatialIndex, SpatialQuery, TileGrid};
//!
//! let mut grid = TileGrid::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, 10.0);
//! assert!(grid.insert(Point::new(25.0, 25.0), 1_u32));
//! assert!(grid.insert(Point::new(75.0, 25.0), 2));
//! // Outside the domain: a silent miss.
//! assert!(!grid.insert(Point::new(175.0, 25.0), 3));
//!
//! let hits: Vec<_> = grid.query_range(Rect::new(0.0, 0.0, 50.0, 50.0)).collect();
//! assert_eq!(hits, [&1]);
//!
//! assert!(grid.remove(Point::new(25.0, 25.0), &1));
//! assert_eq!(grid.len(), 1);
//! ```
//!
//! Static trees are built in one go:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use rosette_index::{BalancedKdTree, SpatialQuery};
//!
//! let tree = BalancedKdTree::from_points([
//!     (Point::new(0.0, 0.0), "a"),
//!     (Point::new(0.0, 0.0), "b"),
//!     (Point::new(5.0, 1.0), "c"),
//! ]);
//! assert_eq!(tree.find(Point::ZERO), &["a", "b"]);
//! assert_eq!(tree.nearest_neighbor(Point::new(4.0, 1.0)).unwrap().values, &["c"]);
//! assert_eq!(tree.query_range(Rect::new(-1.0, -1.0, 1.0, 1.0)).count(), 2);
//! ```
//!
//! ## Choosing an index
//!
//! - `TileGrid`: uniform buckets; O(1) insert/remove. Pick a tile size near the typical
//!   query radius. Tiles are anchored at the origin and the domain may be negative.
//! - `QuadTree`: adapts to clustered points; no tile size to tune.
//! - `BalancedKdTree`: static; leaves of up to 8 keys; range and nearest-neighbor queries.
//! - `PointKdTree`: static; one key per leaf; cheap enough to rebuild every frame.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in coordinates. K-d tree keys are rounded to 1/1000, ties
//! to even, so `find` and range tests on those trees see the rounded coordinates.

#![no_std]

extern crate alloc;

pub mod backends;
pub mod index;
pub mod types;

pub use backends::grid::TileGrid;
pub use backends::kdtree::{BalancedKdTree, KdTree, Neighbor, PointKdTree};
pub use backends::quadtree::QuadTree;
pub use index::{SpatialIndex, SpatialQuery};
pub use types::Axis;
