// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index implementations.
//!
//! - `grid`: uniform tile grid over a fixed domain; mutable.
//! - `quadtree`: region quadtree over a fixed domain; mutable.
//! - `kdtree`: build-once k-d trees (`BalancedKdTree`, `PointKdTree`); read-only.
//!
//! Split note
//! ----------
//! The k-d trees do not split at the true median. For a node whose keys sorted along
//! the chosen axis are `v[0] ..= v[n-1]` the split value is
//!
//! `(v[0] + v[n / 2] + v[n - 1]) / 3`
//!
//! which pulls the split toward an outlying extreme. Keys `< split` go left, the rest right.

pub mod grid;
pub mod kdtree;
pub mod quadtree;

pub use grid::TileGrid;
pub use kdtree::{BalancedKdTree, KdTree, Neighbor, PointKdTree};
pub use quadtree::QuadTree;
