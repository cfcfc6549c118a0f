// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-once 2D k-d trees over point-keyed payloads.
//!
//! A tree is built from a snapshot and cannot be mutated afterwards; callers rebuild
//! instead. Payloads whose coordinates agree to within [`KEY_PRECISION`] share one
//! entry, which keeps exact duplicates from recursing forever.
//!
//! Split policy: the axis with the larger spread among the node's keys is chosen (ties
//! go to `Y`) and the split value is the mean of the minimum, the rank median, and the
//! maximum along that axis. Keys strictly below the split go left.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::index::SpatialQuery;
use crate::types::{Axis, KEY_PRECISION, cmp_xy, plane_distance, round_key};

/// All payloads stored at one (rounded) coordinate.
#[derive(Clone, Debug)]
pub struct Entry<P> {
    /// Rounded coordinate shared by every payload in `values`.
    pub key: Point,
    /// Payloads in insertion order.
    pub values: Vec<P>,
}

#[derive(Clone, Debug)]
enum Node<P> {
    Empty,
    Leaf(Vec<Entry<P>>),
    Branch {
        axis: Axis,
        split: f64,
        left: Box<Node<P>>,
        right: Box<Node<P>>,
    },
}

/// Result of a nearest-neighbor search.
#[derive(Copy, Clone, Debug)]
pub struct Neighbor<'a, P> {
    /// Rounded coordinate of the nearest entry.
    pub key: Point,
    /// Every payload stored at `key`.
    pub values: &'a [P],
    /// Euclidean distance from the probe to `key`.
    pub distance: f64,
}

/// A static k-d tree whose leaves hold at most `LEAF_CAPACITY` distinct keys.
///
/// Use the [`BalancedKdTree`] and [`PointKdTree`] aliases rather than naming the
/// capacity directly.
#[derive(Clone)]
pub struct KdTree<P, const LEAF_CAPACITY: usize> {
    root: Node<P>,
    len: usize,
}

/// K-d tree with up to 8 keys per leaf. Supports nearest-neighbor search.
pub type BalancedKdTree<P> = KdTree<P, 8>;

/// K-d tree with a single key per leaf, for indexes rebuilt every iteration.
pub type PointKdTree<P> = KdTree<P, 1>;

impl<P, const LEAF_CAPACITY: usize> Default for KdTree<P, LEAF_CAPACITY> {
    fn default() -> Self {
        Self {
            root: Node::Empty,
            len: 0,
        }
    }
}

impl<P, const LEAF_CAPACITY: usize> KdTree<P, LEAF_CAPACITY> {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(point, payload)` pairs.
    pub fn from_points(items: impl IntoIterator<Item = (Point, P)>) -> Self {
        let mut keyed: Vec<(Point, P)> = items
            .into_iter()
            .map(|(p, v)| (round_key(p), v))
            .collect();
        let len = keyed.len();
        // Stable sort keeps payloads at the same key in input order.
        keyed.sort_by(|a, b| cmp_xy(a.0, b.0));

        let mut entries: Vec<Entry<P>> = Vec::new();
        for (key, value) in keyed {
            match entries.last_mut() {
                Some(last) if last.key == key => last.values.push(value),
                _ => entries.push(Entry {
                    key,
                    values: alloc::vec![value],
                }),
            }
        }

        Self {
            root: Self::build(entries),
            len,
        }
    }

    /// Build a tree from payloads, mapping each one to its point.
    pub fn from_items(items: impl IntoIterator<Item = P>, point_of: impl Fn(&P) -> Point) -> Self {
        Self::from_points(items.into_iter().map(|item| (point_of(&item), item)))
    }

    fn build(mut entries: Vec<Entry<P>>) -> Node<P> {
        if entries.is_empty() {
            return Node::Empty;
        }
        if entries.len() <= LEAF_CAPACITY.max(1) {
            return Node::Leaf(entries);
        }

        let (mut min, mut max) = (entries[0].key, entries[0].key);
        for e in &entries[1..] {
            min = Point::new(min.x.min(e.key.x), min.y.min(e.key.y));
            max = Point::new(max.x.max(e.key.x), max.y.max(e.key.y));
        }
        let axis = if max.x - min.x > max.y - min.y {
            Axis::X
        } else {
            Axis::Y
        };

        entries.sort_by(|a, b| axis.of(a.key).total_cmp(&axis.of(b.key)));
        let first = axis.of(entries[0].key);
        let median = axis.of(entries[entries.len() / 2].key);
        let last = axis.of(entries[entries.len() - 1].key);
        let split = (first + median + last) / 3.0;

        let pivot = entries.partition_point(|e| axis.of(e.key) < split);
        if pivot == 0 || pivot == entries.len() {
            // Rounding collapsed the split onto an extreme; splitting again would not progress.
            return Node::Leaf(entries);
        }
        let right = entries.split_off(pivot);
        Node::Branch {
            axis,
            split,
            left: Box::new(Self::build(entries)),
            right: Box::new(Self::build(right)),
        }
    }

    /// Reset to the empty tree.
    pub fn clear(&mut self) {
        self.root = Node::Empty;
        self.len = 0;
    }

    /// Payloads stored at `point`, after rounding it the same way keys were rounded.
    ///
    /// Returns an empty slice if no entry matches exactly.
    pub fn find(&self, point: Point) -> &[P] {
        let probe = round_key(point);
        let mut node = &self.root;
        while let Node::Branch {
            axis,
            split,
            left,
            right,
        } = node
        {
            node = if axis.of(probe) < *split { &**left } else { &**right };
        }
        match node {
            Node::Leaf(entries) => entries
                .iter()
                .find(|e| e.key == probe)
                .map(|e| e.values.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Number of leaves and maximum depth. Useful when tuning leaf capacity.
    pub fn shape(&self) -> (usize, usize) {
        fn walk<P>(node: &Node<P>, depth: usize) -> (usize, usize) {
            match node {
                Node::Empty => (0, depth),
                Node::Leaf(_) => (1, depth),
                Node::Branch { left, right, .. } => {
                    let (l, dl) = walk(&**left, depth + 1);
                    let (r, dr) = walk(&**right, depth + 1);
                    (l + r, dl.max(dr))
                }
            }
        }
        walk(&self.root, 0)
    }

    fn collect_range<'a>(node: &'a Node<P>, rect: Rect, out: &mut Vec<&'a P>) {
        match node {
            Node::Empty => {}
            Node::Leaf(entries) => {
                for e in entries {
                    if rect.contains(e.key) {
                        out.extend(e.values.iter());
                    }
                }
            }
            Node::Branch {
                axis,
                split,
                left,
                right,
            } => {
                let (lo, hi) = match axis {
                    Axis::X => (rect.x0, rect.x1),
                    Axis::Y => (rect.y0, rect.y1),
                };
                if lo < *split {
                    Self::collect_range(left, rect, out);
                }
                if hi >= *split {
                    Self::collect_range(right, rect, out);
                }
            }
        }
    }
}

impl<P> BalancedKdTree<P> {
    /// The entry closest to `point`, or `None` for an empty tree.
    ///
    /// Branch-and-bound: the child containing the probe is searched first and the other
    /// child only when the best distance so far does not beat the distance to the split line.
    pub fn nearest_neighbor(&self, point: Point) -> Option<Neighbor<'_, P>> {
        Self::nearest_in(&self.root, point)
    }

    fn nearest_in(node: &Node<P>, point: Point) -> Option<Neighbor<'_, P>> {
        match node {
            Node::Empty => None,
            Node::Leaf(entries) => entries
                .iter()
                .map(|e| Neighbor {
                    key: e.key,
                    values: e.values.as_slice(),
                    distance: e.key.distance(point),
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance)),
            Node::Branch {
                axis,
                split,
                left,
                right,
            } => {
                let (near, far) = if axis.of(point) < *split {
                    (&**left, &**right)
                } else {
                    (&**right, &**left)
                };
                let best = Self::nearest_in(near, point);
                match best {
                    None => Self::nearest_in(far, point),
                    Some(b) if b.distance >= plane_distance(*axis, *split, point) => {
                        match Self::nearest_in(far, point) {
                            Some(f) if f.distance < b.distance => Some(f),
                            _ => Some(b),
                        }
                    }
                    Some(b) => Some(b),
                }
            }
        }
    }
}

impl<P, const LEAF_CAPACITY: usize> SpatialQuery<P> for KdTree<P, LEAF_CAPACITY> {
    fn contains(&self, point: Point) -> bool {
        !self.find(point).is_empty()
    }

    fn query_range<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = &'a P> + 'a>
    where
        P: 'a,
    {
        let mut out = Vec::new();
        Self::collect_range(&self.root, rect, &mut out);
        Box::new(out.into_iter())
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<P, const LEAF_CAPACITY: usize> Debug for KdTree<P, LEAF_CAPACITY> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (leaves, depth) = self.shape();
        f.debug_struct("KdTree")
            .field("leaf_capacity", &LEAF_CAPACITY)
            .field("key_precision", &KEY_PRECISION)
            .field("len", &self.len)
            .field("leaves", &leaves)
            .field("depth", &depth)
            .finish_non_exhaustive()
    }
}
