// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree. Leaves subdivide into four equal quadrants once they exceed capacity.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::index::{SpatialIndex, SpatialQuery};

/// Subdivision stops at this depth; deeper nodes keep every entry they receive.
const MAX_DEPTH: u8 = 24;

/// A mutable quadtree over a fixed domain.
pub struct QuadTree<P> {
    bounds: Rect,
    capacity: usize,
    depth: u8,
    entries: Vec<(Point, P)>,
    children: Option<Box<[Self; 4]>>,
    len: usize,
}

impl<P> QuadTree<P> {
    /// Default number of entries a node holds before it subdivides.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Create an empty quadtree over `bounds` with the default node capacity.
    pub fn new(bounds: Rect) -> Self {
        Self::with_capacity(bounds, Self::DEFAULT_CAPACITY)
    }

    /// Create an empty quadtree whose nodes hold up to `capacity` entries before splitting.
    pub fn with_capacity(bounds: Rect, capacity: usize) -> Self {
        Self::node(bounds.abs(), capacity.max(1), 0)
    }

    fn node(bounds: Rect, capacity: usize, depth: u8) -> Self {
        Self {
            bounds,
            capacity,
            depth,
            entries: Vec::new(),
            children: None,
            len: 0,
        }
    }

    /// The domain this tree accepts points in.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn subdivide(&mut self) {
        let Rect { x0, y0, x1, y1 } = self.bounds;
        let c = self.bounds.center();
        let depth = self.depth + 1;
        let mut children = Box::new([
            Self::node(Rect::new(x0, y0, c.x, c.y), self.capacity, depth),
            Self::node(Rect::new(c.x, y0, x1, c.y), self.capacity, depth),
            Self::node(Rect::new(x0, c.y, c.x, y1), self.capacity, depth),
            Self::node(Rect::new(c.x, c.y, x1, y1), self.capacity, depth),
        ]);
        for (p, item) in self.entries.drain(..) {
            if let Some(child) = children.iter_mut().find(|ch| ch.bounds.contains(p)) {
                child.push(p, item);
            }
        }
        self.children = Some(children);
    }

    /// Insert a point already known to lie in this node's bounds.
    fn push(&mut self, point: Point, item: P) -> bool {
        let inserted = if let Some(children) = self.children.as_mut() {
            match children.iter_mut().find(|ch| ch.bounds.contains(point)) {
                Some(child) => child.push(point, item),
                None => false,
            }
        } else if self.entries.len() < self.capacity || self.depth >= MAX_DEPTH {
            self.entries.push((point, item));
            true
        } else {
            self.subdivide();
            return self.push_after_split(point, item);
        };
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn push_after_split(&mut self, point: Point, item: P) -> bool {
        // `len` already counts the entries moved into the children.
        let inserted = self
            .children
            .as_mut()
            .and_then(|children| children.iter_mut().find(|ch| ch.bounds.contains(point)))
            .is_some_and(|child| child.push(point, item));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn collect_range<'a>(&'a self, rect: Rect, out: &mut Vec<&'a P>) {
        if self.bounds.intersect(rect).is_zero_area() {
            return;
        }
        out.extend(
            self.entries
                .iter()
                .filter(|(p, _)| rect.contains(*p))
                .map(|(_, item)| item),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_range(rect, out);
            }
        }
    }
}

impl<P> SpatialQuery<P> for QuadTree<P> {
    fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        match &self.children {
            Some(children) => children.iter().any(|ch| ch.contains(point)),
            None => self.entries.iter().any(|(p, _)| *p == point),
        }
    }

    fn query_range<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = &'a P> + 'a>
    where
        P: 'a,
    {
        let mut out = Vec::new();
        self.collect_range(rect, &mut out);
        Box::new(out.into_iter())
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<P: PartialEq> SpatialIndex<P> for QuadTree<P> {
    fn insert(&mut self, point: Point, item: P) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        self.push(point, item)
    }

    fn remove(&mut self, point: Point, item: &P) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let removed = match self.children.as_mut() {
            Some(children) => {
                let removed = children
                    .iter_mut()
                    .find(|ch| ch.bounds.contains(point))
                    .is_some_and(|child| child.remove(point, item));
                if removed && children.iter().all(|ch| ch.len == 0) {
                    self.children = None;
                }
                removed
            }
            None => match self
                .entries
                .iter()
                .position(|(p, v)| *p == point && v == item)
            {
                Some(pos) => {
                    self.entries.swap_remove(pos);
                    true
                }
                None => false,
            },
        };
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.children = None;
        self.len = 0;
    }
}

impl<P> Debug for QuadTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds)
            .field("capacity", &self.capacity)
            .field("depth", &self.depth)
            .field("subdivided", &self.children.is_some())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
