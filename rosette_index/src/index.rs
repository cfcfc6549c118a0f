// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits shared by every spatial index.

use alloc::boxed::Box;

use kurbo::{Point, Rect};

/// Read-only access to a point-keyed spatial index.
///
/// Every index in this crate implements this trait, including the build-once
/// k-d trees which cannot be mutated after construction.
pub trait SpatialQuery<P> {
    /// Whether at least one item is stored at exactly `point`.
    fn contains(&self, point: Point) -> bool;

    /// Items whose point lies in `rect`, using [`Rect::contains`] (half-open).
    ///
    /// Order is unspecified. Items sharing a point are all yielded.
    fn query_range<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = &'a P> + 'a>
    where
        P: 'a;

    /// Number of stored items.
    fn len(&self) -> usize;

    /// True if no items are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if at least one item is stored.
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

/// A spatial index that supports incremental updates.
pub trait SpatialIndex<P>: SpatialQuery<P> {
    /// Insert `item` keyed by `point`.
    ///
    /// Returns `false` without storing anything if `point` lies outside the index's domain.
    fn insert(&mut self, point: Point, item: P) -> bool;

    /// Remove one occurrence of `item` stored at exactly `point`.
    ///
    /// Returns `false` if no such entry exists or `point` lies outside the domain.
    fn remove(&mut self, point: Point, item: &P) -> bool;

    /// Remove every entry.
    fn clear(&mut self);
}
