// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rejection-sampling circle packer.

use core::f64::consts::PI;
use core::fmt::Debug;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use kurbo::{Circle, Point, Rect, Vec2};
use log::{debug, trace, warn};
use rand::Rng;
use rosette_index::{SpatialIndex, TileGrid};

use crate::error::Result;
use crate::params::{PackParams, RadiusPolicy};
use crate::persist::{read_circles, write_circles};

/// Why a call to [`CirclePacker::pack`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of circles has been placed.
    CircleLimit,
    /// The placed circles cover the configured fraction of the bounds.
    FillTarget,
    /// The per-call attempt budget ran out first.
    AttemptBudget,
}

/// Outcome of one call to [`CirclePacker::pack`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PackSummary {
    /// Circles placed so far, not counting wrap images.
    pub placed: usize,
    /// Candidates sampled during this call.
    pub attempts: u64,
    /// Covered fraction of the bounds.
    pub fill_ratio: f64,
    /// What ended the call.
    pub stop: StopReason,
}

/// Places non-overlapping circles by rejection sampling.
///
/// The packer owns the circle set, the spatial index that accelerates neighbor
/// lookups, and the counters used for termination. In wrap mode every circle that
/// crosses an edge is stored together with its mirror images on the opposite side(s);
/// [`circles`](Self::circles) returns both, while [`placed`](Self::placed) counts
/// only the primaries.
pub struct CirclePacker<I = TileGrid<Circle>> {
    params: PackParams,
    index: I,
    circles: Vec<Circle>,
    placed: usize,
    filled: f64,
    attempted_radius: f64,
}

/// The index [`CirclePacker::new`] uses: a tile grid covering the bounds plus a
/// `max_radius + padding` margin for wrap images, with tiles of the mean radius.
pub fn default_index(params: &PackParams) -> TileGrid<Circle> {
    let tile = (params.min_radius + params.max_radius) / 2.0;
    let margin = params.max_radius + params.padding;
    TileGrid::new(params.bounds.inflate(margin, margin), tile, tile)
}

impl CirclePacker<TileGrid<Circle>> {
    /// A packer backed by [`default_index`].
    pub fn new(params: PackParams) -> Self {
        let index = default_index(&params);
        Self::with_index(params, index)
    }
}

impl<I: SpatialIndex<Circle>> CirclePacker<I> {
    /// A packer backed by a caller-supplied index. The index is cleared first.
    ///
    /// In wrap mode the index domain must extend `max_radius + padding` beyond the
    /// bounds, otherwise mirror images are dropped.
    pub fn with_index(params: PackParams, mut index: I) -> Self {
        index.clear();
        let attempted_radius = params.max_radius;
        Self {
            params,
            index,
            circles: Vec::new(),
            placed: 0,
            filled: 0.0,
            attempted_radius,
        }
    }

    /// The configuration this packer was built with.
    pub fn params(&self) -> &PackParams {
        &self.params
    }

    /// Every stored circle, including wrap images.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// The neighbor index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Number of placed circles, not counting wrap images.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Placed area divided by the area of the bounds.
    pub fn fill_ratio(&self) -> f64 {
        self.filled / self.params.bounds.area()
    }

    /// Drop every circle and reset the counters.
    pub fn clear(&mut self) {
        self.circles.clear();
        self.index.clear();
        self.placed = 0;
        self.filled = 0.0;
        self.attempted_radius = self.params.max_radius;
    }

    /// Sample candidates until a stop condition holds.
    ///
    /// Conditions are checked before every attempt, so calling `pack` on a packer that
    /// already satisfies one returns immediately. Without an attempt budget an
    /// unreachable fill target never returns.
    pub fn pack<R: Rng>(&mut self, rng: &mut R) -> PackSummary {
        debug!(
            "packing {:?} with radii {}..={}, wrap {}",
            self.params.bounds, self.params.min_radius, self.params.max_radius, self.params.wrap
        );
        let mut attempts: u64 = 0;
        let stop = loop {
            if let Some(reason) = self.stop_reason(attempts) {
                break reason;
            }
            attempts += 1;
            let b = self.params.bounds;
            let candidate = Point::new(rng.random_range(b.x0..b.x1), rng.random_range(b.y0..b.y1));
            if !self.params.accepts(candidate) {
                continue;
            }
            self.attempt(candidate);
        };
        if stop == StopReason::AttemptBudget {
            warn!(
                "attempt budget of {attempts} exhausted with {} circles placed",
                self.placed
            );
        }
        let summary = PackSummary {
            placed: self.placed,
            attempts,
            fill_ratio: self.fill_ratio(),
            stop,
        };
        debug!("packing stopped: {summary:?}");
        summary
    }

    fn stop_reason(&self, attempts: u64) -> Option<StopReason> {
        if self.params.circle_limit.is_some_and(|limit| self.placed >= limit) {
            return Some(StopReason::CircleLimit);
        }
        if self
            .params
            .target_fill_ratio
            .is_some_and(|target| self.fill_ratio() >= target)
        {
            return Some(StopReason::FillTarget);
        }
        if self.params.max_attempts.is_some_and(|max| attempts >= max) {
            return Some(StopReason::AttemptBudget);
        }
        None
    }

    /// Try to place a circle at `candidate`.
    fn attempt(&mut self, candidate: Point) {
        let images = self.wrap_images(candidate);
        let admissible = self.admissible_radius(candidate, &images);
        let radius = match self.params.radius_policy {
            RadiusPolicy::Maximal => {
                admissible.filter(|&r| r >= self.params.min_radius && r > 0.0)
            }
            RadiusPolicy::Decaying { factor } => {
                let tried = self.attempted_radius;
                if admissible.is_some_and(|r| r >= tried) {
                    Some(tried)
                } else {
                    self.attempted_radius = (tried * factor).max(self.params.min_radius);
                    None
                }
            }
        };
        if let Some(r) = radius {
            self.commit(Circle::new(candidate, r), &images);
        }
    }

    /// Offsets of the mirror images of `p` in wrap mode; empty otherwise.
    ///
    /// A center within `max_radius + padding` of an edge can violate the padding of
    /// a circle across the seam, so it gets an image there.
    fn wrap_images(&self, p: Point) -> Vec<Vec2> {
        if !self.params.wrap {
            return Vec::new();
        }
        let Rect { x0, y0, x1, y1 } = self.params.bounds;
        let reach = self.params.max_radius + self.params.padding;
        let dx = if p.x - x0 < reach {
            x1 - x0
        } else if x1 - p.x < reach {
            x0 - x1
        } else {
            0.0
        };
        let dy = if p.y - y0 < reach {
            y1 - y0
        } else if y1 - p.y < reach {
            y0 - y1
        } else {
            0.0
        };
        let mut images = Vec::with_capacity(3);
        if dx != 0.0 {
            images.push(Vec2::new(dx, 0.0));
        }
        if dy != 0.0 {
            images.push(Vec2::new(0.0, dy));
        }
        if dx != 0.0 && dy != 0.0 {
            images.push(Vec2::new(dx, dy));
        }
        images
    }

    /// Largest radius a circle at `p` (and at each wrap image) could take, or `None`
    /// if any of those points is already covered.
    fn admissible_radius(&self, p: Point, images: &[Vec2]) -> Option<f64> {
        let mut best = self.clearance(p)?;
        if self.params.wrap {
            for offset in images {
                best = best.min(self.clearance(p + *offset)?);
            }
        } else {
            let b = self.params.bounds;
            best = best
                .min(p.x - b.x0)
                .min(b.x1 - p.x)
                .min(p.y - b.y0)
                .min(b.y1 - p.y);
        }
        Some(best)
    }

    /// Distance from `p` to the nearest padded circle boundary, capped at `max_radius`.
    fn clearance(&self, p: Point) -> Option<f64> {
        let (max_radius, padding) = (self.params.max_radius, self.params.padding);
        let reach = 2.0 * max_radius + padding;
        let window = Rect::new(p.x - reach, p.y - reach, p.x + reach, p.y + reach);
        let mut best = max_radius;
        for c in self.index.query_range(window) {
            let d = c.center.distance(p);
            if d < c.radius {
                return None;
            }
            best = best.min(d - c.radius - padding);
        }
        Some(best)
    }

    fn commit(&mut self, circle: Circle, images: &[Vec2]) {
        self.store(circle);
        for offset in images {
            self.store(Circle::new(circle.center + *offset, circle.radius));
        }
        self.placed += 1;
        self.filled += PI * circle.radius * circle.radius;
        trace!(
            "placed #{} at ({:.3}, {:.3}) r={:.3} with {} wrap images",
            self.placed,
            circle.center.x,
            circle.center.y,
            circle.radius,
            images.len()
        );
    }

    fn store(&mut self, circle: Circle) {
        if !self.index.insert(circle.center, circle) {
            warn!(
                "index rejected circle at ({}, {}); its domain is too small",
                circle.center.x, circle.center.y
            );
        }
        self.circles.push(circle);
    }

    /// Write the circle set, wrap images included, to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        write_circles(BufWriter::new(file), &self.circles)?;
        debug!("saved {} circles to {}", self.circles.len(), path.as_ref().display());
        Ok(())
    }

    /// Replace the circle set with the contents of `path`.
    ///
    /// The file is parsed in full first; on error the packer is left untouched.
    /// Circles centered inside the bounds count as placed; the rest are wrap images.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path.as_ref())?;
        let loaded = read_circles(BufReader::new(file))?;
        self.replace(loaded);
        debug!(
            "loaded {} circles ({} placed) from {}",
            self.circles.len(),
            self.placed,
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load `path` if it exists; otherwise pack and save the result there.
    pub fn load_or_generate<R: Rng>(
        &mut self,
        path: impl AsRef<Path>,
        rng: &mut R,
    ) -> Result<&[Circle]> {
        let path = path.as_ref();
        if path.exists() {
            self.load(path)?;
        } else {
            self.pack(rng);
            self.save(path)?;
        }
        Ok(&self.circles)
    }

    fn replace(&mut self, circles: Vec<Circle>) {
        self.clear();
        let bounds = self.params.bounds;
        for c in circles {
            if bounds.contains(c.center) {
                self.placed += 1;
                self.filled += PI * c.radius * c.radius;
            }
            self.store(c);
        }
    }
}

impl<I> Debug for CirclePacker<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CirclePacker")
            .field("params", &self.params)
            .field("circles", &self.circles.len())
            .field("placed", &self.placed)
            .field("filled", &self.filled)
            .field("attempted_radius", &self.attempted_radius)
            .finish_non_exhaustive()
    }
}
