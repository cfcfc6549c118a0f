// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing parameters and their validating builder.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::error::ConfigError;

/// How the packer chooses the radius of a new circle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum RadiusPolicy {
    /// Each accepted candidate gets the largest radius that fits, up to `max_radius`.
    #[default]
    Maximal,
    /// Try one radius at a time, starting at `max_radius`.
    ///
    /// After every failed attempt the tried radius shrinks by `factor`, never below
    /// `min_radius`. Successes leave it unchanged.
    Decaying {
        /// Multiplier applied after a failure, in `(0, 1)`.
        factor: f64,
    },
}

impl RadiusPolicy {
    /// Decay factor used by [`RadiusPolicy::decaying`].
    pub const DEFAULT_DECAY: f64 = 0.99;

    /// [`RadiusPolicy::Decaying`] with the default factor.
    pub fn decaying() -> Self {
        Self::Decaying {
            factor: Self::DEFAULT_DECAY,
        }
    }
}

/// Predicate restricting where circle centers may land.
pub type Mask = Box<dyn Fn(Point) -> bool>;

/// Validated configuration for a [`CirclePacker`](crate::CirclePacker).
///
/// Build one with [`PackParams::builder`].
pub struct PackParams {
    pub(crate) bounds: Rect,
    pub(crate) min_radius: f64,
    pub(crate) max_radius: f64,
    pub(crate) padding: f64,
    pub(crate) wrap: bool,
    pub(crate) circle_limit: Option<usize>,
    pub(crate) target_fill_ratio: Option<f64>,
    pub(crate) max_attempts: Option<u64>,
    pub(crate) radius_policy: RadiusPolicy,
    pub(crate) mask: Option<Mask>,
}

impl PackParams {
    /// Start configuring a packing of `bounds`.
    pub fn builder(bounds: Rect) -> PackParamsBuilder {
        PackParamsBuilder {
            params: Self {
                bounds: bounds.abs(),
                min_radius: 1.0,
                max_radius: 10.0,
                padding: 0.0,
                wrap: false,
                circle_limit: None,
                target_fill_ratio: None,
                max_attempts: None,
                radius_policy: RadiusPolicy::Maximal,
                mask: None,
            },
        }
    }

    /// Region the circle centers are sampled from.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Smallest radius a placed circle may have.
    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    /// Largest radius a placed circle may have.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Extra gap kept between neighboring circles.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Whether opposite edges of the bounds are adjacent.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Stop after this many circles.
    pub fn circle_limit(&self) -> Option<usize> {
        self.circle_limit
    }

    /// Stop once this fraction of the bounds is covered.
    pub fn target_fill_ratio(&self) -> Option<f64> {
        self.target_fill_ratio
    }

    /// Stop after this many sampled candidates in one call to `pack`.
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Radius selection strategy.
    pub fn radius_policy(&self) -> RadiusPolicy {
        self.radius_policy
    }

    /// Whether `point` passes the mask. Always true without one.
    pub fn accepts(&self, point: Point) -> bool {
        self.mask.as_ref().is_none_or(|mask| mask(point))
    }
}

impl Debug for PackParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackParams")
            .field("bounds", &self.bounds)
            .field("min_radius", &self.min_radius)
            .field("max_radius", &self.max_radius)
            .field("padding", &self.padding)
            .field("wrap", &self.wrap)
            .field("circle_limit", &self.circle_limit)
            .field("target_fill_ratio", &self.target_fill_ratio)
            .field("max_attempts", &self.max_attempts)
            .field("radius_policy", &self.radius_policy)
            .field("masked", &self.mask.is_some())
            .finish()
    }
}

/// Builder for [`PackParams`]. Nothing is checked until [`build`](Self::build).
#[derive(Debug)]
pub struct PackParamsBuilder {
    params: PackParams,
}

impl PackParamsBuilder {
    /// Radius range for placed circles. Defaults to `1.0..=10.0`.
    pub fn radius(mut self, min: f64, max: f64) -> Self {
        self.params.min_radius = min;
        self.params.max_radius = max;
        self
    }

    /// Gap kept between circles. Defaults to zero.
    pub fn padding(mut self, padding: f64) -> Self {
        self.params.padding = padding;
        self
    }

    /// Treat the bounds as a torus.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.params.wrap = wrap;
        self
    }

    /// Stop after `limit` circles.
    pub fn circle_limit(mut self, limit: usize) -> Self {
        self.params.circle_limit = Some(limit);
        self
    }

    /// Stop once the placed circles cover `ratio` of the bounds.
    pub fn target_fill_ratio(mut self, ratio: f64) -> Self {
        self.params.target_fill_ratio = Some(ratio);
        self
    }

    /// Give up after `attempts` sampled candidates per call to `pack`.
    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.params.max_attempts = Some(attempts);
        self
    }

    /// Radius selection strategy. Defaults to [`RadiusPolicy::Maximal`].
    pub fn radius_policy(mut self, policy: RadiusPolicy) -> Self {
        self.params.radius_policy = policy;
        self
    }

    /// Only place circles whose center satisfies `mask`.
    pub fn mask(mut self, mask: impl Fn(Point) -> bool + 'static) -> Self {
        self.params.mask = Some(Box::new(mask));
        self
    }

    /// Validate and return the parameters.
    pub fn build(self) -> Result<PackParams, ConfigError> {
        let p = self.params;
        if p.circle_limit.is_none() && p.target_fill_ratio.is_none() {
            return Err(ConfigError::NoStopCondition);
        }
        let radii_ok = p.min_radius >= 0.0
            && p.max_radius > 0.0
            && p.min_radius <= p.max_radius
            && p.max_radius.is_finite();
        if !radii_ok {
            return Err(ConfigError::InvalidRadius {
                min: p.min_radius,
                max: p.max_radius,
            });
        }
        if p.padding < 0.0 || p.padding.is_nan() {
            return Err(ConfigError::NegativePadding(p.padding));
        }
        if let Some(ratio) = p.target_fill_ratio
            && (ratio <= 0.0 || ratio > 1.0 || ratio.is_nan())
        {
            return Err(ConfigError::InvalidFillRatio(ratio));
        }
        if let RadiusPolicy::Decaying { factor } = p.radius_policy
            && (factor <= 0.0 || factor >= 1.0 || factor.is_nan())
        {
            return Err(ConfigError::InvalidDecay(factor));
        }
        if p.bounds.is_zero_area() {
            return Err(ConfigError::EmptyBounds);
        }
        let span = 2.0 * (p.max_radius + p.padding);
        if p.wrap && (p.bounds.width() < span || p.bounds.height() < span) {
            return Err(ConfigError::BoundsTooSmallForWrap {
                width: p.bounds.width(),
                height: p.bounds.height(),
                max_radius: p.max_radius,
            });
        }
        Ok(p)
    }
}
