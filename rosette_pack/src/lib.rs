// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rosette Pack: circle packing and point relaxation on [`rosette_index`].
//!
//! - [`CirclePacker`] places non-overlapping circles in a rectangle by rejection
//!   sampling, optionally on a torus, until a count limit or fill ratio is reached.
//! - [`relax_points`] pushes a point set apart until no two discs overlap.
//! - [`circles_from_points`] sizes circles around fixed centers.
//!
//! Packings can be saved as `x,y,radius` lines and loaded back without repacking.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Rect;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rosette_pack::{CirclePacker, PackParams, StopReason};
//!
//! let params = PackParams::builder(Rect::new(0.0, 0.0, 400.0, 300.0))
//!     .radius(2.0, 30.0)
//!     .padding(1.0)
//!     .wrap(true)
//!     .circle_limit(50)
//!     .build()?;
//!
//! let mut packer = CirclePacker::new(params);
//! let summary = packer.pack(&mut StdRng::seed_from_u64(7));
//! assert_eq!(summary.stop, StopReason::CircleLimit);
//! assert_eq!(packer.placed(), 50);
//! // Circles crossing an edge are stored together with their mirror images.
//! assert!(packer.circles().len() >= 50);
//! # Ok::<(), rosette_pack::PackError>(())
//! ```
//!
//! Relaxation works on any slice of points:
//!
//! ```rust
//! use kurbo::Point;
//! use rosette_pack::{RelaxParams, relax_points};
//!
//! let mut points = [Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
//! let passes = relax_points(&mut points, &RelaxParams::new(1.0).max_iterations(100));
//! assert!(passes >= 1);
//! assert!(points[0].distance(points[1]) >= 1.99);
//! ```
//!
//! # Logging
//!
//! This crate logs through the [`log`] facade: pack and relaxation summaries at
//! `debug`, individual placements and passes at `trace`, and exhausted attempt
//! budgets or circles rejected by an undersized index at `warn`.

pub mod error;
pub mod from_points;
pub mod packer;
pub mod params;
pub mod persist;
pub mod relax;

pub use error::{ConfigError, PackError, Result};
pub use from_points::circles_from_points;
pub use packer::{CirclePacker, PackSummary, StopReason, default_index};
pub use params::{Mask, PackParams, PackParamsBuilder, RadiusPolicy};
pub use persist::{read_circles, write_circles};
pub use relax::{RelaxParams, relax_points};
