// Copyright 2025 the Rosette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for packing and persistence.

use thiserror::Error;

/// Invalid packing parameters, reported before any work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Neither a circle limit nor a fill target was set, so packing would never stop.
    #[error("no stopping condition: set a circle limit or a target fill ratio")]
    NoStopCondition,

    /// Radius range is empty or negative.
    #[error("invalid radius range: min {min}, max {max}")]
    InvalidRadius {
        /// Requested minimum radius.
        min: f64,
        /// Requested maximum radius.
        max: f64,
    },

    /// Padding must not be negative.
    #[error("negative padding: {0}")]
    NegativePadding(f64),

    /// Target fill ratio must lie in `(0, 1]`.
    #[error("target fill ratio out of range: {0}")]
    InvalidFillRatio(f64),

    /// The packing bounds have no area.
    #[error("bounds have zero area")]
    EmptyBounds,

    /// In wrap mode each side must be at least `2 * (max_radius + padding)`, so no
    /// center is mirrored across both opposite edges.
    #[error("bounds {width}x{height} too small to wrap circles of radius {max_radius}")]
    BoundsTooSmallForWrap {
        /// Bounds width.
        width: f64,
        /// Bounds height.
        height: f64,
        /// Configured maximum radius.
        max_radius: f64,
    },

    /// Decay factor must lie in `(0, 1)`.
    #[error("decay factor out of range: {0}")]
    InvalidDecay(f64),
}

/// Errors from packing or from reading and writing circle files.
#[derive(Debug, Error)]
pub enum PackError {
    /// Configuration rejected before packing.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// I/O failure while reading or writing a circle file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in a circle file is not three comma-separated numbers.
    #[error("malformed record on line {line}: {content:?}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// The offending line, untrimmed.
        content: String,
    },
}

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;
