//! Error types for imgmeta operations.
//!
//! This module provides a unified error handling system for property
//! resolution, dimension inference and the structural image operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers all failure modes that can occur during:
//! - Shape-based inference on bare arrays (colorspace, colordim, spacing, order)
//! - Rank checks when converting images to plain arrays
//! - Axis permutation of data and per-axis properties
//! - Colormap lookup when expanding indexed images
//!
//! Every failure is reported at the call site. Nothing is retried and no
//! error is turned into a default value.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::{Error, Result};
//!
//! fn require_2d(sdims: usize) -> Result<()> {
//!     if sdims > 2 {
//!         return Err(Error::TooManySpatialDims { sdims });
//!     }
//!     Ok(())
//! }
//! assert!(require_2d(3).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::props::Properties`] - Typed property lookups
//! - [`crate::perm`] - Permutation validation
//! - `imgmeta-image` - Resolver and image operations

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or transforming image metadata.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
///
/// # Categories
///
/// - **Ambiguity errors**: [`Ambiguous`](Error::Ambiguous),
///   [`WrongSpatialDims`](Error::WrongSpatialDims),
///   [`AmbiguousSpatialOrder`](Error::AmbiguousSpatialOrder)
/// - **Dimension errors**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`TooManySpatialDims`](Error::TooManySpatialDims),
///   [`ImageSequence`](Error::ImageSequence)
/// - **Permutation errors**: [`InvalidPermutation`](Error::InvalidPermutation),
///   [`UnsupportedProperty`](Error::UnsupportedProperty)
/// - **Property errors**: [`InvalidProperty`](Error::InvalidProperty)
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Lookup errors**: [`InvalidColormapIndex`](Error::InvalidColormapIndex)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Shape-based inference cannot decide what the axes of a bare array mean.
    ///
    /// Only 2-D arrays and 3-D arrays whose third axis has length 3 carry
    /// enough information. Wrap anything else in an image with explicit
    /// properties.
    #[error(
        "cannot infer {what}: dimension semantics are ambiguous for a bare array of shape {shape:?}; use an Image with explicit properties"
    )]
    Ambiguous {
        /// Which quantity was being inferred
        what: &'static str,
        /// Shape of the offending array
        shape: Vec<usize>,
    },

    /// A bare array was asked for its spatial order without being 2-D.
    #[error("wrong spatial dimensionality for an unannotated array: {ndim} dimensions, expected 2")]
    WrongSpatialDims {
        /// Rank of the array
        ndim: usize,
    },

    /// No spatial order is declared and the default cannot be assumed.
    #[error("cannot guess spatial order for {sdims} spatial dimensions without explicit metadata")]
    AmbiguousSpatialOrder {
        /// Number of spatial dimensions found
        sdims: usize,
    },

    /// Requested output rank disagrees with the image rank.
    #[error("output dimensionality mismatch: expected {expected} dimensions, got {got}")]
    DimensionMismatch {
        /// Rank that was requested
        expected: usize,
        /// Rank that is available
        got: usize,
    },

    /// Operation is only defined for images with two spatial dimensions.
    #[error("not defined for >2D images ({sdims} spatial dimensions)")]
    TooManySpatialDims {
        /// Number of spatial dimensions found
        sdims: usize,
    },

    /// Operation is not defined for images with a time axis.
    #[error("not defined for image sequences")]
    ImageSequence,

    /// Permutation has the wrong length or is not a permutation.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation {
        /// What is wrong with it
        reason: String,
    },

    /// A spatial property has a shape that cannot be permuted along with the axes.
    #[error("do not know how to permute property \"{name}\"")]
    UnsupportedProperty {
        /// Property name
        name: String,
    },

    /// A recognized property key holds a value of the wrong kind.
    #[error("invalid property \"{name}\": {reason}")]
    InvalidProperty {
        /// Property name
        name: String,
        /// What was expected
        reason: String,
    },

    /// Index along an axis is outside the axis.
    ///
    /// Returned when selecting a frame or indexing a single position along
    /// an axis of length `len`.
    #[error("index {index} out of bounds for axis {axis} of length {len}")]
    OutOfBounds {
        /// Requested index (negative values count from the end)
        index: isize,
        /// Axis (0-based)
        axis: usize,
        /// Axis length
        len: usize,
    },

    /// An index value does not address a colormap row.
    #[error("colormap index {index} out of range for colormap with {len} entries")]
    InvalidColormapIndex {
        /// Offending index value (as a signed integer, may be negative)
        index: i128,
        /// Number of colormap entries
        len: usize,
    },

    /// Operation is not supported for this kind of image.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl Error {
    /// Creates an [`Error::Ambiguous`] error.
    #[inline]
    pub fn ambiguous(what: &'static str, shape: &[usize]) -> Self {
        Self::Ambiguous {
            what,
            shape: shape.to_vec(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidPermutation`] error.
    #[inline]
    pub fn invalid_permutation(reason: impl Into<String>) -> Self {
        Self::InvalidPermutation {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedProperty`] error.
    #[inline]
    pub fn unsupported_property(name: impl Into<String>) -> Self {
        Self::UnsupportedProperty { name: name.into() }
    }

    /// Creates an [`Error::InvalidProperty`] error.
    #[inline]
    pub fn invalid_property(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Unsupported`] error.
    #[inline]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Returns `true` if this error comes from ambiguous dimension semantics.
    #[inline]
    pub fn is_ambiguity_error(&self) -> bool {
        matches!(
            self,
            Self::Ambiguous { .. } | Self::WrongSpatialDims { .. } | Self::AmbiguousSpatialOrder { .. }
        )
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::InvalidColormapIndex { .. })
    }

    /// Returns `true` if this is a rank or dimensionality error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::TooManySpatialDims { .. } | Self::ImageSequence
        )
    }

    /// Returns `true` if this is a permutation error.
    #[inline]
    pub fn is_permutation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPermutation { .. } | Self::UnsupportedProperty { .. }
        )
    }
}
