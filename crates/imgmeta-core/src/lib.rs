//! # imgmeta-core
//!
//! Core types for metadata-aware image processing.
//!
//! This crate provides the foundational types used by the imgmeta workspace:
//!
//! - [`Element`], [`ElementKind`] - Element type descriptors and default value limits
//! - [`Properties`], [`PropValue`] - Loosely typed per-image property store
//! - [`permutation`], [`default_permutation`] - Axis-label permutation utilities
//! - [`Error`], [`Result`] - Unified error type
//!
//! ## Design Philosophy
//!
//! An image is a plain n-dimensional array plus a bag of properties that give
//! its axes meaning (which axis is color, which is time, how the spatial axes
//! are ordered). This crate holds everything that does not need the array
//! itself; the image types and the dimension-semantics resolver live in
//! `imgmeta-image`.
//!
//! ```text
//! imgmeta-core (this crate)
//!    ^
//!    |
//!    +-- imgmeta-image (Image, IndexedImage, DimSemantics)
//!    +-- imgmeta-bench
//! ```
//!
//! ## Axis Numbering
//!
//! The Rust API is 0-based everywhere. Only the `colordim` and `timedim`
//! entries of a [`Properties`] store keep the 1-based interchange convention
//! (0 = none); use [`Properties::axis`] and [`Properties::set_axis`] to cross
//! that boundary.
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`PropValue`] and [`Properties`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod perm;
pub mod props;

// Re-exports for convenience
pub use error::*;
pub use format::*;
pub use perm::*;
pub use props::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use imgmeta_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::{Element, ElementKind};
    pub use crate::perm::{default_permutation, invert_permutation, permutation};
    pub use crate::props::{PropValue, Properties, keys};
}
