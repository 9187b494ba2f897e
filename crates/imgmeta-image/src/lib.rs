//! # imgmeta-image
//!
//! Metadata-aware images layered over `ndarray` arrays.
//!
//! Algorithms written against [`DimSemantics`] work the same on plain arrays
//! and on images whose axes carry declared meaning (color axis, time axis,
//! spatial order, pixel spacing, value limits).
//!
//! # Modules
//!
//! - [`semantics`] - The [`DimSemantics`] resolver trait
//! - [`bare`] - Shape-based inference for unannotated arrays
//! - [`image`] - Direct images and metadata-preserving views
//! - [`indexed`] - Colormapped images and their expansion
//! - [`any`] - Closed enum over both image kinds
//! - [`permute`] - Axis permutation keeping properties consistent
//! - [`slice`] - Slicing and indexing with property adjustment
//! - [`convert`] - Conversion to canonical plain arrays
//!
//! # Example
//!
//! ```rust
//! use imgmeta_image::prelude::*;
//! use ndarray::Array3;
//!
//! let mut img = Image::new(Array3::<u8>::zeros((3, 480, 640)));
//! img.properties_mut().insert(keys::COLORSPACE, "RGB");
//! img.properties_mut().set_axis(keys::COLORDIM, Some(0));
//!
//! assert_eq!(img.sdims().unwrap(), 2);
//! assert_eq!(img.widthheight().unwrap(), (640, 480));
//!
//! // color axis moves last, spatial axes stay in y/x order
//! let arr = img.to_array_dyn().unwrap();
//! assert_eq!(arr.shape(), &[480, 640, 3]);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Colormap lookup on rayon
//! - `serde` - Serialization of property stores

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod any;
pub mod bare;
pub mod convert;
pub mod image;
pub mod indexed;
pub mod permute;
pub mod semantics;
pub mod slice;
mod summary;

pub use any::AnyImage;
pub use bare::{AsBare, Bare};
pub use image::{Image, ImageBase, ImageView};
pub use indexed::IndexedImage;
pub use semantics::{CANONICAL_ORDER, DimSemantics, XY};

pub use imgmeta_core::{
    Element, ElementKind, Error, IndexElement, PropValue, Properties, Result, keys,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use imgmeta_image::prelude::*;
/// ```
pub mod prelude {
    pub use crate::any::AnyImage;
    pub use crate::bare::{AsBare, Bare};
    pub use crate::image::{Image, ImageView};
    pub use crate::indexed::IndexedImage;
    pub use crate::semantics::{CANONICAL_ORDER, DimSemantics, XY};
    pub use imgmeta_core::prelude::*;
}
