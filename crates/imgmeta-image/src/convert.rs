//! Conversion of 2-D images to plain arrays in canonical order.
//!
//! Code that only understands plain arrays expects rows first, columns second
//! and channels last. [`ImageBase::to_array`] produces exactly that layout,
//! whatever the storage order of the image:
//!
//! ```text
//! spatialorder ["x","y"], colordim 0     (c, x, y)  ->  (y, x, c)
//! spatialorder ["y","x"], no colordim    (y, x)     ->  (y, x)      straight copy
//! ```
//!
//! Only images with two spatial dimensions and no time axis can be
//! converted.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::keys;
//! use imgmeta_image::Image;
//! use ndarray::{Ix2, array};
//!
//! let mut img = Image::new(array![[1u8, 2, 3], [4, 5, 6]]);
//! img.properties_mut().insert(keys::SPATIALORDER, vec!["x", "y"]);
//!
//! let arr = img.to_array::<Ix2>().unwrap();
//! assert_eq!(arr, array![[1, 4], [2, 5], [3, 6]]);
//! ```

use crate::image::ImageBase;
use crate::semantics::{CANONICAL_ORDER, DimSemantics};
use imgmeta_core::{Element, Error, Result, is_permutation, keys};
use ndarray::{Array, ArrayD, Data, Dimension, IxDyn};
use tracing::{debug, trace};

impl<A, S> ImageBase<S>
where
    S: Data<Elem = A>,
    A: Element,
{
    /// Axis permutation bringing the data into `(y, x[, c])` order.
    fn canonical_axes(&self) -> Result<Vec<usize>> {
        let (cd, td) = self.semantic_axes()?;
        if td.is_some() {
            return Err(Error::ImageSequence);
        }
        let sdims = self.sdims()?;
        if sdims != 2 {
            return Err(Error::TooManySpatialDims { sdims });
        }
        let coords = self.coords_spatial()?;
        let sp = self.spatialpermutation(&CANONICAL_ORDER)?;
        let mut perm = sp
            .iter()
            .map(|&k| coords.get(k).copied())
            .collect::<Option<Vec<usize>>>()
            .unwrap_or_default();
        perm.extend(cd);
        if perm.len() != self.ndim() || !is_permutation(&perm) {
            return Err(Error::invalid_property(
                keys::SPATIALORDER,
                format!("does not name the y and x axes among {} spatial axes", coords.len()),
            ));
        }
        Ok(perm)
    }

    /// Copies the data into a dynamic-rank array in canonical order.
    ///
    /// # Errors
    ///
    /// - [`Error::ImageSequence`] if the image has a time axis
    /// - [`Error::TooManySpatialDims`] unless there are exactly two spatial axes
    /// - [`Error::InvalidProperty`] for malformed `colordim`, `timedim` or `spatialorder`
    pub fn to_array_dyn(&self) -> Result<ArrayD<A>> {
        trace!(shape = ?self.shape(), "to_array");
        let perm = self.canonical_axes()?;
        if perm.iter().enumerate().all(|(k, &p)| k == p) {
            debug!("already canonical, copying");
            return Ok(self.data.to_owned());
        }
        debug!(?perm, "permuting to canonical order");
        Ok(self
            .data
            .view()
            .permuted_axes(IxDyn(&perm))
            .as_standard_layout()
            .into_owned())
    }

    /// Like [`to_array_dyn`](Self::to_array_dyn), with a static output rank.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `D` does not match the image rank, in
    /// addition to the errors of [`to_array_dyn`](Self::to_array_dyn).
    pub fn to_array<D: Dimension>(&self) -> Result<Array<A, D>> {
        if let Some(expected) = D::NDIM {
            if expected != self.ndim() {
                return Err(Error::dimension_mismatch(expected, self.ndim()));
            }
        }
        self.to_array_dyn()?
            .into_dimensionality::<D>()
            .map_err(|_| Error::dimension_mismatch(D::NDIM.unwrap_or(0), self.ndim()))
    }
}
