//! Axis permutation with property bookkeeping.
//!
//! Permuting an image reorders its data and keeps the metadata describing the
//! same physical axes:
//!
//! - `colordim` / `timedim` follow their axis to its new position
//! - per-axis spatial properties (`pixelspacing`, `spatialorder`, ...) are
//!   reordered to match the new order of the spatial axes; square matrices
//!   such as `spacedirections` are permuted on both axes
//!
//! A property that cannot be reordered (wrong kind or length) is reported as
//! [`Error::UnsupportedProperty`] rather than silently carried over.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::{invert_permutation, keys};
//! use imgmeta_image::{DimSemantics, Image};
//! use ndarray::Array3;
//!
//! let mut img = Image::new(Array3::<u8>::zeros((4, 5, 3)));
//! img.properties_mut().set_axis(keys::COLORDIM, Some(2));
//! img.properties_mut().insert(keys::PIXELSPACING, vec![0.5, 2.0]);
//!
//! let p = img.permutedims(&[2, 1, 0]).unwrap();
//! assert_eq!(p.shape(), &[3, 5, 4]);
//! assert_eq!(p.colordim().unwrap(), Some(0));
//! assert_eq!(p.pixelspacing().unwrap(), vec![2.0, 0.5]);
//!
//! let back = p.permutedims(&invert_permutation(&[2, 1, 0]).unwrap()).unwrap();
//! assert_eq!(back.shape(), img.shape());
//! ```

use crate::image::{Image, ImageBase};
use crate::indexed::IndexedImage;
use crate::semantics::DimSemantics;
use imgmeta_core::{Element, Error, Properties, Result, invert_permutation, keys};
use ndarray::{Data, IxDyn};
use tracing::{debug, trace};

/// Properties of `src` after permuting its axes by `perm`.
///
/// `perm[k]` is the source axis that becomes axis `k`.
fn permuted_properties<T: DimSemantics>(
    src: &T,
    props: &Properties,
    perm: &[usize],
    names: &[&str],
) -> Result<Properties> {
    let n = src.ndim();
    if perm.len() != n {
        return Err(Error::invalid_permutation(format!(
            "length {} for {n}-dimensional data",
            perm.len()
        )));
    }
    let inv = invert_permutation(perm)?;
    let (cd, td) = src.semantic_axes()?;
    let old_spatial = src.coords_spatial()?;

    let mut out = props.clone();
    if let Some(c) = cd {
        out.set_axis(keys::COLORDIM, Some(inv[c]));
    }
    if let Some(t) = td {
        out.set_axis(keys::TIMEDIM, Some(inv[t]));
    }

    // spatial axes in their new storage order, as positions among the old ones
    let order: Vec<usize> = perm
        .iter()
        .filter(|&&a| Some(a) != cd && Some(a) != td)
        .filter_map(|a| old_spatial.iter().position(|s| s == a))
        .collect();
    if order.iter().enumerate().any(|(k, &o)| k != o) {
        debug!(?order, "reordering spatial properties");
    }

    for &name in names {
        let Some(value) = props.get(name) else {
            continue;
        };
        let moved = value
            .select_axes(&order, old_spatial.len())
            .ok_or_else(|| Error::unsupported_property(name))?;
        out.insert(name, moved);
    }
    Ok(out)
}

impl<A, S> ImageBase<S>
where
    S: Data<Elem = A>,
    A: Element,
{
    /// Permutes the axes, carrying every spatial property that is present.
    ///
    /// `perm[k]` is the axis of `self` that becomes axis `k` of the result.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPermutation`] if `perm` is not a permutation of `0..ndim`
    /// - [`Error::UnsupportedProperty`] if a spatial property cannot be reordered
    pub fn permutedims(&self, perm: &[usize]) -> Result<Image<A>> {
        let names = self.spatial_properties();
        self.permutedims_with(perm, &names)
    }

    /// Permutes the axes, reordering exactly the named per-axis properties.
    pub fn permutedims_with(&self, perm: &[usize], names: &[&str]) -> Result<Image<A>> {
        trace!(shape = ?self.shape(), ?perm, ?names, "permutedims");
        let properties = permuted_properties(self, &self.properties, perm, names)?;
        let data = self
            .data
            .view()
            .permuted_axes(IxDyn(perm))
            .as_standard_layout()
            .into_owned();
        Ok(Image::with_properties(data, properties))
    }
}

impl<I, C> IndexedImage<I, C>
where
    I: Element,
    C: Element,
{
    /// Permutes the index array; the colormap is copied unchanged.
    ///
    /// Same rules and errors as [`ImageBase::permutedims`].
    pub fn permutedims(&self, perm: &[usize]) -> Result<IndexedImage<I, C>> {
        let names = self.spatial_properties();
        self.permutedims_with(perm, &names)
    }

    /// Permutes the index array, reordering exactly the named properties.
    pub fn permutedims_with(&self, perm: &[usize], names: &[&str]) -> Result<IndexedImage<I, C>> {
        trace!(shape = ?self.shape(), ?perm, ?names, "permutedims_indexed");
        let properties = permuted_properties(self, &self.properties, perm, names)?;
        let index = self
            .index
            .view()
            .permuted_axes(IxDyn(perm))
            .as_standard_layout()
            .into_owned();
        Ok(IndexedImage::with_properties(index, self.cmap.clone(), properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgmeta_core::PropValue;
    use ndarray::{Array2, ArrayD, array};

    fn volume() -> Image<u16> {
        // (z, y, t, x, c)
        let data = ArrayD::from_shape_fn(vec![2, 3, 4, 5, 3], |ix| {
            (ix[0] * 1000 + ix[1] * 100 + ix[2] * 10 + ix[3]) as u16
        });
        let mut img = Image::new(data);
        img.properties_mut().set_axis(keys::TIMEDIM, Some(2));
        img.properties_mut().set_axis(keys::COLORDIM, Some(4));
        img.properties_mut().insert(keys::SPATIALORDER, vec!["z", "y", "x"]);
        img.properties_mut().insert(keys::PIXELSPACING, vec![3.0, 2.0, 1.0]);
        img
    }

    #[test]
    fn test_permute_data() {
        let img = Image::new(array![[1u8, 2, 3], [4, 5, 6]]);
        let t = img.permutedims(&[1, 0]).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.data()[[2, 0]], 3);
        assert!(t.data().is_standard_layout());
    }

    #[test]
    fn test_semantic_axes_follow() {
        let img = volume();
        let p = img.permutedims(&[4, 2, 3, 1, 0]).unwrap();
        assert_eq!(p.shape(), &[3, 4, 5, 3, 2]);
        assert_eq!(p.colordim().unwrap(), Some(0));
        assert_eq!(p.timedim().unwrap(), Some(1));
        assert_eq!(p.size_spatial().unwrap(), vec![5, 3, 2]);
        assert_eq!(
            p.spatialorder().unwrap().unwrap(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()]
        );
        assert_eq!(p.pixelspacing().unwrap(), vec![1.0, 2.0, 3.0]);
        // the pixel at z=1, y=2, t=3, x=4 moved with its labels
        assert_eq!(p.data()[[0, 3, 4, 2, 1]], 1234);
    }

    #[test]
    fn test_inverse_restores() {
        let img = volume();
        let perm = [3, 4, 0, 2, 1];
        let back = img
            .permutedims(&perm)
            .unwrap()
            .permutedims(&invert_permutation(&perm).unwrap())
            .unwrap();
        assert_eq!(back.shape(), img.shape());
        assert_eq!(back.colordim().unwrap(), img.colordim().unwrap());
        assert_eq!(back.timedim().unwrap(), img.timedim().unwrap());
        assert_eq!(back.properties(), img.properties());
        assert_eq!(back.data(), img.data());
    }

    #[test]
    fn test_matrix_permuted_both_axes() {
        let mut img = Image::new(Array2::<f32>::zeros((3, 4)));
        img.properties_mut()
            .insert(keys::SPACEDIRECTIONS, array![[1.0, 2.0], [3.0, 4.0]]);
        let p = img.permutedims(&[1, 0]).unwrap();
        assert_eq!(
            p.properties().get(keys::SPACEDIRECTIONS),
            Some(&PropValue::Matrix(array![[4.0, 3.0], [2.0, 1.0]]))
        );
    }

    #[test]
    fn test_invalid_permutation() {
        let img = volume();
        let err = img.permutedims(&[0, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidPermutation { .. }));
        assert!(img.permutedims(&[0, 1, 2, 3, 3]).is_err());
        assert!(img.permutedims(&[0, 1, 2, 3, 5]).unwrap_err().is_permutation_error());
    }

    #[test]
    fn test_unsupported_property() {
        let mut img = Image::new(Array2::<u8>::zeros((3, 4)));
        img.properties_mut().insert(keys::PIXELSPACING, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            img.permutedims(&[1, 0]).unwrap_err(),
            Error::unsupported_property(keys::PIXELSPACING)
        );
        // not named, so left alone
        let p = img.permutedims_with(&[1, 0], &[]).unwrap();
        assert_eq!(p.properties().get(keys::PIXELSPACING), img.properties().get(keys::PIXELSPACING));

        img.properties_mut().insert("origin", "corner");
        assert!(img.permutedims_with(&[1, 0], &["origin"]).is_err());
    }

    #[test]
    fn test_indexed_permute() {
        let mut idx = IndexedImage::new(array![[0u8, 1, 2]], array![[0.0f32], [0.5], [1.0]]);
        idx.properties_mut().insert(keys::PIXELSPACING, vec![1.0, 2.0]);
        let p = idx.permutedims(&[1, 0]).unwrap();
        assert_eq!(p.shape(), &[3, 1]);
        assert_eq!(p.index()[[2, 0]], 2);
        assert_eq!(p.cmap(), idx.cmap());
        assert_eq!(p.pixelspacing().unwrap(), vec![2.0, 1.0]);
    }
}
