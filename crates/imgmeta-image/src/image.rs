//! Direct images.
//!
//! This module provides the direct-pixel image container:
//! - [`ImageBase`] - data array plus property store, generic over `ndarray` storage
//! - [`Image`] - owned image
//! - [`ImageView`] - borrowed, metadata-preserving view
//!
//! # Design
//!
//! The storage parameter mirrors `ndarray::ArrayBase`, so one type covers owned
//! images and views and the [`DimSemantics`] implementation is shared.
//! Properties are always owned: a view carries its own copy of the store, and
//! every derived image (copy, similar, permuted, sliced) gets a deep copy.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::keys;
//! use imgmeta_image::{DimSemantics, Image};
//! use ndarray::Array3;
//!
//! let mut img = Image::new(Array3::<u8>::zeros((480, 640, 3)));
//! img.properties_mut().insert(keys::COLORSPACE, "RGB");
//! img.properties_mut().set_axis(keys::COLORDIM, Some(2));
//!
//! assert_eq!(img.sdims().unwrap(), 2);
//! assert_eq!(img.widthheight().unwrap(), (640, 480));
//!
//! let copy = img.clone();
//! assert_eq!(copy.colorspace().unwrap(), "RGB");
//! ```
//!
//! # Dependencies
//!
//! - [`ndarray`] - Array storage, views and shape primitives
//! - [`crate::semantics::DimSemantics`] - Axis meaning
//!
//! # Used By
//!
//! - [`crate::indexed`] - Colormap expansion produces an [`Image`]
//! - [`crate::any`] - Direct variant of [`AnyImage`](crate::AnyImage)

use crate::semantics::DimSemantics;
use imgmeta_core::{Element, ElementKind, Properties};
use ndarray::{
    ArrayBase, ArrayD, ArrayViewD, Data, DataMut, Dimension, IxDyn, OwnedRepr, RawData, RawDataClone,
    ViewRepr,
};
use std::fmt;
use tracing::trace;

/// Direct image: every element stores its own pixel value.
pub struct ImageBase<S: RawData> {
    pub(crate) data: ArrayBase<S, IxDyn>,
    pub(crate) properties: Properties,
}

/// Owned direct image.
pub type Image<T> = ImageBase<OwnedRepr<T>>;

/// Borrowed direct image with its own copy of the properties.
pub type ImageView<'a, T> = ImageBase<ViewRepr<&'a T>>;

impl<S: RawData> ImageBase<S> {
    /// Shape of the data array.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// The data array.
    #[inline]
    pub fn data(&self) -> &ArrayBase<S, IxDyn> {
        &self.data
    }

    /// Consumes the image, returning the data array.
    pub fn into_data(self) -> ArrayBase<S, IxDyn> {
        self.data
    }

    /// The property store.
    #[inline]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Mutable access to the property store.
    #[inline]
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Always `true`: pixels are stored directly.
    #[inline]
    pub const fn is_direct(&self) -> bool {
        true
    }
}

impl<A, S> ImageBase<S>
where
    S: Data<Elem = A>,
{
    /// Wraps an array with an empty property store.
    pub fn new<D: Dimension>(data: ArrayBase<S, D>) -> Self {
        Self::with_properties(data, Properties::new())
    }

    /// Wraps an array with the given properties.
    pub fn with_properties<D: Dimension>(data: ArrayBase<S, D>, properties: Properties) -> Self {
        Self {
            data: data.into_dyn(),
            properties,
        }
    }

    /// Element at `index`, `None` when out of bounds.
    ///
    /// Raw access: returns the value without metadata.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        self.data.get(index)
    }

    /// Borrowed view of the whole image, properties preserved.
    pub fn view(&self) -> ImageView<'_, A> {
        ImageBase {
            data: self.data.view(),
            properties: self.properties.clone(),
        }
    }

    /// Owned copy of data and properties.
    pub fn to_owned(&self) -> Image<A>
    where
        A: Clone,
    {
        Image {
            data: self.data.to_owned(),
            properties: self.properties.clone(),
        }
    }

    /// New image with `data` as payload and a copy of these properties.
    ///
    /// The properties are copied verbatim; keeping them consistent with the
    /// new payload is up to the caller.
    pub fn copy_with<U, D: Dimension>(&self, data: ndarray::Array<U, D>) -> Image<U> {
        Image::with_properties(data, self.properties.clone())
    }

    /// Freshly allocated image of the same shape, element type and properties.
    ///
    /// Elements are filled with `A::default()`.
    pub fn similar(&self) -> Image<A>
    where
        A: Element,
    {
        self.similar_with(None)
    }

    /// Freshly allocated image with a copy of these properties, optionally of
    /// another element type and/or shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgmeta_image::Image;
    /// use ndarray::Array2;
    ///
    /// let img = Image::new(Array2::<u8>::zeros((4, 5)));
    /// let wide = img.similar_with::<f32>(Some(&[4, 10]));
    /// assert_eq!(wide.shape(), &[4, 10]);
    /// ```
    pub fn similar_with<U: Element>(&self, shape: Option<&[usize]>) -> Image<U> {
        let shape = shape.unwrap_or(self.data.shape());
        trace!(?shape, element = %U::KIND, "similar");
        Image::with_properties(
            ArrayD::from_elem(IxDyn(shape), U::default()),
            self.properties.clone(),
        )
    }

    /// Applies `f` to every element, keeping the properties.
    pub fn map_pixels<U, F>(&self, f: F) -> Image<U>
    where
        F: FnMut(&A) -> U,
    {
        Image::with_properties(self.data.map(f), self.properties.clone())
    }

    /// Smallest element, `None` for empty images.
    pub fn min(&self) -> Option<A>
    where
        A: Element,
    {
        self.data
            .iter()
            .copied()
            .reduce(|acc, v| if v < acc { v } else { acc })
    }

    /// Largest element, `None` for empty images.
    pub fn max(&self) -> Option<A>
    where
        A: Element,
    {
        self.data
            .iter()
            .copied()
            .reduce(|acc, v| if v > acc { v } else { acc })
    }

    /// Raw view of the data.
    pub fn array_view(&self) -> ArrayViewD<'_, A> {
        self.data.view()
    }
}

impl<A> Image<A> {
    /// Mutable access to the data array.
    #[inline]
    pub fn data_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.data
    }
}

impl<A, S> ImageBase<S>
where
    S: DataMut<Elem = A>,
{
    /// Mutable element at `index`, `None` when out of bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        self.data.get_mut(index)
    }
}

impl<S: RawDataClone> Clone for ImageBase<S> {
    /// Deep copy for owned images. Views copy the (borrowed) data handle and
    /// the properties.
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            properties: self.properties.clone(),
        }
    }
}

impl<S> fmt::Debug for ImageBase<S>
where
    S: Data,
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("data", &self.data)
            .field("properties", &self.properties)
            .finish()
    }
}

impl<S> DimSemantics for ImageBase<S>
where
    S: Data,
    S::Elem: Element,
{
    fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    fn element_kind(&self) -> ElementKind {
        <S::Elem as Element>::KIND
    }

    fn property_store(&self) -> Option<&Properties> {
        Some(&self.properties)
    }
}

impl<A, D: Dimension> From<ndarray::Array<A, D>> for Image<A> {
    fn from(data: ndarray::Array<A, D>) -> Self {
        Image::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgmeta_core::keys;
    use ndarray::{Array2, Array3, array};

    fn rgb() -> Image<u8> {
        let mut img = Image::new(Array3::<u8>::zeros((4, 5, 3)));
        img.properties_mut().insert(keys::COLORSPACE, "RGB");
        img.properties_mut().set_axis(keys::COLORDIM, Some(2));
        img
    }

    #[test]
    fn test_image_new() {
        let img = Image::new(Array2::<f32>::zeros((3, 4)));
        assert_eq!(img.shape(), &[3, 4]);
        assert_eq!(img.ndim(), 2);
        assert!(img.properties().is_empty());
        assert!(img.is_direct());
    }

    #[test]
    fn test_get_and_set() {
        let mut img = Image::new(array![[1u8, 2], [3, 4]]);
        assert_eq!(img.get(&[1, 0]), Some(&3));
        assert_eq!(img.get(&[2, 0]), None);
        *img.get_mut(&[0, 1]).unwrap() = 9;
        assert_eq!(img.data()[[0, 1]], 9);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = rgb();
        let mut b = a.clone();
        b.properties_mut().insert(keys::COLORSPACE, "HSV");
        b.data_mut()[[0, 0, 0]] = 200;
        assert_eq!(a.colorspace().unwrap(), "RGB");
        assert_eq!(a.data()[[0, 0, 0]], 0);
        assert_eq!(b.colorspace().unwrap(), "HSV");
    }

    #[test]
    fn test_copy_with() {
        let a = rgb();
        let mut b = a.copy_with(Array3::<f32>::ones((4, 5, 3)));
        assert_eq!(b.colordim().unwrap(), Some(2));
        b.properties_mut().set_axis(keys::COLORDIM, None);
        assert_eq!(a.colordim().unwrap(), Some(2));
    }

    #[test]
    fn test_similar() {
        let a = rgb();
        let s = a.similar();
        assert_eq!(s.shape(), a.shape());
        assert_eq!(s.colorspace().unwrap(), "RGB");

        let f = a.similar_with::<f64>(Some(&[2, 2, 3]));
        assert_eq!(f.shape(), &[2, 2, 3]);
        assert_eq!(f.element_kind(), ElementKind::F64);
        assert_eq!(f.limits().unwrap(), (0.0, 1.0));
    }

    #[test]
    fn test_view_preserves_properties() {
        let a = rgb();
        let v = a.view();
        assert_eq!(v.colordim().unwrap(), Some(2));
        assert_eq!(v.colorspace().unwrap(), "RGB");
        let owned = v.to_owned();
        assert_eq!(owned.shape(), a.shape());
    }

    #[test]
    fn test_min_max() {
        let img = Image::new(array![[3i16, -2], [7, 0]]);
        assert_eq!(img.min(), Some(-2));
        assert_eq!(img.max(), Some(7));
        let empty = Image::new(Array2::<u8>::zeros((0, 3)));
        assert_eq!(empty.min(), None);
    }

    #[test]
    fn test_map_pixels() {
        let img = rgb();
        let f = img.map_pixels(|&v| v as f32 / 255.0);
        assert_eq!(f.element_kind(), ElementKind::F32);
        assert_eq!(f.colorspace().unwrap(), "RGB");
    }
}
