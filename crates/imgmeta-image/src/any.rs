//! Closed set of image kinds.
//!
//! [`AnyImage`] holds either a direct or an indexed image with the same pixel
//! type. Code that must accept both without being generic can take an
//! `AnyImage`; code that only needs axis semantics should be generic over
//! [`DimSemantics`] instead.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_image::{AnyImage, DimSemantics, Image, IndexedImage};
//! use ndarray::{Array2, array};
//!
//! let images: Vec<AnyImage<f32>> = vec![
//!     Image::new(Array2::<f32>::zeros((4, 4))).into(),
//!     IndexedImage::new(array![[0usize, 1]], array![[0.0f32], [1.0]]).into(),
//! ];
//! for img in &images {
//!     assert_eq!(img.sdims().unwrap(), 2);
//!     let direct = img.to_direct().unwrap();
//!     assert!(direct.is_direct());
//! }
//! assert!(images[1].min().is_err());
//! ```

use crate::image::Image;
use crate::indexed::IndexedImage;
use crate::semantics::DimSemantics;
use imgmeta_core::{Element, ElementKind, Error, IndexElement, Properties, Result};
use std::fmt;

/// Direct or indexed image with pixel type `T` (and key type `I`).
#[derive(Debug, Clone)]
pub enum AnyImage<T, I = usize> {
    /// Pixels stored directly.
    Direct(Image<T>),
    /// Pixels looked up through a colormap.
    Indexed(IndexedImage<I, T>),
}

impl<T, I> AnyImage<T, I> {
    /// `true` for [`AnyImage::Direct`].
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct(_))
    }

    /// The property store of either variant.
    pub fn properties(&self) -> &Properties {
        match self {
            Self::Direct(img) => img.properties(),
            Self::Indexed(img) => img.properties(),
        }
    }

    /// Mutable access to the property store of either variant.
    pub fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Self::Direct(img) => img.properties_mut(),
            Self::Indexed(img) => img.properties_mut(),
        }
    }
}

impl<T, I> AnyImage<T, I>
where
    T: Element,
    I: Element,
{
    /// Smallest pixel value.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for indexed images.
    pub fn min(&self) -> Result<Option<T>> {
        match self {
            Self::Direct(img) => Ok(img.min()),
            Self::Indexed(_) => Err(Error::unsupported("min of an indexed image")),
        }
    }

    /// Largest pixel value.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for indexed images.
    pub fn max(&self) -> Result<Option<T>> {
        match self {
            Self::Direct(img) => Ok(img.max()),
            Self::Indexed(_) => Err(Error::unsupported("max of an indexed image")),
        }
    }

    /// Permutes the axes of either variant; see [`Image::permutedims`].
    pub fn permutedims(&self, perm: &[usize]) -> Result<Self> {
        Ok(match self {
            Self::Direct(img) => Self::Direct(img.permutedims(perm)?),
            Self::Indexed(img) => Self::Indexed(img.permutedims(perm)?),
        })
    }
}

impl<T, I> AnyImage<T, I>
where
    T: Element,
    I: IndexElement,
{
    /// Direct image: a copy for the direct variant, the expanded colormap
    /// for the indexed one.
    pub fn to_direct(&self) -> Result<Image<T>> {
        match self {
            Self::Direct(img) => Ok(img.clone()),
            Self::Indexed(img) => img.to_direct(),
        }
    }

    /// Consumes the image, expanding it if indexed.
    pub fn into_direct(self) -> Result<Image<T>> {
        match self {
            Self::Direct(img) => Ok(img),
            Self::Indexed(img) => img.to_direct(),
        }
    }
}

impl<T, I> DimSemantics for AnyImage<T, I>
where
    T: Element,
    I: Element,
{
    fn shape(&self) -> &[usize] {
        match self {
            Self::Direct(img) => img.shape(),
            Self::Indexed(img) => img.shape(),
        }
    }

    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn property_store(&self) -> Option<&Properties> {
        Some(self.properties())
    }

    fn colordim(&self) -> Result<Option<usize>> {
        match self {
            Self::Direct(img) => img.colordim(),
            Self::Indexed(img) => img.colordim(),
        }
    }

    fn limits(&self) -> Result<(f64, f64)> {
        match self {
            Self::Direct(img) => img.limits(),
            Self::Indexed(img) => img.limits(),
        }
    }
}

impl<T: Element, I: Element> fmt::Display for AnyImage<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(img) => fmt::Display::fmt(img, f),
            Self::Indexed(img) => fmt::Display::fmt(img, f),
        }
    }
}

impl<T, I> From<Image<T>> for AnyImage<T, I> {
    fn from(img: Image<T>) -> Self {
        Self::Direct(img)
    }
}

impl<T, I> From<IndexedImage<I, T>> for AnyImage<T, I> {
    fn from(img: IndexedImage<I, T>) -> Self {
        Self::Indexed(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgmeta_core::keys;
    use ndarray::{Array3, array};

    fn indexed() -> AnyImage<u8, u16> {
        IndexedImage::new(array![[0u16, 1], [1, 1]], array![[0u8, 0, 0], [200, 100, 50]]).into()
    }

    #[test]
    fn test_min_max() {
        let direct: AnyImage<u8, u16> = Image::new(array![[3u8, 9], [1, 4]]).into();
        assert_eq!(direct.min().unwrap(), Some(1));
        assert_eq!(direct.max().unwrap(), Some(9));

        let idx = indexed();
        assert!(matches!(idx.min(), Err(Error::Unsupported(_))));
        assert!(matches!(idx.max(), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_semantics_delegate() {
        let mut direct: AnyImage<u8> = Image::new(Array3::<u8>::zeros((4, 5, 3))).into();
        direct.properties_mut().set_axis(keys::COLORDIM, Some(2));
        assert_eq!(direct.colordim().unwrap(), Some(2));
        assert_eq!(direct.sdims().unwrap(), 2);
        assert!(direct.is_direct());

        let idx = indexed();
        assert!(!idx.is_direct());
        assert_eq!(idx.colordim().unwrap(), None);
        assert_eq!(idx.limits().unwrap(), (0.0, 200.0));
        assert_eq!(idx.widthheight().unwrap(), (2, 2));
    }

    #[test]
    fn test_to_direct() {
        let rgb = indexed().into_direct().unwrap();
        assert_eq!(rgb.shape(), &[2, 2, 3]);
        assert_eq!(rgb.data()[[1, 0, 1]], 100);
        assert_eq!(rgb.colordim().unwrap(), Some(2));
    }

    #[test]
    fn test_permute_keeps_variant() {
        let p = indexed().permutedims(&[1, 0]).unwrap();
        assert!(matches!(p, AnyImage::Indexed(_)));
        assert!(p.to_string().contains("IndexedImage"));
    }
}
