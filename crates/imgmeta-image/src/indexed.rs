//! Indexed (colormapped) images.
//!
//! An [`IndexedImage`] stores lookup keys instead of pixel values. Each key is
//! a 0-based row of the colormap; the row holds the pixel's channel values.
//!
//! ```text
//! index (h, w)          cmap (entries, channels)       direct (h, w, channels)
//! [[0, 2],        +     [[0.0, 0.0, 0.0],        ->    [[[0,0,0], [1,1,1]],
//!  [1, 1]]               [0.5, 0.5, 0.5],               [[.5,.5,.5], [.5,.5,.5]]]
//!                        [1.0, 1.0, 1.0]]
//! ```
//!
//! Keys are not validated on construction. A key outside the colormap
//! surfaces as [`Error::InvalidColormapIndex`] from [`IndexedImage::to_direct`].
//!
//! # Dimension Semantics
//!
//! Indexed images never have a color axis: `colordim` is always none, even
//! though the expanded image may have one. `limits` falls back to the
//! smallest and largest colormap value, computed on demand.
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_image::{DimSemantics, IndexedImage};
//! use ndarray::array;
//!
//! let idx = IndexedImage::new(
//!     array![[0u8, 1], [1, 0]],
//!     array![[0.0f32, 0.0, 0.0], [1.0, 0.5, 0.25]],
//! );
//! assert_eq!(idx.colordim().unwrap(), None);
//! assert_eq!(idx.limits().unwrap(), (0.0, 1.0));
//!
//! let rgb = idx.to_direct().unwrap();
//! assert_eq!(rgb.shape(), &[2, 2, 3]);
//! assert_eq!(rgb.colordim().unwrap(), Some(2));
//! ```

use crate::image::Image;
use crate::semantics::DimSemantics;
use imgmeta_core::{Element, ElementKind, Error, IndexElement, Properties, Result, keys};
use ndarray::{Array, Array2, ArrayD, Dimension, IxDyn};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Image whose elements are row indices into a colormap.
#[derive(Debug, Clone)]
pub struct IndexedImage<I, C> {
    pub(crate) index: ArrayD<I>,
    pub(crate) cmap: Array2<C>,
    pub(crate) properties: Properties,
}

impl<I, C> IndexedImage<I, C> {
    /// Pairs an index array with a colormap (rows = entries, columns = channels).
    pub fn new<D: Dimension>(index: Array<I, D>, cmap: Array2<C>) -> Self {
        Self::with_properties(index, cmap, Properties::new())
    }

    /// Like [`new`](Self::new), with an initial property store.
    pub fn with_properties<D: Dimension>(
        index: Array<I, D>,
        cmap: Array2<C>,
        properties: Properties,
    ) -> Self {
        Self {
            index: index.into_dyn(),
            cmap,
            properties,
        }
    }

    /// The index array.
    #[inline]
    pub fn index(&self) -> &ArrayD<I> {
        &self.index
    }

    /// Mutable access to the index array.
    #[inline]
    pub fn index_mut(&mut self) -> &mut ArrayD<I> {
        &mut self.index
    }

    /// The colormap.
    #[inline]
    pub fn cmap(&self) -> &Array2<C> {
        &self.cmap
    }

    /// Number of colormap entries.
    #[inline]
    pub fn ncolors(&self) -> usize {
        self.cmap.nrows()
    }

    /// Number of channels per colormap entry.
    #[inline]
    pub fn nchannels(&self) -> usize {
        self.cmap.ncols()
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

    /// Shape of the index array.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.index.shape()
    }

    /// Number of dimensions of the index array.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.index.ndim()
    }

    /// Always `false`: pixels go through the colormap.
    #[inline]
    pub const fn is_direct(&self) -> bool {
        false
    }

    /// Splits into index array, colormap and properties.
    pub fn into_parts(self) -> (ArrayD<I>, Array2<C>, Properties) {
        (self.index, self.cmap, self.properties)
    }
}

impl<I, C: Clone> IndexedImage<I, C> {
    /// New indexed image with `index` as keys, a copy of the colormap and a
    /// copy of these properties.
    pub fn copy_with<J, D: Dimension>(&self, index: Array<J, D>) -> IndexedImage<J, C> {
        IndexedImage::with_properties(index, self.cmap.clone(), self.properties.clone())
    }

    /// Same shape, key type, colormap and properties; keys reset to
    /// `I::default()`.
    pub fn similar(&self) -> IndexedImage<I, C>
    where
        I: Element,
    {
        self.similar_with(None)
    }

    /// Freshly allocated keys of another type and/or shape, sharing a copy of
    /// the colormap and properties.
    pub fn similar_with<J: Element>(&self, shape: Option<&[usize]>) -> IndexedImage<J, C> {
        let shape = shape.unwrap_or(self.index.shape());
        trace!(?shape, key = %J::KIND, "similar_indexed");
        self.copy_with(ArrayD::from_elem(IxDyn(shape), J::default()))
    }
}

impl<I, C> IndexedImage<I, C>
where
    I: IndexElement,
    C: Element,
{
    /// Expands the colormap into a direct image.
    ///
    /// With a single colormap column the result has the shape of the index
    /// array and carries no `colordim`, even if one was stored on the indexed
    /// image. With `k > 1` columns a trailing color axis of length `k` is
    /// appended and `colordim` is set to it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidColormapIndex`] if a key is negative or not a row
    /// - [`Error::Unsupported`] if the colormap has no columns
    pub fn to_direct(&self) -> Result<Image<C>> {
        let (nentries, nchan) = self.cmap.dim();
        trace!(shape = ?self.index.shape(), nentries, nchan, "to_direct");
        if nchan == 0 {
            return Err(Error::unsupported("colormap with zero channels"));
        }

        let entries: Vec<I> = self.index.iter().copied().collect();
        let mut out = vec![C::default(); entries.len() * nchan];
        expand(&entries, &self.cmap, &mut out)?;

        let mut shape = self.index.shape().to_vec();
        let mut properties = self.properties.clone();
        if nchan > 1 {
            debug!(axis = shape.len(), nchan, "appending color axis");
            properties.set_axis(keys::COLORDIM, Some(shape.len()));
            shape.push(nchan);
        } else {
            properties.remove(keys::COLORDIM);
        }
        let data = ArrayD::from_shape_vec(IxDyn(&shape), out)
            .map_err(|e| Error::unsupported(format!("colormap expansion: {e}")))?;
        Ok(Image::with_properties(data, properties))
    }
}

/// Row of `cmap` addressed by `key`.
#[inline]
fn lookup<I: IndexElement>(key: I, nentries: usize) -> Result<usize> {
    key.to_index()
        .filter(|&row| row < nentries)
        .ok_or_else(|| Error::InvalidColormapIndex {
            index: key.to_i128(),
            len: nentries,
        })
}

#[cfg(feature = "parallel")]
fn expand<I: IndexElement, C: Element>(entries: &[I], cmap: &Array2<C>, out: &mut [C]) -> Result<()> {
    let nentries = cmap.nrows();
    out.par_chunks_mut(cmap.ncols())
        .zip(entries.par_iter())
        .try_for_each(|(px, &key)| {
            let row = lookup(key, nentries)?;
            for (dst, &src) in px.iter_mut().zip(cmap.row(row)) {
                *dst = src;
            }
            Ok(())
        })
}

#[cfg(not(feature = "parallel"))]
fn expand<I: IndexElement, C: Element>(entries: &[I], cmap: &Array2<C>, out: &mut [C]) -> Result<()> {
    let nentries = cmap.nrows();
    for (px, &key) in out.chunks_mut(cmap.ncols()).zip(entries) {
        let row = lookup(key, nentries)?;
        for (dst, &src) in px.iter_mut().zip(cmap.row(row)) {
            *dst = src;
        }
    }
    Ok(())
}

impl<I, C> DimSemantics for IndexedImage<I, C>
where
    I: Element,
    C: Element,
{
    fn shape(&self) -> &[usize] {
        self.index.shape()
    }

    /// Element type of the pixels, i.e. of the colormap.
    fn element_kind(&self) -> ElementKind {
        C::KIND
    }

    fn property_store(&self) -> Option<&Properties> {
        Some(&self.properties)
    }

    fn colordim(&self) -> Result<Option<usize>> {
        Ok(None)
    }

    fn limits(&self) -> Result<(f64, f64)> {
        if let Some(limits) = self.properties.limits()? {
            return Ok(limits);
        }
        let range = self.cmap.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
            let v = v.to_f64();
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        });
        Ok(range.unwrap_or_else(|| C::KIND.default_limits()))
    }
}
