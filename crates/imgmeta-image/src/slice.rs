//! Region access: slicing and indexing.
//!
//! Two flavours, mirroring the element accessors of [`ImageBase`]:
//!
//! - raw: [`ImageBase::slice_array`] returns a plain array view, no metadata
//! - metadata-preserving: [`ImageBase::slice_im`] (view) and
//!   [`ImageBase::index_im`] (copy) return images whose properties are
//!   adjusted for the axes that were dropped
//!
//! Slice descriptors are `ndarray`'s [`SliceInfoElem`], so the `s!` macro
//! works directly. One descriptor per axis is required; inserting axes is not
//! supported.
//!
//! # Property Adjustment
//!
//! | situation | effect |
//! |---|---|
//! | color axis indexed away | `colordim` removed, `colorspace = "Unknown"` |
//! | color axis partially sliced | `colordim` renumbered, `colorspace = "channels"` |
//! | time axis indexed away | `timedim` removed |
//! | any axis indexed away | later `colordim`/`timedim` renumbered |
//! | spatial axis indexed away | its entry removed from every spatial property |
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::keys;
//! use imgmeta_image::{DimSemantics, Image};
//! use ndarray::{Array3, s};
//!
//! let mut img = Image::new(Array3::<u8>::zeros((4, 5, 3)));
//! img.properties_mut().insert(keys::COLORSPACE, "RGB");
//! img.properties_mut().set_axis(keys::COLORDIM, Some(2));
//!
//! let red = img.index_im(s![.., .., 0]).unwrap();
//! assert_eq!(red.shape(), &[4, 5]);
//! assert_eq!(red.colordim().unwrap(), None);
//! assert_eq!(red.colorspace().unwrap(), "Unknown");
//!
//! let crop = img.slice_im(s![1..3, .., ..]).unwrap();
//! assert_eq!(crop.shape(), &[2, 5, 3]);
//! assert_eq!(crop.colorspace().unwrap(), "RGB");
//! ```

use crate::image::{Image, ImageBase, ImageView};
use crate::indexed::IndexedImage;
use crate::semantics::DimSemantics;
use imgmeta_core::{Element, Error, Properties, Result, keys};
use ndarray::{ArrayViewD, Data, SliceInfoElem};
use tracing::{debug, trace};

/// Resolves a possibly negative index against an axis of length `len`.
#[inline]
fn resolve(index: isize, len: usize) -> Option<usize> {
    let abs = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    Some(abs)
}

/// Validates `info` against `shape`, returning the axes that survive.
///
/// Everything `ndarray` would panic on is reported as an error instead.
fn surviving_axes(shape: &[usize], info: &[SliceInfoElem]) -> Result<Vec<usize>> {
    if info.iter().any(|e| matches!(e, SliceInfoElem::NewAxis)) {
        return Err(Error::unsupported("inserting new axes while slicing an image"));
    }
    if info.len() != shape.len() {
        return Err(Error::dimension_mismatch(shape.len(), info.len()));
    }

    let mut keep = Vec::with_capacity(shape.len());
    for (axis, (elem, &len)) in info.iter().zip(shape).enumerate() {
        match *elem {
            SliceInfoElem::Index(i) => {
                if !resolve(i, len).is_some_and(|a| a < len) {
                    return Err(Error::OutOfBounds { index: i, axis, len });
                }
            }
            SliceInfoElem::Slice { start, end, step } => {
                if step == 0 {
                    return Err(Error::unsupported("slice step of zero"));
                }
                for bound in std::iter::once(start).chain(end) {
                    if !resolve(bound, len).is_some_and(|a| a <= len) {
                        return Err(Error::OutOfBounds { index: bound, axis, len });
                    }
                }
                keep.push(axis);
            }
            SliceInfoElem::NewAxis => {}
        }
    }
    Ok(keep)
}

/// Properties of `src` after keeping only the axes in `keep`.
///
/// `new_shape` is the shape of the sliced data, one entry per kept axis.
fn sliced_properties<T: DimSemantics>(
    src: &T,
    props: &Properties,
    keep: &[usize],
    new_shape: &[usize],
) -> Result<Properties> {
    let (cd, td) = src.semantic_axes()?;
    let old_spatial = src.coords_spatial()?;
    let new_pos = |axis: usize| keep.iter().position(|&k| k == axis);

    let mut out = props.clone();
    if let Some(c) = cd {
        match new_pos(c) {
            Some(p) => {
                out.set_axis(keys::COLORDIM, Some(p));
                if new_shape[p] != src.shape()[c] {
                    debug!(channels = new_shape[p], "partial channel range");
                    out.insert(keys::COLORSPACE, "channels");
                }
            }
            None => {
                debug!(axis = c, "color axis dropped");
                out.remove(keys::COLORDIM);
                out.insert(keys::COLORSPACE, "Unknown");
            }
        }
    }
    if let Some(t) = td {
        match new_pos(t) {
            Some(p) => out.set_axis(keys::TIMEDIM, Some(p)),
            None => {
                out.remove(keys::TIMEDIM);
            }
        }
    }

    let order: Vec<usize> = old_spatial
        .iter()
        .enumerate()
        .filter(|&(_, a)| keep.contains(a))
        .map(|(i, _)| i)
        .collect();
    if order.len() != old_spatial.len() {
        for name in src.spatial_properties() {
            let Some(value) = props.get(name) else {
                continue;
            };
            let kept = value
                .select_axes(&order, old_spatial.len())
                .ok_or_else(|| Error::unsupported_property(name))?;
            out.insert(name, kept);
        }
    }
    Ok(out)
}

/// Descriptor selecting frame `t` along `timedim` and everything else.
fn frame_info(ndim: usize, timedim: usize, t: usize) -> Vec<SliceInfoElem> {
    (0..ndim)
        .map(|axis| {
            if axis == timedim {
                SliceInfoElem::Index(t as isize)
            } else {
                SliceInfoElem::from(..)
            }
        })
        .collect()
}

impl<A, S> ImageBase<S>
where
    S: Data<Elem = A>,
    A: Element,
{
    /// Raw region access: a plain view of the selected region.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] unless there is one descriptor per axis
    /// - [`Error::OutOfBounds`] for an index or slice bound outside its axis
    /// - [`Error::Unsupported`] for new axes or a zero step
    pub fn slice_array<I>(&self, info: I) -> Result<ArrayViewD<'_, A>>
    where
        I: AsRef<[SliceInfoElem]>,
    {
        let info = info.as_ref();
        surviving_axes(self.shape(), info)?;
        Ok(self.data.slice(info))
    }

    /// Metadata-preserving view of the selected region.
    ///
    /// Same errors as [`slice_array`](Self::slice_array), plus
    /// [`Error::UnsupportedProperty`] if a spatial property cannot lose the
    /// entries of dropped axes.
    pub fn slice_im<I>(&self, info: I) -> Result<ImageView<'_, A>>
    where
        I: AsRef<[SliceInfoElem]>,
    {
        let info = info.as_ref();
        trace!(shape = ?self.shape(), ?info, "slice_im");
        let keep = surviving_axes(self.shape(), info)?;
        let data = self.data.slice(info);
        let properties = sliced_properties(self, &self.properties, &keep, data.shape())?;
        Ok(ImageBase::with_properties(data, properties))
    }

    /// Metadata-preserving copy of the selected region.
    pub fn index_im<I>(&self, info: I) -> Result<Image<A>>
    where
        I: AsRef<[SliceInfoElem]>,
    {
        Ok(self.slice_im(info)?.to_owned())
    }

    /// Frame `t` of an image sequence, with the time axis removed.
    ///
    /// An image without a time axis has exactly one frame.
    pub fn frame(&self, t: usize) -> Result<Image<A>> {
        let (_, td) = self.semantic_axes()?;
        match td {
            Some(td) => {
                let len = self.shape()[td];
                if t >= len {
                    return Err(Error::OutOfBounds { index: t as isize, axis: td, len });
                }
                self.index_im(frame_info(self.ndim(), td, t))
            }
            None if t == 0 => Ok(self.to_owned()),
            None => Err(Error::unsupported(format!(
                "frame {t} of an image without a time axis"
            ))),
        }
    }
}

impl<I, C> IndexedImage<I, C>
where
    I: Element,
    C: Element,
{
    /// Raw view of the selected region of the index array.
    pub fn slice_array<T>(&self, info: T) -> Result<ArrayViewD<'_, I>>
    where
        T: AsRef<[SliceInfoElem]>,
    {
        let info = info.as_ref();
        surviving_axes(self.shape(), info)?;
        Ok(self.index.slice(info))
    }

    /// Indexed copy of the selected region, sharing a copy of the colormap.
    pub fn index_im<T>(&self, info: T) -> Result<IndexedImage<I, C>>
    where
        T: AsRef<[SliceInfoElem]>,
    {
        let info = info.as_ref();
        trace!(shape = ?self.shape(), ?info, "index_im_indexed");
        let keep = surviving_axes(self.shape(), info)?;
        let index = self.index.slice(info);
        let properties = sliced_properties(self, &self.properties, &keep, index.shape())?;
        Ok(IndexedImage::with_properties(
            index.to_owned(),
            self.cmap.clone(),
            properties,
        ))
    }

    /// Frame `t` along the time axis.
    pub fn frame(&self, t: usize) -> Result<IndexedImage<I, C>> {
        let (_, td) = self.semantic_axes()?;
        match td {
            Some(td) => {
                let len = self.shape()[td];
                if t >= len {
                    return Err(Error::OutOfBounds { index: t as isize, axis: td, len });
                }
                self.index_im(frame_info(self.ndim(), td, t))
            }
            None if t == 0 => Ok(self.clone()),
            None => Err(Error::unsupported(format!(
                "frame {t} of an image without a time axis"
            ))),
        }
    }
}
