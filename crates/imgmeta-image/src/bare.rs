//! Bare arrays treated as images.
//!
//! A plain array has no property store, so everything about its axes has to
//! be guessed from its shape and element type. [`Bare`] wraps an array view
//! and implements [`DimSemantics`] with those guesses; it is the only place
//! they are made.
//!
//! # Recognized Shapes
//!
//! | shape | colorspace | colordim | pixelspacing | spatialorder |
//! |---|---|---|---|---|
//! | any shape, `bool` | `"Binary"` | by shape | by shape | by shape |
//! | `(h, w)`, `i32`/`u32` | `"24bit"` | none | `[1, 1]` | `["y", "x"]` |
//! | `(h, w)` | `"Gray"` | none | `[1, 1]` | `["y", "x"]` |
//! | `(h, w, 3)` | `"RGB"` | axis 2 | `[1, 1]` | `["y", "x"]` |
//!
//! Any other shape is [`Error::Ambiguous`]: wrap the data in an
//! [`Image`](crate::Image) and declare its properties instead. Bare arrays
//! never have a time axis.
//!
//! # Example
//!
//! ```rust
//! use imgmeta_image::{AsBare, DimSemantics};
//! use ndarray::{Array2, Array3};
//!
//! let gray = Array2::<u8>::zeros((480, 640));
//! assert_eq!(gray.bare().colorspace().unwrap(), "Gray");
//! assert_eq!(gray.bare().limits().unwrap(), (0.0, 255.0));
//!
//! let rgb = Array3::<f32>::zeros((480, 640, 3));
//! assert_eq!(rgb.bare().colordim().unwrap(), Some(2));
//! assert_eq!(rgb.bare().widthheight().unwrap(), (640, 480));
//!
//! let volume = Array3::<f32>::zeros((64, 64, 64));
//! assert!(volume.bare().colorspace().is_err());
//! ```

use crate::semantics::{CANONICAL_ORDER, DimSemantics};
use imgmeta_core::{Element, ElementKind, Error, Properties, Result};
use ndarray::{ArrayBase, ArrayViewD, Data, Dimension};

/// Read-only adapter giving a bare array image semantics.
#[derive(Debug, Clone)]
pub struct Bare<'a, A> {
    view: ArrayViewD<'a, A>,
}

impl<'a, A: Element> Bare<'a, A> {
    /// Wraps an array of any dimensionality.
    pub fn new<S, D>(array: &'a ArrayBase<S, D>) -> Self
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        Self {
            view: array.view().into_dyn(),
        }
    }

    /// Wraps an existing dynamic view.
    pub fn from_view(view: ArrayViewD<'a, A>) -> Self {
        Self { view }
    }

    /// The wrapped view.
    pub fn view(&self) -> &ArrayViewD<'a, A> {
        &self.view
    }

    /// Shape has a trailing RGB axis: `(h, w, 3)`.
    fn is_rgb_shape(&self) -> bool {
        matches!(self.view.shape(), [_, _, 3])
    }
}

impl<A: Element> DimSemantics for Bare<'_, A> {
    fn shape(&self) -> &[usize] {
        self.view.shape()
    }

    fn element_kind(&self) -> ElementKind {
        A::KIND
    }

    fn property_store(&self) -> Option<&Properties> {
        None
    }

    fn colorspace(&self) -> Result<String> {
        if A::KIND.is_bool() {
            return Ok("Binary".to_string());
        }
        let cs = match self.ndim() {
            2 if matches!(A::KIND, ElementKind::I32 | ElementKind::U32) => "24bit",
            2 => "Gray",
            3 if self.is_rgb_shape() => "RGB",
            _ => return Err(Error::ambiguous("colorspace", self.shape())),
        };
        Ok(cs.to_string())
    }

    fn colordim(&self) -> Result<Option<usize>> {
        match self.ndim() {
            2 => Ok(None),
            3 if self.is_rgb_shape() => Ok(Some(2)),
            _ => Err(Error::ambiguous("colordim", self.shape())),
        }
    }

    fn pixelspacing(&self) -> Result<Vec<f64>> {
        if self.ndim() == 2 || self.is_rgb_shape() {
            Ok(vec![1.0, 1.0])
        } else {
            Err(Error::ambiguous("pixelspacing", self.shape()))
        }
    }

    fn spatialorder(&self) -> Result<Option<Vec<String>>> {
        match self.ndim() {
            0 | 1 => Err(Error::WrongSpatialDims { ndim: self.ndim() }),
            2 => Ok(Some(CANONICAL_ORDER.map(String::from).to_vec())),
            3 if self.is_rgb_shape() => Ok(Some(CANONICAL_ORDER.map(String::from).to_vec())),
            _ => Err(Error::ambiguous("spatialorder", self.shape())),
        }
    }
}

/// Extension trait: `array.bare()` instead of `Bare::new(&array)`.
pub trait AsBare<A> {
    /// Views this array as a bare image.
    fn bare(&self) -> Bare<'_, A>;
}

impl<A, S, D> AsBare<A> for ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn bare(&self) -> Bare<'_, A> {
        Bare::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgmeta_core::PropValue;
    use ndarray::{Array1, Array2, Array3, ArrayD};

    #[test]
    fn test_colorspace_inference() {
        assert_eq!(Array2::<bool>::default((4, 4)).bare().colorspace().unwrap(), "Binary");
        assert_eq!(Array3::<bool>::default((4, 4, 7)).bare().colorspace().unwrap(), "Binary");
        assert_eq!(Array2::<u32>::zeros((4, 4)).bare().colorspace().unwrap(), "24bit");
        assert_eq!(Array2::<i32>::zeros((4, 4)).bare().colorspace().unwrap(), "24bit");
        assert_eq!(Array2::<u16>::zeros((4, 4)).bare().colorspace().unwrap(), "Gray");
        assert_eq!(Array3::<u8>::zeros((4, 4, 3)).bare().colorspace().unwrap(), "RGB");

        let err = Array3::<u8>::zeros((4, 4, 4)).bare().colorspace().unwrap_err();
        assert!(matches!(err, Error::Ambiguous { what: "colorspace", .. }));
    }

    #[test]
    fn test_colordim_inference() {
        assert_eq!(Array2::<u8>::zeros((4, 5)).bare().colordim().unwrap(), None);
        assert_eq!(Array3::<u8>::zeros((4, 5, 3)).bare().colordim().unwrap(), Some(2));
        assert!(Array3::<u8>::zeros((3, 4, 5)).bare().colordim().is_err());
        assert!(ArrayD::<u8>::zeros(vec![2, 3, 4, 3]).bare().colordim().is_err());
        assert_eq!(Array3::<u8>::zeros((4, 5, 3)).bare().timedim().unwrap(), None);
    }

    #[test]
    fn test_sdims_and_coords() {
        let rgb = Array3::<u8>::zeros((4, 5, 3));
        assert_eq!(rgb.bare().sdims().unwrap(), 2);
        assert_eq!(rgb.bare().coords_spatial().unwrap(), vec![0, 1]);
        assert_eq!(rgb.bare().size_spatial().unwrap(), vec![4, 5]);
        assert_eq!(rgb.bare().ncolorelem().unwrap(), 3);
    }

    #[test]
    fn test_limits_by_element_type() {
        assert_eq!(Array2::<bool>::default((2, 2)).bare().limits().unwrap(), (0.0, 1.0));
        assert_eq!(Array2::<u8>::zeros((2, 2)).bare().limits().unwrap(), (0.0, 255.0));
        assert_eq!(Array2::<i16>::zeros((2, 2)).bare().limits().unwrap(), (-32768.0, 32767.0));
        assert_eq!(Array2::<f64>::zeros((2, 2)).bare().limits().unwrap(), (0.0, 1.0));
    }

    #[test]
    fn test_pixelspacing_and_order() {
        let gray = Array2::<u8>::zeros((2, 3));
        assert_eq!(gray.bare().pixelspacing().unwrap(), vec![1.0, 1.0]);
        assert_eq!(
            gray.bare().spatialorder().unwrap(),
            Some(vec!["y".to_string(), "x".to_string()])
        );

        let rgb = Array3::<u8>::zeros((2, 3, 3));
        assert_eq!(rgb.bare().pixelspacing().unwrap(), vec![1.0, 1.0]);

        let vol = ArrayD::<u8>::zeros(vec![2, 3, 4, 5]);
        assert!(vol.bare().pixelspacing().unwrap_err().is_ambiguity_error());
        assert!(vol.bare().spatialorder().unwrap_err().is_ambiguity_error());

        let line = Array1::<u8>::zeros(8);
        assert_eq!(
            line.bare().spatialorder().unwrap_err(),
            Error::WrongSpatialDims { ndim: 1 }
        );
    }

    #[test]
    fn test_no_properties() {
        let gray = Array2::<u8>::zeros((2, 3));
        assert!(!gray.bare().has("colorspace"));
        assert_eq!(gray.bare().get_or("colorspace", "X".into()), PropValue::from("X"));
        assert!(gray.bare().spatial_properties().is_empty());
    }

    #[test]
    fn test_widthheight() {
        let gray = Array2::<u8>::zeros((2, 3));
        assert_eq!(gray.bare().widthheight().unwrap(), (3, 2));
    }
}
