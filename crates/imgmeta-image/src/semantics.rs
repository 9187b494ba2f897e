//! Dimension semantics resolver.
//!
//! [`DimSemantics`] answers "what do the axes of this thing mean?" for bare
//! arrays and images alike. Every accessor reads the property store first and
//! falls back to a default when the key is absent:
//!
//! | accessor | image default | bare-array default |
//! |---|---|---|
//! | `colorspace` | `"Unknown"` | inferred from shape and element type |
//! | `colordim` | none | inferred from shape |
//! | `timedim` | none | none |
//! | `limits` | element-type range | element-type range |
//! | `pixelspacing` | `sdims` ones | inferred from shape |
//! | `spatialorder` | `None` | `["y", "x"]` for recognized shapes |
//!
//! Bare-array inference is implemented once, in [`crate::bare`]. Indexed
//! images override `colordim` and `limits` (see [`crate::indexed`]).
//!
//! # Example
//!
//! ```rust
//! use imgmeta_core::keys;
//! use imgmeta_image::{DimSemantics, Image};
//! use ndarray::ArrayD;
//!
//! let mut img = Image::new(ArrayD::<f32>::zeros(vec![4, 6, 3, 10]));
//! img.properties_mut().set_axis(keys::COLORDIM, Some(2));
//! img.properties_mut().set_axis(keys::TIMEDIM, Some(3));
//!
//! assert_eq!(img.sdims().unwrap(), 2);
//! assert_eq!(img.nimages().unwrap(), 10);
//! assert_eq!(img.coords_spatial().unwrap(), vec![0, 1]);
//! assert_eq!(img.widthheight().unwrap(), (6, 4));
//! ```

use imgmeta_core::{
    ElementKind, Error, PropValue, Properties, Result, default_permutation, keys,
};

/// Canonical storage order of the two spatial axes: rows (`y`) then columns (`x`).
pub const CANONICAL_ORDER: [&str; 2] = ["y", "x"];

/// Label order used by [`DimSemantics::widthheight`].
pub const XY: [&str; 2] = ["x", "y"];

/// Reads a declared property, `None` for operands without a store.
fn declared<'a, T>(
    props: Option<&'a Properties>,
    read: impl FnOnce(&'a Properties) -> Result<Option<T>>,
) -> Result<Option<T>> {
    match props {
        Some(p) => read(p),
        None => Ok(None),
    }
}

/// Dimension semantics shared by bare arrays and images.
///
/// Implementors supply [`shape`](Self::shape), [`element_kind`](Self::element_kind)
/// and [`property_store`](Self::property_store); everything else has a default
/// implementation expressed in terms of those three.
///
/// All axis indices are 0-based; "no such axis" is `None`.
pub trait DimSemantics {
    /// Shape of the underlying array.
    fn shape(&self) -> &[usize];

    /// Element type of the underlying array.
    fn element_kind(&self) -> ElementKind;

    /// Property store, `None` for bare arrays.
    fn property_store(&self) -> Option<&Properties>;

    /// Number of dimensions.
    #[inline]
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns `true` if `key` is present. Always `false` for bare arrays.
    fn has(&self, key: &str) -> bool {
        self.property_store().is_some_and(|p| p.has(key))
    }

    /// Stored value of `key`, or `default`.
    fn get_or(&self, key: &str, default: PropValue) -> PropValue {
        match self.property_store() {
            Some(p) => p.get_or(key, default),
            None => default,
        }
    }

    /// Stored value of `key`; `default` only runs when the key is missing.
    fn get_or_else<F>(&self, key: &str, default: F) -> PropValue
    where
        F: FnOnce() -> PropValue,
        Self: Sized,
    {
        match self.property_store() {
            Some(p) => p.get_or_else(key, default),
            None => default(),
        }
    }

    /// Colorspace name.
    fn colorspace(&self) -> Result<String> {
        let cs = declared(self.property_store(), |p| p.colorspace())?;
        Ok(cs.unwrap_or("Unknown").to_string())
    }

    /// Color axis.
    fn colordim(&self) -> Result<Option<usize>> {
        declared(self.property_store(), |p| p.colordim())
    }

    /// Time axis.
    fn timedim(&self) -> Result<Option<usize>> {
        declared(self.property_store(), |p| p.timedim())
    }

    /// Value limits `(min, max)`.
    fn limits(&self) -> Result<(f64, f64)> {
        let limits = declared(self.property_store(), |p| p.limits())?;
        Ok(limits.unwrap_or_else(|| self.element_kind().default_limits()))
    }

    /// Spacing along each spatial axis.
    fn pixelspacing(&self) -> Result<Vec<f64>> {
        match declared(self.property_store(), |p| p.pixelspacing())? {
            Some(spacing) => Ok(spacing),
            None => Ok(vec![1.0; self.sdims()?]),
        }
    }

    /// Label of each spatial axis in storage order, `None` if undeclared.
    fn spatialorder(&self) -> Result<Option<Vec<String>>> {
        declared(self.property_store(), |p| p.spatialorder().map(|o| o.map(<[String]>::to_vec)))
    }

    /// Color and time axes, checked against the array rank.
    fn semantic_axes(&self) -> Result<(Option<usize>, Option<usize>)> {
        let n = self.ndim();
        let cd = self.colordim()?;
        let td = self.timedim()?;
        for (name, axis) in [(keys::COLORDIM, cd), (keys::TIMEDIM, td)] {
            if let Some(a) = axis.filter(|&a| a >= n) {
                return Err(Error::invalid_property(
                    name,
                    format!("axis {} out of range for {n}-dimensional data", a + 1),
                ));
            }
        }
        if cd.is_some() && cd == td {
            return Err(Error::invalid_property(
                keys::TIMEDIM,
                "time axis coincides with the color axis",
            ));
        }
        Ok((cd, td))
    }

    /// Number of spatial dimensions.
    fn sdims(&self) -> Result<usize> {
        let (cd, td) = self.semantic_axes()?;
        Ok(self.ndim() - usize::from(cd.is_some()) - usize::from(td.is_some()))
    }

    /// Number of frames along the time axis (1 without one).
    fn nimages(&self) -> Result<usize> {
        let (_, td) = self.semantic_axes()?;
        Ok(td.map_or(1, |t| self.shape()[t]))
    }

    /// Number of color channels (1 without a color axis).
    fn ncolorelem(&self) -> Result<usize> {
        let (cd, _) = self.semantic_axes()?;
        Ok(cd.map_or(1, |c| self.shape()[c]))
    }

    /// Spatial axes in ascending order.
    fn coords_spatial(&self) -> Result<Vec<usize>> {
        let (cd, td) = self.semantic_axes()?;
        Ok((0..self.ndim())
            .filter(|&a| Some(a) != cd && Some(a) != td)
            .collect())
    }

    /// Shape restricted to [`coords_spatial`](Self::coords_spatial).
    fn size_spatial(&self) -> Result<Vec<usize>> {
        let shape = self.shape();
        Ok(self.coords_spatial()?.into_iter().map(|a| shape[a]).collect())
    }

    /// Spatial property names present on this operand.
    fn spatial_properties(&self) -> Vec<&'static str> {
        keys::SPATIAL.into_iter().filter(|k| self.has(k)).collect()
    }

    /// Permutation of the spatial axes that brings them into `target` order.
    ///
    /// Entry `k` is the position, within [`coords_spatial`](Self::coords_spatial),
    /// of the axis labelled `target[k]`. Without a declared order, two spatial
    /// axes are assumed to be in [`CANONICAL_ORDER`].
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousSpatialOrder`] when no order is declared and the
    /// operand does not have exactly two spatial dimensions.
    fn spatialpermutation<L: AsRef<str>>(&self, target: &[L]) -> Result<Vec<usize>>
    where
        Self: Sized,
    {
        if let Some(order) = declared(self.property_store(), |p| p.spatialorder())? {
            return Ok(default_permutation(target, order));
        }
        match self.sdims()? {
            2 => Ok(default_permutation(target, &CANONICAL_ORDER)),
            sdims => Err(Error::AmbiguousSpatialOrder { sdims }),
        }
    }

    /// `(width, height)` using a spatial permutation against [`XY`].
    fn widthheight_with(&self, perm: &[usize]) -> Result<(usize, usize)> {
        let coords = self.coords_spatial()?;
        let axis = |k: usize| {
            perm.get(k)
                .and_then(|&p| coords.get(p))
                .copied()
                .ok_or_else(|| {
                    Error::invalid_permutation(format!(
                        "{perm:?} does not address x/y among {} spatial axes",
                        coords.len()
                    ))
                })
        };
        let shape = self.shape();
        Ok((shape[axis(0)?], shape[axis(1)?]))
    }

    /// `(width, height)`: sizes along the `x` and `y` axes.
    fn widthheight(&self) -> Result<(usize, usize)>
    where
        Self: Sized,
    {
        let perm = self.spatialpermutation(&XY)?;
        self.widthheight_with(&perm)
    }
}
