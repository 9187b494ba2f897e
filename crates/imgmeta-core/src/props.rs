//! Per-image property store.
//!
//! This module provides [`Properties`] - the loosely typed key/value bag that
//! gives an array's axes their meaning - and [`PropValue`], the closed set of
//! value kinds a property can hold.
//!
//! # Overview
//!
//! The store performs no validation of key names or value kinds. Recognized
//! keys (see [`keys`]) are only interpreted when read through the typed
//! helpers, which report a mismatched kind as [`Error::InvalidProperty`].
//!
//! ```rust
//! use imgmeta_core::{PropValue, Properties, keys};
//!
//! let mut props = Properties::new();
//! props.insert(keys::COLORSPACE, "RGB");
//! props.set_axis(keys::COLORDIM, Some(2));
//! props.insert(keys::SPATIALORDER, vec!["x", "y"]);
//!
//! assert_eq!(props.colorspace().unwrap(), Some("RGB"));
//! assert_eq!(props.axis(keys::COLORDIM).unwrap(), Some(2));
//! // stored with the 1-based interchange convention
//! assert_eq!(props.get(keys::COLORDIM), Some(&PropValue::Int(3)));
//! ```
//!
//! # Copy Semantics
//!
//! [`Properties`] owns its values; `clone()` is a deep copy. Images never share
//! a store, so mutating one image's properties cannot affect another image.
//!
//! # Used By
//!
//! - `imgmeta-image` - every image type carries one store

use crate::{Error, Result};
use ndarray::{Array2, Axis};
use std::collections::HashMap;

/// Recognized property keys.
pub mod keys {
    /// Colorspace name (`Str`), e.g. "RGB", "Gray", "Binary", "24bit", "Lab", "HSV".
    pub const COLORSPACE: &str = "colorspace";
    /// Color axis (`Int`, 1-based, 0 = none).
    pub const COLORDIM: &str = "colordim";
    /// Time axis (`Int`, 1-based, 0 = none).
    pub const TIMEDIM: &str = "timedim";
    /// Value limits (`Pair`).
    pub const LIMITS: &str = "limits";
    /// Spacing per spatial axis (`FloatVec`).
    pub const PIXELSPACING: &str = "pixelspacing";
    /// Label per spatial axis in storage order (`StrVec`).
    pub const SPATIALORDER: &str = "spatialorder";
    /// Direction vectors of the spatial axes (`Matrix`, sdims x sdims).
    pub const SPACEDIRECTIONS: &str = "spacedirections";

    /// Properties indexed by spatial axis, in the order they are reported.
    pub const SPATIAL: [&str; 3] = [SPATIALORDER, PIXELSPACING, SPACEDIRECTIONS];
}

/// Value that can be stored in a [`Properties`] bag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropValue {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Str(String),
    /// Numeric pair, e.g. limits
    Pair(f64, f64),
    /// Integer sequence
    IntVec(Vec<i64>),
    /// Float sequence
    FloatVec(Vec<f64>),
    /// String sequence
    StrVec(Vec<String>),
    /// Numeric matrix
    Matrix(Array2<f64>),
}

impl PropValue {
    /// Returns this value as an integer, if applicable.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a float, if applicable.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a string, if applicable.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Pair(..) => "pair",
            Self::IntVec(_) => "integer sequence",
            Self::FloatVec(_) => "float sequence",
            Self::StrVec(_) => "string sequence",
            Self::Matrix(_) => "matrix",
        }
    }

    /// Re-indexes a per-axis value.
    ///
    /// `order[k]` names the source entry that lands at position `k`. Sequences
    /// must have exactly `n` entries and matrices must be `n x n`; a matrix is
    /// re-indexed along both axes. Returns `None` for any other shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgmeta_core::PropValue;
    ///
    /// let spacing = PropValue::FloatVec(vec![0.5, 2.0, 1.0]);
    /// let swapped = spacing.select_axes(&[1, 0, 2], 3).unwrap();
    /// assert_eq!(swapped, PropValue::FloatVec(vec![2.0, 0.5, 1.0]));
    /// // dropping an axis
    /// let kept = spacing.select_axes(&[0, 2], 3).unwrap();
    /// assert_eq!(kept, PropValue::FloatVec(vec![0.5, 1.0]));
    /// ```
    pub fn select_axes(&self, order: &[usize], n: usize) -> Option<PropValue> {
        if order.iter().any(|&i| i >= n) {
            return None;
        }
        fn pick<T: Clone>(v: &[T], order: &[usize], n: usize) -> Option<Vec<T>> {
            (v.len() == n).then(|| order.iter().map(|&i| v[i].clone()).collect())
        }
        match self {
            Self::IntVec(v) => pick(v, order, n).map(Self::IntVec),
            Self::FloatVec(v) => pick(v, order, n).map(Self::FloatVec),
            Self::StrVec(v) => pick(v, order, n).map(Self::StrVec),
            Self::Matrix(m) if m.dim() == (n, n) => {
                Some(Self::Matrix(m.select(Axis(0), order).select(Axis(1), order)))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Pair(a, b) => write!(f, "({a}, {b})"),
            Self::IntVec(v) => write!(f, "{v:?}"),
            Self::FloatVec(v) => write!(f, "{v:?}"),
            Self::StrVec(v) => write!(f, "{v:?}"),
            Self::Matrix(m) => {
                let (r, c) = m.dim();
                write!(f, "{r}x{c} matrix")
            }
        }
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<(f64, f64)> for PropValue {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::Pair(lo, hi)
    }
}

impl From<Vec<i64>> for PropValue {
    fn from(v: Vec<i64>) -> Self {
        Self::IntVec(v)
    }
}

impl From<Vec<f64>> for PropValue {
    fn from(v: Vec<f64>) -> Self {
        Self::FloatVec(v)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(v: Vec<String>) -> Self {
        Self::StrVec(v)
    }
}

impl From<Vec<&str>> for PropValue {
    fn from(v: Vec<&str>) -> Self {
        Self::StrVec(v.into_iter().map(String::from).collect())
    }
}

impl From<Array2<f64>> for PropValue {
    fn from(v: Array2<f64>) -> Self {
        Self::Matrix(v)
    }
}

/// Key/value property store attached to an image.
///
/// # Example
///
/// ```rust
/// use imgmeta_core::{PropValue, Properties};
///
/// let mut props = Properties::new();
/// props.insert("limits", (0.0, 4095.0));
///
/// assert!(props.has("limits"));
/// assert_eq!(props.get_or("colorspace", "Gray".into()), PropValue::from("Gray"));
/// // the closure only runs when the key is missing
/// let limits = props.get_or_else("limits", || unreachable!());
/// assert_eq!(limits, PropValue::Pair(0.0, 4095.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    entries: HashMap<String, PropValue>,
}

impl Properties {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Gets a value by key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Gets a mutable value by key.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropValue> {
        self.entries.get_mut(key)
    }

    /// Returns the stored value, or `default` if `key` is absent.
    pub fn get_or(&self, key: &str, default: PropValue) -> PropValue {
        self.entries.get(key).cloned().unwrap_or(default)
    }

    /// Returns the stored value, computing the default only if `key` is absent.
    pub fn get_or_else<F>(&self, key: &str, default: F) -> PropValue
    where
        F: FnOnce() -> PropValue,
    {
        self.entries.get(key).cloned().unwrap_or_else(default)
    }

    /// Inserts or overwrites a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries sorted by key, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &PropValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    // ------------------------------------------------------------------------
    // Typed access
    // ------------------------------------------------------------------------

    fn mismatch(key: &str, expected: &str, found: &PropValue) -> Error {
        Error::invalid_property(key, format!("expected {expected}, found {}", found.kind_name()))
    }

    /// Gets a string property.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(Self::mismatch(key, "string", other)),
        }
    }

    /// Gets an integer property.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropValue::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(Self::mismatch(key, "integer", other)),
        }
    }

    /// Gets a numeric property; integers are widened.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v.as_float().map(Some).ok_or_else(|| Self::mismatch(key, "number", v)),
        }
    }

    /// Gets a numeric pair. Two-element sequences are accepted too.
    pub fn get_pair(&self, key: &str) -> Result<Option<(f64, f64)>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropValue::Pair(a, b)) => Ok(Some((*a, *b))),
            Some(PropValue::FloatVec(v)) if v.len() == 2 => Ok(Some((v[0], v[1]))),
            Some(PropValue::IntVec(v)) if v.len() == 2 => Ok(Some((v[0] as f64, v[1] as f64))),
            Some(other) => Err(Self::mismatch(key, "numeric pair", other)),
        }
    }

    /// Gets a numeric sequence; integer sequences are widened.
    pub fn get_float_vec(&self, key: &str) -> Result<Option<Vec<f64>>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropValue::FloatVec(v)) => Ok(Some(v.clone())),
            Some(PropValue::IntVec(v)) => Ok(Some(v.iter().map(|&x| x as f64).collect())),
            Some(other) => Err(Self::mismatch(key, "numeric sequence", other)),
        }
    }

    /// Gets a string sequence.
    pub fn get_str_vec(&self, key: &str) -> Result<Option<&[String]>> {
        match self.get(key) {
            None => Ok(None),
            Some(PropValue::StrVec(v)) => Ok(Some(v)),
            Some(other) => Err(Self::mismatch(key, "string sequence", other)),
        }
    }

    /// Reads an axis property stored as a 1-based integer (0 = none).
    ///
    /// Returns the 0-based axis, or `None` when absent or 0.
    pub fn axis(&self, key: &str) -> Result<Option<usize>> {
        match self.get_int(key)? {
            None | Some(0) => Ok(None),
            Some(n) if n > 0 => Ok(Some(n as usize - 1)),
            Some(n) => Err(Error::invalid_property(key, format!("negative axis {n}"))),
        }
    }

    /// Stores a 0-based axis as a 1-based integer (`None` stores 0).
    pub fn set_axis(&mut self, key: &str, axis: Option<usize>) {
        let stored = axis.map_or(0, |a| a as i64 + 1);
        self.insert(key, PropValue::Int(stored));
    }

    /// Declared colorspace.
    #[inline]
    pub fn colorspace(&self) -> Result<Option<&str>> {
        self.get_str(keys::COLORSPACE)
    }

    /// Declared color axis (0-based).
    #[inline]
    pub fn colordim(&self) -> Result<Option<usize>> {
        self.axis(keys::COLORDIM)
    }

    /// Declared time axis (0-based).
    #[inline]
    pub fn timedim(&self) -> Result<Option<usize>> {
        self.axis(keys::TIMEDIM)
    }

    /// Declared value limits.
    #[inline]
    pub fn limits(&self) -> Result<Option<(f64, f64)>> {
        self.get_pair(keys::LIMITS)
    }

    /// Declared pixel spacing.
    #[inline]
    pub fn pixelspacing(&self) -> Result<Option<Vec<f64>>> {
        self.get_float_vec(keys::PIXELSPACING)
    }

    /// Declared spatial order.
    #[inline]
    pub fn spatialorder(&self) -> Result<Option<&[String]>> {
        self.get_str_vec(keys::SPATIALORDER)
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
