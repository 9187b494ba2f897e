//! Element type descriptors.
//!
//! Dimension inference and default limits depend on what kind of number an
//! array holds, not on its exact Rust type. This module maps element types to
//! a runtime [`ElementKind`].
//!
//! # Types
//!
//! - [`ElementKind`] - Runtime element type (Bool, U8 ... F64)
//! - [`Element`] - Trait implemented by every supported array element type
//!
//! # Usage
//!
//! ```rust
//! use imgmeta_core::format::{Element, ElementKind};
//!
//! assert_eq!(u8::KIND, ElementKind::U8);
//! assert_eq!(u8::KIND.default_limits(), (0.0, 255.0));
//! assert_eq!(f32::KIND.default_limits(), (0.0, 1.0));
//! ```

use half::f16;
use std::fmt::Debug;

/// Runtime element type of an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Boolean (binary images).
    Bool,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Pointer-sized unsigned integer.
    Usize,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    F64,
}

impl ElementKind {
    /// Number of bits per element. `Bool` counts as 1.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Bool => 1,
            Self::U8 | Self::I8 => 8,
            Self::U16 | Self::I16 | Self::F16 => 16,
            Self::U32 | Self::I32 | Self::F32 => 32,
            Self::U64 | Self::I64 | Self::F64 => 64,
            Self::Usize => usize::BITS,
        }
    }

    /// Whether this is the boolean kind.
    #[inline]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Whether this is a floating-point kind.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32 | Self::F64)
    }

    /// Whether this is a fixed-width integer kind.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float() && !self.is_bool()
    }

    /// Whether this is a signed integer kind.
    #[inline]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Default value limits for this element kind.
    ///
    /// - `Bool` -> `(0, 1)`
    /// - integers -> `(type min, type max)`
    /// - floats -> `(0, 1)`
    ///
    /// 64-bit bounds are rounded to the nearest `f64`.
    pub fn default_limits(&self) -> (f64, f64) {
        match self {
            Self::Bool => (0.0, 1.0),
            Self::U8 => (0.0, u8::MAX as f64),
            Self::U16 => (0.0, u16::MAX as f64),
            Self::U32 => (0.0, u32::MAX as f64),
            Self::U64 => (0.0, u64::MAX as f64),
            Self::Usize => (0.0, usize::MAX as f64),
            Self::I8 => (i8::MIN as f64, i8::MAX as f64),
            Self::I16 => (i16::MIN as f64, i16::MAX as f64),
            Self::I32 => (i32::MIN as f64, i32::MAX as f64),
            Self::I64 => (i64::MIN as f64, i64::MAX as f64),
            Self::F16 | Self::F32 | Self::F64 => (0.0, 1.0),
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Trait for array element types.
///
/// Implemented for `bool`, the fixed-width integers, `usize`, [`f16`],
/// `f32` and `f64`. `Default` supplies the fill value for freshly allocated
/// arrays (see `similar` in `imgmeta-image`).
pub trait Element: Copy + Default + PartialOrd + Debug + Send + Sync + 'static {
    /// Runtime kind of this type.
    const KIND: ElementKind;

    /// Lossy conversion to `f64`, used for colormap limits.
    fn to_f64(self) -> f64;
}

impl Element for bool {
    const KIND: ElementKind = ElementKind::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }
}

impl Element for f16 {
    const KIND: ElementKind = ElementKind::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

/// Integer element types usable as colormap keys.
pub trait IndexElement: Element {
    /// Converts the stored key to a 0-based row index.
    ///
    /// Returns `None` for negative keys.
    fn to_index(self) -> Option<usize>;

    /// Raw key value, for error reporting.
    fn to_i128(self) -> i128;
}

macro_rules! impl_index_element {
    ($($ty:ty),*) => {
        $(
            impl IndexElement for $ty {
                #[inline]
                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_index_element!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kinds() {
        assert_eq!(bool::KIND, ElementKind::Bool);
        assert_eq!(u8::KIND, ElementKind::U8);
        assert_eq!(i32::KIND, ElementKind::I32);
        assert_eq!(f16::KIND, ElementKind::F16);
        assert!(f64::KIND.is_float());
        assert!(u32::KIND.is_integer());
        assert!(!bool::KIND.is_integer());
        assert!(i16::KIND.is_signed());
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(ElementKind::Bool.default_limits(), (0.0, 1.0));
        assert_eq!(ElementKind::U8.default_limits(), (0.0, 255.0));
        assert_eq!(ElementKind::U16.default_limits(), (0.0, 65535.0));
        assert_eq!(ElementKind::I8.default_limits(), (-128.0, 127.0));
        assert_eq!(ElementKind::F32.default_limits(), (0.0, 1.0));
        assert_eq!(ElementKind::F16.default_limits(), (0.0, 1.0));
    }

    #[test]
    fn test_to_f64() {
        assert_relative_eq!(true.to_f64(), 1.0);
        assert_relative_eq!(200u8.to_f64(), 200.0);
        assert_relative_eq!(f16::from_f32(0.5).to_f64(), 0.5);
        assert_relative_eq!(f16::from_f32(0.1).to_f64(), 0.1, epsilon = 1e-3);
        assert_relative_eq!((-7i16).to_f64(), -7.0);
    }

    #[test]
    fn test_index_element() {
        assert_eq!(3u8.to_index(), Some(3));
        assert_eq!((-1i32).to_index(), None);
        assert_eq!((-1i32).to_i128(), -1);
    }
}
