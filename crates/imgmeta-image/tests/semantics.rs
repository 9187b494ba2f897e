//! Dimension semantics across bare arrays, direct and indexed images.
//!
//! Exercises the resolver through generic code, the way downstream
//! algorithms use it.

use approx::assert_relative_eq;
use imgmeta_image::prelude::*;
use ndarray::{Array1, Array2, Array3, ArrayD};

/// Generic helper: one line per operand, as an algorithm would query it.
fn describe<T: DimSemantics>(img: &T) -> Result<(usize, usize, Vec<usize>)> {
    Ok((img.sdims()?, img.nimages()?, img.size_spatial()?))
}

// ============================================================================
// Axis accounting
// ============================================================================

#[test]
fn sdims_plus_semantic_axes_is_ndim() {
    let shapes: &[&[usize]] = &[&[4, 5], &[4, 5, 3], &[2, 4, 5, 3], &[6, 2, 4, 5, 3]];
    for &shape in shapes {
        for cd in [None, Some(shape.len() - 1)] {
            for td in [None, Some(0)] {
                if cd.is_some() && cd == td {
                    continue;
                }
                let mut img = Image::new(ArrayD::<u8>::zeros(shape.to_vec()));
                img.properties_mut().set_axis(keys::COLORDIM, cd);
                img.properties_mut().set_axis(keys::TIMEDIM, td);

                let sdims = img.sdims().unwrap();
                assert_eq!(
                    sdims + usize::from(cd.is_some()) + usize::from(td.is_some()),
                    img.ndim()
                );

                let coords = img.coords_spatial().unwrap();
                assert_eq!(coords.len(), sdims);
                assert!(coords.windows(2).all(|w| w[0] < w[1]));
                assert!(cd.is_none_or(|c| !coords.contains(&c)));
                assert!(td.is_none_or(|t| !coords.contains(&t)));
            }
        }
    }
}

#[test]
fn coords_spatial_with_color_and_time() {
    // (c, y, t, x)
    let mut img = Image::new(ArrayD::<f32>::zeros(vec![3, 10, 7, 12]));
    img.properties_mut().set_axis(keys::COLORDIM, Some(0));
    img.properties_mut().set_axis(keys::TIMEDIM, Some(2));

    assert_eq!(img.coords_spatial().unwrap(), vec![1, 3]);
    assert_eq!(describe(&img).unwrap(), (2, 7, vec![10, 12]));
    assert_eq!(img.ncolorelem().unwrap(), 3);
    assert_eq!(img.widthheight().unwrap(), (12, 10));
}

#[test]
fn generic_code_accepts_every_operand() {
    let rgb = Array3::<u8>::zeros((4, 5, 3));
    assert_eq!(describe(&rgb.bare()).unwrap(), (2, 1, vec![4, 5]));

    let img = Image::new(Array2::<u16>::zeros((6, 7)));
    assert_eq!(describe(&img).unwrap(), (2, 1, vec![6, 7]));

    let view = img.view();
    assert_eq!(describe(&view).unwrap(), (2, 1, vec![6, 7]));

    let idx = IndexedImage::new(Array2::<u8>::zeros((2, 3)), Array2::<f32>::zeros((1, 3)));
    assert_eq!(describe(&idx).unwrap(), (2, 1, vec![2, 3]));

    let any: AnyImage<f32, u8> = idx.into();
    assert_eq!(describe(&any).unwrap(), (2, 1, vec![2, 3]));
}

// ============================================================================
// Bare-array inference
// ============================================================================

#[test]
fn bare_limits_by_element_type() {
    assert_eq!(Array2::<bool>::default((3, 3)).bare().limits().unwrap(), (0.0, 1.0));
    assert_eq!(Array2::<u8>::zeros((3, 3)).bare().limits().unwrap(), (0.0, 255.0));
    assert_eq!(Array2::<f32>::zeros((3, 3)).bare().limits().unwrap(), (0.0, 1.0));
}

#[test]
fn bare_inference_is_ambiguous_beyond_rgb() {
    let not_rgb = Array3::<u8>::zeros((4, 5, 4));
    let four_d = ArrayD::<u8>::zeros(vec![2, 4, 5, 3]);

    for err in [
        not_rgb.bare().colorspace().unwrap_err(),
        not_rgb.bare().pixelspacing().unwrap_err(),
        not_rgb.bare().spatialorder().unwrap_err(),
        four_d.bare().colorspace().unwrap_err(),
        four_d.bare().pixelspacing().unwrap_err(),
        four_d.bare().spatialorder().unwrap_err(),
    ] {
        assert!(matches!(err, Error::Ambiguous { .. }), "{err}");
    }
}

#[test]
fn bare_vector_has_no_spatial_order() {
    let v = Array1::<f64>::zeros(16);
    assert_eq!(
        v.bare().spatialorder().unwrap_err(),
        Error::WrongSpatialDims { ndim: 1 }
    );
}

#[test]
fn image_wrapping_resolves_ambiguity() {
    let data = ArrayD::<u8>::zeros(vec![2, 4, 5, 3]);
    assert!(data.bare().colorspace().is_err());

    let mut img = Image::new(data);
    img.properties_mut().insert(keys::COLORSPACE, "RGB");
    img.properties_mut().set_axis(keys::COLORDIM, Some(3));
    img.properties_mut().set_axis(keys::TIMEDIM, Some(0));
    img.properties_mut().insert(keys::PIXELSPACING, vec![0.1, 0.2]);

    assert_eq!(img.colorspace().unwrap(), "RGB");
    let spacing = img.pixelspacing().unwrap();
    assert_relative_eq!(spacing[0], 0.1);
    assert_relative_eq!(spacing[1], 0.2);
    assert_eq!(img.widthheight().unwrap(), (5, 4));
}

// ============================================================================
// Property store access
// ============================================================================

#[test]
fn lazy_default_only_runs_when_missing() {
    let mut img = Image::new(Array2::<u8>::zeros((2, 2)));
    img.properties_mut().insert("origin", vec![0.0, 0.0]);

    let mut calls = 0;
    let v = img.get_or_else("origin", || {
        calls += 1;
        PropValue::Float(1.0)
    });
    assert_eq!(v, PropValue::FloatVec(vec![0.0, 0.0]));
    let w = img.get_or_else("scale", || {
        calls += 1;
        PropValue::Float(1.0)
    });
    assert_eq!(w, PropValue::Float(1.0));
    assert_eq!(calls, 1);
}

#[test]
fn wrong_kind_is_reported() {
    let mut img = Image::new(Array2::<u8>::zeros((2, 2)));
    img.properties_mut().insert(keys::COLORSPACE, 3);
    assert!(matches!(img.colorspace(), Err(Error::InvalidProperty { .. })));
}
