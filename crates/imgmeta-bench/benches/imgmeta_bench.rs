//! Benchmarks for imgmeta structural operations.
//!
//! Run with: `cargo bench -p imgmeta-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use imgmeta_core::keys;
use imgmeta_image::{DimSemantics, Image, IndexedImage};
use ndarray::{Array2, Array3, ArrayD, Ix3};

/// Benchmark colormap expansion of indexed images.
fn bench_to_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_direct");

    for size in [64usize, 256, 1024] {
        let index = Array2::from_shape_fn((size, size), |(y, x)| ((x + y) % 256) as u8);
        let cmap = Array2::from_shape_fn((256, 3), |(r, ch)| (r * (ch + 1)) as f32 / 768.0);
        let idx = IndexedImage::new(index, cmap);

        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("rgb_f32", size), &idx, |b, idx| {
            b.iter(|| black_box(idx).to_direct())
        });
    }

    group.finish();
}

/// Benchmark axis permutation with property bookkeeping.
fn bench_permutedims(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutedims");

    for size in [64usize, 256, 1024] {
        let mut img = Image::new(Array3::<u16>::zeros((3, size, size)));
        img.properties_mut().set_axis(keys::COLORDIM, Some(0));
        img.properties_mut().insert(keys::PIXELSPACING, vec![0.5, 0.25]);

        group.throughput(Throughput::Elements((3 * size * size) as u64));
        group.bench_with_input(BenchmarkId::new("channels_last", size), &img, |b, img| {
            b.iter(|| black_box(img).permutedims(&[1, 2, 0]))
        });
    }

    group.finish();
}

/// Benchmark conversion to canonical arrays: straight copy vs permuted copy.
fn bench_to_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_array");
    let size = 512usize;
    group.throughput(Throughput::Elements((size * size * 3) as u64));

    let mut canonical = Image::new(Array3::<f32>::zeros((size, size, 3)));
    canonical.properties_mut().set_axis(keys::COLORDIM, Some(2));
    group.bench_function("canonical", |b| {
        b.iter(|| black_box(&canonical).to_array::<Ix3>())
    });

    let mut planar = Image::new(Array3::<f32>::zeros((3, size, size)));
    planar.properties_mut().set_axis(keys::COLORDIM, Some(0));
    planar.properties_mut().insert(keys::SPATIALORDER, vec!["x", "y"]);
    group.bench_function("planar_xy", |b| {
        b.iter(|| black_box(&planar).to_array::<Ix3>())
    });

    group.finish();
}

/// Benchmark the resolver itself, which runs on every accessor call.
fn bench_semantics(c: &mut Criterion) {
    let mut group = c.benchmark_group("semantics");

    let mut img = Image::new(ArrayD::<u8>::zeros(vec![4, 16, 16, 3]));
    img.properties_mut().set_axis(keys::TIMEDIM, Some(0));
    img.properties_mut().set_axis(keys::COLORDIM, Some(3));
    img.properties_mut().insert(keys::SPATIALORDER, vec!["y", "x"]);

    group.bench_function("coords_spatial", |b| {
        b.iter(|| black_box(&img).coords_spatial())
    });
    group.bench_function("widthheight", |b| b.iter(|| black_box(&img).widthheight()));

    group.finish();
}

criterion_group!(
    benches,
    bench_to_direct,
    bench_permutedims,
    bench_to_array,
    bench_semantics,
);
criterion_main!(benches);
