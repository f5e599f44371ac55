//! Benchmarks for pixkit operations.
//!
//! Run with: `cargo bench`
//!
//! Set `RUST_LOG=pixkit_core=debug` to see partitioning decisions.

use std::hint::black_box;
use std::sync::Once;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tracing_subscriber::EnvFilter;

use pixkit_color::ColorSpaceTransformation;
use pixkit_core::{BoundaryMode, ColorImg, Img, IterationConfig};
use pixkit_ops::{Blending, alpha_blend_with, blend_argb};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Gradient test image with varying alpha.
fn test_img(width: u32, height: u32) -> Img {
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let r = x * 255 / width.max(2);
                let g = y * 255 / height.max(2);
                let b = (x ^ y) & 0xff;
                0x8000_0000 | (r << 16) | (g << 8) | b
            })
        })
        .collect();
    Img::from_data(width, height, data).unwrap()
}

/// Benchmark out-of-range addressing.
fn bench_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary");
    let img = test_img(256, 256);
    let coords: Vec<(i32, i32)> = (0..10000).map(|i| (i % 700 - 200, i / 50 - 50)).collect();
    group.throughput(Throughput::Elements(coords.len() as u64));

    for mode in BoundaryMode::ALL {
        group.bench_with_input(BenchmarkId::new("get_value", mode), &coords, |b, coords| {
            b.iter(|| {
                coords
                    .iter()
                    .map(|&(x, y)| img.get_value(black_box(x), black_box(y), mode))
                    .fold(0u32, u32::wrapping_add)
            })
        });
    }

    group.finish();
}

/// Benchmark bilinear sampling.
fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");
    let img = test_img(512, 512);
    let planar = ColorImg::from_img(&img, true);
    let uv: Vec<(f64, f64)> = (0..10000)
        .map(|i| ((i % 100) as f64 / 99.0, (i / 100) as f64 / 99.0))
        .collect();
    group.throughput(Throughput::Elements(uv.len() as u64));

    group.bench_function("packed", |b| {
        b.iter(|| {
            uv.iter()
                .map(|&(u, v)| img.interpolate(black_box(u), black_box(v)))
                .fold(0u32, u32::wrapping_add)
        })
    });

    group.bench_function("planar", |b| {
        b.iter(|| {
            uv.iter()
                .map(|&(u, v)| planar.interpolate(pixkit_core::Channel::G, black_box(u), black_box(v)))
                .sum::<f64>()
        })
    });

    group.finish();
}

/// Benchmark color space transforms, sequential vs parallel.
fn bench_color(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("color");
    group.sample_size(20);

    let (width, height) = (1024, 1024);
    let packed = test_img(width, height);
    let planar = ColorImg::from_img(&packed, true);
    group.throughput(Throughput::Elements(width as u64 * height as u64));

    let configs = [
        ("seq", IterationConfig::sequential()),
        ("par", IterationConfig::parallel()),
    ];

    for t in [
        ColorSpaceTransformation::Rgb2Hsv,
        ColorSpaceTransformation::Rgb2Lab,
        ColorSpaceTransformation::Rgb2YCbCr,
    ] {
        for (label, cfg) in &configs {
            group.bench_function(BenchmarkId::new(format!("{t}_discrete"), label), |b| {
                b.iter_batched_ref(
                    || packed.clone(),
                    |img| t.apply_discrete(img, cfg).unwrap(),
                    criterion::BatchSize::LargeInput,
                )
            });
            group.bench_function(BenchmarkId::new(format!("{t}_continuous"), label), |b| {
                b.iter_batched_ref(
                    || planar.clone(),
                    |img| t.apply_continuous(img, cfg).unwrap(),
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

/// Benchmark blend functions and positioned blending.
fn bench_blend(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("blend");

    let pairs: Vec<(u32, u32)> = (0..10000u32)
        .map(|i| (i.wrapping_mul(0x9e37_79b9), i.wrapping_mul(0x85eb_ca6b)))
        .collect();
    group.throughput(Throughput::Elements(pairs.len() as u64));
    for mode in [Blending::Normal, Blending::Multiply, Blending::Softlight, Blending::Dodge] {
        group.bench_with_input(BenchmarkId::new("argb", mode), &pairs, |b, pairs| {
            b.iter(|| {
                pairs
                    .iter()
                    .map(|&(bottom, top)| blend_argb(black_box(bottom), black_box(top), mode.function()))
                    .fold(0u32, u32::wrapping_add)
            })
        });
    }

    let bottom = test_img(1024, 1024);
    let top = test_img(512, 512);
    group.throughput(Throughput::Elements(bottom.num_values() as u64));
    group.sample_size(20);
    for size in [1, 4] {
        let cfg = IterationConfig::default()
            .with_threads(size)
            .unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("alpha_blend_with", size), &cfg, |b, cfg| {
            b.iter_batched_ref(
                || bottom.clone(),
                |img| {
                    alpha_blend_with(img, &top, 256, 256, 0.75, Blending::Overlay.function(), cfg)
                        .unwrap()
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_boundary,
    bench_interpolate,
    bench_color,
    bench_blend,
);

criterion_main!(benches);
