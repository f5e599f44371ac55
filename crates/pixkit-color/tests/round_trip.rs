//! Forward/inverse round trips for every color space transformation.

use pixkit_color::ColorSpaceTransformation;
use pixkit_core::{ColorImg, Img, IterationConfig, PixelBase, argb};

/// Largest tolerated luminance change of a discrete round trip, in 8-bit units.
const DISCRETE_LUMINANCE_TOLERANCE: f64 = 7.0;

/// Largest tolerated luminance change of a continuous round trip.
const CONTINUOUS_LUMINANCE_TOLERANCE: f64 = 0.001;

/// Every 24-bit color at least once, alpha 0x88.
fn full_gamut(width: u32, height: u32) -> Img {
    let data = (0..width as usize * height as usize)
        .map(|i| 0x8800_0000 | (i as u32 & 0x00ff_ffff))
        .collect();
    Img::from_data(width, height, data).unwrap()
}

fn check_discrete(forward: ColorSpaceTransformation) {
    let original = full_gamut(5000, 5000);
    let cfg = IterationConfig::default();

    let mut img = original.clone();
    forward.apply_discrete(&mut img, &cfg).unwrap();
    forward.inverse().apply_discrete(&mut img, &cfg).unwrap();

    let mut worst = 0.0f64;
    for (i, (&before, &after)) in original.data().iter().zip(img.data()).enumerate() {
        assert_eq!(argb::a(after), argb::a(before), "{forward}: alpha changed at {i}");
        let err = (argb::luminance_8bit(after) - argb::luminance_8bit(before)).abs();
        worst = worst.max(err);
        assert!(
            err < DISCRETE_LUMINANCE_TOLERANCE,
            "{forward}: {before:08x} -> {after:08x} (luminance error {err})"
        );
    }
    println!("{forward}: worst luminance error {worst:.3}");
}

fn check_extremes(forward: ColorSpaceTransformation) {
    for value in [argb::BLACK, argb::WHITE] {
        let back = forward.inverse().transform_argb(forward.transform_argb(value));
        assert_eq!(back, value, "{forward}: {value:08x}");
    }
}

#[test]
fn test_discrete_hsv_round_trip() {
    check_discrete(ColorSpaceTransformation::Rgb2Hsv);
    check_extremes(ColorSpaceTransformation::Rgb2Hsv);
}

#[test]
fn test_discrete_lab_round_trip() {
    check_discrete(ColorSpaceTransformation::Rgb2Lab);
    check_extremes(ColorSpaceTransformation::Rgb2Lab);
}

#[test]
fn test_discrete_ycbcr_extremes() {
    check_extremes(ColorSpaceTransformation::Rgb2YCbCr);
}

fn check_continuous(forward: ColorSpaceTransformation) {
    // 2^18 pixels, stepping through the gamut
    let packed = Img::from_data(
        512,
        512,
        (0..512u32 * 512).map(|i| 0x8800_0000 | (i.wrapping_mul(63) & 0x00ff_ffff)).collect(),
    )
    .unwrap();
    let original = ColorImg::from_img(&packed, true);
    let cfg = IterationConfig::default().with_partition_len(10_000);

    let mut img = original.clone();
    forward.apply_continuous(&mut img, &cfg).unwrap();
    forward.inverse().apply_continuous(&mut img, &cfg).unwrap();

    for (before, after) in original.pixels().zip(img.pixels()) {
        assert_eq!(after.a(), before.a(), "{forward}: alpha changed");
        let err = (after.luminance() - before.luminance()).abs();
        assert!(
            err <= CONTINUOUS_LUMINANCE_TOLERANCE,
            "{forward}: {before} -> {after} (luminance error {err})"
        );
    }
}

#[test]
fn test_continuous_round_trips() {
    for forward in [
        ColorSpaceTransformation::Rgb2Hsv,
        ColorSpaceTransformation::Rgb2Lab,
        ColorSpaceTransformation::Lab2Rgb,
        ColorSpaceTransformation::Rgb2YCbCr,
        ColorSpaceTransformation::YCbCr2Rgb,
    ] {
        check_continuous(forward);
    }
}

#[test]
fn test_continuous_lab_is_unclamped() {
    let mut img = ColorImg::new(1, 1, false);
    img.fill(1.0, 1.0, 1.0, 1.0);
    ColorSpaceTransformation::Rgb2Lab
        .apply_continuous(&mut img, &IterationConfig::sequential())
        .unwrap();
    let l = img.get(pixkit_core::Channel::R, 0, 0);
    assert!((l - 1.0).abs() < 1e-5, "L = {l}");

    // pure blue leaves [0, 1] on the b axis
    let mut img = ColorImg::new(1, 1, false);
    img.fill(1.0, 0.0, 0.0, 1.0);
    ColorSpaceTransformation::Rgb2Lab
        .apply_continuous(&mut img, &IterationConfig::sequential())
        .unwrap();
    let l = img.get(pixkit_core::Channel::R, 0, 0);
    let b = img.get(pixkit_core::Channel::B, 0, 0);
    assert!((l - 0.323).abs() < 1e-3, "L = {l}");
    assert!(b < -1.0 && b > -1.1, "b = {b}");
}

#[test]
fn test_sequential_matches_parallel() {
    let packed = full_gamut(300, 200);
    let planar = ColorImg::from_img(&packed, true);
    let seq_cfg = IterationConfig::sequential();
    let par_cfg = IterationConfig::parallel().with_partition_len(999);

    for t in ColorSpaceTransformation::ALL {
        let mut seq = packed.clone();
        let mut par = packed.clone();
        t.apply_discrete(&mut seq, &seq_cfg).unwrap();
        t.apply_discrete(&mut par, &par_cfg).unwrap();
        assert_eq!(seq, par, "{t} discrete");

        let mut seq = planar.clone();
        let mut par = planar.clone();
        t.apply_continuous(&mut seq, &seq_cfg).unwrap();
        t.apply_continuous(&mut par, &par_cfg).unwrap();
        assert!(seq == par, "{t} continuous");
    }
}
