//! RGB <-> YCbCr, full-range BT.601 (JFIF).
//!
//! ```text
//! Y  =  0.299    R + 0.587    G + 0.114    B
//! Cb = -0.168736 R - 0.331264 G + 0.5      B + 0.5
//! Cr =  0.5      R - 0.418688 G - 0.081312 B + 0.5
//! ```
//!
//! The inverse is the exact matrix inverse. Discrete values use the same
//! equations on `[0, 255]` with chroma offset `128`.

use std::sync::LazyLock;

use glam::{DMat3, DVec3};
use pixkit_core::argb;

/// RGB to YCbCr (without offset), row-major.
pub const BT601_FULL: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.168736, -0.331264, 0.5],
    [0.5, -0.418688, -0.081312],
];

/// Chroma offset for normalized values.
pub const CHROMA_OFFSET: f64 = 0.5;

const OFFSET: DVec3 = DVec3::new(0.0, CHROMA_OFFSET, CHROMA_OFFSET);

static RGB_TO_YCC: LazyLock<DMat3> =
    LazyLock::new(|| DMat3::from_cols_array_2d(&BT601_FULL).transpose());
static YCC_TO_RGB: LazyLock<DMat3> = LazyLock::new(|| RGB_TO_YCC.inverse());

/// Continuous RGB to YCbCr.
#[inline]
pub fn rgb_to_ycbcr(rgb: [f64; 3]) -> [f64; 3] {
    (*RGB_TO_YCC * DVec3::from_array(rgb) + OFFSET).to_array()
}

/// Continuous YCbCr to RGB.
#[inline]
pub fn ycbcr_to_rgb(ycc: [f64; 3]) -> [f64; 3] {
    (*YCC_TO_RGB * (DVec3::from_array(ycc) - OFFSET)).to_array()
}

const OFFSET_8BIT: DVec3 = DVec3::new(0.0, 128.0, 128.0);

#[inline]
fn channels_8bit(value: u32) -> DVec3 {
    DVec3::new(
        argb::r(value) as f64,
        argb::g(value) as f64,
        argb::b(value) as f64,
    )
}

#[inline]
fn pack(alpha: u32, v: DVec3) -> u32 {
    let [x, y, z] = v.round().clamp(DVec3::ZERO, DVec3::splat(255.0)).to_array();
    argb::argb_fast(alpha, x as u32, y as u32, z as u32)
}

/// Packed RGB to packed YCbCr, alpha preserved.
pub fn rgb_to_ycbcr_argb(value: u32) -> u32 {
    pack(argb::a(value), *RGB_TO_YCC * channels_8bit(value) + OFFSET_8BIT)
}

/// Packed YCbCr to packed RGB, alpha preserved.
pub fn ycbcr_to_rgb_argb(value: u32) -> u32 {
    pack(argb::a(value), *YCC_TO_RGB * (channels_8bit(value) - OFFSET_8BIT))
}
