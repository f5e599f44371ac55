//! RGB <-> CIE L\*a\*b\* (D65).
//!
//! ```text
//! sRGB ──eotf──► linear RGB ──M──► XYZ ──/white, f──► L*a*b*
//! ```
//!
//! - `M`: sRGB primaries to XYZ, D65 white (IEC 61966-2-1)
//! - white: `Xn = 0.95047, Yn = 1.0, Zn = 1.08883`
//! - `f(t) = cbrt(t)` for `t > (6/29)^3`, else `t / (3 (6/29)^2) + 4/29`
//!
//! [`xyz_to_lab`] and [`lab_to_xyz`] work in CIE units (`L` in `[0, 100]`).
//! The continuous transforms divide by [`LAB_SCALE`], so `L` lands in
//! `[0, 1]` and `a`, `b` stay within about `[-1.1, 1.1]` for sRGB input.
//!
//! Discrete (packed) layout, alpha untouched, each byte rounded and clamped:
//!
//! ```text
//! 0xAA LL aa bb
//!      │  │  └── b * 100 + 128
//!      │  └───── a * 100 + 128
//!      └──────── L * 255
//! ```

use std::sync::LazyLock;

use glam::{DMat3, DVec3};
use pixkit_core::argb;

use crate::srgb;

/// sRGB (linear) to XYZ, row-major.
pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// D65 reference white.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE units per continuous unit.
pub const LAB_SCALE: f64 = 100.0;

const DELTA: f64 = 6.0 / 29.0;

static RGB_TO_XYZ: LazyLock<DMat3> =
    LazyLock::new(|| DMat3::from_cols_array_2d(&SRGB_TO_XYZ).transpose());
static XYZ_TO_RGB: LazyLock<DMat3> = LazyLock::new(|| RGB_TO_XYZ.inverse());

#[inline]
fn f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// Linear RGB to XYZ.
#[inline]
pub fn linear_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    (*RGB_TO_XYZ * DVec3::from_array(rgb)).to_array()
}

/// XYZ to linear RGB.
#[inline]
pub fn xyz_to_linear(xyz: [f64; 3]) -> [f64; 3] {
    (*XYZ_TO_RGB * DVec3::from_array(xyz)).to_array()
}

/// XYZ to L\*a\*b\*.
pub fn xyz_to_lab([x, y, z]: [f64; 3]) -> [f64; 3] {
    let [xn, yn, zn] = D65_WHITE;
    let (fx, fy, fz) = (f(x / xn), f(y / yn), f(z / zn));
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// L\*a\*b\* to XYZ.
pub fn lab_to_xyz([l, a, b]: [f64; 3]) -> [f64; 3] {
    let [xn, yn, zn] = D65_WHITE;
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;
    [xn * f_inv(fx), yn * f_inv(fy), zn * f_inv(fz)]
}

/// Continuous sRGB to normalized L\*a\*b\*.
pub fn rgb_to_lab(rgb: [f64; 3]) -> [f64; 3] {
    xyz_to_lab(linear_to_xyz(srgb::eotf_rgb(rgb))).map(|c| c / LAB_SCALE)
}

/// Normalized L\*a\*b\* to continuous sRGB.
pub fn lab_to_rgb(lab: [f64; 3]) -> [f64; 3] {
    srgb::oetf_rgb(xyz_to_linear(lab_to_xyz(lab.map(|c| c * LAB_SCALE))))
}

#[inline]
fn byte(v: f64) -> u32 {
    v.round().clamp(0.0, 255.0) as u32
}

/// Packed sRGB to packed L\*a\*b\*, alpha preserved.
pub fn rgb_to_lab_argb(value: u32) -> u32 {
    let [l, a, b] = rgb_to_lab([
        argb::r_normalized(value),
        argb::g_normalized(value),
        argb::b_normalized(value),
    ]);
    argb::argb_fast(
        argb::a(value),
        byte(l * 255.0),
        byte(a * LAB_SCALE + 128.0),
        byte(b * LAB_SCALE + 128.0),
    )
}

/// Packed L\*a\*b\* to packed sRGB, alpha preserved.
pub fn lab_to_rgb_argb(value: u32) -> u32 {
    let [r, g, b] = lab_to_rgb([
        argb::r(value) as f64 / 255.0,
        (argb::g(value) as f64 - 128.0) / LAB_SCALE,
        (argb::b(value) as f64 - 128.0) / LAB_SCALE,
    ]);
    argb::argb_fast(argb::a(value), argb::to_8bit(r), argb::to_8bit(g), argb::to_8bit(b))
}
