//! Per-channel blend functions and pixel blending.
//!
//! A blend function combines one normalized channel of the bottom pixel
//! with the same channel of the top pixel. [`Blending`] names the built-in
//! functions; any `fn(f64, f64) -> f64` can be used as a [`BlendFunction`].
//!
//! # Blend Modes
//!
//! | mode | result |
//! |------|--------|
//! | normal | `t` |
//! | average | `(b + t) / 2` |
//! | multiply | `b * t` |
//! | screen | `1 - (1 - b)(1 - t)` |
//! | darken | `min(b, t)` |
//! | brighten | `max(b, t)` |
//! | difference | `abs(b - t)` |
//! | addition | `b + t` (unclamped) |
//! | subtraction | `b + t - 1` (unclamped) |
//! | reflect | `b² / (1 - t)`; at `t == 1`: `0` if `b == 0`, else `1` |
//! | overlay | `b < 0.5 ? 2bt : 1 - 2(1 - b)(1 - t)` |
//! | hardlight | `t < 0.5 ? 2bt : 1 - 2(1 - b)(1 - t)` |
//! | softlight | `c + b(1 - (1 - b)(1 - t) - c)`, `c = bt` |
//! | dodge | `b / (1 - t)`; at `t == 1`: `1` |
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::{Blending, blend_argb};
//!
//! let out = blend_argb(0x80_404040, 0xff_808080, Blending::Multiply.function());
//! assert_eq!(out, 0x80_202020);
//! ```

use std::fmt;
use std::str::FromStr;

use pixkit_core::{PixelBase, PixelBaseMut, argb};

use crate::OpsError;

/// Per-channel blend `(bottom, top) -> result`.
pub type BlendFunction = fn(f64, f64) -> f64;

/// Top value.
#[inline]
pub fn normal(_bottom: f64, top: f64) -> f64 {
    top
}

/// Mean of both values.
#[inline]
pub fn average(bottom: f64, top: f64) -> f64 {
    (bottom + top) * 0.5
}

/// Product.
#[inline]
pub fn multiply(bottom: f64, top: f64) -> f64 {
    bottom * top
}

/// Inverted product of inverses.
#[inline]
pub fn screen(bottom: f64, top: f64) -> f64 {
    1.0 - (1.0 - bottom) * (1.0 - top)
}

/// Minimum.
#[inline]
pub fn darken(bottom: f64, top: f64) -> f64 {
    bottom.min(top)
}

/// Maximum.
#[inline]
pub fn brighten(bottom: f64, top: f64) -> f64 {
    bottom.max(top)
}

/// Absolute difference.
#[inline]
pub fn difference(bottom: f64, top: f64) -> f64 {
    (bottom - top).abs()
}

/// Sum, may exceed `1`.
#[inline]
pub fn addition(bottom: f64, top: f64) -> f64 {
    bottom + top
}

/// `bottom + top - 1`, may go below `0`.
#[inline]
pub fn subtraction(bottom: f64, top: f64) -> f64 {
    bottom + top - 1.0
}

/// `bottom² / (1 - top)`.
#[inline]
pub fn reflect(bottom: f64, top: f64) -> f64 {
    if top == 1.0 {
        if bottom == 0.0 { 0.0 } else { 1.0 }
    } else {
        bottom * bottom / (1.0 - top)
    }
}

/// Multiply or screen, depending on the bottom value.
#[inline]
pub fn overlay(bottom: f64, top: f64) -> f64 {
    if bottom < 0.5 {
        2.0 * bottom * top
    } else {
        1.0 - 2.0 * (1.0 - bottom) * (1.0 - top)
    }
}

/// Multiply or screen, depending on the top value.
#[inline]
pub fn hardlight(bottom: f64, top: f64) -> f64 {
    if top < 0.5 {
        2.0 * bottom * top
    } else {
        1.0 - 2.0 * (1.0 - bottom) * (1.0 - top)
    }
}

/// Soft light.
#[inline]
pub fn softlight(bottom: f64, top: f64) -> f64 {
    let c = bottom * top;
    c + bottom * (1.0 - (1.0 - bottom) * (1.0 - top) - c)
}

/// `bottom / (1 - top)`.
#[inline]
pub fn dodge(bottom: f64, top: f64) -> f64 {
    if top == 1.0 { 1.0 } else { bottom / (1.0 - top) }
}

/// Built-in blend modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blending {
    /// Top replaces bottom.
    #[default]
    Normal,
    /// Mean of bottom and top.
    Average,
    /// Darken by multiplication.
    Multiply,
    /// Lighten (inverse multiply).
    Screen,
    /// Channel minimum.
    Darken,
    /// Channel maximum.
    Brighten,
    /// Absolute difference.
    Difference,
    /// Unclamped sum.
    Addition,
    /// Unclamped `b + t - 1`.
    Subtraction,
    /// Reflect.
    Reflect,
    /// Contrast by bottom value.
    Overlay,
    /// Contrast by top value.
    Hardlight,
    /// Soft light.
    Softlight,
    /// Color dodge.
    Dodge,
}

impl Blending {
    /// All modes, in declaration order.
    pub const ALL: [Blending; 14] = [
        Self::Normal,
        Self::Average,
        Self::Multiply,
        Self::Screen,
        Self::Darken,
        Self::Brighten,
        Self::Difference,
        Self::Addition,
        Self::Subtraction,
        Self::Reflect,
        Self::Overlay,
        Self::Hardlight,
        Self::Softlight,
        Self::Dodge,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Average => "average",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Darken => "darken",
            Self::Brighten => "brighten",
            Self::Difference => "difference",
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Reflect => "reflect",
            Self::Overlay => "overlay",
            Self::Hardlight => "hardlight",
            Self::Softlight => "softlight",
            Self::Dodge => "dodge",
        }
    }

    /// The blend function of this mode.
    pub const fn function(self) -> BlendFunction {
        match self {
            Self::Normal => normal,
            Self::Average => average,
            Self::Multiply => multiply,
            Self::Screen => screen,
            Self::Darken => darken,
            Self::Brighten => brighten,
            Self::Difference => difference,
            Self::Addition => addition,
            Self::Subtraction => subtraction,
            Self::Reflect => reflect,
            Self::Overlay => overlay,
            Self::Hardlight => hardlight,
            Self::Softlight => softlight,
            Self::Dodge => dodge,
        }
    }

    /// Blends one channel pair.
    #[inline]
    pub fn apply(self, bottom: f64, top: f64) -> f64 {
        (self.function())(bottom, top)
    }
}

impl fmt::Display for Blending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Blending {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpsError::UnknownBlendMode(s.to_string()))
    }
}

/// Blends `top` onto `bottom` channel by channel, ignoring both alphas.
///
/// The bottom alpha is kept.
#[inline]
pub fn blend<B, T>(bottom: &mut B, top: &T, func: BlendFunction)
where
    B: PixelBaseMut + ?Sized,
    T: PixelBase + ?Sized,
{
    let r = func(bottom.r(), top.r());
    let g = func(bottom.g(), top.g());
    let b = func(bottom.b(), top.b());
    bottom.set_rgb_preserve_alpha(r, g, b);
}

/// Blends `top` onto `bottom`, weighting the blend by `opacity * top alpha`.
///
/// ```text
/// eo = opacity * top.a
/// a  = clamp01(eo + bottom.a)
/// c  = eo * func(bottom.c, top.c) + (1 - eo) * bottom.c
/// ```
#[inline]
pub fn alpha_blend<B, T>(bottom: &mut B, top: &T, opacity: f64, func: BlendFunction)
where
    B: PixelBaseMut + ?Sized,
    T: PixelBase + ?Sized,
{
    let (a, r, g, b) = alpha_blend_channels(
        [bottom.a(), bottom.r(), bottom.g(), bottom.b()],
        [top.a(), top.r(), top.g(), top.b()],
        opacity,
        func,
    );
    bottom.set_argb(a, r, g, b);
}

#[inline]
fn alpha_blend_channels(
    [ba, br, bg, bb]: [f64; 4],
    [ta, tr, tg, tb]: [f64; 4],
    opacity: f64,
    func: BlendFunction,
) -> (f64, f64, f64, f64) {
    let eo = opacity * ta;
    let a = (eo + ba).clamp(0.0, 1.0);
    let mix = |b: f64, t: f64| eo * func(b, t) + (1.0 - eo) * b;
    (a, mix(br, tr), mix(bg, tg), mix(bb, tb))
}

/// [`blend`] on packed ARGB values.
pub fn blend_argb(bottom: u32, top: u32, func: BlendFunction) -> u32 {
    let ch = |shift: u32| {
        let b = argb::from_8bit((bottom >> shift) & 0xff);
        let t = argb::from_8bit((top >> shift) & 0xff);
        argb::to_8bit(func(b, t))
    };
    argb::argb_fast(argb::a(bottom), ch(16), ch(8), ch(0))
}

/// [`alpha_blend`] on packed ARGB values.
pub fn alpha_blend_argb(bottom: u32, top: u32, opacity: f64, func: BlendFunction) -> u32 {
    let unpack = |v: u32| {
        [
            argb::a_normalized(v),
            argb::r_normalized(v),
            argb::g_normalized(v),
            argb::b_normalized(v),
        ]
    };
    let (a, r, g, b) = alpha_blend_channels(unpack(bottom), unpack(top), opacity, func);
    argb::argb_from_normalized(a, r, g, b)
}
