//! RGB <-> HSV (hexcone model).
//!
//! Continuous values: hue in `[0, 1)` (one full turn), saturation and value
//! in `[0, 1]`. Achromatic colors (`max == min`) get hue `0`.
//!
//! Discrete (packed) layout, alpha untouched:
//!
//! ```text
//! 0xAA HH SS VV
//!      │  │  └── round(v * 255)
//!      │  └───── round(s * 255)
//!      └──────── round(h * 256) mod 256
//! ```
//!
//! The hue byte uses 256 steps per turn, so `h = 1.0` wraps back to `0`.

use pixkit_core::argb;

/// Continuous RGB to HSV.
pub fn rgb_to_hsv([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta <= 0.0 {
        return [0.0, s, max];
    }

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let h = sector / 6.0;
    [if h >= 1.0 { h - 1.0 } else { h }, s, max]
}

/// Continuous HSV to RGB. Hue wraps, so any real hue is accepted.
pub fn hsv_to_rgb([h, s, v]: [f64; 3]) -> [f64; 3] {
    if s <= 0.0 {
        return [v, v, v];
    }
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Packed RGB to packed HSV, alpha preserved.
pub fn rgb_to_hsv_argb(value: u32) -> u32 {
    let [h, s, v] = rgb_to_hsv([
        argb::r_normalized(value),
        argb::g_normalized(value),
        argb::b_normalized(value),
    ]);
    let hue = (h * 256.0).round() as u32 & 0xff;
    argb::argb_fast(argb::a(value), hue, argb::to_8bit(s), argb::to_8bit(v))
}

/// Packed HSV to packed RGB, alpha preserved.
pub fn hsv_to_rgb_argb(value: u32) -> u32 {
    let [r, g, b] = hsv_to_rgb([
        argb::r(value) as f64 / 256.0,
        argb::g_normalized(value),
        argb::b_normalized(value),
    ]);
    argb::argb_fast(argb::a(value), argb::to_8bit(r), argb::to_8bit(g), argb::to_8bit(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0]);
        assert_abs_diff_eq!(rgb_to_hsv([0.0, 1.0, 0.0])[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rgb_to_hsv([0.0, 0.0, 1.0])[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rgb_to_hsv([1.0, 0.0, 1.0])[0], 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_achromatic_hue_zero() {
        assert_eq!(rgb_to_hsv([0.4, 0.4, 0.4]), [0.0, 0.0, 0.4]);
        assert_eq!(rgb_to_hsv([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(hsv_to_rgb([0.7, 0.0, 0.4]), [0.4, 0.4, 0.4]);
    }

    #[test]
    fn test_roundtrip() {
        for rgb in [[0.2, 0.5, 0.9], [0.9, 0.1, 0.3], [0.5, 0.5, 0.2], [1.0, 0.999, 0.0]] {
            let back = hsv_to_rgb(rgb_to_hsv(rgb));
            for c in 0..3 {
                assert_abs_diff_eq!(back[c], rgb[c], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_discrete_layout() {
        // pure blue: h = 2/3 -> 171, s = v = 255
        assert_eq!(rgb_to_hsv_argb(0x7f0000ff), 0x7fabffff);
        assert_eq!(hsv_to_rgb_argb(0x7fabffff) & 0xff000000, 0x7f000000);
        assert_eq!(rgb_to_hsv_argb(argb::WHITE), 0xff0000ff);
        assert_eq!(hsv_to_rgb_argb(0xff0000ff), argb::WHITE);
    }
}
