//! Packed ARGB channel helpers.
//!
//! A packed pixel is a `u32` laid out as `0xAARRGGBB`:
//!
//! ```text
//! bit  31      24 23      16 15       8 7        0
//!      [ alpha  ] [  red   ] [ green  ] [  blue  ]
//! ```
//!
//! The `*_fast` constructors assume their arguments already fit in 8 bits.
//! The `*_bounded` constructors clamp to `[0, 255]`, the plain ones mask.

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Opaque black.
pub const BLACK: u32 = 0xff00_0000;

/// Opaque white.
pub const WHITE: u32 = 0xffff_ffff;

/// Alpha channel (bits 24..32).
#[inline]
pub const fn a(argb: u32) -> u32 {
    argb >> 24
}

/// Red channel (bits 16..24).
#[inline]
pub const fn r(argb: u32) -> u32 {
    (argb >> 16) & 0xff
}

/// Green channel (bits 8..16).
#[inline]
pub const fn g(argb: u32) -> u32 {
    (argb >> 8) & 0xff
}

/// Blue channel (bits 0..8).
#[inline]
pub const fn b(argb: u32) -> u32 {
    argb & 0xff
}

/// Extracts `num_bits` starting at bit `start`.
///
/// ```rust
/// use pixkit_core::argb;
///
/// assert_eq!(argb::ch(0xffaa1244, 4, 16), 0xa124);
/// ```
#[inline]
pub const fn ch(value: u32, start: u32, num_bits: u32) -> u32 {
    let mask = if num_bits >= 32 { u32::MAX } else { (1 << num_bits) - 1 };
    (value >> start) & mask
}

/// Packs four channels that are known to be in `[0, 255]`.
#[inline]
pub const fn argb_fast(a: u32, r: u32, g: u32, b: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Packs three channels that are known to be in `[0, 255]`, alpha = 255.
#[inline]
pub const fn rgb_fast(r: u32, g: u32, b: u32) -> u32 {
    argb_fast(0xff, r, g, b)
}

/// Packs four channels, masking each to its lowest 8 bits.
#[inline]
pub const fn argb(a: u32, r: u32, g: u32, b: u32) -> u32 {
    argb_fast(a & 0xff, r & 0xff, g & 0xff, b & 0xff)
}

/// Packs three channels, masking each to its lowest 8 bits, alpha = 255.
#[inline]
pub const fn rgb(r: u32, g: u32, b: u32) -> u32 {
    argb(0xff, r, g, b)
}

/// Packs four channels, clamping each to `[0, 255]`.
#[inline]
pub fn argb_bounded(a: i32, r: i32, g: i32, b: i32) -> u32 {
    let c = |v: i32| v.clamp(0, 0xff) as u32;
    argb_fast(c(a), c(r), c(g), c(b))
}

/// Packs three channels, clamping each to `[0, 255]`, alpha = 255.
#[inline]
pub fn rgb_bounded(r: i32, g: i32, b: i32) -> u32 {
    argb_bounded(0xff, r, g, b)
}

/// Concatenates channels of `bits_per_channel` bits each, first argument highest.
///
/// ```rust
/// use pixkit_core::argb;
///
/// assert_eq!(argb::combine_ch(2, &[0b10, 0b10, 0b11, 0b10]), 0b10101110);
/// ```
pub fn combine_ch(bits_per_channel: u32, channels: &[u32]) -> u32 {
    let mask = ch(u32::MAX, 0, bits_per_channel);
    channels
        .iter()
        .fold(0, |acc, &c| (acc << bits_per_channel) | (c & mask))
}

/// Quantizes a normalized value to `[0, 255]` (rounded, clamped; NaN -> 0).
#[inline]
pub fn to_8bit(v: f64) -> u32 {
    let q = (v * 255.0).round();
    if q >= 255.0 {
        255
    } else if q > 0.0 {
        q as u32
    } else {
        0
    }
}

/// Converts an 8-bit channel to a normalized value in `[0, 1]`.
#[inline]
pub fn from_8bit(c: u32) -> f64 {
    c as f64 / 255.0
}

/// Packs normalized channels (rounded and clamped).
#[inline]
pub fn argb_from_normalized(a: f64, r: f64, g: f64, b: f64) -> u32 {
    argb_fast(to_8bit(a), to_8bit(r), to_8bit(g), to_8bit(b))
}

/// Packs normalized channels with alpha = 255.
#[inline]
pub fn rgb_from_normalized(r: f64, g: f64, b: f64) -> u32 {
    argb_from_normalized(1.0, r, g, b)
}

/// Normalized alpha.
#[inline]
pub fn a_normalized(argb: u32) -> f64 {
    from_8bit(a(argb))
}

/// Normalized red.
#[inline]
pub fn r_normalized(argb: u32) -> f64 {
    from_8bit(r(argb))
}

/// Normalized green.
#[inline]
pub fn g_normalized(argb: u32) -> f64 {
    from_8bit(g(argb))
}

/// Normalized blue.
#[inline]
pub fn b_normalized(argb: u32) -> f64 {
    from_8bit(b(argb))
}

/// Weighted grey value `(r*wr + g*wg + b*wb) / (wr + wg + wb)`, in `[0, 255]`.
///
/// Integer arithmetic, so the result is truncated. All-zero weights give 0.
#[inline]
pub fn grey(argb: u32, red_weight: u32, green_weight: u32, blue_weight: u32) -> u32 {
    let (wr, wg, wb) = (red_weight as u64, green_weight as u64, blue_weight as u64);
    let sum = wr + wg + wb;
    if sum == 0 {
        return 0;
    }
    ((r(argb) as u64 * wr + g(argb) as u64 * wg + b(argb) as u64 * wb) / sum) as u32
}

/// Rec.709 luminance of normalized RGB values.
#[inline]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    r * REC709_LUMA_R + g * REC709_LUMA_G + b * REC709_LUMA_B
}

/// Rec.709 luminance of a packed pixel, in `[0, 255]`.
#[inline]
pub fn luminance_8bit(argb: u32) -> f64 {
    luminance(r(argb) as f64, g(argb) as f64, b(argb) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_extraction() {
        let color = 0xffaa1244;
        assert_eq!(a(color), 0xff);
        assert_eq!(r(color), 0xaa);
        assert_eq!(g(color), 0x12);
        assert_eq!(b(color), 0x44);
        assert_eq!(ch(color, 4, 16), 0xa124);
        assert_eq!(ch(color, 0, 8), 0x44);
        assert_eq!(ch(color, 0, 32), color);
    }

    #[test]
    fn test_packing() {
        assert_eq!(argb_fast(0x01, 0x00, 0x12, 0x34), 0x01001234);
        assert_eq!(rgb_fast(0x54, 0x32, 0x10), 0xff543210);
        assert_eq!(rgb_bounded(-12, 260, 0x54), 0xff00ff54);
        assert_eq!(rgb(0x15ff, 0xaff, 0x5cff), 0xffffffff);
        assert_eq!(combine_ch(2, &[0b10, 0b10, 0b11, 0b10]), 0b10101110);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(to_8bit(1.0), 255);
        assert_eq!(to_8bit(1.7), 255);
        assert_eq!(to_8bit(-0.3), 0);
        assert_eq!(to_8bit(f64::NAN), 0);
        assert_eq!(to_8bit(0.5), 128);
        for c in 0..=255 {
            assert_eq!(to_8bit(from_8bit(c)), c);
        }
        assert_eq!(argb_from_normalized(1.0, 0.0, 1.0, 0.0), 0xffff00ff);
    }

    #[test]
    fn test_grey_and_luminance() {
        assert_eq!(grey(0xff030609, 1, 1, 1), 6);
        assert_eq!(grey(0xff030609, 0, 0, 0), 0);
        assert_eq!(grey(0xffff00ff, u32::MAX, u32::MAX, 0), 127);
        assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-12);
        assert!((luminance_8bit(WHITE) - 255.0).abs() < 1e-9);
        assert_eq!(luminance_8bit(BLACK), 0.0);
    }
}
