//! Boundary addressing for out-of-range pixel coordinates.
//!
//! A [`BoundaryMode`] maps any integer coordinate onto the valid range
//! `[0, extent)` of one image axis, or signals that the zero value of the
//! channel should be used instead.
//!
//! ```text
//! extent = 4, coordinates -5 ..= 8
//!
//! coord         -5 -4 -3 -2 -1 | 0  1  2  3 | 4  5  6  7  8
//! Zero           -  -  -  -  - | 0  1  2  3 | -  -  -  -  -
//! RepeatEdge     0  0  0  0  0 | 0  1  2  3 | 3  3  3  3  3
//! RepeatImage    3  0  1  2  3 | 0  1  2  3 | 0  1  2  3  0
//! Mirror         3  3  2  1  0 | 0  1  2  3 | 3  2  1  0  0
//! ```
//!
//! All modes are the identity for in-range coordinates. Resolution is done
//! in `i64`, so every `i32` coordinate is handled, however far out of range.

use std::fmt;
use std::str::FromStr;

/// Policy for reading pixels outside the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Out-of-range reads yield the zero value (transparent black).
    #[default]
    Zero,
    /// Reflect at the borders with period `2 * extent`, repeating the edge pixel.
    Mirror,
    /// Clamp to the nearest edge pixel.
    RepeatEdge,
    /// Wrap around, tiling the image.
    RepeatImage,
}

impl BoundaryMode {
    /// All boundary modes, in declaration order.
    pub const ALL: [BoundaryMode; 4] = [
        BoundaryMode::Zero,
        BoundaryMode::Mirror,
        BoundaryMode::RepeatEdge,
        BoundaryMode::RepeatImage,
    ];

    /// Stable name of this mode.
    pub const fn name(self) -> &'static str {
        match self {
            BoundaryMode::Zero => "zero",
            BoundaryMode::Mirror => "mirror",
            BoundaryMode::RepeatEdge => "repeat_edge",
            BoundaryMode::RepeatImage => "repeat_image",
        }
    }

    /// Resolves `coord` against an axis of length `extent`.
    ///
    /// Returns `None` when the zero value should be substituted
    /// (only [`BoundaryMode::Zero`] does this).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `extent` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::BoundaryMode;
    ///
    /// assert_eq!(BoundaryMode::Zero.resolve(-1, 4), None);
    /// assert_eq!(BoundaryMode::RepeatEdge.resolve(-10, 4), Some(0));
    /// assert_eq!(BoundaryMode::RepeatImage.resolve(-1, 4), Some(3));
    /// assert_eq!(BoundaryMode::Mirror.resolve(4, 4), Some(3));
    /// ```
    #[inline]
    pub fn resolve(self, coord: i32, extent: u32) -> Option<u32> {
        debug_assert!(extent > 0, "extent must be > 0");
        let c = coord as i64;
        let e = extent as i64;
        if (0..e).contains(&c) {
            return Some(coord as u32);
        }
        let resolved = match self {
            BoundaryMode::Zero => return None,
            BoundaryMode::RepeatEdge => c.clamp(0, e - 1),
            BoundaryMode::RepeatImage => c.rem_euclid(e),
            BoundaryMode::Mirror => {
                let p = 2 * e;
                let r = c.rem_euclid(p);
                if r >= e { p - 1 - r } else { r }
            }
        };
        Some(resolved as u32)
    }

    /// Resolves both axes of a coordinate pair.
    ///
    /// Returns `None` if either axis signals the zero value.
    #[inline]
    pub fn resolve_xy(self, x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32)> {
        Some((self.resolve(x, width)?, self.resolve(y, height)?))
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoundaryMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown boundary mode: {s}"))
    }
}
