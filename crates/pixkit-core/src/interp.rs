//! Bilinear sampling at normalized coordinates.
//!
//! `u` and `v` address the image in `[0, 1]`: `(0, 0)` is the center of the
//! top-left pixel, `(1, 1)` the center of the bottom-right one. The four
//! neighbours are read with [`BoundaryMode::RepeatEdge`], so coordinates
//! slightly outside the range (or images one pixel wide) are safe.
//!
//! ```text
//! x = u * (w - 1)        x0 = floor(x)   fx = x - x0
//! y = v * (h - 1)        y0 = floor(y)   fy = y - y0
//!
//! p = (1-fx)(1-fy)*p00 + fx(1-fy)*p10 + (1-fx)fy*p01 + fx*fy*p11
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{Channel, ColorImg};
//!
//! let mut img = ColorImg::new(2, 1, false);
//! img.set(Channel::R, 1, 0, 1.0);
//! assert_eq!(img.interpolate(Channel::R, 0.25, 0.0), 0.25);
//! ```

use crate::{BoundaryMode, Channel, ColorImg, Img, argb};

const SAMPLING: BoundaryMode = BoundaryMode::RepeatEdge;

/// Neighbour position and weights for one bilinear sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bilinear {
    /// Left neighbour column
    pub x0: i32,
    /// Top neighbour row
    pub y0: i32,
    /// Weights of `(x0,y0)`, `(x0+1,y0)`, `(x0,y0+1)`, `(x0+1,y0+1)`
    pub weights: [f64; 4],
}

impl Bilinear {
    /// Computes neighbours and weights of `(u, v)` on a `width x height` grid.
    #[inline]
    pub fn new(u: f64, v: f64, width: u32, height: u32) -> Self {
        let (x0, fx) = split(u, width);
        let (y0, fy) = split(v, height);
        Self {
            x0,
            y0,
            weights: [
                (1.0 - fx) * (1.0 - fy),
                fx * (1.0 - fy),
                (1.0 - fx) * fy,
                fx * fy,
            ],
        }
    }

    /// Neighbour coordinates in weight order.
    #[inline]
    pub fn taps(&self) -> [(i32, i32); 4] {
        let (x1, y1) = (self.x0.saturating_add(1), self.y0.saturating_add(1));
        [(self.x0, self.y0), (x1, self.y0), (self.x0, y1), (x1, y1)]
    }

    /// Weighted sum of `sample` over the four neighbours.
    #[inline]
    pub fn sample(&self, mut sample: impl FnMut(i32, i32) -> f64) -> f64 {
        self.taps()
            .iter()
            .zip(self.weights)
            .map(|(&(x, y), w)| w * sample(x, y))
            .sum()
    }
}

/// Integer part and fraction of `t * (extent - 1)`.
#[inline]
fn split(t: f64, extent: u32) -> (i32, f64) {
    if extent <= 1 {
        return (0, 0.0);
    }
    let p = t * (extent - 1) as f64;
    let p0 = p.floor();
    (p0 as i32, p - p0)
}

impl Img {
    /// Bilinear sample at `(u, v)`, interpolating each 8-bit channel and
    /// rounding the result.
    pub fn interpolate(&self, u: f64, v: f64) -> u32 {
        let bl = Bilinear::new(u, v, self.width(), self.height());
        let taps = bl.taps().map(|(x, y)| self.get_value(x, y, SAMPLING));
        let channel = |shift: u32| {
            let c: f64 = taps
                .iter()
                .zip(bl.weights)
                .map(|(&p, w)| w * ((p >> shift) & 0xff) as f64)
                .sum();
            (c.round().clamp(0.0, 255.0)) as u32
        };
        argb::argb_fast(channel(24), channel(16), channel(8), channel(0))
    }
}

impl ColorImg {
    /// Bilinear sample of `channel` at `(u, v)`.
    pub fn interpolate(&self, channel: Channel, u: f64, v: f64) -> f64 {
        Bilinear::new(u, v, self.width(), self.height())
            .sample(|x, y| self.value(channel, x, y, SAMPLING))
    }
}
