//! Pixel cursors and the image abstraction they point into.
//!
//! A pixel cursor is **not** a pixel value. It is an index into the buffer
//! of exactly one image, plus accessors that read and write the channels at
//! that index. Moving a cursor never changes the image; it only changes which
//! pixel the accessors refer to.
//!
//! # Traits
//!
//! - [`PixelBase`] - read access and positioning, shared by every cursor
//! - [`PixelBaseMut`] - channel mutation
//! - [`ImgBase`] - an image that hands out read cursors and runs
//!   [`PixelManipulator`](crate::PixelManipulator)s over its pixels
//!
//! Channels are exchanged as normalized `f64` values: `0.0` is no
//! contribution (or fully transparent), `1.0` is full contribution (or fully
//! opaque). Packed cursors quantize writes to 8 bit; planar cursors store
//! values as given, including values outside `[0, 1]`.
//!
//! # Implementations
//!
//! | cursor | image | access |
//! |---|---|---|
//! | [`Pixel`](crate::Pixel) | [`Img`](crate::Img) | read |
//! | [`PixelMut`](crate::PixelMut) | [`Img`](crate::Img) partition | read/write |
//! | [`ColorPixel`](crate::ColorPixel) | [`ColorImg`](crate::ColorImg) | read |
//! | [`ColorPixelMut`](crate::ColorPixelMut) | [`ColorImg`](crate::ColorImg) partition | read/write |

use std::fmt;

use crate::{IterationConfig, PixelManipulator, Result, argb};

/// Read access to the pixel a cursor currently points at.
pub trait PixelBase {
    /// Alpha in `[0, 1]` (`1.0` if the image has no alpha).
    fn a(&self) -> f64;
    /// Red, nominally in `[0, 1]`.
    fn r(&self) -> f64;
    /// Green, nominally in `[0, 1]`.
    fn g(&self) -> f64;
    /// Blue, nominally in `[0, 1]`.
    fn b(&self) -> f64;

    /// Width of the image this cursor belongs to.
    fn source_width(&self) -> u32;
    /// Height of the image this cursor belongs to.
    fn source_height(&self) -> u32;

    /// Current index, `y * width + x`.
    fn index(&self) -> usize;

    /// Moves the cursor to `index`.
    ///
    /// Indices outside the cursor's accessible range are not checked here;
    /// the next channel access panics instead.
    fn set_index(&mut self, index: usize);

    /// Current x coordinate, `index % width`.
    #[inline]
    fn x(&self) -> u32 {
        (self.index() % self.source_width() as usize) as u32
    }

    /// Current y coordinate, `index / width`.
    #[inline]
    fn y(&self) -> u32 {
        (self.index() / self.source_width() as usize) as u32
    }

    /// Moves the cursor to `(x, y)`.
    #[inline]
    fn set_position(&mut self, x: u32, y: u32) {
        let index = y as usize * self.source_width() as usize + x as usize;
        self.set_index(index);
    }

    /// `x / (width - 1)`: `0` at the left border, `1` at the right.
    ///
    /// NaN for images that are a single pixel wide.
    #[inline]
    fn x_normalized(&self) -> f64 {
        self.x() as f64 / (self.source_width() as f64 - 1.0)
    }

    /// `y / (height - 1)`: `0` at the top border, `1` at the bottom.
    ///
    /// NaN for images that are a single pixel high.
    #[inline]
    fn y_normalized(&self) -> f64 {
        self.y() as f64 / (self.source_height() as f64 - 1.0)
    }

    /// Rec.709 luminance of the current pixel.
    #[inline]
    fn luminance(&self) -> f64 {
        argb::luminance(self.r(), self.g(), self.b())
    }
}

/// Write access to the pixel a cursor currently points at.
pub trait PixelBaseMut: PixelBase {
    /// Sets alpha (ignored by images without alpha).
    fn set_a(&mut self, a: f64);
    /// Sets red.
    fn set_r(&mut self, r: f64);
    /// Sets green.
    fn set_g(&mut self, g: f64);
    /// Sets blue.
    fn set_b(&mut self, b: f64);

    /// Sets all four channels.
    #[inline]
    fn set_argb(&mut self, a: f64, r: f64, g: f64, b: f64) {
        self.set_a(a);
        self.set_r(r);
        self.set_g(g);
        self.set_b(b);
    }

    /// Sets color channels and makes the pixel opaque.
    #[inline]
    fn set_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.set_argb(1.0, r, g, b);
    }

    /// Sets color channels, leaving alpha untouched.
    #[inline]
    fn set_rgb_preserve_alpha(&mut self, r: f64, g: f64, b: f64) {
        self.set_r(r);
        self.set_g(g);
        self.set_b(b);
    }
}

/// An image with `width * height` pixels addressable through cursors.
///
/// Implemented by the packed [`Img`](crate::Img) and the planar
/// [`ColorImg`](crate::ColorImg).
pub trait ImgBase: Sync {
    /// Read cursor type.
    type Pixel<'a>: PixelBase + Send
    where
        Self: 'a;

    /// Image width.
    fn width(&self) -> u32;

    /// Image height.
    fn height(&self) -> u32;

    /// Number of pixels, `width * height`.
    #[inline]
    fn num_values(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Returns a read cursor at `(x, y)`.
    fn pixel(&self, x: u32, y: u32) -> Self::Pixel<'_>;

    /// Runs `manipulator` over every pixel.
    ///
    /// See [`PixelManipulator`] for the allocate/bind/apply/flush protocol
    /// and [`IterationConfig`] for sequential vs. parallel execution.
    fn for_each_with<M: PixelManipulator>(
        &mut self,
        manipulator: &M,
        config: &IterationConfig,
    ) -> Result<()>;
}

/// Formats a cursor as `Name[a:.. r:.. g:.. b:..]@(x,y)`.
pub(crate) fn fmt_pixel<P: PixelBase>(px: &P, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "{}[a:{:.3} r:{:.3} g:{:.3} b:{:.3}]@({},{})",
        name,
        px.a(),
        px.r(),
        px.g(),
        px.b(),
        px.x(),
        px.y()
    )
}
