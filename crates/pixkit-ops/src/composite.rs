//! Positioned blending of one image onto another.
//!
//! The top image is placed with its origin at `(ox, oy)` in bottom
//! coordinates. Every bottom pixel `(x, y)` maps to the top pixel
//! `(x - ox, y - oy)`:
//!
//! ```text
//!  bottom
//! +--------------------------+
//! |        (ox, oy)          |
//! |           +-----------+  |
//! |           |    top    |  |
//! |           +-----------+  |
//! +--------------------------+
//! ```
//!
//! Bottom pixels whose mapped point falls outside the top image are left
//! untouched. No boundary mode is involved.
//!
//! Any combination of packed and planar images works, since both sides are
//! accessed through [`PixelBase`] cursors. The top image is only read, so
//! all partitions share it.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{Img, IterationConfig};
//! use pixkit_ops::{Blending, composite};
//!
//! let mut bottom = Img::filled(8, 8, 0xff000000).unwrap();
//! let top = Img::filled(2, 2, 0xffffffff).unwrap();
//! composite::blend_with(
//!     &mut bottom,
//!     &top,
//!     3,
//!     3,
//!     Blending::Normal.function(),
//!     &IterationConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(bottom.get(3, 3), 0xffffffff);
//! assert_eq!(bottom.get(4, 4), 0xffffffff);
//! assert_eq!(bottom.get(5, 5), 0xff000000);
//! ```

use pixkit_core::{ImgBase, IterationConfig, PixelBase, PixelBaseMut, PixelManipulator};
use tracing::debug;

use crate::blend::{BlendFunction, alpha_blend, blend};
use crate::{OpsError, OpsResult};

/// Per-partition cursor into the top image.
#[derive(Debug)]
pub struct TopCursor<P> {
    px: P,
    inside: bool,
}

impl<P: PixelBase> TopCursor<P> {
    fn new(px: P) -> Self {
        Self { px, inside: false }
    }

    /// Moves onto the top pixel under bottom pixel `(x, y)`.
    ///
    /// Returns `false` (and leaves the cursor where it was) when there is none.
    #[inline]
    fn seek(&mut self, x: u32, y: u32, ox: i32, oy: i32) -> bool {
        let tx = x as i64 - ox as i64;
        let ty = y as i64 - oy as i64;
        self.inside = tx >= 0
            && ty >= 0
            && tx < self.px.source_width() as i64
            && ty < self.px.source_height() as i64;
        if self.inside {
            self.px.set_position(tx as u32, ty as u32);
        }
        self.inside
    }
}

/// Blends an offset top image onto every pixel it covers.
///
/// Built by [`blend_with`]; usable directly with
/// [`ImgBase::for_each_with`].
#[derive(Debug)]
pub struct BlendWith<'t, T> {
    top: &'t T,
    ox: i32,
    oy: i32,
    func: BlendFunction,
}

impl<'t, T: ImgBase> BlendWith<'t, T> {
    /// Top image at `(ox, oy)`, combined with `func`.
    pub fn new(top: &'t T, ox: i32, oy: i32, func: BlendFunction) -> Self {
        Self { top, ox, oy, func }
    }
}

impl<'t, T: ImgBase + 't> PixelManipulator for BlendWith<'t, T> {
    type Element = TopCursor<T::Pixel<'t>>;

    fn allocate_element(&self) -> Self::Element {
        let top: &'t T = self.top;
        TopCursor::new(top.pixel(0, 0))
    }

    #[inline]
    fn bind<P: PixelBase>(&self, px: &P, element: &mut Self::Element) {
        element.seek(px.x(), px.y(), self.ox, self.oy);
    }

    #[inline]
    fn apply<P: PixelBaseMut>(&self, px: &mut P, element: &mut Self::Element) -> pixkit_core::Result<()> {
        if element.inside {
            blend(px, &element.px, self.func);
        }
        Ok(())
    }
}

/// Alpha-blends an offset top image onto every pixel it covers.
///
/// Built by [`alpha_blend_with`], which validates the opacity.
#[derive(Debug)]
pub struct AlphaBlendWith<'t, T> {
    inner: BlendWith<'t, T>,
    opacity: f64,
}

impl<'t, T: ImgBase> AlphaBlendWith<'t, T> {
    /// Top image at `(ox, oy)` with `opacity` in `[0, 1]`.
    pub fn new(top: &'t T, ox: i32, oy: i32, opacity: f64, func: BlendFunction) -> OpsResult<Self> {
        check_opacity(opacity)?;
        Ok(Self {
            inner: BlendWith::new(top, ox, oy, func),
            opacity,
        })
    }
}

impl<'t, T: ImgBase + 't> PixelManipulator for AlphaBlendWith<'t, T> {
    type Element = TopCursor<T::Pixel<'t>>;

    fn allocate_element(&self) -> Self::Element {
        self.inner.allocate_element()
    }

    #[inline]
    fn bind<P: PixelBase>(&self, px: &P, element: &mut Self::Element) {
        self.inner.bind(px, element);
    }

    #[inline]
    fn apply<P: PixelBaseMut>(&self, px: &mut P, element: &mut Self::Element) -> pixkit_core::Result<()> {
        if element.inside {
            alpha_blend(px, &element.px, self.opacity, self.inner.func);
        }
        Ok(())
    }
}

fn check_opacity(opacity: f64) -> OpsResult<()> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!(
            "opacity must be in [0, 1], got {opacity}"
        )))
    }
}

/// Blends `top`, placed at `(ox, oy)`, onto `bottom`.
///
/// Only RGB is combined; bottom alpha is kept.
pub fn blend_with<B, T>(
    bottom: &mut B,
    top: &T,
    ox: i32,
    oy: i32,
    func: BlendFunction,
    config: &IterationConfig,
) -> OpsResult<()>
where
    B: ImgBase,
    T: ImgBase,
{
    debug!(
        bottom_width = bottom.width(),
        bottom_height = bottom.height(),
        top_width = top.width(),
        top_height = top.height(),
        ox,
        oy,
        "Blending positioned image"
    );
    bottom.for_each_with(&BlendWith::new(top, ox, oy, func), config)?;
    Ok(())
}

/// Alpha-blends `top`, placed at `(ox, oy)`, onto `bottom`.
///
/// See [`alpha_blend`](crate::alpha_blend) for the per-pixel formula.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `opacity` is not in `[0, 1]`; the
/// bottom image is not touched in that case.
pub fn alpha_blend_with<B, T>(
    bottom: &mut B,
    top: &T,
    ox: i32,
    oy: i32,
    opacity: f64,
    func: BlendFunction,
    config: &IterationConfig,
) -> OpsResult<()>
where
    B: ImgBase,
    T: ImgBase,
{
    let manipulator = AlphaBlendWith::new(top, ox, oy, opacity, func)?;
    debug!(
        bottom_width = bottom.width(),
        bottom_height = bottom.height(),
        top_width = top.width(),
        top_height = top.height(),
        ox,
        oy,
        opacity,
        "Alpha blending positioned image"
    );
    bottom.for_each_with(&manipulator, config)?;
    Ok(())
}
