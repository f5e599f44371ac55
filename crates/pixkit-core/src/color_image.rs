//! Planar floating-point raster.
//!
//! [`ColorImg`] keeps one row-major `Vec<f64>` per channel. Red, green and
//! blue are always present; alpha is optional. Without an alpha plane every
//! pixel reads as opaque (`1.0`) and alpha writes are dropped.
//!
//! Values are stored as given. Nothing clamps them to `[0, 1]`, so a planar
//! image can hold intermediate results such as negative L\*a\*b\* chroma or
//! unclamped blend sums. [`ColorImg::to_img`] clamps on conversion.

use std::fmt;
use std::ops::Range;

use tracing::trace;

use crate::image::checked_len;
use crate::parallel::{self, PartitionCursor};
use crate::pixel::fmt_pixel;
use crate::{
    BoundaryMode, CopyRegion, Error, Img, ImgBase, IterationConfig, PixelBase, PixelBaseMut,
    PixelManipulator, Rect, Result, argb,
};

/// Channel selector for planar access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Alpha
    A,
    /// Red
    R,
    /// Green
    G,
    /// Blue
    B,
}

impl Channel {
    /// All channels in ARGB order.
    pub const ALL: [Channel; 4] = [Channel::A, Channel::R, Channel::G, Channel::B];
}

/// A planar ARGB image with `f64` channels.
#[derive(Clone, PartialEq)]
pub struct ColorImg {
    width: u32,
    height: u32,
    r: Vec<f64>,
    g: Vec<f64>,
    b: Vec<f64>,
    a: Option<Vec<f64>>,
}

impl ColorImg {
    /// Creates a black image; transparent if `has_alpha`, opaque otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn try_new(width: u32, height: u32, has_alpha: bool) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            r: vec![0.0; len],
            g: vec![0.0; len],
            b: vec![0.0; len],
            a: has_alpha.then(|| vec![0.0; len]),
        })
    }

    /// Creates a black image.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Self {
        match Self::try_new(width, height, has_alpha) {
            Ok(img) => img,
            Err(e) => panic!("{e}"),
        }
    }

    /// Wraps existing channel planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a plane does not hold exactly
    /// `width * height` values.
    pub fn from_channels(
        width: u32,
        height: u32,
        r: Vec<f64>,
        g: Vec<f64>,
        b: Vec<f64>,
        a: Option<Vec<f64>>,
    ) -> Result<Self> {
        let expected = checked_len(width, height)?;
        let planes = [Some(&r), Some(&g), Some(&b), a.as_ref()];
        if let Some(bad) = planes.into_iter().flatten().find(|p| p.len() != expected) {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} values per channel, got {}", expected, bad.len()),
            ));
        }
        Ok(Self { width, height, r, g, b, a })
    }

    /// Converts a packed image, normalizing channels to `[0, 1]`.
    ///
    /// The packed alpha is kept only if `has_alpha`.
    pub fn from_img(img: &Img, has_alpha: bool) -> Self {
        let data = img.data();
        let plane = |f: fn(u32) -> f64| data.iter().map(|&v| f(v)).collect::<Vec<_>>();
        Self {
            width: img.width(),
            height: img.height(),
            r: plane(argb::r_normalized),
            g: plane(argb::g_normalized),
            b: plane(argb::b_normalized),
            a: has_alpha.then(|| plane(argb::a_normalized)),
        }
    }

    /// Converts to a packed image, clamping and rounding to 8 bit.
    pub fn to_img(&self) -> Img {
        let data = (0..self.num_values())
            .map(|i| argb::argb_from_normalized(self.alpha_at(i), self.r[i], self.g[i], self.b[i]))
            .collect();
        // dimensions were validated on construction
        Img::from_data(self.width, self.height, data)
            .unwrap_or_else(|e| unreachable!("{e}"))
    }

    /// Consumes the image, returning `(r, g, b, a)` planes.
    pub fn into_channels(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Option<Vec<f64>>) {
        (self.r, self.g, self.b, self.a)
    }

    /// Image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.r.len()
    }

    /// Returns `true` if an alpha plane is stored.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.a.is_some()
    }

    /// Plane of `channel`, `None` for alpha on images without alpha.
    pub fn channel(&self, channel: Channel) -> Option<&[f64]> {
        match channel {
            Channel::A => self.a.as_deref(),
            Channel::R => Some(&self.r),
            Channel::G => Some(&self.g),
            Channel::B => Some(&self.b),
        }
    }

    /// Mutable plane of `channel`.
    pub fn channel_mut(&mut self, channel: Channel) -> Option<&mut [f64]> {
        match channel {
            Channel::A => self.a.as_deref_mut(),
            Channel::R => Some(&mut self.r),
            Channel::G => Some(&mut self.g),
            Channel::B => Some(&mut self.b),
        }
    }

    /// Buffer index of `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn alpha_at(&self, index: usize) -> f64 {
        self.a.as_ref().map_or(1.0, |a| a[index])
    }

    /// Value of `channel` at `(x, y)` (alpha is `1.0` without an alpha plane).
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn get(&self, channel: Channel, x: u32, y: u32) -> f64 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.index_of(x, y);
        match channel {
            Channel::A => self.alpha_at(i),
            c => self.channel(c).map_or(0.0, |p| p[i]),
        }
    }

    /// Sets `channel` at `(x, y)`. Alpha writes are ignored without an alpha plane.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn set(&mut self, channel: Channel, x: u32, y: u32, value: f64) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.index_of(x, y);
        if let Some(plane) = self.channel_mut(channel) {
            plane[i] = value;
        }
    }

    /// Value of `channel` at any coordinate, resolved through `mode`.
    ///
    /// [`BoundaryMode::Zero`] yields `0.0` outside the image.
    pub fn value(&self, channel: Channel, x: i32, y: i32, mode: BoundaryMode) -> f64 {
        match mode.resolve_xy(x, y, self.width, self.height) {
            Some((x, y)) => self.get(channel, x, y),
            None => 0.0,
        }
    }

    /// Sets every pixel to the given channel values.
    pub fn fill(&mut self, a: f64, r: f64, g: f64, b: f64) {
        self.r.fill(r);
        self.g.fill(g);
        self.b.fill(b);
        if let Some(plane) = self.a.as_mut() {
            plane.fill(a);
        }
    }

    /// Read cursor at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> ColorPixel<'_> {
        ColorPixel {
            img: self,
            index: self.index_of(x, y),
        }
    }

    /// Read cursors over all pixels in index order.
    pub fn pixels(&self) -> impl Iterator<Item = ColorPixel<'_>> + '_ {
        (0..self.num_values()).map(move |index| ColorPixel { img: self, index })
    }

    /// Copies `area` into `dst` at `(dst_x, dst_y)`, clipping like
    /// [`Img::copy_area_to`].
    ///
    /// If `dst` has alpha and this image does not, the copied alpha is `1.0`.
    pub fn copy_area_to(&self, area: Rect, dst: &mut ColorImg, dst_x: i32, dst_y: i32) {
        let Some(region) = CopyRegion::clip(area, self.dimensions(), dst_x, dst_y, dst.dimensions())
        else {
            trace!(%area, dst_x, dst_y, "copy_area_to: nothing to copy");
            return;
        };
        let (sw, dw) = (self.width, dst.width);
        copy_plane(&self.r, sw, &mut dst.r, dw, &region);
        copy_plane(&self.g, sw, &mut dst.g, dw, &region);
        copy_plane(&self.b, sw, &mut dst.b, dw, &region);
        match (self.a.as_ref(), dst.a.as_mut()) {
            (Some(src), Some(d)) => copy_plane(src, sw, d, dw, &region),
            (None, Some(d)) => {
                for row in 0..region.height as usize {
                    let i = (region.dst_y as usize + row) * dw as usize + region.dst_x as usize;
                    d[i..i + region.width as usize].fill(1.0);
                }
            }
            _ => {}
        }
    }

    /// Copies `area` to `(dst_x, dst_y)` within this image; overlap is safe.
    pub fn copy_area_within(&mut self, area: Rect, dst_x: i32, dst_y: i32) {
        let size = self.dimensions();
        let Some(region) = CopyRegion::clip(area, size, dst_x, dst_y, size) else {
            trace!(%area, dst_x, dst_y, "copy_area_within: nothing to copy");
            return;
        };
        let w = self.width;
        for plane in [Some(&mut self.r), Some(&mut self.g), Some(&mut self.b), self.a.as_mut()]
            .into_iter()
            .flatten()
        {
            let snapshot = plane.clone();
            copy_plane(&snapshot, w, plane, w, &region);
        }
    }

    /// Copies `area` into a new image with the same alpha layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `area` is empty.
    pub fn copy_area(&self, area: Rect) -> Result<ColorImg> {
        let mut out = ColorImg::try_new(area.width, area.height, self.has_alpha())?;
        self.copy_area_to(area, &mut out, 0, 0);
        Ok(out)
    }

    /// Splits the planes into partition cursors of `partition_len` pixels.
    pub fn partitions_mut(&mut self, partition_len: usize) -> Vec<ColorPixelMut<'_>> {
        let (width, height) = self.dimensions();
        let len = partition_len.max(1);
        let mut alpha = self.a.as_mut().map(|a| a.chunks_mut(len));
        self.r
            .chunks_mut(len)
            .zip(self.g.chunks_mut(len))
            .zip(self.b.chunks_mut(len))
            .enumerate()
            .map(|(i, ((r, g), b))| ColorPixelMut {
                r,
                g,
                b,
                a: alpha.as_mut().and_then(Iterator::next),
                start: i * len,
                index: i * len,
                width,
                height,
            })
            .collect()
    }

    /// Calls `op` for every pixel.
    pub fn for_each<F>(&mut self, config: &IterationConfig, op: F)
    where
        F: Fn(&mut ColorPixelMut<'_>) + Sync,
    {
        // infallible op, the run cannot fail
        let _ = self.try_for_each(config, |px| {
            op(px);
            Ok(())
        });
    }

    /// Calls `op` for every pixel, stopping the partition at the first error.
    pub fn try_for_each<F>(&mut self, config: &IterationConfig, op: F) -> Result<()>
    where
        F: Fn(&mut ColorPixelMut<'_>) -> Result<()> + Sync,
    {
        let len = config.partition_len_for(self.num_values());
        let partitions = self.partitions_mut(len);
        parallel::run_partitions(partitions, config, |px| parallel::visit(px, &op))
    }
}

/// Row-wise copy of one plane.
fn copy_plane(src: &[f64], src_w: u32, dst: &mut [f64], dst_w: u32, region: &CopyRegion) {
    let w = region.width as usize;
    for row in 0..region.height as usize {
        let s = (region.src_y as usize + row) * src_w as usize + region.src_x as usize;
        let d = (region.dst_y as usize + row) * dst_w as usize + region.dst_x as usize;
        dst[d..d + w].copy_from_slice(&src[s..s + w]);
    }
}

impl ImgBase for ColorImg {
    type Pixel<'a> = ColorPixel<'a>;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> ColorPixel<'_> {
        ColorImg::pixel(self, x, y)
    }

    fn for_each_with<M: PixelManipulator>(
        &mut self,
        manipulator: &M,
        config: &IterationConfig,
    ) -> Result<()> {
        let len = config.partition_len_for(self.num_values());
        let partitions = self.partitions_mut(len);
        parallel::run_partitions(partitions, config, |px| parallel::manipulate(px, manipulator))
    }
}

impl fmt::Debug for ColorImg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorImg")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_alpha", &self.has_alpha())
            .finish_non_exhaustive()
    }
}

/// Read cursor into a [`ColorImg`].
#[derive(Clone, Copy)]
pub struct ColorPixel<'a> {
    img: &'a ColorImg,
    index: usize,
}

impl PixelBase for ColorPixel<'_> {
    #[inline]
    fn a(&self) -> f64 {
        self.img.alpha_at(self.index)
    }

    #[inline]
    fn r(&self) -> f64 {
        self.img.r[self.index]
    }

    #[inline]
    fn g(&self) -> f64 {
        self.img.g[self.index]
    }

    #[inline]
    fn b(&self) -> f64 {
        self.img.b[self.index]
    }

    #[inline]
    fn source_width(&self) -> u32 {
        self.img.width
    }

    #[inline]
    fn source_height(&self) -> u32 {
        self.img.height
    }

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl fmt::Display for ColorPixel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pixel(self, "ColorPixel", f)
    }
}

/// Mutable cursor over one partition of a [`ColorImg`].
pub struct ColorPixelMut<'a> {
    r: &'a mut [f64],
    g: &'a mut [f64],
    b: &'a mut [f64],
    a: Option<&'a mut [f64]>,
    start: usize,
    index: usize,
    width: u32,
    height: u32,
}

impl ColorPixelMut<'_> {
    #[inline]
    fn offset(&self) -> usize {
        self.index.wrapping_sub(self.start)
    }
}

impl PixelBase for ColorPixelMut<'_> {
    #[inline]
    fn a(&self) -> f64 {
        let i = self.offset();
        self.a.as_ref().map_or(1.0, |a| a[i])
    }

    #[inline]
    fn r(&self) -> f64 {
        self.r[self.offset()]
    }

    #[inline]
    fn g(&self) -> f64 {
        self.g[self.offset()]
    }

    #[inline]
    fn b(&self) -> f64 {
        self.b[self.offset()]
    }

    #[inline]
    fn source_width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn source_height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl PixelBaseMut for ColorPixelMut<'_> {
    #[inline]
    fn set_a(&mut self, a: f64) {
        let i = self.offset();
        if let Some(plane) = self.a.as_deref_mut() {
            plane[i] = a;
        }
    }

    #[inline]
    fn set_r(&mut self, r: f64) {
        let i = self.offset();
        self.r[i] = r;
    }

    #[inline]
    fn set_g(&mut self, g: f64) {
        let i = self.offset();
        self.g[i] = g;
    }

    #[inline]
    fn set_b(&mut self, b: f64) {
        let i = self.offset();
        self.b[i] = b;
    }
}

impl PartitionCursor for ColorPixelMut<'_> {
    #[inline]
    fn range(&self) -> Range<usize> {
        self.start..self.start + self.r.len()
    }
}

impl fmt::Display for ColorPixelMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pixel(self, "ColorPixelMut", f)
    }
}
