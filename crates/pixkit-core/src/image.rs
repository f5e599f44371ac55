//! Packed ARGB raster.
//!
//! [`Img`] stores one `u32` per pixel (`0xAARRGGBB`, see [`argb`](crate::argb))
//! in row-major order:
//!
//! ```text
//! index = y * width + x
//!
//! row 0: [0        ] [1          ] ... [w-1    ]
//! row 1: [w        ] [w+1        ] ... [2w-1   ]
//! ...
//! ```
//!
//! Direct access ([`Img::get`], [`Img::set`]) is O(1) and panics out of range.
//! Reads that may leave the image go through [`Img::get_value`] with a
//! [`BoundaryMode`].
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{BoundaryMode, Img};
//!
//! let mut img = Img::new(4, 4);
//! img.set(3, 0, 0xff112233);
//! assert_eq!(img.get_value(4, 0, BoundaryMode::RepeatEdge), 0xff112233);
//! assert_eq!(img.get_value(4, 0, BoundaryMode::Zero), 0);
//! ```

use std::fmt;
use std::ops::Range;

use tracing::trace;

use crate::parallel::{self, PartitionCursor};
use crate::pixel::fmt_pixel;
use crate::{
    BoundaryMode, CopyRegion, Error, ImgBase, IterationConfig, PixelBase, PixelBaseMut,
    PixelManipulator, Rect, Result, argb,
};

/// Checks dimensions and returns the pixel count.
pub(crate) fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

/// A packed ARGB image.
#[derive(Clone, PartialEq, Eq)]
pub struct Img {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Img {
    /// Creates a transparent black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Creates a transparent black image.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        match Self::try_new(width, height) {
            Ok(img) => img,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an image filled with `value`.
    pub fn filled(width: u32, height: u32, value: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or
    /// `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} values, got {}", expected, data.len()),
            ));
        }
        Ok(Self { width, height, data })
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
        self.data.len()
    }

    /// Rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Pixel buffer, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable pixel buffer, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Consumes the image and returns its buffer.
    #[inline]
    pub fn into_data(self) -> Vec<u32> {
        self.data
    }

    /// Buffer index of `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// `(x, y)` of a buffer index.
    #[inline]
    pub fn coords_of(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[self.index_of(x, y)]
    }

    /// Sets the value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.index_of(x, y);
        self.data[i] = value;
    }

    /// Value at any coordinate, resolved through `mode`.
    ///
    /// [`BoundaryMode::Zero`] yields `0` (transparent black) outside the image.
    #[inline]
    pub fn get_value(&self, x: i32, y: i32, mode: BoundaryMode) -> u32 {
        match mode.resolve_xy(x, y, self.width, self.height) {
            Some((x, y)) => self.data[self.index_of(x, y)],
            None => 0,
        }
    }

    /// Sets every pixel to `value`.
    pub fn fill(&mut self, value: u32) {
        self.data.fill(value);
    }

    /// Read cursor at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel<'_> {
        Pixel {
            img: self,
            index: self.index_of(x, y),
        }
    }

    /// Read cursors over all pixels in index order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<'_>> + '_ {
        (0..self.data.len()).map(move |index| Pixel { img: self, index })
    }

    /// Copies `area` of this image into `dst` at `(dst_x, dst_y)`.
    ///
    /// Both rectangles are clipped to their images; cutting one side moves
    /// the other by the same amount. Nothing happens if nothing overlaps.
    pub fn copy_area_to(&self, area: Rect, dst: &mut Img, dst_x: i32, dst_y: i32) {
        let Some(region) = CopyRegion::clip(area, self.dimensions(), dst_x, dst_y, dst.dimensions())
        else {
            trace!(%area, dst_x, dst_y, "copy_area_to: nothing to copy");
            return;
        };
        let w = region.width as usize;
        for row in 0..region.height {
            let s = self.index_of(region.src_x, region.src_y + row);
            let d = dst.index_of(region.dst_x, region.dst_y + row);
            dst.data[d..d + w].copy_from_slice(&self.data[s..s + w]);
        }
    }

    /// Copies `area` to `(dst_x, dst_y)` within this image.
    ///
    /// Source and destination may overlap: the clipped source area is read
    /// completely before anything is written.
    pub fn copy_area_within(&mut self, area: Rect, dst_x: i32, dst_y: i32) {
        let size = self.dimensions();
        let Some(region) = CopyRegion::clip(area, size, dst_x, dst_y, size) else {
            trace!(%area, dst_x, dst_y, "copy_area_within: nothing to copy");
            return;
        };
        let w = region.width as usize;
        let mut snapshot = Vec::with_capacity(w * region.height as usize);
        for row in 0..region.height {
            let s = self.index_of(region.src_x, region.src_y + row);
            snapshot.extend_from_slice(&self.data[s..s + w]);
        }
        for (row, values) in snapshot.chunks_exact(w).enumerate() {
            let d = self.index_of(region.dst_x, region.dst_y + row as u32);
            self.data[d..d + w].copy_from_slice(values);
        }
    }

    /// Copies `area` into a new `area.width x area.height` image.
    ///
    /// Parts of `area` outside this image stay transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `area` is empty.
    pub fn copy_area(&self, area: Rect) -> Result<Img> {
        let mut out = Img::try_new(area.width, area.height)?;
        self.copy_area_to(area, &mut out, 0, 0);
        Ok(out)
    }

    /// Splits the buffer into partition cursors of `partition_len` pixels.
    pub fn partitions_mut(&mut self, partition_len: usize) -> Vec<PixelMut<'_>> {
        let (width, height) = self.dimensions();
        let len = partition_len.max(1);
        self.data
            .chunks_mut(len)
            .enumerate()
            .map(|(i, data)| PixelMut {
                start: i * len,
                index: i * len,
                data,
                width,
                height,
            })
            .collect()
    }

    /// Calls `op` for every pixel.
    pub fn for_each<F>(&mut self, config: &IterationConfig, op: F)
    where
        F: Fn(&mut PixelMut<'_>) + Sync,
    {
        // infallible op, the run cannot fail
        let _ = self.try_for_each(config, |px| {
            op(px);
            Ok(())
        });
    }

    /// Calls `op` for every pixel, stopping the partition at the first error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PartitionFailed`] wrapping the first error reported.
    pub fn try_for_each<F>(&mut self, config: &IterationConfig, op: F) -> Result<()>
    where
        F: Fn(&mut PixelMut<'_>) -> Result<()> + Sync,
    {
        let len = config.partition_len_for(self.num_values());
        let partitions = self.partitions_mut(len);
        parallel::run_partitions(partitions, config, |px| parallel::visit(px, &op))
    }
}

impl ImgBase for Img {
    type Pixel<'a> = Pixel<'a>;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Pixel<'_> {
        Img::pixel(self, x, y)
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

impl fmt::Debug for Img {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Img")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Read cursor into an [`Img`].
#[derive(Clone, Copy)]
pub struct Pixel<'a> {
    img: &'a Img,
    index: usize,
}

impl Pixel<'_> {
    /// Packed value under the cursor.
    #[inline]
    pub fn value(&self) -> u32 {
        self.img.data[self.index]
    }
}

impl PixelBase for Pixel<'_> {
    #[inline]
    fn a(&self) -> f64 {
        argb::a_normalized(self.value())
    }

    #[inline]
    fn r(&self) -> f64 {
        argb::r_normalized(self.value())
    }

    #[inline]
    fn g(&self) -> f64 {
        argb::g_normalized(self.value())
    }

    #[inline]
    fn b(&self) -> f64 {
        argb::b_normalized(self.value())
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

impl fmt::Display for Pixel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pixel(self, "Pixel", f)
    }
}

/// Mutable cursor over one partition of an [`Img`].
///
/// Indices are image indices; accessing one outside [`range`](PartitionCursor::range)
/// panics.
pub struct PixelMut<'a> {
    data: &'a mut [u32],
    start: usize,
    index: usize,
    width: u32,
    height: u32,
}

impl PixelMut<'_> {
    #[inline]
    fn offset(&self) -> usize {
        self.index.wrapping_sub(self.start)
    }

    /// Packed value under the cursor.
    #[inline]
    pub fn value(&self) -> u32 {
        self.data[self.offset()]
    }

    /// Replaces the packed value under the cursor.
    #[inline]
    pub fn set_value(&mut self, value: u32) {
        let i = self.offset();
        self.data[i] = value;
    }

    #[inline]
    fn set_channel(&mut self, shift: u32, v: f64) {
        let value = self.value() & !(0xff << shift);
        self.set_value(value | (argb::to_8bit(v) << shift));
    }
}

impl PixelBase for PixelMut<'_> {
    #[inline]
    fn a(&self) -> f64 {
        argb::a_normalized(self.value())
    }

    #[inline]
    fn r(&self) -> f64 {
        argb::r_normalized(self.value())
    }

    #[inline]
    fn g(&self) -> f64 {
        argb::g_normalized(self.value())
    }

    #[inline]
    fn b(&self) -> f64 {
        argb::b_normalized(self.value())
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

impl PixelBaseMut for PixelMut<'_> {
    #[inline]
    fn set_a(&mut self, a: f64) {
        self.set_channel(24, a);
    }

    #[inline]
    fn set_r(&mut self, r: f64) {
        self.set_channel(16, r);
    }

    #[inline]
    fn set_g(&mut self, g: f64) {
        self.set_channel(8, g);
    }

    #[inline]
    fn set_b(&mut self, b: f64) {
        self.set_channel(0, b);
    }

    #[inline]
    fn set_argb(&mut self, a: f64, r: f64, g: f64, b: f64) {
        self.set_value(argb::argb_from_normalized(a, r, g, b));
    }
}

impl PartitionCursor for PixelMut<'_> {
    #[inline]
    fn range(&self) -> Range<usize> {
        self.start..self.start + self.data.len()
    }
}

impl fmt::Display for PixelMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pixel(self, "PixelMut", f)
    }
}
