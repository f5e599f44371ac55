//! Rectangles in signed pixel space and copy-region clipping.
//!
//! Coordinates use the usual image convention: origin at the top-left,
//! X to the right, Y downward. A [`Rect`] may start at negative coordinates
//! or extend past an image; [`Rect::intersect`] and [`CopyRegion::clip`]
//! bring it back into range.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Rect   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle at the origin covering `width x height`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `(x, y)` lies inside.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// Intersection of two rectangles, `None` if they do not overlap.
    ///
    /// ```rust
    /// use pixkit_core::Rect;
    ///
    /// let a = Rect::new(-2, -2, 5, 5);
    /// let b = Rect::from_size(4, 4);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(0, 0, 3, 3)));
    /// ```
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = (self.x as i64).max(other.x as i64);
        let y = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x as i32, y as i32, (right - x) as u32, (bottom - y) as u32))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// A copy of `width x height` pixels from `(src_x, src_y)` to `(dst_x, dst_y)`,
/// clipped so both rectangles lie inside their images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRegion {
    /// Source left edge
    pub src_x: u32,
    /// Source top edge
    pub src_y: u32,
    /// Destination left edge
    pub dst_x: u32,
    /// Destination top edge
    pub dst_y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CopyRegion {
    /// Clips a requested copy against source and destination sizes.
    ///
    /// Cutting the source at its left/top edge moves the destination origin
    /// by the same amount (and vice versa), so surviving pixels keep their
    /// relative placement. Returns `None` when nothing is left to copy.
    pub fn clip(
        src: Rect,
        src_size: (u32, u32),
        dst_x: i32,
        dst_y: i32,
        dst_size: (u32, u32),
    ) -> Option<CopyRegion> {
        let (mut sx, mut sy) = (src.x as i64, src.y as i64);
        let (mut dx, mut dy) = (dst_x as i64, dst_y as i64);
        let (mut w, mut h) = (src.width as i64, src.height as i64);

        // source bounds
        if sx < 0 {
            dx -= sx;
            w += sx;
            sx = 0;
        }
        if sy < 0 {
            dy -= sy;
            h += sy;
            sy = 0;
        }
        w = w.min(src_size.0 as i64 - sx);
        h = h.min(src_size.1 as i64 - sy);

        // destination bounds
        if dx < 0 {
            sx -= dx;
            w += dx;
            dx = 0;
        }
        if dy < 0 {
            sy -= dy;
            h += dy;
            dy = 0;
        }
        w = w.min(dst_size.0 as i64 - dx);
        h = h.min(dst_size.1 as i64 - dy);

        if w <= 0 || h <= 0 {
            return None;
        }
        Some(CopyRegion {
            src_x: sx as u32,
            src_y: sy as u32,
            dst_x: dx as u32,
            dst_y: dy as u32,
            width: w as u32,
            height: h as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(10, 20, 100, 50);
        let b = Rect::new(50, 40, 100, 50);
        assert_eq!(a.intersect(&b), Some(Rect::new(50, 40, 60, 30)));
        assert_eq!(a.intersect(&Rect::new(500, 500, 1, 1)), None);
        assert!(a.contains(15, 25));
        assert!(!a.contains(5, 25));
    }

    #[test]
    fn test_clip_inside() {
        let r = CopyRegion::clip(Rect::new(1, 1, 2, 2), (5, 3), 0, 0, (2, 2)).unwrap();
        assert_eq!((r.src_x, r.src_y, r.dst_x, r.dst_y, r.width, r.height), (1, 1, 0, 0, 2, 2));
    }

    #[test]
    fn test_clip_negative_source_shifts_destination() {
        let r = CopyRegion::clip(Rect::new(-1, -2, 4, 4), (10, 10), 0, 0, (10, 10)).unwrap();
        assert_eq!((r.src_x, r.src_y), (0, 0));
        assert_eq!((r.dst_x, r.dst_y), (1, 2));
        assert_eq!((r.width, r.height), (3, 2));
    }

    #[test]
    fn test_clip_negative_destination_shifts_source() {
        let r = CopyRegion::clip(Rect::new(0, 0, 4, 4), (10, 10), -3, 1, (10, 10)).unwrap();
        assert_eq!((r.src_x, r.src_y), (3, 0));
        assert_eq!((r.dst_x, r.dst_y), (0, 1));
        assert_eq!((r.width, r.height), (1, 4));
    }

    #[test]
    fn test_clip_empty() {
        assert!(CopyRegion::clip(Rect::new(20, 0, 4, 4), (10, 10), 0, 0, (10, 10)).is_none());
        assert!(CopyRegion::clip(Rect::new(0, 0, 4, 4), (10, 10), 10, 0, (10, 10)).is_none());
        assert!(CopyRegion::clip(Rect::new(0, 0, 0, 4), (10, 10), 0, 0, (10, 10)).is_none());
        assert!(CopyRegion::clip(Rect::new(i32::MIN, 0, u32::MAX, 4), (10, 10), 0, 0, (10, 10)).is_none());
    }
}
