//! # pixkit-core
//!
//! Core raster types for the pixkit pixel engine.
//!
//! - [`Img`] - packed ARGB image (`u32` per pixel)
//! - [`ColorImg`] - planar `f64` image with optional alpha
//! - [`PixelBase`], [`PixelBaseMut`] - pixel cursors shared by both layouts
//! - [`BoundaryMode`] - out-of-range addressing
//! - [`Bilinear`] - sub-pixel sampling
//! - [`PixelManipulator`], [`IterationConfig`] - partitioned (parallel)
//!   elementwise iteration
//!
//! ## Crate Structure
//!
//! ```text
//! pixkit-core (this crate)
//!    ^
//!    |
//!    +-- pixkit-color (color space transforms)
//!    +-- pixkit-ops (blending, positioned composites)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pixkit_core::prelude::*;
//!
//! let mut img = Img::new(256, 256);
//! img.for_each(&IterationConfig::default(), |px| {
//!     let v = px.x_normalized();
//!     px.set_rgb(v, v, v);
//! });
//! assert_eq!(img.get(255, 10), argb::WHITE);
//! assert_eq!(img.get(0, 10), argb::BLACK);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod argb;
pub mod boundary;
pub mod color_image;
pub mod config;
pub mod error;
pub mod image;
pub mod interp;
pub mod parallel;
pub mod pixel;
pub mod rect;

// Re-exports for convenience
pub use boundary::BoundaryMode;
pub use color_image::{Channel, ColorImg, ColorPixel, ColorPixelMut};
pub use config::IterationConfig;
pub use error::{Error, Result};
pub use image::{Img, Pixel, PixelMut};
pub use interp::Bilinear;
pub use parallel::{PartitionCursor, PixelManipulator};
pub use pixel::{ImgBase, PixelBase, PixelBaseMut};
pub use rect::{CopyRegion, Rect};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::argb;
    pub use crate::boundary::BoundaryMode;
    pub use crate::color_image::{Channel, ColorImg};
    pub use crate::config::IterationConfig;
    pub use crate::error::{Error, Result};
    pub use crate::image::Img;
    pub use crate::parallel::PixelManipulator;
    pub use crate::pixel::{ImgBase, PixelBase, PixelBaseMut};
    pub use crate::rect::Rect;
}
