//! # pixkit-color
//!
//! Pairwise color space transforms for pixkit images.
//!
//! - [`ColorSpaceTransformation`] - named catalog with inverses
//! - [`hsv`], [`lab`], [`ycbcr`] - the conversion math
//! - [`srgb`] - sRGB transfer function used by the L\*a\*b\* path
//!
//! Each transform comes in two precisions. The discrete form maps a packed
//! ARGB `u32` to another packed value and rounds every channel to 8 bit. The
//! continuous form maps an `f64` RGB triplet and keeps full precision. Alpha
//! is carried through unchanged by both.
//!
//! ## Example
//!
//! ```rust
//! use pixkit_color::ColorSpaceTransformation;
//! use pixkit_core::{Channel, ColorImg, IterationConfig};
//!
//! let mut img = ColorImg::new(8, 8, true);
//! img.fill(0.5, 1.0, 0.0, 0.0);
//! ColorSpaceTransformation::Rgb2Hsv
//!     .apply_continuous(&mut img, &IterationConfig::default())
//!     .unwrap();
//! assert_eq!(img.get(Channel::R, 0, 0), 0.0); // hue
//! assert_eq!(img.get(Channel::A, 0, 0), 0.5);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod hsv;
pub mod lab;
pub mod srgb;
pub mod transform;
pub mod ycbcr;

pub use error::{ColorError, ColorResult};
pub use transform::{ColorSpaceTransformation, ContinuousFn, DiscreteFn};
