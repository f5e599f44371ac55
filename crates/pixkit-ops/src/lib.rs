//! # pixkit-ops
//!
//! Blend mathematics and positioned image blending.
//!
//! # Modules
//!
//! - [`blend`] - the blend mode catalog and per-pixel blending
//! - [`composite`] - blending an offset top image onto a bottom image
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{ColorImg, Img, IterationConfig};
//! use pixkit_ops::{Blending, alpha_blend_with};
//!
//! let mut bottom = ColorImg::new(64, 64, true);
//! bottom.fill(1.0, 0.2, 0.4, 0.6);
//! let top = Img::filled(16, 16, 0xff_ffffff).unwrap();
//!
//! alpha_blend_with(
//!     &mut bottom,
//!     &top,
//!     -8,
//!     40,
//!     0.5,
//!     Blending::Screen.function(),
//!     &IterationConfig::default(),
//! )
//! .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod composite;

pub use blend::{BlendFunction, Blending, alpha_blend, alpha_blend_argb, blend, blend_argb};
pub use composite::{AlphaBlendWith, BlendWith, alpha_blend_with, blend_with};
pub use error::{OpsError, OpsResult};
