//! The color space transformation catalog.
//!
//! [`ColorSpaceTransformation`] names each supported conversion and knows its
//! inverse, its discrete (packed 8-bit) function and its continuous (`f64`)
//! function. Alpha is never touched.
//!
//! | name | inverse | discrete | continuous |
//! |------|---------|----------|------------|
//! | `rgb2hsv` | `hsv2rgb` | `0xAAHHSSVV` | `h` in `[0,1)`, `s`, `v` |
//! | `rgb2lab` | `lab2rgb` | `0xAALLaabb` | CIE units / 100 |
//! | `rgb2ycbcr` | `ycbcr2rgb` | `0xAAYYbbrr` | chroma offset `0.5` |
//!
//! # Example
//!
//! ```rust
//! use pixkit_color::ColorSpaceTransformation;
//! use pixkit_core::{Img, IterationConfig};
//!
//! let mut img = Img::filled(16, 16, 0xff336699).unwrap();
//! let cfg = IterationConfig::default();
//! let t: ColorSpaceTransformation = "rgb2ycbcr".parse().unwrap();
//! t.apply_discrete(&mut img, &cfg).unwrap();
//! t.inverse().apply_discrete(&mut img, &cfg).unwrap();
//! assert_eq!(img.get(5, 5) >> 24, 0xff);
//! ```

use std::fmt;
use std::str::FromStr;

use pixkit_core::{
    ColorImg, Img, ImgBase, IterationConfig, PixelBaseMut, PixelManipulator,
};
use tracing::debug;

use crate::{ColorError, ColorResult, hsv, lab, ycbcr};

/// Continuous transform on an RGB triplet.
pub type ContinuousFn = fn([f64; 3]) -> [f64; 3];

/// Discrete transform on a packed ARGB value.
pub type DiscreteFn = fn(u32) -> u32;

/// A named pairwise color space conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceTransformation {
    /// sRGB to HSV
    Rgb2Hsv,
    /// HSV to sRGB
    Hsv2Rgb,
    /// sRGB to CIE L\*a\*b\*
    Rgb2Lab,
    /// CIE L\*a\*b\* to sRGB
    Lab2Rgb,
    /// sRGB to YCbCr
    Rgb2YCbCr,
    /// YCbCr to sRGB
    YCbCr2Rgb,
}

impl ColorSpaceTransformation {
    /// All transformations, forward before inverse.
    pub const ALL: [ColorSpaceTransformation; 6] = [
        Self::Rgb2Hsv,
        Self::Hsv2Rgb,
        Self::Rgb2Lab,
        Self::Lab2Rgb,
        Self::Rgb2YCbCr,
        Self::YCbCr2Rgb,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb2Hsv => "rgb2hsv",
            Self::Hsv2Rgb => "hsv2rgb",
            Self::Rgb2Lab => "rgb2lab",
            Self::Lab2Rgb => "lab2rgb",
            Self::Rgb2YCbCr => "rgb2ycbcr",
            Self::YCbCr2Rgb => "ycbcr2rgb",
        }
    }

    /// The transformation undoing this one.
    pub const fn inverse(self) -> Self {
        match self {
            Self::Rgb2Hsv => Self::Hsv2Rgb,
            Self::Hsv2Rgb => Self::Rgb2Hsv,
            Self::Rgb2Lab => Self::Lab2Rgb,
            Self::Lab2Rgb => Self::Rgb2Lab,
            Self::Rgb2YCbCr => Self::YCbCr2Rgb,
            Self::YCbCr2Rgb => Self::Rgb2YCbCr,
        }
    }

    /// Packed 8-bit function.
    pub const fn discrete(self) -> DiscreteFn {
        match self {
            Self::Rgb2Hsv => hsv::rgb_to_hsv_argb,
            Self::Hsv2Rgb => hsv::hsv_to_rgb_argb,
            Self::Rgb2Lab => lab::rgb_to_lab_argb,
            Self::Lab2Rgb => lab::lab_to_rgb_argb,
            Self::Rgb2YCbCr => ycbcr::rgb_to_ycbcr_argb,
            Self::YCbCr2Rgb => ycbcr::ycbcr_to_rgb_argb,
        }
    }

    /// Unquantized `f64` function.
    pub const fn continuous(self) -> ContinuousFn {
        match self {
            Self::Rgb2Hsv => hsv::rgb_to_hsv,
            Self::Hsv2Rgb => hsv::hsv_to_rgb,
            Self::Rgb2Lab => lab::rgb_to_lab,
            Self::Lab2Rgb => lab::lab_to_rgb,
            Self::Rgb2YCbCr => ycbcr::rgb_to_ycbcr,
            Self::YCbCr2Rgb => ycbcr::ycbcr_to_rgb,
        }
    }

    /// Transforms one packed value.
    #[inline]
    pub fn transform_argb(self, value: u32) -> u32 {
        (self.discrete())(value)
    }

    /// Transforms one triplet.
    #[inline]
    pub fn transform(self, values: [f64; 3]) -> [f64; 3] {
        (self.continuous())(values)
    }

    /// Applies the discrete form to every pixel of a packed image.
    ///
    /// # Errors
    ///
    /// [`ColorError::Core`] if a partition fails to run.
    pub fn apply_discrete(self, img: &mut Img, config: &IterationConfig) -> ColorResult<()> {
        let (width, height) = img.dimensions();
        debug!(transform = self.name(), width, height, "Applying discrete color transform");
        let f = self.discrete();
        img.try_for_each(config, |px| {
            px.set_value(f(px.value()));
            Ok(())
        })?;
        Ok(())
    }

    /// Applies the continuous form to every pixel of a planar image.
    ///
    /// Results are stored unclamped.
    pub fn apply_continuous(self, img: &mut ColorImg, config: &IterationConfig) -> ColorResult<()> {
        let (width, height) = img.dimensions();
        debug!(transform = self.name(), width, height, "Applying continuous color transform");
        img.for_each_with(&self, config)?;
        Ok(())
    }
}

/// Continuous form as an elementwise operation on any image.
impl PixelManipulator for ColorSpaceTransformation {
    type Element = ();

    #[inline]
    fn allocate_element(&self) {}

    #[inline]
    fn apply<P: PixelBaseMut>(&self, px: &mut P, _element: &mut ()) -> pixkit_core::Result<()> {
        let [x, y, z] = self.transform([px.r(), px.g(), px.b()]);
        px.set_rgb_preserve_alpha(x, y, z);
        Ok(())
    }
}

impl fmt::Display for ColorSpaceTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpaceTransformation {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ColorError::UnknownTransform(s.to_string()))
    }
}
