//! Error types for pixkit-core operations.
//!
//! Only a few things in the core can fail at runtime:
//! - Constructing an image with zero width/height or a mismatched buffer
//! - An element operation returning an error during (parallel) iteration
//!
//! Everything else is total: out-of-range reads go through
//! [`BoundaryMode`](crate::BoundaryMode), area copies are clipped, and
//! blend/transform singularities are handled inline.
//!
//! # Partial failure
//!
//! [`Error::PartitionFailed`] is returned when an operation fails inside one
//! partition of an iteration run. The failing partition stops at the pixel
//! that failed. Other partitions may already have completed, may have been
//! skipped, or may have stopped early, so the image can be partially
//! modified. There is no rollback.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{Error, Img};
//!
//! let err = Img::try_new(0, 10).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by raster construction and iteration.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, the pixel count overflows,
    /// or a supplied buffer does not hold exactly `width * height` values.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// An element operation failed inside one partition of an iteration run.
    ///
    /// `processed` pixels of `start..end` were handled before the failure.
    /// Sibling partitions may be complete, partial or untouched.
    #[error(
        "partition {partition} (indices {start}..{end}) failed after {processed} pixels: {source}; \
         other partitions may have been applied"
    )]
    PartitionFailed {
        /// Partition number in ascending index order
        partition: usize,
        /// First index of the partition
        start: usize,
        /// One past the last index of the partition
        end: usize,
        /// Pixels processed before the failure
        processed: usize,
        /// The error returned by the operation
        source: Box<Error>,
    },

    /// Generic error with custom message.
    ///
    /// Element operations use this to abort an iteration run.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this error reports a failed partition.
    ///
    /// When it does, the target image may have been partially modified.
    #[inline]
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, Self::PartitionFailed { .. })
    }
}
