//! Error types for color space operations.

use thiserror::Error;

/// Color space operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// No transformation with this name.
    #[error("unknown color space transformation: {0}")]
    UnknownTransform(String),

    /// Failure while iterating the image.
    #[error(transparent)]
    Core(#[from] pixkit_core::Error),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
