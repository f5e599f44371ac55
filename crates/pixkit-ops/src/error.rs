//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No blend mode with this name.
    #[error("unknown blend mode: {0}")]
    UnknownBlendMode(String),

    /// Failure while iterating the image.
    #[error(transparent)]
    Core(#[from] pixkit_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
