//! Error types for cine-ops.
//!
//! Frame processing is infallible; these cover the checked entry points
//! used by tools (tile rendering, buffer validation).

use thiserror::Error;

/// Error type for operator and pipeline helpers.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Frame buffer construction failed.
    #[error(transparent)]
    Core(#[from] cine_core::Error),
}

/// Result type for operator helpers.
pub type OpsResult<T> = Result<T, OpsError>;
