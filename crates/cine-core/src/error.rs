//! Error types for cine-core.
//!
//! The pipeline itself never fails at runtime; these errors come from the
//! fallible constructors hosts use to wrap their own pixel storage.
//!
//! # Usage
//!
//! ```rust
//! use cine_core::{Bounds, FrameBuffer, Error};
//!
//! let err = FrameBuffer::from_data(Bounds::new(0, 0, 4, 4), vec![0.0; 3]).unwrap_err();
//! assert!(matches!(err, Error::DimensionMismatch { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building frame buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Rectangle has negative extent or overflows the address space.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Supplied sample count does not match the rectangle.
    #[error("buffer holds {actual} samples, {expected} required")]
    DimensionMismatch {
        /// Samples required by the bounds.
        expected: usize,
        /// Samples actually supplied.
        actual: usize,
    },

    /// Pixel coordinates lie outside a buffer.
    #[error("pixel ({x}, {y}) outside {bounds}")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Bounds that were violated, formatted
        bounds: String,
    },
}
