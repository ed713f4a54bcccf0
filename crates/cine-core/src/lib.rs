//! # cine-core
//!
//! Core types for the cinematic grading pipeline.
//!
//! This crate provides the foundational types shared by the operator and
//! look crates:
//!
//! - [`Bounds`] - Half-open integer rectangle in host pixel coordinates
//! - [`FrameBuffer`] - Owned RGBA `f32` buffer anchored at an origin
//! - [`SourceImage`], [`DestinationImage`] - Pixel accessor seams for hosts
//! - [`luminance`] - Rec.709 luminance used by every operator
//!
//! ## Crate Structure
//!
//! ```text
//! cine-core (this crate)
//!    ^
//!    |
//!    +-- cine-ops (operators, frame processor)
//!    +-- cine-look (look files, presets)
//!    +-- cine-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod error;
pub mod frame;
pub mod pixel;
pub mod rect;

pub use access::{DestinationImage, SourceImage};
pub use error::{Error, Result};
pub use frame::{FrameBuffer, CHANNELS};
pub use pixel::{luminance, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
pub use rect::Bounds;

/// Prelude module for convenient imports.
///
/// ```
/// use cine_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::{DestinationImage, SourceImage};
    pub use crate::error::{Error, Result};
    pub use crate::frame::{FrameBuffer, CHANNELS};
    pub use crate::pixel::luminance;
    pub use crate::rect::Bounds;
}
