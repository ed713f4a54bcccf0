//! # cine-ops
//!
//! Cinematic grading operators and the apron-aware frame processor.
//!
//! A look is a [`LookParams`] value: one immutable parameter block per
//! operator. [`pipeline::process_window`] renders one output window through
//! two fixed stages:
//!
//! - [`grade`] - eight per-pixel operators (Stage 0)
//! - [`fx`] - eight blur-based and geometric spatial operators (Stage 1)
//!
//! supported by:
//!
//! - [`blur`] - separable box blurs and the three-pass Gaussian approximation
//! - [`math`] - luminance, smoothstep, mixing
//! - [`pipeline`] - apron sizing, identity check, workspace, processor
//!
//! # Example
//!
//! ```rust
//! use cine_core::{Bounds, FrameBuffer};
//! use cine_ops::look::LookParams;
//! use cine_ops::pipeline::{RenderRequest, render};
//!
//! let src = FrameBuffer::filled(Bounds::from_size(64, 36), [0.18, 0.18, 0.18, 1.0]);
//!
//! let mut look = LookParams::default();
//! look.glow.enable = true;
//! look.glow.amount = 0.3;
//!
//! let out = render(&src, &RenderRequest::full_frame(src.bounds()), &look);
//! assert_eq!(out.bounds(), src.bounds());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod fx;
pub mod grade;
pub mod look;
pub mod math;
pub mod pipeline;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use look::LookParams;
pub use pipeline::{FrameContext, RenderRequest, RenderStats, process_window};
