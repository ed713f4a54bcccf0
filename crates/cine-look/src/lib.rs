//! # cine-look
//!
//! YAML look files for the cinematic grading pipeline.
//!
//! A look file names per-operator settings; [`LookFile::to_params`] turns
//! it into the [`LookParams`](cine_ops::LookParams) the frame processor
//! consumes, resolving preset names and clamping every value into range.
//!
//! # Example
//!
//! ```rust
//! use cine_look::LookFile;
//!
//! let file = LookFile::from_yaml_str("
//! mist:
//!   enabled: true
//!   strength: 0.4
//! vignette:
//!   enabled: true
//!   kind: defocus
//!   defocus_amount: 0.5
//!   defocus_softness: 0.3
//! ").unwrap();
//!
//! let look = file.to_params().unwrap();
//! assert!(look.mist.enable);
//! assert!(file.roi_margin().unwrap() > 10.0);
//! ```

#![warn(missing_docs)]

mod error;
mod file;
pub mod names;

pub use error::{LookError, LookResult};
pub use file::LookFile;
