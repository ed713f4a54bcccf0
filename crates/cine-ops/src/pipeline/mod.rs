//! Frame orchestration: apron sizing, buffer lifecycle, stage sequencing.

pub mod apron;
pub mod context;
pub mod identity;
pub mod processor;

pub use context::{FrameContext, RenderRequest, Workspace};
pub use identity::{active_stages, is_identity};
pub use processor::{RenderStats, process_window, render, render_image};
