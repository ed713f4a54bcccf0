//! Stage 1: spatial operators.
//!
//! These need neighbouring pixels, so they run over the whole apron-expanded
//! working image after Stage 0, in a fixed order:
//!
//! mist, dreamy blur, glow, anamorphic streak, sharpen, halation,
//! chromatic aberration, vignette.
//!
//! The first six share one template (see [`composite`]): extract a source
//! signal into the effect buffer, blur it, recombine into the image.
//! Chromatic aberration resamples the image directly and vignette applies a
//! geometric mask (blurring only for its defocus variant).

pub mod aberration;
pub(crate) mod composite;
pub mod dreamy;
pub mod glow;
pub mod halation;
pub mod mist;
pub mod sharpen;
pub mod streak;
pub mod vignette;

pub use aberration::{AberrationParams, ChromaticAberration};
pub use dreamy::{DreamyBlur, DreamyParams};
pub use glow::{Glow, GlowParams};
pub use halation::{Halation, HalationParams};
pub use mist::{Mist, MistParams};
pub use sharpen::{Sharpen, SharpenKind, SharpenParams};
pub use streak::{Streak, StreakParams};
pub use vignette::{Vignette, VignetteKind, VignetteParams};

use crate::look::LookParams;
use crate::pipeline::{FrameContext, Workspace};

/// How far an operator reads beyond a pixel, for apron sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reach {
    /// Reads only the pixel itself or resamples without needing an apron.
    None,
    /// Folded into the running total with `max`.
    Max(f32),
    /// Added to the running total.
    Add(f32),
}

/// A spatial operator over the working image.
pub trait SpatialOp: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// False when the operator is skipped entirely.
    fn is_active(&self) -> bool;

    /// Apron contribution at `render_scale`. Only consulted when active.
    fn reach(&self, render_scale: f32) -> Reach;

    /// Transforms `ws.image` in place, using `ws.effect` and `ws.scratch`.
    fn render(&self, ws: &mut Workspace, frame: &FrameContext);
}

/// Every Stage 1 operator in pipeline order.
pub fn spatial_chain(look: &LookParams) -> Vec<Box<dyn SpatialOp>> {
    vec![
        Box::new(Mist::new(look.mist)),
        Box::new(DreamyBlur::new(look.dreamy)),
        Box::new(Glow::new(look.glow)),
        Box::new(Streak::new(look.streak)),
        Box::new(Sharpen::new(look.sharpen)),
        Box::new(Halation::new(look.halation)),
        Box::new(ChromaticAberration::new(look.aberration)),
        Box::new(Vignette::new(look.vignette)),
    ]
}

/// Blur radius for a reach: at least one pixel once an effect runs.
#[inline]
pub(crate) fn blur_radius(reach: f32) -> usize {
    reach.ceil().max(1.0) as usize
}

/// Red/blue multipliers for a warm (+) or cool (-) bias.
#[inline]
pub(crate) fn warmth_bias(warmth: f32) -> (f32, f32) {
    if warmth > 0.0 {
        (1.0 + warmth * 0.5, 1.0 - warmth * 0.2)
    } else if warmth < 0.0 {
        let w = warmth.abs();
        (1.0 - w * 0.2, 1.0 + w * 0.5)
    } else {
        (1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_radius_minimum() {
        assert_eq!(blur_radius(0.0), 1);
        assert_eq!(blur_radius(-3.0), 1);
        assert_eq!(blur_radius(4.2), 5);
    }

    #[test]
    fn test_warmth_bias_directions() {
        assert_eq!(warmth_bias(0.0), (1.0, 1.0));
        let (r, b) = warmth_bias(1.0);
        assert!(r > 1.0 && b < 1.0);
        let (r, b) = warmth_bias(-1.0);
        assert!(r < 1.0 && b > 1.0);
    }

    #[test]
    fn test_chain_order() {
        let names: Vec<_> = spatial_chain(&LookParams::default()).iter().map(|op| op.name()).collect();
        assert_eq!(
            names,
            ["mist", "dreamy", "glow", "streak", "sharpen", "halation", "aberration", "vignette"]
        );
    }
}
