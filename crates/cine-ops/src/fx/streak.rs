//! Anamorphic streak: horizontal flare from bright sources.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp};
use crate::blur::BlurKind;
use crate::math::{luminance, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Streak length multiplier: `length` 1.0 spans 80 pixels per pass.
pub const STREAK_LENGTH_SCALE: f32 = 80.0;

/// Streak controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakParams {
    /// Module switch.
    pub enable: bool,
    /// Additive strength.
    pub amount: f32,
    /// Luminance where streaks start.
    pub threshold: f32,
    /// Streak length, scaled by [`STREAK_LENGTH_SCALE`].
    pub length: f32,
    /// Warm (+) or blue (-) tint.
    pub tint: f32,
}

impl Default for StreakParams {
    fn default() -> Self {
        Self { enable: false, amount: 0.0, threshold: 0.8, length: 0.5, tint: 0.0 }
    }
}

/// Streak operator.
#[derive(Debug, Clone)]
pub struct Streak {
    params: StreakParams,
    tint: [f32; 3],
}

impl Streak {
    /// Creates the operator.
    pub fn new(params: StreakParams) -> Self {
        let t = params.tint;
        let tint = if t > 0.0 {
            [1.0 + t * 0.3, 1.0 + t * 0.1, 1.0 - t * 0.2]
        } else if t < 0.0 {
            [1.0 + t * 0.2, 1.0, 1.0 - t * 0.3]
        } else {
            [1.0; 3]
        };
        Self { params, tint }
    }

    /// Per-pass box radius at `render_scale`.
    pub fn pass_radius(&self, render_scale: f32) -> usize {
        ((self.params.length * STREAK_LENGTH_SCALE * render_scale) as i64).max(1) as usize
    }
}

impl Composite for Streak {
    fn source(&self) -> Source {
        Source::Extracted
    }

    fn extract(&self, rgb: [f32; 3]) -> [f32; 3] {
        let t = self.params.threshold;
        let mask = smoothstep(t, t + 0.3, luminance(rgb));
        if mask <= 0.001 { [0.0; 3] } else { rgb.map(|v| v * mask) }
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind {
        BlurKind::Streak(self.pass_radius(frame.render_scale))
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        let a = self.params.amount;
        if a <= 0.0 {
            return rgb;
        }
        [
            rgb[0] + blurred[0] * self.tint[0] * a,
            rgb[1] + blurred[1] * self.tint[1] * a,
            rgb[2] + blurred[2] * self.tint[2] * a,
        ]
    }
}

impl SpatialOp for Streak {
    fn name(&self) -> &'static str {
        "streak"
    }

    fn is_active(&self) -> bool {
        self.params.enable && self.params.amount > 0.0
    }

    // Horizontal-only and not reserved in the apron; long streaks clip at
    // tile edges.
    fn reach(&self, _render_scale: f32) -> Reach {
        Reach::None
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        composite::render(self, ws, frame);
    }
}
