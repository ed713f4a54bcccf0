//! Atmospheric mist: a soft, warm or cool lift bled out of the brighter tones.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp, blur_radius, warmth_bias};
use crate::blur::BlurKind;
use crate::math::{add_scaled3, luminance, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Fixed mist blur reach at full resolution.
pub const MIST_REACH: f32 = 6.0;

/// Mist controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MistParams {
    /// Module switch.
    pub enable: bool,
    /// Lift strength. Negative values are treated as 0.
    pub strength: f32,
    /// Luminance where the mist source starts.
    pub threshold: f32,
    /// Width of the threshold ramp.
    pub softness: f32,
    /// Exponent on the threshold mask; above 1 confines mist to brighter areas.
    pub depth_bias: f32,
    /// Warm (+) or cool (-) tint of the mist.
    pub warmth: f32,
}

impl Default for MistParams {
    fn default() -> Self {
        Self { enable: false, strength: 0.0, threshold: 0.5, softness: 0.5, depth_bias: 1.0, warmth: 0.0 }
    }
}

/// Mist operator.
#[derive(Debug, Clone)]
pub struct Mist {
    params: MistParams,
    bias: (f32, f32),
}

impl Mist {
    /// Creates the operator.
    pub fn new(params: MistParams) -> Self {
        Self { params, bias: warmth_bias(params.warmth) }
    }

    fn mask(&self, l: f32) -> f32 {
        let p = &self.params;
        let mask = smoothstep(p.threshold, p.threshold + p.softness.max(0.001), l);
        if p.depth_bias != 1.0 && mask > 0.0 {
            mask.powf(p.depth_bias.max(0.01))
        } else {
            mask
        }
    }
}

impl Composite for Mist {
    fn source(&self) -> Source {
        Source::Extracted
    }

    // Non-negative by construction so the recombined lift never darkens.
    fn extract(&self, rgb: [f32; 3]) -> [f32; 3] {
        let l = luminance(rgb).max(0.0);
        let m = l * self.mask(l);
        [m * self.bias.0, m, m * self.bias.1]
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind {
        BlurKind::Gaussian(blur_radius(MIST_REACH * frame.render_scale))
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        add_scaled3(rgb, blurred, self.params.strength.max(0.0))
    }
}

impl SpatialOp for Mist {
    fn name(&self) -> &'static str {
        "mist"
    }

    fn is_active(&self) -> bool {
        self.params.enable
    }

    fn reach(&self, render_scale: f32) -> Reach {
        Reach::Max(MIST_REACH * render_scale)
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        composite::render(self, ws, frame);
    }
}
