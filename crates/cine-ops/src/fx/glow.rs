//! Highlight glow.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp, blur_radius, warmth_bias};
use crate::blur::BlurKind;
use crate::math::{add_scaled3, luminance, mix, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Glow controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowParams {
    /// Module switch.
    pub enable: bool,
    /// Additive strength.
    pub amount: f32,
    /// Luminance where glow starts.
    pub threshold: f32,
    /// Width of the threshold ramp.
    pub knee: f32,
    /// Blur radius in full-resolution pixels.
    pub radius: f32,
    /// 0 glows white, 1 keeps the source colour.
    pub color_fidelity: f32,
    /// Warm (+) or cool (-) tint.
    pub warmth: f32,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            enable: false,
            amount: 0.0,
            threshold: 0.8,
            knee: 0.5,
            radius: 10.0,
            color_fidelity: 0.5,
            warmth: 0.0,
        }
    }
}

/// Glow operator.
#[derive(Debug, Clone)]
pub struct Glow {
    params: GlowParams,
    bias: (f32, f32),
}

impl Glow {
    /// Creates the operator.
    pub fn new(params: GlowParams) -> Self {
        Self { params, bias: warmth_bias(params.warmth) }
    }

    fn scaled_radius(&self, render_scale: f32) -> f32 {
        (self.params.radius * render_scale).max(0.0)
    }
}

impl Composite for Glow {
    fn source(&self) -> Source {
        Source::Extracted
    }

    fn extract(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        let l = luminance(rgb);
        let mask = smoothstep(p.threshold, p.threshold + p.knee + 0.001, l);
        let grey = l * mask;
        let f = p.color_fidelity;
        [
            mix(grey, rgb[0] * mask, f) * self.bias.0,
            mix(grey, rgb[1] * mask, f),
            mix(grey, rgb[2] * mask, f) * self.bias.1,
        ]
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind {
        BlurKind::Gaussian(blur_radius(self.scaled_radius(frame.render_scale)))
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        add_scaled3(rgb, blurred, self.params.amount)
    }
}

impl SpatialOp for Glow {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn is_active(&self) -> bool {
        self.params.enable
    }

    fn reach(&self, render_scale: f32) -> Reach {
        Reach::Add(self.scaled_radius(render_scale))
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        composite::render(self, ws, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn glow(fidelity: f32) -> Glow {
        Glow::new(GlowParams { enable: true, amount: 1.0, color_fidelity: fidelity, ..Default::default() })
    }

    #[test]
    fn test_dark_pixels_do_not_glow() {
        assert_eq!(glow(0.5).extract([0.3, 0.2, 0.1]), [0.0; 3]);
    }

    #[test]
    fn test_fidelity_zero_is_neutral() {
        let s = glow(0.0).extract([3.0, 1.0, 0.5]);
        assert_eq!(s[0], s[1]);
        assert_eq!(s[1], s[2]);
        let s = glow(1.0).extract([3.0, 1.0, 0.5]);
        assert!(s[0] > s[1] && s[1] > s[2]);
    }

    #[test]
    fn test_combine_adds_scaled() {
        let op = Glow::new(GlowParams { enable: true, amount: 0.5, ..Default::default() });
        let out = op.combine([0.1, 0.2, 0.3], [1.0, 1.0, 1.0]);
        for (v, want) in out.into_iter().zip([0.6, 0.7, 0.8]) {
            assert_abs_diff_eq!(v, want, epsilon = 1e-6);
        }
    }
}
