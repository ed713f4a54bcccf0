//! Halation: red-orange light scattered back through the film base.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp, blur_radius};
use crate::blur::BlurKind;
use crate::math::{add_scaled3, luminance, mix3, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Ceiling on the scaled halation radius, bounding apron memory.
pub const MAX_HALATION_RADIUS: f32 = 50.0;

/// Halation controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalationParams {
    /// Module switch.
    pub enable: bool,
    /// Additive strength.
    pub amount: f32,
    /// Luminance where halation starts.
    pub threshold: f32,
    /// Width of the threshold ramp.
    pub knee: f32,
    /// Shifts the scatter from red toward orange.
    pub warmth: f32,
    /// Blur radius in full-resolution pixels.
    pub radius: f32,
    /// Saturation of the blurred halation (0..1).
    pub saturation: f32,
    /// Hue rotation of the scatter colour, in degrees.
    pub hue_shift: f32,
}

impl Default for HalationParams {
    fn default() -> Self {
        Self {
            enable: false,
            amount: 0.0,
            threshold: 0.8,
            knee: 0.5,
            warmth: 0.0,
            radius: 10.0,
            saturation: 1.0,
            hue_shift: 0.0,
        }
    }
}

/// Halation operator.
#[derive(Debug, Clone)]
pub struct Halation {
    params: HalationParams,
    tint: [f32; 3],
}

impl Halation {
    /// Creates the operator, resolving the scatter colour once.
    pub fn new(params: HalationParams) -> Self {
        Self { params, tint: scatter_color(params.warmth, params.hue_shift) }
    }

    fn scaled_radius(&self, render_scale: f32) -> f32 {
        (self.params.radius * render_scale).clamp(0.0, MAX_HALATION_RADIUS)
    }
}

/// `(1, g, 0)` rotated about the grey axis by `hue_shift` degrees.
fn scatter_color(warmth: f32, hue_shift: f32) -> [f32; 3] {
    let g = (0.1 + 0.4 * warmth).max(0.0);
    let (sin, cos) = hue_shift.to_radians().sin_cos();
    let a = (1.0 - cos) / 3.0;
    let s = sin * 0.577_350_3;
    [cos + a + g * (a - s), a + s + g * (cos + a), a - s + g * (a + s)]
}

impl Composite for Halation {
    fn source(&self) -> Source {
        Source::Extracted
    }

    fn extract(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        if p.amount <= 0.0 {
            return [0.0; 3];
        }
        let mask = smoothstep(p.threshold, p.threshold + p.knee, luminance(rgb));
        if mask <= 0.001 {
            return [0.0; 3];
        }
        let r = rgb[0] * mask;
        self.tint.map(|t| r * t)
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind {
        BlurKind::Gaussian(blur_radius(self.scaled_radius(frame.render_scale)))
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        if p.amount <= 0.0 {
            return rgb;
        }
        let sat = p.saturation.clamp(0.0, 1.0);
        let halo = if sat < 1.0 { mix3([luminance(blurred); 3], blurred, sat) } else { blurred };
        add_scaled3(rgb, halo, p.amount)
    }
}

impl SpatialOp for Halation {
    fn name(&self) -> &'static str {
        "halation"
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
