//! Dreamy blur: a soft-light blend of a blurred copy, masked by tone.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp, blur_radius};
use crate::blur::BlurKind;
use crate::math::{luminance, mix3, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Dreamy blur controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DreamyParams {
    /// Module switch.
    pub enable: bool,
    /// Blur radius in full-resolution pixels.
    pub radius: f32,
    /// Overall blend amount.
    pub strength: f32,
    /// Effect weight in the shadows.
    pub shadow_amount: f32,
    /// Effect weight in the highlights.
    pub highlight_amount: f32,
    /// Width of the shadow and highlight ramps.
    pub tonal_softness: f32,
    /// Saturation of the soft-light result.
    pub saturation: f32,
}

impl Default for DreamyParams {
    fn default() -> Self {
        Self {
            enable: false,
            radius: 4.0,
            strength: 0.5,
            shadow_amount: 0.3,
            highlight_amount: 0.8,
            tonal_softness: 0.5,
            saturation: 1.0,
        }
    }
}

/// Dreamy blur operator.
#[derive(Debug, Clone)]
pub struct DreamyBlur {
    params: DreamyParams,
}

impl DreamyBlur {
    /// Creates the operator.
    pub fn new(params: DreamyParams) -> Self {
        Self { params }
    }

    fn scaled_radius(&self, render_scale: f32) -> f32 {
        (self.params.radius * render_scale).max(0.0)
    }

    fn tonal_mask(&self, l: f32) -> f32 {
        let p = &self.params;
        let width = 0.2 + 0.8 * p.tonal_softness;
        let shadow = 1.0 - smoothstep(0.0, width, l);
        let high = smoothstep(1.0 - width, 1.0, l);
        shadow * p.shadow_amount + high * p.highlight_amount
    }
}

/// Soft-light of `blend` over `base`.
#[inline]
fn soft_light(base: f32, blend: f32) -> f32 {
    if blend < 0.5 {
        base - (1.0 - 2.0 * blend) * base * (1.0 - base)
    } else {
        base + (2.0 * blend - 1.0) * (base.max(0.0).sqrt() - base)
    }
}

impl Composite for DreamyBlur {
    fn source(&self) -> Source {
        Source::Image
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind {
        BlurKind::Gaussian(blur_radius(self.scaled_radius(frame.render_scale)))
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        let lb = luminance(rgb);
        let result = soft_light(lb, luminance(blurred));

        let ratio = if lb > 1e-4 { result / lb } else { 1.0 };
        let mut soft = rgb.map(|v| v * ratio);

        let sat = self.params.saturation;
        if (sat - 1.0).abs() > 0.001 {
            soft = soft.map(|v| result + (v - result) * sat);
        }

        mix3(rgb, soft, self.tonal_mask(lb) * self.params.strength)
    }
}

impl SpatialOp for DreamyBlur {
    fn name(&self) -> &'static str {
        "dreamy"
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

    #[test]
    fn test_soft_light_neutral_blend() {
        for base in [0.0, 0.2, 0.7, 1.0] {
            assert_abs_diff_eq!(soft_light(base, 0.5), base, epsilon = 1e-6);
        }
        assert!(soft_light(0.4, 0.9) > 0.4);
        assert!(soft_light(0.4, 0.1) < 0.4);
    }

    #[test]
    fn test_flat_area_unchanged_at_neutral_blend() {
        let op = DreamyBlur::new(DreamyParams { enable: true, strength: 1.0, ..Default::default() });
        let px = [0.5, 0.5, 0.5];
        let out = op.combine(px, px);
        for c in 0..3 {
            assert_abs_diff_eq!(out[c], 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_midtones_masked_out() {
        let op = DreamyBlur::new(DreamyParams {
            enable: true,
            strength: 1.0,
            tonal_softness: 0.0,
            ..Default::default()
        });
        // Width 0.2 leaves L = 0.5 outside both ramps.
        assert_eq!(op.tonal_mask(0.5), 0.0);
        assert_eq!(op.combine([0.5; 3], [0.9; 3]), [0.5; 3]);
    }

    #[test]
    fn test_saturation_pivots_on_blended_luma() {
        let op = DreamyBlur::new(DreamyParams {
            enable: true,
            strength: 1.0,
            shadow_amount: 1.0,
            saturation: 0.0,
            ..Default::default()
        });
        // Base luma below the ratio guard: the hue ratio stays 1 but the
        // soft-light result is sqrt(L), and full desaturation lands on it.
        let px = [0.0, 0.0, 0.001];
        let l = luminance(px);
        assert!(l <= 1e-4);
        let out = op.combine(px, [1.0; 3]);
        for c in 0..3 {
            assert_abs_diff_eq!(out[c], l.sqrt(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_negative_radius_has_no_reach() {
        let op = DreamyBlur::new(DreamyParams { enable: true, radius: -5.0, ..Default::default() });
        assert_eq!(op.reach(1.0), Reach::Add(0.0));
    }
}
