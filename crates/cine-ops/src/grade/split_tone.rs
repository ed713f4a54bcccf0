//! Split toning in a Pb/Pr chroma plane.
//!
//! Shadow, highlight and optional midtone hues become unit vectors once per
//! frame. Each pixel receives a luminance-weighted blend of those vectors as
//! a red/blue offset, then green is solved from the Rec.709 luma equation so
//! luminance is preserved exactly.

use super::{PixelOp, PixelSite};
use crate::math::{luminance, smoothstep};
use cine_core::{REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Pr to R' scale of the Rec.709 color-difference encoding.
const PR_SCALE: f32 = 0.6350;
/// Pb to B' scale of the Rec.709 color-difference encoding.
const PB_SCALE: f32 = 0.5389;

/// Split toning controls. Hues are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitToneParams {
    /// Module switch.
    pub enable: bool,
    /// Overall tint strength (0..1).
    pub strength: f32,
    /// Shadow tint hue.
    pub shadow_hue: f32,
    /// Highlight tint hue.
    pub highlight_hue: f32,
    /// Shifts weight from shadows (-1) to highlights (+1).
    pub balance: f32,
    /// Midtone tint hue.
    pub midtone_hue: f32,
    /// Midtone tint amount (0 = off).
    pub midtone_saturation: f32,
}

impl Default for SplitToneParams {
    fn default() -> Self {
        Self {
            enable: false,
            strength: 0.0,
            shadow_hue: 220.0,
            highlight_hue: 40.0,
            balance: 0.0,
            midtone_hue: 30.0,
            midtone_saturation: 0.0,
        }
    }
}

impl SplitToneParams {
    /// Enabled with a positive strength.
    pub fn is_active(&self) -> bool {
        self.enable && self.strength > 0.0
    }
}

/// Unit (Pb, Pr) vector for a hue angle in degrees.
pub fn hue_vector(degrees: f32) -> [f32; 2] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [cos, sin]
}

/// Split toning operator with hue vectors precomputed.
#[derive(Debug, Clone)]
pub struct SplitTone {
    params: SplitToneParams,
    shadow: [f32; 2],
    highlight: [f32; 2],
    midtone: [f32; 2],
}

impl SplitTone {
    /// Precomputes the three hue vectors.
    pub fn new(params: SplitToneParams) -> Self {
        Self {
            shadow: hue_vector(params.shadow_hue),
            highlight: hue_vector(params.highlight_hue),
            midtone: hue_vector(params.midtone_hue),
            params,
        }
    }

    /// Tints one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        if !p.is_active() {
            return rgb;
        }
        let l = luminance(rgb);

        let mut shadow_w = 1.0 - smoothstep(0.0, 0.4, l);
        let mut high_w = smoothstep(0.6, 1.0, l);
        let mid_w = (1.0 - shadow_w) * (1.0 - high_w);
        shadow_w *= 1.0 - p.balance;
        high_w *= 1.0 + p.balance;

        let k = p.strength * 0.05;
        let mut d_pb = (self.shadow[0] * shadow_w + self.highlight[0] * high_w) * k;
        let mut d_pr = (self.shadow[1] * shadow_w + self.highlight[1] * high_w) * k;

        if p.midtone_saturation > 0.0 {
            let m = p.midtone_saturation * mid_w * k;
            d_pb += self.midtone[0] * m;
            d_pr += self.midtone[1] * m;
        }

        let r = rgb[0] + d_pr / PR_SCALE;
        let b = rgb[2] + d_pb / PB_SCALE;
        let g = (l - REC709_LUMA_R * r - REC709_LUMA_B * b) / REC709_LUMA_G;
        [r, g, b]
    }
}

impl PixelOp for SplitTone {
    fn name(&self) -> &'static str {
        "split_tone"
    }

    fn is_active(&self) -> bool {
        self.params.is_active()
    }

    fn apply(&self, rgb: [f32; 3], _site: PixelSite) -> [f32; 3] {
        self.process(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn toned() -> SplitTone {
        SplitTone::new(SplitToneParams {
            enable: true,
            strength: 1.0,
            balance: 0.3,
            midtone_saturation: 0.8,
            ..Default::default()
        })
    }

    #[test]
    fn test_luminance_preserved_everywhere() {
        let op = toned();
        for i in 0..=40 {
            let v = i as f32 / 20.0;
            let px = [v * 0.9, v, v * 0.7 + 0.01];
            let out = op.process(px);
            assert_abs_diff_eq!(luminance(out), luminance(px), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_shadows_take_shadow_hue() {
        // 220 degrees has a negative Pr component, pulling red down.
        let op = toned();
        let out = op.process([0.05, 0.05, 0.05]);
        assert!(out[0] < 0.05);
    }

    #[test]
    fn test_hue_vector_unit_length() {
        for h in [0.0, 40.0, 220.0, 359.0] {
            let [pb, pr] = hue_vector(h);
            assert_abs_diff_eq!(pb * pb + pr * pr, 1.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(hue_vector(90.0)[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_disabled_is_identity() {
        let op = SplitTone::new(SplitToneParams { strength: 1.0, ..Default::default() });
        assert_eq!(op.process([0.2, 0.3, 0.4]), [0.2, 0.3, 0.4]);
    }
}
