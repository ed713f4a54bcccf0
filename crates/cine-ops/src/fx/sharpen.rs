//! Luminance sharpening with protection masks.
//!
//! All four modes share one unsharp-mask core on luminance: `detail = L -
//! blur(L)` from a small fixed Gaussian, shaped per mode, attenuated by
//! optional noise, edge, shadow and highlight protection, and added equally
//! to every channel so hue is untouched.

use super::composite::{self, Composite, Source};
use super::{Reach, SpatialOp};
use crate::blur::BlurKind;
use crate::math::luminance;
use crate::pipeline::{FrameContext, Workspace};

/// Blur radius of the detail extraction, independent of render scale.
pub const SHARPEN_REACH: usize = 2;

/// Detail shaping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharpenKind {
    /// Plain unsharp mask.
    #[default]
    SoftDetail,
    /// Boosted local contrast.
    MicroContrast,
    /// Unsharp mask with edge protection forced on.
    EdgeAware,
    /// Detail soft-limited to avoid halos on strong edges.
    Deconvolution,
}

/// Sharpen controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenParams {
    /// Module switch.
    pub enable: bool,
    /// Detail shaping mode.
    pub kind: SharpenKind,
    /// Overall strength.
    pub amount: f32,
    /// Extra gain on top of the base 0.5.
    pub detail: f32,
    /// Attenuation of strong edges.
    pub edge_protection: f32,
    /// Coring of small detail (grain, sensor noise).
    pub noise_suppression: f32,
    /// Attenuation in the shadows.
    pub shadow_protection: f32,
    /// Attenuation in the highlights.
    pub highlight_protection: f32,
}

impl Default for SharpenParams {
    fn default() -> Self {
        Self {
            enable: false,
            kind: SharpenKind::SoftDetail,
            amount: 0.0,
            detail: 0.5,
            edge_protection: 0.0,
            noise_suppression: 0.0,
            shadow_protection: 0.0,
            highlight_protection: 0.0,
        }
    }
}

/// Sharpen operator.
#[derive(Debug, Clone)]
pub struct Sharpen {
    params: SharpenParams,
}

impl Sharpen {
    /// Creates the operator.
    pub fn new(params: SharpenParams) -> Self {
        Self { params }
    }

    /// Shaped and cored detail for a luminance difference.
    fn shape_detail(&self, mut d: f32) -> f32 {
        let p = &self.params;
        match p.kind {
            SharpenKind::MicroContrast => d *= 1.2,
            SharpenKind::Deconvolution => {
                const LIMIT: f32 = 0.1;
                if d.abs() > LIMIT {
                    d = d.signum() * (LIMIT + (d.abs() - LIMIT) * 0.1);
                }
            }
            SharpenKind::SoftDetail | SharpenKind::EdgeAware => {}
        }

        if p.noise_suppression > 0.0 {
            let th = 0.05 * p.noise_suppression;
            if d.abs() < th {
                d *= d.abs() / th;
            }
        }

        let protect = match p.kind {
            SharpenKind::EdgeAware => p.edge_protection.max(0.5),
            _ => p.edge_protection,
        };
        if protect > 0.0 && d.abs() > 0.05 {
            d *= 1.0 / (1.0 + (d.abs() - 0.05) * protect * 20.0);
        }
        d
    }

    /// Tonal weight from the protection controls.
    fn tone_weight(&self, l: f32) -> f32 {
        let p = &self.params;
        let mut w = 1.0;
        if p.shadow_protection > 0.0 {
            w *= 1.0 - (1.0 - (l * 4.0).min(1.0)) * p.shadow_protection;
        }
        if p.highlight_protection > 0.0 {
            w *= 1.0 - (l - 0.6).max(0.0) * 2.5 * p.highlight_protection;
        }
        w
    }
}

impl Composite for Sharpen {
    fn source(&self) -> Source {
        Source::Image
    }

    fn blur(&self, _frame: &FrameContext) -> BlurKind {
        BlurKind::Gaussian(SHARPEN_REACH)
    }

    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        if p.amount <= 0.0 {
            return rgb;
        }
        let l = luminance(rgb);
        let d = self.shape_detail(l - luminance(blurred));
        let strength = p.amount * self.tone_weight(l) * (0.5 + p.detail);
        rgb.map(|v| v + d * strength)
    }
}

impl SpatialOp for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn is_active(&self) -> bool {
        self.params.enable
    }

    fn reach(&self, _render_scale: f32) -> Reach {
        Reach::Add(SHARPEN_REACH as f32)
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        composite::render(self, ws, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sharpen(kind: SharpenKind) -> SharpenParams {
        SharpenParams { enable: true, kind, amount: 1.0, ..Default::default() }
    }

    #[test]
    fn test_flat_region_unchanged() {
        let op = Sharpen::new(sharpen(SharpenKind::SoftDetail));
        assert_eq!(op.combine([0.4, 0.3, 0.2], [0.4, 0.3, 0.2]), [0.4, 0.3, 0.2]);
    }

    #[test]
    fn test_edge_is_boosted() {
        let op = Sharpen::new(sharpen(SharpenKind::SoftDetail));
        let out = op.combine([0.6; 3], [0.5; 3]);
        // detail 0.1 * strength 1.0
        assert_abs_diff_eq!(out[0], 0.7, epsilon = 1e-5);
    }

    #[test]
    fn test_modes_shape_detail() {
        let micro = Sharpen::new(sharpen(SharpenKind::MicroContrast));
        assert_abs_diff_eq!(micro.shape_detail(0.1), 0.12, epsilon = 1e-6);

        let deconv = Sharpen::new(sharpen(SharpenKind::Deconvolution));
        assert_abs_diff_eq!(deconv.shape_detail(0.5), 0.14, epsilon = 1e-6);
        assert_abs_diff_eq!(deconv.shape_detail(-0.5), -0.14, epsilon = 1e-6);

        let edge = Sharpen::new(sharpen(SharpenKind::EdgeAware));
        assert!(edge.shape_detail(0.3) < 0.3);
        assert_eq!(edge.shape_detail(0.04), 0.04);
    }

    #[test]
    fn test_noise_coring() {
        let op = Sharpen::new(SharpenParams { noise_suppression: 1.0, ..sharpen(SharpenKind::SoftDetail) });
        assert_abs_diff_eq!(op.shape_detail(0.025), 0.0125, epsilon = 1e-6);
        assert_eq!(op.shape_detail(0.2), 0.2);
    }

    #[test]
    fn test_protection_weights() {
        let op = Sharpen::new(SharpenParams {
            shadow_protection: 1.0,
            highlight_protection: 1.0,
            ..sharpen(SharpenKind::SoftDetail)
        });
        assert_eq!(op.tone_weight(0.0), 0.0);
        assert_eq!(op.tone_weight(0.5), 1.0);
        assert_abs_diff_eq!(op.tone_weight(0.8), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_amount_is_noop() {
        let op = Sharpen::new(SharpenParams { enable: true, ..Default::default() });
        assert_eq!(op.combine([0.9; 3], [0.1; 3]), [0.9; 3]);
    }
}
