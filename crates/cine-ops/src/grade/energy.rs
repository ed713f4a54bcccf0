//! Color energy: chroma separation, density and vibrance.
//!
//! Works on the chroma vector only; luminance is reassembled unchanged.

use super::{PixelOp, PixelSite};
use crate::math::{magnitude, mix, scale3, split_chroma};

const MIN_LUMA: f32 = 0.0001;
const MIN_CHROMA: f32 = 0.0001;

/// Color energy controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyParams {
    /// Module switch.
    pub enable: bool,
    /// Chroma magnitude exponent (1 = neutral).
    pub density: f32,
    /// Chroma expansion factor (0 = neutral).
    pub separation: f32,
    /// Width of the highlight band where separation fades out.
    pub highlight_roll_off: f32,
    /// Luminance below which separation fades in linearly.
    pub shadow_bias: f32,
    /// Saturation-aware boost of muted colors (1 = neutral).
    pub vibrance: f32,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            enable: false,
            density: 1.0,
            separation: 0.0,
            highlight_roll_off: 0.0,
            shadow_bias: 0.0,
            vibrance: 1.0,
        }
    }
}

impl EnergyParams {
    /// Enabled.
    pub fn is_active(&self) -> bool {
        self.enable
    }
}

/// Color energy operator.
#[derive(Debug, Clone)]
pub struct ColorEnergy {
    params: EnergyParams,
}

impl ColorEnergy {
    /// Wraps the controls.
    pub fn new(params: EnergyParams) -> Self {
        Self { params }
    }

    /// Applies the chroma shaping to one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        let (luma, mut c) = split_chroma(rgb);
        if luma <= MIN_LUMA {
            return rgb;
        }

        if p.separation != 0.0 {
            let shadow_att = if luma < p.shadow_bias { luma / p.shadow_bias } else { 1.0 };
            let high_att = if p.highlight_roll_off > 1e-6 && luma > 1.0 - p.highlight_roll_off {
                ((1.0 - luma) / p.highlight_roll_off).max(0.0)
            } else {
                1.0
            };
            c = scale3(c, 1.0 + p.separation * shadow_att * high_att);
        }

        if p.density != 1.0 {
            let sat = magnitude(c);
            if sat > MIN_CHROMA {
                c = scale3(c, sat.powf(p.density) / sat);
            }
        }

        if p.vibrance != 1.0 {
            let sat = magnitude(c);
            if sat > MIN_CHROMA {
                c = scale3(c, mix(p.vibrance, 1.0, (sat * 2.0).min(1.0)));
            }
        }

        [luma + c[0], luma + c[1], luma + c[2]]
    }
}

impl PixelOp for ColorEnergy {
    fn name(&self) -> &'static str {
        "energy"
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
    use crate::math::luminance;
    use approx::assert_abs_diff_eq;

    fn on(f: impl FnOnce(&mut EnergyParams)) -> ColorEnergy {
        let mut p = EnergyParams { enable: true, ..Default::default() };
        f(&mut p);
        ColorEnergy::new(p)
    }

    #[test]
    fn test_neutral_controls_preserve_pixel() {
        let px = [0.4, 0.3, 0.2];
        let out = on(|_| {}).process(px);
        for i in 0..3 {
            assert_abs_diff_eq!(out[i], px[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_separation_expands_chroma_keeps_luma() {
        let px = [0.5, 0.3, 0.2];
        let out = on(|p| p.separation = 0.5).process(px);
        assert_abs_diff_eq!(luminance(out), luminance(px), epsilon = 1e-6);
        let (_, c_in) = split_chroma(px);
        let (_, c_out) = split_chroma(out);
        assert_abs_diff_eq!(magnitude(c_out), magnitude(c_in) * 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_separation_rolls_off_in_highlights() {
        let px = [1.1, 1.05, 1.0];
        let out = on(|p| {
            p.separation = 1.0;
            p.highlight_roll_off = 0.2;
        })
        .process(px);
        // Luma above 1 drives the attenuation to zero.
        for i in 0..3 {
            assert_abs_diff_eq!(out[i], px[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vibrance_favors_muted_colors() {
        let op = on(|p| p.vibrance = 2.0);
        let muted = [0.42, 0.4, 0.38];
        let vivid = [0.9, 0.1, 0.05];
        let gain = |px: [f32; 3]| magnitude(split_chroma(op.process(px)).1) / magnitude(split_chroma(px).1);
        assert!(gain(muted) > gain(vivid));
        assert_abs_diff_eq!(gain(vivid), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_black_pixels_skipped() {
        let op = on(|p| p.separation = 1.0);
        assert_eq!(op.process([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }
}
