//! Ingest tweaks: exposure trim, white balance, saturation, chroma ceiling
//! and highlight white bias.
//!
//! Applied first so every later stage sees balanced, exposure-corrected
//! input. The six controls run in a fixed order: exposure, white balance,
//! global saturation, chroma ceiling, white bias.

use super::{PixelOp, PixelSite};
use crate::math::{luminance, magnitude, split_chroma};

/// Below this ceiling the chroma is discarded entirely.
const MIN_CEILING: f32 = 0.001;

/// Ingest tweak controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestParams {
    /// Module switch.
    pub enable: bool,
    /// Exposure trim in stops (-2..2).
    pub exposure_trim: f32,
    /// Chroma magnitude above which chroma is soft-compressed (0..1, 1 = off).
    pub chroma_ceiling: f32,
    /// Highlight-only warm/cool push (-1..1).
    pub white_bias: f32,
    /// Warm/cool balance (-1..1).
    pub temperature: f32,
    /// Green/magenta balance (-1..1).
    pub tint: f32,
    /// Global saturation (0..2).
    pub global_saturation: f32,
}

impl Default for IngestParams {
    fn default() -> Self {
        Self {
            enable: true,
            exposure_trim: 0.0,
            chroma_ceiling: 1.0,
            white_bias: 0.0,
            temperature: 0.0,
            tint: 0.0,
            global_saturation: 1.0,
        }
    }
}

impl IngestParams {
    /// All six controls at their neutral values.
    pub fn is_neutral(&self) -> bool {
        self.exposure_trim == 0.0
            && self.chroma_ceiling >= 1.0
            && self.white_bias == 0.0
            && self.temperature == 0.0
            && self.tint == 0.0
            && self.global_saturation == 1.0
    }

    /// Enabled and not neutral.
    pub fn is_active(&self) -> bool {
        self.enable && !self.is_neutral()
    }
}

/// Ingest tweak operator.
#[derive(Debug, Clone)]
pub struct Ingest {
    params: IngestParams,
    gain: f32,
}

impl Ingest {
    /// Prepares the operator, precomputing the exposure gain.
    pub fn new(params: IngestParams) -> Self {
        Self { gain: params.exposure_trim.exp2(), params }
    }

    /// Applies the tweaks to one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        let [mut r, mut g, mut b] = rgb;

        if p.exposure_trim != 0.0 {
            r *= self.gain;
            g *= self.gain;
            b *= self.gain;
        }

        if p.temperature != 0.0 || p.tint != 0.0 {
            let t = p.temperature * 0.1;
            r += t;
            g += p.tint * 0.1;
            b -= t;
        }

        if p.global_saturation != 1.0 {
            let l = luminance([r, g, b]);
            let s = p.global_saturation;
            r = l + (r - l) * s;
            g = l + (g - l) * s;
            b = l + (b - l) * s;
        }

        if p.chroma_ceiling < 1.0 {
            let (l, c) = split_chroma([r, g, b]);
            let limit = p.chroma_ceiling;
            let mag = magnitude(c);
            if limit <= MIN_CEILING {
                [r, g, b] = [l, l, l];
            } else if mag > limit {
                let scale = (limit + (mag - limit).tanh() * 0.1) / mag;
                [r, g, b] = [l + c[0] * scale, l + c[1] * scale, l + c[2] * scale];
            }
        }

        if p.white_bias != 0.0 {
            let l = luminance([r, g, b]);
            if l > 0.5 {
                let f = (l - 0.5) * 2.0;
                let s = p.white_bias * 0.05 * f * f;
                if p.white_bias > 0.0 {
                    r += s;
                    g += s * 0.8;
                    b -= s;
                } else {
                    let s = s.abs();
                    r -= s;
                    g -= s * 0.2;
                    b += s;
                }
            }
        }

        [r, g, b]
    }
}

impl PixelOp for Ingest {
    fn name(&self) -> &'static str {
        "ingest"
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

    fn op(f: impl FnOnce(&mut IngestParams)) -> Ingest {
        let mut p = IngestParams::default();
        f(&mut p);
        Ingest::new(p)
    }

    #[test]
    fn test_default_is_neutral() {
        let p = IngestParams::default();
        assert!(p.is_neutral());
        assert!(!p.is_active());
        let px = [0.3, 0.7, 0.1];
        assert_eq!(Ingest::new(p).process(px), px);
    }

    #[test]
    fn test_exposure_one_stop() {
        let out = op(|p| p.exposure_trim = 1.0).process([0.1, 0.2, 0.4]);
        assert_abs_diff_eq!(out[0], 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(out[2], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_temperature_and_tint() {
        let out = op(|p| {
            p.temperature = 0.5;
            p.tint = -1.0;
        })
        .process([0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(out[0], 0.55, epsilon = 1e-6);
        assert_abs_diff_eq!(out[1], 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(out[2], 0.45, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let out = op(|p| p.global_saturation = 0.0).process([0.9, 0.2, 0.1]);
        assert_abs_diff_eq!(out[0], out[1], epsilon = 1e-6);
        assert_abs_diff_eq!(out[1], out[2], epsilon = 1e-6);
    }

    #[test]
    fn test_chroma_ceiling_soft_limits() {
        let px = [1.0, 0.0, 0.0];
        let out = op(|p| p.chroma_ceiling = 0.2).process(px);
        let (_, c) = split_chroma(out);
        assert!(magnitude(c) < 0.2 + 0.1 + 1e-6);
        assert!(magnitude(c) > 0.2);

        let gray = op(|p| p.chroma_ceiling = 0.0).process(px);
        assert_abs_diff_eq!(gray[0], gray[2], epsilon = 1e-6);
    }

    #[test]
    fn test_white_bias_only_in_highlights() {
        let warm = op(|p| p.white_bias = 1.0);
        assert_eq!(warm.process([0.3, 0.3, 0.3]), [0.3, 0.3, 0.3]);
        let out = warm.process([1.0, 1.0, 1.0]);
        assert!(out[0] > 1.0 && out[2] < 1.0);

        let cool = op(|p| p.white_bias = -1.0).process([1.0, 1.0, 1.0]);
        assert!(cool[0] < 1.0 && cool[2] > 1.0);
    }
}
