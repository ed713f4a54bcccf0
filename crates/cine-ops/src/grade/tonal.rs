//! Tonal reshaping around a pivot.
//!
//! ```text
//! L <= pivot:  pivot * (L / pivot)^contrast
//! L >  pivot:  pivot + (1 - pivot) * ((L - pivot) / (1 - pivot))^highlight_contrast
//! ```
//!
//! The mapped luminance is blended with the input by `strength`, clamped to
//! the black floor, soft-clipped near 1, and re-applied as an RGB ratio so
//! hue is untouched.
//!
//! There is no enable switch. `strength <= 0` is the identity condition that
//! hosts check to bypass the module.

use super::{PixelOp, PixelSite};
use crate::math::{luminance, mix, with_luminance};

const EPSILON: f32 = 1e-7;
const MIN_PIVOT: f32 = 1e-4;

/// Tone curve controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalParams {
    /// Below-pivot exponent.
    pub contrast: f32,
    /// Luminance the curve pivots around.
    pub pivot: f32,
    /// Blend against the input luminance (0..1, 0 = bypass).
    pub strength: f32,
    /// Minimum output luminance (0..0.1).
    pub black_floor: f32,
    /// Above-pivot exponent.
    pub highlight_contrast: f32,
    /// Shoulder strength near and above 1 (0..1).
    pub soft_clip: f32,
}

impl Default for TonalParams {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            pivot: 0.18,
            strength: 1.0,
            black_floor: 0.0,
            highlight_contrast: 1.0,
            soft_clip: 0.0,
        }
    }
}

impl TonalParams {
    /// Positive strength.
    pub fn is_active(&self) -> bool {
        self.strength > 0.0
    }
}

/// Tone curve operator.
#[derive(Debug, Clone)]
pub struct ToneCurve {
    params: TonalParams,
}

impl ToneCurve {
    /// Wraps the controls.
    pub fn new(params: TonalParams) -> Self {
        Self { params }
    }

    /// Maps a luminance value through the curve, floor and shoulder.
    pub fn map_luminance(&self, l: f32) -> f32 {
        let p = &self.params;
        let pivot = p.pivot.max(MIN_PIVOT);

        let mapped = if l <= pivot {
            pivot * (l / pivot).max(EPSILON).powf(p.contrast)
        } else {
            let range = (1.0 - pivot).max(EPSILON);
            let n = ((l - pivot) / range).max(EPSILON);
            pivot + n.powf(p.highlight_contrast.max(0.01)) * range
        };

        let mut out = mix(l, mapped, p.strength.clamp(0.0, 1.0));

        if p.black_floor > 0.0 {
            out = out.max(p.black_floor);
        }

        if p.soft_clip > 0.0 {
            let k = p.soft_clip * 2.0;
            if out > 0.0 && out < 1.0 {
                let headroom = 1.0 - out;
                if headroom < k * 0.5 {
                    let excess = k * 0.5 - headroom;
                    out = 1.0 - (k * 0.5) / (1.0 + excess * 4.0);
                }
            } else if out >= 1.0 {
                out = (1.0 - 1.0 / (1.0 + out * (1.0 + k))).min(1.0);
            }
        }

        out
    }

    /// Applies the curve to one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        if !self.params.is_active() {
            return rgb;
        }
        let l = luminance(rgb);
        with_luminance(rgb, l, self.map_luminance(l), EPSILON)
    }
}

impl PixelOp for ToneCurve {
    fn name(&self) -> &'static str {
        "tonal"
    }

    fn is_active(&self) -> bool {
        self.params.is_active()
    }

    fn apply(&self, rgb: [f32; 3], _site: PixelSite) -> [f32; 3] {
        self.process(rgb)
    }
}
