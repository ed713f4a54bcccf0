//! Highlight protection: asymptotic compression above a threshold.
//!
//! `f(x) = x / (1 + rolloff * (x - threshold))` for `x >= threshold`.
//!
//! Like the tone curve this module has no enable switch. A threshold at or
//! above [`BYPASS_THRESHOLD`] is the identity condition; look loaders write
//! that sentinel when the user turns the module off.

use super::{PixelOp, PixelSite};
use crate::math::{luminance, with_luminance};

/// Threshold far above any scene value, treated as "module off".
pub const BYPASS_THRESHOLD: f32 = 100.0;

const EPSILON: f32 = 1e-7;

/// Highlight compression controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightParams {
    /// Value where compression starts.
    pub threshold: f32,
    /// Compression strength.
    pub rolloff: f32,
    /// Compress luminance and keep channel ratios instead of per channel.
    pub preserve_color: bool,
}

impl Default for HighlightParams {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            rolloff: 0.5,
            preserve_color: false,
        }
    }
}

impl HighlightParams {
    /// Parameters that leave every pixel untouched.
    pub fn bypass() -> Self {
        Self { threshold: BYPASS_THRESHOLD, ..Default::default() }
    }

    /// Threshold below the bypass sentinel.
    pub fn is_active(&self) -> bool {
        self.threshold < BYPASS_THRESHOLD
    }
}

/// Highlight compression operator.
#[derive(Debug, Clone)]
pub struct HighlightProtection {
    params: HighlightParams,
}

impl HighlightProtection {
    /// Wraps the controls.
    pub fn new(params: HighlightParams) -> Self {
        Self { params }
    }

    #[inline]
    fn compress(&self, v: f32) -> f32 {
        let t = self.params.threshold;
        if v < t { v } else { v / (1.0 + self.params.rolloff * (v - t)) }
    }

    /// Applies the compression to one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        if !self.params.is_active() {
            return rgb;
        }
        if self.params.preserve_color {
            let l = luminance(rgb);
            with_luminance(rgb, l, self.compress(l), EPSILON)
        } else {
            rgb.map(|v| self.compress(v))
        }
    }
}

impl PixelOp for HighlightProtection {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn is_active(&self) -> bool {
        self.params.is_active()
    }

    fn apply(&self, rgb: [f32; 3], _site: PixelSite) -> [f32; 3] {
        self.process(rgb)
    }
}
