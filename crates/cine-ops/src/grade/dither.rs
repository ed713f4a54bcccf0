//! Triangular-PDF dither to break up quantisation banding.

use super::grain::hash2d;
use super::{PixelOp, PixelSite};

const SEEDS: [u32; 3] = [0xA1B2_C3D4, 0xE5F6_A7B8, 0xC9D0_E1F2];

/// Dither controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherParams {
    /// Module switch.
    pub enable: bool,
    /// Strength in units of 1/512.
    pub amount: f32,
}

impl Default for DitherParams {
    fn default() -> Self {
        Self { enable: false, amount: 0.5 }
    }
}

impl DitherParams {
    /// Enabled with a positive amount.
    pub fn is_active(&self) -> bool {
        self.enable && self.amount > 0.0
    }
}

/// Dither operator.
#[derive(Debug, Clone)]
pub struct Dither {
    scale: f32,
    active: bool,
}

impl Dither {
    /// Precomputes the noise scale.
    pub fn new(params: DitherParams) -> Self {
        Self { scale: params.amount / 512.0, active: params.is_active() }
    }

    /// Adds TPDF noise to the pixel at host coordinates `(x, y)`.
    pub fn process(&self, rgb: [f32; 3], x: i32, y: i32) -> [f32; 3] {
        let mut out = rgb;
        for (v, seed) in out.iter_mut().zip(SEEDS) {
            let n = hash2d(x, y, seed) - 0.5 + hash2d(x + 1, y, seed) - 0.5;
            *v += n * self.scale;
        }
        out
    }
}

impl PixelOp for Dither {
    fn name(&self) -> &'static str {
        "dither"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn apply(&self, rgb: [f32; 3], site: PixelSite) -> [f32; 3] {
        self.process(rgb, site.x, site.y)
    }
}
