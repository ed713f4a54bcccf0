//! Film grain synthesis.
//!
//! Grain is a positionally hashed, approximately Gaussian noise field on a
//! grid whose cell size scales with the image's shorter side. It multiplies
//! the pixel, weighted by luminance zone. The hash is seeded per frame from
//! the host time; temporal speed below 1 holds each pattern for several
//! frames.

use super::{PixelOp, PixelSite};
use crate::math::{luminance, smoothstep};

/// Integer hash of a lattice point, mapped to `[0, 1)`.
///
/// Deterministic across platforms: all arithmetic is wrapping `u32`.
#[inline]
pub fn hash2d(x: i32, y: i32, seed: u32) -> f32 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263));
    h = (h ^ (h >> 13)) ^ seed;
    h = h.wrapping_mul(1_274_126_177);
    (h & 0x00FF_FFFF) as f32 / 16_777_216.0
}

/// Sum of two uniforms centered on zero: triangular, range `(-1, 1)`.
#[inline]
fn grain_sample(gx: i32, gy: i32, seed: u32) -> f32 {
    hash2d(gx, gy, seed) + hash2d(gx + 17, gy + 29, seed) - 1.0
}

/// Film gauge presets that initialise the grain controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrainStock {
    /// Hand-set controls.
    #[default]
    Custom,
    /// 8mm.
    Mm8,
    /// 16mm.
    Mm16,
    /// Super 16.
    Super16,
    /// 35mm.
    Mm35,
    /// 65mm.
    Mm65,
    /// Almost grainless.
    Clean,
}

impl GrainStock {
    /// Every stock, in menu order.
    pub const ALL: [GrainStock; 7] = [
        GrainStock::Custom,
        GrainStock::Mm8,
        GrainStock::Mm16,
        GrainStock::Super16,
        GrainStock::Mm35,
        GrainStock::Mm65,
        GrainStock::Clean,
    ];

    /// `(amount, size, shadow, mid, highlight)` for the stock, `None` for custom.
    pub fn controls(self) -> Option<(f32, f32, f32, f32, f32)> {
        match self {
            GrainStock::Custom => None,
            GrainStock::Mm8 => Some((0.7, 0.8, 0.8, 0.6, 0.2)),
            GrainStock::Mm16 => Some((0.5, 0.6, 0.6, 0.6, 0.3)),
            GrainStock::Super16 => Some((0.4, 0.5, 0.5, 0.5, 0.5)),
            GrainStock::Mm35 => Some((0.25, 0.3, 0.3, 0.6, 0.4)),
            GrainStock::Mm65 => Some((0.15, 0.2, 0.2, 0.5, 0.3)),
            GrainStock::Clean => Some((0.0, 0.1, 0.5, 0.5, 0.5)),
        }
    }
}

/// Grain controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainParams {
    /// Module switch.
    pub enable: bool,
    /// Master strength.
    pub amount: f32,
    /// Grain size relative to the image's shorter side.
    pub size: f32,
    /// Zone weight for shadows (0..1).
    pub shadow_weight: f32,
    /// Zone weight for midtones (0..1).
    pub mid_weight: f32,
    /// Zone weight for highlights (0..1).
    pub highlight_weight: f32,
    /// Independent noise per channel.
    pub chromatic: bool,
    /// 0 holds the pattern for 24 frames, 1 changes it every frame.
    pub temporal_speed: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            enable: false,
            amount: 0.0,
            size: 0.5,
            shadow_weight: 0.5,
            mid_weight: 0.5,
            highlight_weight: 0.5,
            chromatic: false,
            temporal_speed: 0.5,
        }
    }
}

impl GrainParams {
    /// Enabled with a positive amount.
    pub fn is_active(&self) -> bool {
        self.enable && self.amount > 0.0
    }

    /// Copy with a stock's controls applied.
    pub fn with_stock(mut self, stock: GrainStock) -> Self {
        if let Some((amount, size, shadow, mid, high)) = stock.controls() {
            self.amount = amount;
            self.size = size;
            self.shadow_weight = shadow;
            self.mid_weight = mid;
            self.highlight_weight = high;
        }
        self
    }
}

/// Frame seed derived from host time at 24 frames per second.
pub fn frame_seed(time: f64) -> i32 {
    (time * 24.0).floor() as i32
}

/// Grain operator bound to one frame.
#[derive(Debug, Clone)]
pub struct FilmGrain {
    params: GrainParams,
    cell: f32,
    seed: u32,
}

impl FilmGrain {
    /// Resolves cell size and the temporally quantised seed.
    ///
    /// `image_width`/`image_height` come from the source region of
    /// definition, not the render window, so grain scale is tile-invariant.
    pub fn new(params: GrainParams, frame_seed: i32, image_width: usize, image_height: usize) -> Self {
        let min_dim = image_width.min(image_height) as f32;
        let cell = ((0.0015 + params.size.max(0.001) * 0.005) * min_dim).max(1.0);

        let mut seed = frame_seed;
        if params.temporal_speed < 1.0 {
            let interval = (24.0 * (1.0 - params.temporal_speed)).max(1.0);
            seed = (frame_seed as f32 / interval) as i32 * interval as i32;
        }

        Self { params, cell, seed: seed as u32 }
    }

    /// Lattice cell size in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell
    }

    /// Seed after temporal quantisation.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn zone_weight(&self, l: f32) -> f32 {
        let p = &self.params;
        let sw = p.shadow_weight.clamp(0.0, 1.0);
        let mw = p.mid_weight.clamp(0.0, 1.0);
        let hw = p.highlight_weight.clamp(0.0, 1.0);
        if l < 0.5 {
            let t = smoothstep(0.0, 0.5, l);
            sw * (1.0 - t) + mw * t
        } else {
            let t = smoothstep(0.5, 1.0, l);
            mw * (1.0 - t) + hw * t
        }
    }

    /// Applies grain to the pixel at host coordinates `(x, y)`.
    pub fn process(&self, rgb: [f32; 3], x: i32, y: i32) -> [f32; 3] {
        let gx = (x as f32 / self.cell) as i32;
        let gy = (y as f32 / self.cell) as i32;
        let strength = self.params.amount * self.zone_weight(luminance(rgb));

        if self.params.chromatic {
            let nr = grain_sample(gx, gy, self.seed);
            let ng = grain_sample(gx, gy, self.seed.wrapping_add(7));
            let nb = grain_sample(gx, gy, self.seed.wrapping_add(13));
            [rgb[0] * (1.0 + nr * strength), rgb[1] * (1.0 + ng * strength), rgb[2] * (1.0 + nb * strength)]
        } else {
            let k = 1.0 + grain_sample(gx, gy, self.seed) * strength;
            rgb.map(|v| v * k)
        }
    }
}

impl PixelOp for FilmGrain {
    fn name(&self) -> &'static str {
        "grain"
    }

    fn is_active(&self) -> bool {
        self.params.is_active()
    }

    fn apply(&self, rgb: [f32; 3], site: PixelSite) -> [f32; 3] {
        self.process(rgb, site.x, site.y)
    }
}
