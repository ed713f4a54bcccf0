//! Photochemical film response.
//!
//! Hue and saturation bias driven purely by luminance: cool, desaturated
//! shadows, denser midtones, warm compressed highlights. Luminance itself
//! is never changed before the final `amount` blend.
//!
//! Cross-process mode swaps the shadow-bias and highlight-warmth magnitudes
//! and flips the tint direction of both zones.

use super::{PixelOp, PixelSite};
use crate::math::{mix3, smoothstep, split_chroma};

/// Stock emulations that overwrite the four zone controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmPreset {
    /// Manual controls.
    #[default]
    None,
    /// Kodak Vision3 500T.
    Vision3,
    /// Fuji Eterna.
    Eterna,
    /// Kodak Portra.
    Portra,
    /// Kodak Ektachrome.
    Ektachrome,
    /// Cross-processed slide stock; also forces cross-process mode.
    CrossProcess,
}

impl FilmPreset {
    /// Zone controls as `(shadow_cool_bias, midtone_color_focus,
    /// highlight_warmth, highlight_compression)`, or `None` for manual.
    pub fn zones(self) -> Option<(f32, f32, f32, f32)> {
        match self {
            FilmPreset::None => None,
            FilmPreset::Vision3 => Some((0.4, 0.6, 0.5, 0.3)),
            FilmPreset::Eterna => Some((0.6, 0.3, 0.2, 0.5)),
            FilmPreset::Portra => Some((0.2, 0.5, 0.7, 0.2)),
            FilmPreset::Ektachrome => Some((0.5, 0.8, 0.3, 0.4)),
            FilmPreset::CrossProcess => Some((0.7, 0.9, 0.8, 0.1)),
        }
    }
}

/// Film response controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmResponseParams {
    /// Module switch.
    pub enable: bool,
    /// Blend against the input (0..1).
    pub amount: f32,
    /// Cooling and desaturation of shadows.
    pub shadow_cool_bias: f32,
    /// Midtone saturation boost.
    pub midtone_color_focus: f32,
    /// Warm tint of highlights.
    pub highlight_warmth: f32,
    /// Per-channel chroma compression of highlights.
    pub highlight_compression: f32,
    /// Stock emulation overriding the zone controls.
    pub preset: FilmPreset,
    /// Swap shadow/highlight hue behavior.
    pub cross_process: bool,
}

impl Default for FilmResponseParams {
    fn default() -> Self {
        Self {
            enable: true,
            amount: 0.0,
            shadow_cool_bias: 0.0,
            midtone_color_focus: 0.0,
            highlight_warmth: 0.0,
            highlight_compression: 0.0,
            preset: FilmPreset::None,
            cross_process: false,
        }
    }
}

impl FilmResponseParams {
    /// Enabled with a positive amount.
    pub fn is_active(&self) -> bool {
        self.enable && self.amount > 0.0
    }

    /// Copy with the preset's zone controls folded in.
    pub fn resolved(&self) -> Self {
        let mut p = *self;
        if let Some((shadow, mid, warmth, comp)) = self.preset.zones() {
            p.shadow_cool_bias = shadow;
            p.midtone_color_focus = mid;
            p.highlight_warmth = warmth;
            p.highlight_compression = comp;
        }
        if self.preset == FilmPreset::CrossProcess {
            p.cross_process = true;
        }
        p
    }
}

/// Film response operator with the preset resolved once per frame.
#[derive(Debug, Clone)]
pub struct FilmResponse {
    params: FilmResponseParams,
}

impl FilmResponse {
    /// Resolves the preset table.
    pub fn new(params: FilmResponseParams) -> Self {
        Self { params: params.resolved() }
    }

    /// Applies the response to one pixel.
    pub fn process(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        let (y, mut c) = split_chroma(rgb);
        if c[0] * c[0] + c[1] * c[1] + c[2] * c[2] < 1e-8 {
            return rgb;
        }

        let shadow_w = 1.0 - smoothstep(0.0, 0.3, y);
        let high_w = smoothstep(0.7, 1.0, y);
        let mid_w = (1.0 - shadow_w) * (1.0 - high_w);

        let (shadow_bias, warmth) = if p.cross_process {
            (p.highlight_warmth, p.shadow_cool_bias)
        } else {
            (p.shadow_cool_bias, p.highlight_warmth)
        };

        if shadow_w > 0.0 {
            let bias = shadow_bias * shadow_w;
            let sat = 1.0 - bias * 0.5;
            c = c.map(|v| v * sat);
            let s = bias * 0.05;
            if p.cross_process {
                c[0] += s;
                c[1] += s * 0.5;
                c[2] -= s;
            } else {
                c[0] -= s;
                c[1] += s * 0.2;
                c[2] += s * 1.5;
            }
        }

        if mid_w > 0.0 {
            let boost = 1.0 + p.midtone_color_focus * mid_w;
            c = c.map(|v| v * boost);
        }

        if high_w > 0.0 {
            let w = warmth * high_w * 0.05;
            if p.cross_process {
                c[0] -= w;
                c[1] += w * 0.2;
                c[2] += w * 1.5;
            } else {
                c[0] += w;
                c[1] += w * 0.5;
                c[2] -= w;
            }
            let comp = p.highlight_compression * high_w;
            c[0] *= 1.0 - comp;
            c[1] *= 1.0 - comp * 0.5;
            c[2] *= 1.0 - comp * 0.2;
        }

        mix3(rgb, [y + c[0], y + c[1], y + c[2]], p.amount)
    }
}

impl PixelOp for FilmResponse {
    fn name(&self) -> &'static str {
        "film_response"
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

    fn params() -> FilmResponseParams {
        FilmResponseParams {
            amount: 1.0,
            shadow_cool_bias: 0.6,
            highlight_warmth: 0.6,
            ..Default::default()
        }
    }

    #[test]
    fn test_gray_pixels_untouched() {
        let op = FilmResponse::new(params());
        assert_eq!(op.process([0.1, 0.1, 0.1]), [0.1, 0.1, 0.1]);
        assert_eq!(op.process([0.9, 0.9, 0.9]), [0.9, 0.9, 0.9]);
    }

    #[test]
    fn test_shadows_cool_highlights_warm() {
        let op = FilmResponse::new(params());
        let shadow = [0.05, 0.05, 0.06];
        let out = op.process(shadow);
        assert!(out[2] - out[0] > shadow[2] - shadow[0]);

        let high = [0.95, 0.95, 0.94];
        let out = op.process(high);
        assert!(out[0] - out[2] > high[0] - high[2]);
    }

    #[test]
    fn test_cross_process_flips_direction() {
        let normal = FilmResponse::new(params());
        let cross = FilmResponse::new(FilmResponseParams { cross_process: true, ..params() });

        let shadow = [0.05, 0.05, 0.06];
        let n = normal.process(shadow);
        let x = cross.process(shadow);
        // Normal pushes shadows toward blue, cross-process toward red.
        assert!(n[2] - n[0] > shadow[2] - shadow[0]);
        assert!(x[0] - x[2] > n[0] - n[2]);

        let high = [0.95, 0.95, 0.94];
        let n = normal.process(high);
        let x = cross.process(high);
        assert!(n[0] > x[0]);
        assert!(x[2] > n[2]);
    }

    #[test]
    fn test_preset_resolution() {
        let p = FilmResponseParams { preset: FilmPreset::CrossProcess, ..Default::default() };
        let r = p.resolved();
        assert!(r.cross_process);
        assert_eq!(r.midtone_color_focus, 0.9);
        assert_eq!(FilmPreset::None.zones(), None);
    }

    #[test]
    fn test_zero_amount_inactive() {
        let p = FilmResponseParams { amount: 0.0, ..params() };
        assert!(!p.is_active());
    }
}
