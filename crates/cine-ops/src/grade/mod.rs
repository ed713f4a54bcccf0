//! Stage 0: per-pixel grading operators.
//!
//! Each operator is a closed-form `rgb -> rgb` transform prepared once per
//! frame from its parameter block. [`pixel_chain`] returns them in pipeline
//! order:
//!
//! 1. [`ingest`] - exposure, white balance, saturation, chroma ceiling, white bias
//! 2. [`film_response`] - luminance-zoned hue/saturation bias
//! 3. [`tonal`] - pivoted tone curve
//! 4. [`energy`] - chroma separation, density, vibrance
//! 5. [`highlight`] - asymptotic highlight compression
//! 6. [`split_tone`] - luminance-preserving split toning
//! 7. [`grain`] - hashed film grain
//! 8. [`dither`] - TPDF dither

pub mod dither;
pub mod energy;
pub mod film_response;
pub mod grain;
pub mod highlight;
pub mod ingest;
pub mod split_tone;
pub mod tonal;

pub use dither::{Dither, DitherParams};
pub use energy::{ColorEnergy, EnergyParams};
pub use film_response::{FilmPreset, FilmResponse, FilmResponseParams};
pub use grain::{FilmGrain, GrainParams, GrainStock};
pub use highlight::{HighlightParams, HighlightProtection};
pub use ingest::{Ingest, IngestParams};
pub use split_tone::{SplitTone, SplitToneParams};
pub use tonal::{TonalParams, ToneCurve};

use crate::look::LookParams;
use crate::pipeline::FrameContext;

/// Host coordinates of the pixel being transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSite {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// A stateless per-pixel transform.
pub trait PixelOp: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// False when the operator would leave every pixel unchanged.
    fn is_active(&self) -> bool;

    /// Transforms one pixel. Only called when [`PixelOp::is_active`] holds.
    fn apply(&self, rgb: [f32; 3], site: PixelSite) -> [f32; 3];
}

/// Every Stage 0 operator in pipeline order, prepared for `frame`.
pub fn pixel_chain(look: &LookParams, frame: &FrameContext) -> Vec<Box<dyn PixelOp>> {
    vec![
        Box::new(Ingest::new(look.ingest)),
        Box::new(FilmResponse::new(look.film)),
        Box::new(ToneCurve::new(look.tonal)),
        Box::new(ColorEnergy::new(look.energy)),
        Box::new(HighlightProtection::new(look.highlight)),
        Box::new(SplitTone::new(look.split_tone)),
        Box::new(FilmGrain::new(look.grain, frame.frame_seed, frame.image_width(), frame.image_height())),
        Box::new(Dither::new(look.dither)),
    ]
}

/// Runs `ops` over one pixel in order.
#[inline]
pub fn apply_chain(ops: &[Box<dyn PixelOp>], rgb: [f32; 3], site: PixelSite) -> [f32; 3] {
    ops.iter().fold(rgb, |px, op| op.apply(px, site))
}
