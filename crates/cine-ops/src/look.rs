//! The full parameter set for one frame.

use crate::fx::{
    AberrationParams, DreamyParams, GlowParams, HalationParams, MistParams, SharpenParams, StreakParams,
    VignetteParams,
};
use crate::grade::{
    DitherParams, EnergyParams, FilmResponseParams, GrainParams, HighlightParams, IngestParams, SplitToneParams,
    TonalParams,
};

/// One parameter block per operator, sampled once per invocation.
///
/// Every module with a switch defaults to off or neutral. Tonal reshaping
/// and highlight protection have no switch and are live at their defaults,
/// so the default look is not an identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookParams {
    /// Exposure, white balance, saturation, chroma ceiling, white bias.
    pub ingest: IngestParams,
    /// Film-response hue bias.
    pub film: FilmResponseParams,
    /// Tone curve.
    pub tonal: TonalParams,
    /// Colour energy engine.
    pub energy: EnergyParams,
    /// Highlight compression.
    pub highlight: HighlightParams,
    /// Split toning.
    pub split_tone: SplitToneParams,
    /// Film grain.
    pub grain: GrainParams,
    /// Output dither.
    pub dither: DitherParams,
    /// Atmospheric mist.
    pub mist: MistParams,
    /// Dreamy soft-light blur.
    pub dreamy: DreamyParams,
    /// Highlight glow.
    pub glow: GlowParams,
    /// Anamorphic streak.
    pub streak: StreakParams,
    /// Sharpening.
    pub sharpen: SharpenParams,
    /// Red-layer halation.
    pub halation: HalationParams,
    /// Chromatic aberration.
    pub aberration: AberrationParams,
    /// Vignette.
    pub vignette: VignetteParams,
}
