//! Look file model and its mapping onto [`LookParams`].
//!
//! A look file is YAML with one optional section per operator. Every key is
//! optional and falls back to the operator default, so a file only needs to
//! name what it changes:
//!
//! ```yaml
//! name: warm night
//! film:
//!   amount: 0.6
//!   preset: vision3
//! grain:
//!   enabled: true
//!   stock: 35mm
//! glow:
//!   enabled: true
//!   amount: 0.25
//!   radius: 16
//! ```
//!
//! Values are clamped into the operator's documented range on load; a
//! non-finite value is an error. `tonal.enabled: false` and
//! `highlight.enabled: false` switch off operators that have no switch of
//! their own by writing their neutral settings.

use std::path::{Path, PathBuf};

use cine_ops::fx::{
    AberrationParams, DreamyParams, GlowParams, HalationParams, MistParams, SharpenParams, StreakParams,
    VignetteParams,
};
use cine_ops::grade::{
    DitherParams, EnergyParams, FilmResponseParams, GrainParams, HighlightParams, IngestParams, SplitToneParams,
    TonalParams,
};
use cine_ops::pipeline::apron;
use cine_ops::LookParams;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::names;
use crate::{LookError, LookResult};

/// Clamps fields of one section, naming them `section.field` in diagnostics.
struct Section(&'static str);

impl Section {
    fn range(&self, field: &str, value: f32, lo: f32, hi: f32) -> LookResult<f32> {
        if !value.is_finite() {
            return Err(LookError::InvalidValue {
                field: format!("{}.{field}", self.0),
                reason: format!("{value} is not a finite number"),
            });
        }
        let clamped = value.clamp(lo, hi);
        if clamped != value {
            warn!(section = self.0, field, value, clamped, "value out of range, clamped");
        }
        Ok(clamped)
    }

    fn unit(&self, field: &str, value: f32) -> LookResult<f32> {
        self.range(field, value, 0.0, 1.0)
    }

    fn signed(&self, field: &str, value: f32) -> LookResult<f32> {
        self.range(field, value, -1.0, 1.0)
    }
}

/// A parsed look file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookFile {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    ingest: IngestSection,
    film: FilmSection,
    tonal: TonalSection,
    energy: EnergySection,
    highlight: HighlightSection,
    split_tone: SplitToneSection,
    grain: GrainSection,
    dither: DitherSection,
    mist: MistSection,
    dreamy: DreamySection,
    glow: GlowSection,
    streak: StreakSection,
    sharpen: SharpenSection,
    halation: HalationSection,
    aberration: AberrationSection,
    vignette: VignetteSection,
}

impl LookFile {
    /// Loads a look file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> LookResult<Self> {
        let path = path.as_ref();
        trace!(path = %path.display(), "LookFile::from_file");
        if !path.exists() {
            return Err(LookError::NotFound { path: PathBuf::from(path) });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses a look file from a YAML string. An empty document is the default look.
    pub fn from_yaml_str(yaml: &str) -> LookResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: LookFile = serde_yaml::from_str(yaml)?;
        debug!(name = file.name.as_deref().unwrap_or(""), "parsed look file");
        Ok(file)
    }

    /// Captures `look` as a file, enable folding included.
    pub fn from_params(look: &LookParams) -> Self {
        Self {
            name: None,
            description: None,
            ingest: IngestSection::from(&look.ingest),
            film: FilmSection::from(&look.film),
            tonal: TonalSection::from(&look.tonal),
            energy: EnergySection::from(&look.energy),
            highlight: HighlightSection::from(&look.highlight),
            split_tone: SplitToneSection::from(&look.split_tone),
            grain: GrainSection::from(&look.grain),
            dither: DitherSection::from(&look.dither),
            mist: MistSection::from(&look.mist),
            dreamy: DreamySection::from(&look.dreamy),
            glow: GlowSection::from(&look.glow),
            streak: StreakSection::from(&look.streak),
            sharpen: SharpenSection::from(&look.sharpen),
            halation: HalationSection::from(&look.halation),
            aberration: AberrationSection::from(&look.aberration),
            vignette: VignetteSection::from(&look.vignette),
        }
    }

    /// Resolves names, clamps ranges and folds switches into operator parameters.
    pub fn to_params(&self) -> LookResult<LookParams> {
        Ok(LookParams {
            ingest: self.ingest.to_params()?,
            film: self.film.to_params()?,
            tonal: self.tonal.to_params()?,
            energy: self.energy.to_params()?,
            highlight: self.highlight.to_params()?,
            split_tone: self.split_tone.to_params()?,
            grain: self.grain.to_params()?,
            dither: self.dither.to_params()?,
            mist: self.mist.to_params()?,
            dreamy: self.dreamy.to_params()?,
            glow: self.glow.to_params()?,
            streak: self.streak.to_params()?,
            sharpen: self.sharpen.to_params()?,
            halation: self.halation.to_params()?,
            aberration: self.aberration.to_params()?,
            vignette: self.vignette.to_params()?,
        })
    }

    /// Serialises the file back to YAML.
    pub fn to_yaml(&self) -> LookResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// YAML for the default look, every key spelled out.
    pub fn template() -> LookResult<String> {
        let mut file = Self::from_params(&LookParams::default());
        file.name = Some("default".into());
        file.to_yaml()
    }

    /// Source margin a host should fetch around each window for this look.
    pub fn roi_margin(&self) -> LookResult<f64> {
        Ok(apron::roi_margin(&self.to_params()?))
    }
}

// ============================================================================
// Per-pixel sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct IngestSection {
    enabled: bool,
    exposure_trim: f32,
    chroma_ceiling: f32,
    white_bias: f32,
    temperature: f32,
    tint: f32,
    global_saturation: f32,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self::from(&IngestParams::default())
    }
}

impl From<&IngestParams> for IngestSection {
    fn from(p: &IngestParams) -> Self {
        Self {
            enabled: p.enable,
            exposure_trim: p.exposure_trim,
            chroma_ceiling: p.chroma_ceiling,
            white_bias: p.white_bias,
            temperature: p.temperature,
            tint: p.tint,
            global_saturation: p.global_saturation,
        }
    }
}

impl IngestSection {
    fn to_params(&self) -> LookResult<IngestParams> {
        let s = Section("ingest");
        Ok(IngestParams {
            enable: self.enabled,
            exposure_trim: s.range("exposure_trim", self.exposure_trim, -2.0, 2.0)?,
            chroma_ceiling: s.unit("chroma_ceiling", self.chroma_ceiling)?,
            white_bias: s.signed("white_bias", self.white_bias)?,
            temperature: s.signed("temperature", self.temperature)?,
            tint: s.signed("tint", self.tint)?,
            global_saturation: s.range("global_saturation", self.global_saturation, 0.0, 2.0)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilmSection {
    enabled: bool,
    amount: f32,
    preset: String,
    shadow_cool_bias: f32,
    midtone_color_focus: f32,
    highlight_warmth: f32,
    highlight_compression: f32,
    cross_process: bool,
}

impl Default for FilmSection {
    fn default() -> Self {
        Self::from(&FilmResponseParams::default())
    }
}

impl From<&FilmResponseParams> for FilmSection {
    fn from(p: &FilmResponseParams) -> Self {
        Self {
            enabled: p.enable,
            amount: p.amount,
            preset: names::film_preset_name(p.preset).into(),
            shadow_cool_bias: p.shadow_cool_bias,
            midtone_color_focus: p.midtone_color_focus,
            highlight_warmth: p.highlight_warmth,
            highlight_compression: p.highlight_compression,
            cross_process: p.cross_process,
        }
    }
}

impl FilmSection {
    fn to_params(&self) -> LookResult<FilmResponseParams> {
        let s = Section("film");
        Ok(FilmResponseParams {
            enable: self.enabled,
            amount: s.unit("amount", self.amount)?,
            shadow_cool_bias: s.unit("shadow_cool_bias", self.shadow_cool_bias)?,
            midtone_color_focus: s.unit("midtone_color_focus", self.midtone_color_focus)?,
            highlight_warmth: s.unit("highlight_warmth", self.highlight_warmth)?,
            highlight_compression: s.unit("highlight_compression", self.highlight_compression)?,
            preset: names::film_preset(&self.preset)?,
            cross_process: self.cross_process,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TonalSection {
    enabled: bool,
    contrast: f32,
    pivot: f32,
    strength: f32,
    black_floor: f32,
    highlight_contrast: f32,
    soft_clip: f32,
}

impl Default for TonalSection {
    fn default() -> Self {
        Self::from(&TonalParams::default())
    }
}

impl From<&TonalParams> for TonalSection {
    fn from(p: &TonalParams) -> Self {
        Self {
            enabled: p.strength > 0.0,
            contrast: p.contrast,
            pivot: p.pivot,
            strength: p.strength,
            black_floor: p.black_floor,
            highlight_contrast: p.highlight_contrast,
            soft_clip: p.soft_clip,
        }
    }
}

impl TonalSection {
    fn to_params(&self) -> LookResult<TonalParams> {
        let s = Section("tonal");
        let strength = s.unit("strength", self.strength)?;
        Ok(TonalParams {
            contrast: s.range("contrast", self.contrast, 0.0, 2.0)?,
            pivot: s.unit("pivot", self.pivot)?,
            strength: if self.enabled { strength } else { 0.0 },
            black_floor: s.range("black_floor", self.black_floor, 0.0, 0.1)?,
            highlight_contrast: s.range("highlight_contrast", self.highlight_contrast, 0.0, 2.0)?,
            soft_clip: s.unit("soft_clip", self.soft_clip)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EnergySection {
    enabled: bool,
    density: f32,
    separation: f32,
    highlight_roll_off: f32,
    shadow_bias: f32,
    vibrance: f32,
}

impl Default for EnergySection {
    fn default() -> Self {
        Self::from(&EnergyParams::default())
    }
}

impl From<&EnergyParams> for EnergySection {
    fn from(p: &EnergyParams) -> Self {
        Self {
            enabled: p.enable,
            density: p.density,
            separation: p.separation,
            highlight_roll_off: p.highlight_roll_off,
            shadow_bias: p.shadow_bias,
            vibrance: p.vibrance,
        }
    }
}

impl EnergySection {
    fn to_params(&self) -> LookResult<EnergyParams> {
        let s = Section("energy");
        Ok(EnergyParams {
            enable: self.enabled,
            density: s.range("density", self.density, 0.0, 2.0)?,
            separation: s.unit("separation", self.separation)?,
            highlight_roll_off: s.unit("highlight_roll_off", self.highlight_roll_off)?,
            shadow_bias: s.unit("shadow_bias", self.shadow_bias)?,
            vibrance: s.range("vibrance", self.vibrance, 0.0, 2.0)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HighlightSection {
    enabled: bool,
    threshold: f32,
    rolloff: f32,
    preserve_color: bool,
}

impl Default for HighlightSection {
    fn default() -> Self {
        Self::from(&HighlightParams::default())
    }
}

impl From<&HighlightParams> for HighlightSection {
    fn from(p: &HighlightParams) -> Self {
        let enabled = p.is_active();
        Self {
            enabled,
            threshold: if enabled { p.threshold } else { HighlightParams::default().threshold },
            rolloff: p.rolloff,
            preserve_color: p.preserve_color,
        }
    }
}

impl HighlightSection {
    fn to_params(&self) -> LookResult<HighlightParams> {
        let s = Section("highlight");
        let rolloff = s.unit("rolloff", self.rolloff)?;
        if !self.enabled {
            return Ok(HighlightParams { rolloff, preserve_color: self.preserve_color, ..HighlightParams::bypass() });
        }
        Ok(HighlightParams {
            threshold: s.range("threshold", self.threshold, 0.0, 2.0)?,
            rolloff,
            preserve_color: self.preserve_color,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SplitToneSection {
    enabled: bool,
    strength: f32,
    shadow_hue: f32,
    highlight_hue: f32,
    balance: f32,
    midtone_hue: f32,
    midtone_saturation: f32,
}

impl Default for SplitToneSection {
    fn default() -> Self {
        Self::from(&SplitToneParams::default())
    }
}

impl From<&SplitToneParams> for SplitToneSection {
    fn from(p: &SplitToneParams) -> Self {
        Self {
            enabled: p.enable,
            strength: p.strength,
            shadow_hue: p.shadow_hue,
            highlight_hue: p.highlight_hue,
            balance: p.balance,
            midtone_hue: p.midtone_hue,
            midtone_saturation: p.midtone_saturation,
        }
    }
}

impl SplitToneSection {
    fn to_params(&self) -> LookResult<SplitToneParams> {
        let s = Section("split_tone");
        Ok(SplitToneParams {
            enable: self.enabled,
            strength: s.unit("strength", self.strength)?,
            shadow_hue: s.range("shadow_hue", self.shadow_hue, 0.0, 360.0)?,
            highlight_hue: s.range("highlight_hue", self.highlight_hue, 0.0, 360.0)?,
            balance: s.signed("balance", self.balance)?,
            midtone_hue: s.range("midtone_hue", self.midtone_hue, 0.0, 360.0)?,
            midtone_saturation: s.unit("midtone_saturation", self.midtone_saturation)?,
        })
    }
}

/// Grain controls that a stock may initialise stay optional so an explicit
/// value in the file wins over the stock table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GrainSection {
    enabled: bool,
    stock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shadow_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mid_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight_weight: Option<f32>,
    chromatic: bool,
    temporal_speed: f32,
}

impl Default for GrainSection {
    fn default() -> Self {
        let p = GrainParams::default();
        Self {
            enabled: p.enable,
            stock: names::grain_stock_name(Default::default()).into(),
            amount: None,
            size: None,
            shadow_weight: None,
            mid_weight: None,
            highlight_weight: None,
            chromatic: p.chromatic,
            temporal_speed: p.temporal_speed,
        }
    }
}

impl From<&GrainParams> for GrainSection {
    fn from(p: &GrainParams) -> Self {
        Self {
            amount: Some(p.amount),
            size: Some(p.size),
            shadow_weight: Some(p.shadow_weight),
            mid_weight: Some(p.mid_weight),
            highlight_weight: Some(p.highlight_weight),
            enabled: p.enable,
            chromatic: p.chromatic,
            temporal_speed: p.temporal_speed,
            ..Self::default()
        }
    }
}

impl GrainSection {
    fn to_params(&self) -> LookResult<GrainParams> {
        let s = Section("grain");
        let stock = names::grain_stock(&self.stock)?;
        let base = GrainParams::default().with_stock(stock);
        let pick = |field: &str, explicit: Option<f32>, fallback: f32| s.unit(field, explicit.unwrap_or(fallback));
        Ok(GrainParams {
            enable: self.enabled,
            amount: pick("amount", self.amount, base.amount)?,
            size: pick("size", self.size, base.size)?,
            shadow_weight: pick("shadow_weight", self.shadow_weight, base.shadow_weight)?,
            mid_weight: pick("mid_weight", self.mid_weight, base.mid_weight)?,
            highlight_weight: pick("highlight_weight", self.highlight_weight, base.highlight_weight)?,
            chromatic: self.chromatic,
            temporal_speed: s.unit("temporal_speed", self.temporal_speed)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DitherSection {
    enabled: bool,
    amount: f32,
}

impl Default for DitherSection {
    fn default() -> Self {
        Self::from(&DitherParams::default())
    }
}

impl From<&DitherParams> for DitherSection {
    fn from(p: &DitherParams) -> Self {
        Self { enabled: p.enable, amount: p.amount }
    }
}

impl DitherSection {
    fn to_params(&self) -> LookResult<DitherParams> {
        Ok(DitherParams { enable: self.enabled, amount: Section("dither").unit("amount", self.amount)? })
    }
}

// ============================================================================
// Spatial sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MistSection {
    enabled: bool,
    strength: f32,
    threshold: f32,
    softness: f32,
    depth_bias: f32,
    warmth: f32,
}

impl Default for MistSection {
    fn default() -> Self {
        Self::from(&MistParams::default())
    }
}

impl From<&MistParams> for MistSection {
    fn from(p: &MistParams) -> Self {
        Self {
            enabled: p.enable,
            strength: p.strength,
            threshold: p.threshold,
            softness: p.softness,
            depth_bias: p.depth_bias,
            warmth: p.warmth,
        }
    }
}

impl MistSection {
    fn to_params(&self) -> LookResult<MistParams> {
        let s = Section("mist");
        Ok(MistParams {
            enable: self.enabled,
            strength: s.unit("strength", self.strength)?,
            threshold: s.range("threshold", self.threshold, 0.0, 2.0)?,
            softness: s.unit("softness", self.softness)?,
            depth_bias: s.signed("depth_bias", self.depth_bias)?,
            warmth: s.signed("warmth", self.warmth)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DreamySection {
    enabled: bool,
    radius: f32,
    strength: f32,
    shadow_amount: f32,
    highlight_amount: f32,
    tonal_softness: f32,
    saturation: f32,
}

impl Default for DreamySection {
    fn default() -> Self {
        Self::from(&DreamyParams::default())
    }
}

impl From<&DreamyParams> for DreamySection {
    fn from(p: &DreamyParams) -> Self {
        Self {
            enabled: p.enable,
            radius: p.radius,
            strength: p.strength,
            shadow_amount: p.shadow_amount,
            highlight_amount: p.highlight_amount,
            tonal_softness: p.tonal_softness,
            saturation: p.saturation,
        }
    }
}

impl DreamySection {
    fn to_params(&self) -> LookResult<DreamyParams> {
        let s = Section("dreamy");
        Ok(DreamyParams {
            enable: self.enabled,
            radius: s.range("radius", self.radius, 0.0, 50.0)?,
            strength: s.unit("strength", self.strength)?,
            shadow_amount: s.unit("shadow_amount", self.shadow_amount)?,
            highlight_amount: s.unit("highlight_amount", self.highlight_amount)?,
            tonal_softness: s.unit("tonal_softness", self.tonal_softness)?,
            saturation: s.range("saturation", self.saturation, 0.0, 2.0)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GlowSection {
    enabled: bool,
    amount: f32,
    threshold: f32,
    knee: f32,
    radius: f32,
    color_fidelity: f32,
    warmth: f32,
}

impl Default for GlowSection {
    fn default() -> Self {
        Self::from(&GlowParams::default())
    }
}

impl From<&GlowParams> for GlowSection {
    fn from(p: &GlowParams) -> Self {
        Self {
            enabled: p.enable,
            amount: p.amount,
            threshold: p.threshold,
            knee: p.knee,
            radius: p.radius,
            color_fidelity: p.color_fidelity,
            warmth: p.warmth,
        }
    }
}

impl GlowSection {
    fn to_params(&self) -> LookResult<GlowParams> {
        let s = Section("glow");
        Ok(GlowParams {
            enable: self.enabled,
            amount: s.unit("amount", self.amount)?,
            threshold: s.range("threshold", self.threshold, 0.0, 2.0)?,
            knee: s.unit("knee", self.knee)?,
            radius: s.range("radius", self.radius, 0.0, 100.0)?,
            color_fidelity: s.unit("color_fidelity", self.color_fidelity)?,
            warmth: s.signed("warmth", self.warmth)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StreakSection {
    enabled: bool,
    amount: f32,
    threshold: f32,
    length: f32,
    tint: f32,
}

impl Default for StreakSection {
    fn default() -> Self {
        Self::from(&StreakParams::default())
    }
}

impl From<&StreakParams> for StreakSection {
    fn from(p: &StreakParams) -> Self {
        Self { enabled: p.enable, amount: p.amount, threshold: p.threshold, length: p.length, tint: p.tint }
    }
}

impl StreakSection {
    fn to_params(&self) -> LookResult<StreakParams> {
        let s = Section("streak");
        Ok(StreakParams {
            enable: self.enabled,
            amount: s.unit("amount", self.amount)?,
            threshold: s.range("threshold", self.threshold, 0.0, 2.0)?,
            length: s.unit("length", self.length)?,
            tint: s.signed("tint", self.tint)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SharpenSection {
    enabled: bool,
    kind: String,
    amount: f32,
    detail: f32,
    edge_protection: f32,
    noise_suppression: f32,
    shadow_protection: f32,
    highlight_protection: f32,
}

impl Default for SharpenSection {
    fn default() -> Self {
        Self::from(&SharpenParams::default())
    }
}

impl From<&SharpenParams> for SharpenSection {
    fn from(p: &SharpenParams) -> Self {
        Self {
            enabled: p.enable,
            kind: names::sharpen_kind_name(p.kind).into(),
            amount: p.amount,
            detail: p.detail,
            edge_protection: p.edge_protection,
            noise_suppression: p.noise_suppression,
            shadow_protection: p.shadow_protection,
            highlight_protection: p.highlight_protection,
        }
    }
}

impl SharpenSection {
    fn to_params(&self) -> LookResult<SharpenParams> {
        let s = Section("sharpen");
        Ok(SharpenParams {
            enable: self.enabled,
            kind: names::sharpen_kind(&self.kind)?,
            amount: s.unit("amount", self.amount)?,
            detail: s.unit("detail", self.detail)?,
            edge_protection: s.unit("edge_protection", self.edge_protection)?,
            noise_suppression: s.unit("noise_suppression", self.noise_suppression)?,
            shadow_protection: s.unit("shadow_protection", self.shadow_protection)?,
            highlight_protection: s.unit("highlight_protection", self.highlight_protection)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HalationSection {
    enabled: bool,
    amount: f32,
    threshold: f32,
    knee: f32,
    warmth: f32,
    radius: f32,
    saturation: f32,
    hue_shift: f32,
}

impl Default for HalationSection {
    fn default() -> Self {
        Self::from(&HalationParams::default())
    }
}

impl From<&HalationParams> for HalationSection {
    fn from(p: &HalationParams) -> Self {
        Self {
            enabled: p.enable,
            amount: p.amount,
            threshold: p.threshold,
            knee: p.knee,
            warmth: p.warmth,
            radius: p.radius,
            saturation: p.saturation,
            hue_shift: p.hue_shift,
        }
    }
}

impl HalationSection {
    fn to_params(&self) -> LookResult<HalationParams> {
        let s = Section("halation");
        Ok(HalationParams {
            enable: self.enabled,
            amount: s.unit("amount", self.amount)?,
            threshold: s.range("threshold", self.threshold, 0.0, 2.0)?,
            knee: s.unit("knee", self.knee)?,
            warmth: s.unit("warmth", self.warmth)?,
            radius: s.range("radius", self.radius, 0.0, 100.0)?,
            saturation: s.range("saturation", self.saturation, 0.0, 2.0)?,
            hue_shift: s.range("hue_shift", self.hue_shift, -180.0, 180.0)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AberrationSection {
    enabled: bool,
    amount: f32,
    center: [f32; 2],
}

impl Default for AberrationSection {
    fn default() -> Self {
        Self::from(&AberrationParams::default())
    }
}

impl From<&AberrationParams> for AberrationSection {
    fn from(p: &AberrationParams) -> Self {
        Self { enabled: p.enable, amount: p.amount, center: p.center }
    }
}

impl AberrationSection {
    fn to_params(&self) -> LookResult<AberrationParams> {
        let s = Section("aberration");
        Ok(AberrationParams {
            enable: self.enabled,
            amount: s.unit("amount", self.amount)?,
            center: [s.signed("center", self.center[0])?, s.signed("center", self.center[1])?],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct VignetteSection {
    enabled: bool,
    kind: String,
    amount: f32,
    invert: bool,
    size: f32,
    roundness: f32,
    softness: f32,
    defocus_amount: f32,
    defocus_softness: f32,
    center: [f32; 2],
    tint: [f32; 3],
}

impl Default for VignetteSection {
    fn default() -> Self {
        Self::from(&VignetteParams::default())
    }
}

impl From<&VignetteParams> for VignetteSection {
    fn from(p: &VignetteParams) -> Self {
        Self {
            enabled: p.enable,
            kind: names::vignette_kind_name(p.kind).into(),
            amount: p.amount,
            invert: p.invert,
            size: p.size,
            roundness: p.roundness,
            softness: p.softness,
            defocus_amount: p.defocus_amount,
            defocus_softness: p.defocus_softness,
            center: p.center,
            tint: p.tint,
        }
    }
}

impl VignetteSection {
    fn to_params(&self) -> LookResult<VignetteParams> {
        let s = Section("vignette");
        let [tr, tg, tb] = self.tint;
        Ok(VignetteParams {
            enable: self.enabled,
            kind: names::vignette_kind(&self.kind)?,
            amount: s.unit("amount", self.amount)?,
            invert: self.invert,
            size: s.unit("size", self.size)?,
            roundness: s.unit("roundness", self.roundness)?,
            softness: s.unit("softness", self.softness)?,
            defocus_amount: s.unit("defocus_amount", self.defocus_amount)?,
            defocus_softness: s.unit("defocus_softness", self.defocus_softness)?,
            center: [s.signed("center", self.center[0])?, s.signed("center", self.center[1])?],
            tint: [s.unit("tint", tr)?, s.unit("tint", tg)?, s.unit("tint", tb)?],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cine_ops::grade::{FilmPreset, GrainStock};
    use cine_ops::grade::highlight::BYPASS_THRESHOLD;

    #[test]
    fn test_empty_document_is_default_look() {
        let look = LookFile::from_yaml_str("").unwrap().to_params().unwrap();
        assert_eq!(look, LookParams::default());
        let look = LookFile::from_yaml_str("name: plain\n").unwrap().to_params().unwrap();
        assert_eq!(look, LookParams::default());
    }

    #[test]
    fn test_section_defaults_fill_missing_keys() {
        let yaml = "glow:\n  enabled: true\n  amount: 0.3\n";
        let look = LookFile::from_yaml_str(yaml).unwrap().to_params().unwrap();
        assert!(look.glow.enable);
        assert_abs_diff_eq!(look.glow.amount, 0.3);
        assert_eq!(look.glow.radius, GlowParams::default().radius);
        assert_eq!(look.mist, MistParams::default());
    }

    #[test]
    fn test_disabled_tonal_and_highlight_fold() {
        let yaml = "tonal:\n  enabled: false\n  strength: 0.8\nhighlight:\n  enabled: false\n  threshold: 0.5\n";
        let look = LookFile::from_yaml_str(yaml).unwrap().to_params().unwrap();
        assert_eq!(look.tonal.strength, 0.0);
        assert_eq!(look.highlight.threshold, BYPASS_THRESHOLD);
        assert!(!look.highlight.is_active());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let yaml = "ingest:\n  exposure_trim: 5.0\ndreamy:\n  radius: 80\nhalation:\n  hue_shift: -400\n";
        let look = LookFile::from_yaml_str(yaml).unwrap().to_params().unwrap();
        assert_eq!(look.ingest.exposure_trim, 2.0);
        assert_eq!(look.dreamy.radius, 50.0);
        assert_eq!(look.halation.hue_shift, -180.0);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let err = LookFile::from_yaml_str("glow:\n  amount: .nan\n").unwrap().to_params().unwrap_err();
        match err {
            LookError::InvalidValue { field, .. } => assert_eq!(field, "glow.amount"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(LookFile::from_yaml_str("glow:\n  radus: 4\n"), Err(LookError::Yaml(_))));
    }

    #[test]
    fn test_grain_stock_with_override() {
        let yaml = "grain:\n  enabled: true\n  stock: 16mm\n  size: 0.9\n";
        let look = LookFile::from_yaml_str(yaml).unwrap().to_params().unwrap();
        let stock = GrainParams::default().with_stock(GrainStock::Mm16);
        assert_eq!(look.grain.amount, stock.amount);
        assert_eq!(look.grain.shadow_weight, stock.shadow_weight);
        assert_abs_diff_eq!(look.grain.size, 0.9);
    }

    #[test]
    fn test_film_preset_name() {
        let look = LookFile::from_yaml_str("film:\n  amount: 0.5\n  preset: Eterna\n").unwrap().to_params().unwrap();
        assert_eq!(look.film.preset, FilmPreset::Eterna);
        assert!(LookFile::from_yaml_str("film:\n  preset: kodachrome\n").unwrap().to_params().is_err());
    }

    #[test]
    fn test_params_survive_yaml() {
        let mut look = LookParams::default();
        look.tonal.strength = 0.0;
        look.highlight = HighlightParams::bypass();
        look.grain.enable = true;
        look.grain.amount = 0.35;
        look.vignette.enable = true;
        look.vignette.kind = cine_ops::fx::VignetteKind::Defocus;
        look.vignette.center = [0.25, -0.5];

        let yaml = LookFile::from_params(&look).to_yaml().unwrap();
        let back = LookFile::from_yaml_str(&yaml).unwrap().to_params().unwrap();
        assert_eq!(back, look);
    }
}
