//! Names used for enumerated choices in look files.
//!
//! Lookup is case-insensitive and treats `-` and spaces like `_`, so
//! `Cross Process`, `cross-process` and `cross_process` are one preset.
//! The first entry for a value is its canonical spelling.

use cine_ops::fx::{SharpenKind, VignetteKind};
use cine_ops::grade::{FilmPreset, GrainStock};

use crate::{LookError, LookResult};

const FILM_PRESETS: &[(&str, FilmPreset)] = &[
    ("none", FilmPreset::None),
    ("vision3", FilmPreset::Vision3),
    ("vision3_500t", FilmPreset::Vision3),
    ("eterna", FilmPreset::Eterna),
    ("portra", FilmPreset::Portra),
    ("ektachrome", FilmPreset::Ektachrome),
    ("cross_process", FilmPreset::CrossProcess),
];

const GRAIN_STOCKS: &[(&str, GrainStock)] = &[
    ("custom", GrainStock::Custom),
    ("8mm", GrainStock::Mm8),
    ("16mm", GrainStock::Mm16),
    ("super16", GrainStock::Super16),
    ("super_16", GrainStock::Super16),
    ("35mm", GrainStock::Mm35),
    ("65mm", GrainStock::Mm65),
    ("clean", GrainStock::Clean),
];

const SHARPEN_KINDS: &[(&str, SharpenKind)] = &[
    ("soft_detail", SharpenKind::SoftDetail),
    ("micro_contrast", SharpenKind::MicroContrast),
    ("edge_aware", SharpenKind::EdgeAware),
    ("deconvolution", SharpenKind::Deconvolution),
];

const VIGNETTE_KINDS: &[(&str, VignetteKind)] = &[
    ("dark", VignetteKind::Dark),
    ("light", VignetteKind::Light),
    ("defocus", VignetteKind::Defocus),
];

fn normalise(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

fn lookup<T: Copy>(table: &[(&'static str, T)], kind: &'static str, name: &str) -> LookResult<T> {
    let key = normalise(name);
    table
        .iter()
        .find(|(n, _)| *n == key)
        .map(|&(_, v)| v)
        .ok_or_else(|| LookError::UnknownPreset { kind, name: name.to_string() })
}

fn canonical<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table.iter().find(|(_, v)| *v == value).map_or("", |&(n, _)| n)
}

/// Parses a film-stock preset name.
pub fn film_preset(name: &str) -> LookResult<FilmPreset> {
    lookup(FILM_PRESETS, "film preset", name)
}

/// Canonical name of a film-stock preset.
pub fn film_preset_name(preset: FilmPreset) -> &'static str {
    canonical(FILM_PRESETS, preset)
}

/// Parses a grain stock name.
pub fn grain_stock(name: &str) -> LookResult<GrainStock> {
    lookup(GRAIN_STOCKS, "grain stock", name)
}

/// Canonical name of a grain stock.
pub fn grain_stock_name(stock: GrainStock) -> &'static str {
    canonical(GRAIN_STOCKS, stock)
}

/// Parses a sharpen algorithm name.
pub fn sharpen_kind(name: &str) -> LookResult<SharpenKind> {
    lookup(SHARPEN_KINDS, "sharpen kind", name)
}

/// Canonical name of a sharpen algorithm.
pub fn sharpen_kind_name(kind: SharpenKind) -> &'static str {
    canonical(SHARPEN_KINDS, kind)
}

/// Parses a vignette mode name.
pub fn vignette_kind(name: &str) -> LookResult<VignetteKind> {
    lookup(VIGNETTE_KINDS, "vignette kind", name)
}

/// Canonical name of a vignette mode.
pub fn vignette_kind_name(kind: VignetteKind) -> &'static str {
    canonical(VIGNETTE_KINDS, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_normalise() {
        assert_eq!(film_preset("Cross Process").unwrap(), FilmPreset::CrossProcess);
        assert_eq!(film_preset("cross-process").unwrap(), FilmPreset::CrossProcess);
        assert_eq!(film_preset("VISION3_500T").unwrap(), FilmPreset::Vision3);
        assert_eq!(grain_stock("Super 16").unwrap(), GrainStock::Super16);
        assert_eq!(sharpen_kind("edge-aware").unwrap(), SharpenKind::EdgeAware);
    }

    #[test]
    fn test_unknown_name_reports_kind() {
        let err = vignette_kind("sepia").unwrap_err();
        assert!(matches!(err, LookError::UnknownPreset { kind: "vignette kind", .. }));
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for stock in GrainStock::ALL {
            assert_eq!(grain_stock(grain_stock_name(stock)).unwrap(), stock);
        }
        assert_eq!(film_preset_name(FilmPreset::Vision3), "vision3");
        assert_eq!(vignette_kind_name(VignetteKind::Defocus), "defocus");
    }
}
