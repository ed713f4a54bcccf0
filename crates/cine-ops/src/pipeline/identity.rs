//! No-op detection for hosts.
//!
//! A host may skip processing and pass the source straight through when no
//! operator would change a pixel. The check mirrors each operator's own skip
//! condition, including the two modules without a switch: tonal reshaping is
//! identity only when `strength <= 0` and highlight protection only when its
//! threshold sits at the out-of-range sentinel.

use crate::fx::spatial_chain;
use crate::look::LookParams;

/// Names of the operators `look` would run, in pipeline order.
pub fn active_stages(look: &LookParams) -> Vec<&'static str> {
    let pixel = [
        ("ingest", look.ingest.is_active()),
        ("film", look.film.is_active()),
        ("tonal", look.tonal.is_active()),
        ("energy", look.energy.is_active()),
        ("highlight", look.highlight.is_active()),
        ("split_tone", look.split_tone.is_active()),
        ("grain", look.grain.is_active()),
        ("dither", look.dither.is_active()),
    ];
    let mut names: Vec<_> = pixel.into_iter().filter(|(_, on)| *on).map(|(name, _)| name).collect();
    names.extend(spatial_chain(look).iter().filter(|op| op.is_active()).map(|op| op.name()));
    names
}

/// True when processing `look` would leave every pixel unchanged.
pub fn is_identity(look: &LookParams) -> bool {
    active_stages(look).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::HighlightParams;

    fn neutral() -> LookParams {
        let mut look = LookParams::default();
        look.tonal.strength = 0.0;
        look.highlight = HighlightParams::bypass();
        look
    }

    #[test]
    fn test_default_look_is_not_identity() {
        let look = LookParams::default();
        assert_eq!(active_stages(&look), ["tonal", "highlight"]);
        assert!(!is_identity(&look));
    }

    #[test]
    fn test_neutral_look_is_identity() {
        assert!(is_identity(&neutral()));
    }

    #[test]
    fn test_ingest_identity_needs_neutral_controls() {
        let mut look = neutral();
        look.ingest.exposure_trim = 0.5;
        assert_eq!(active_stages(&look), ["ingest"]);
        look.ingest.enable = false;
        assert!(is_identity(&look));
    }

    #[test]
    fn test_enabled_zero_amount_modules() {
        let mut look = neutral();
        look.grain.enable = true;
        look.streak.enable = true;
        look.aberration.enable = true;
        assert!(is_identity(&look));
        look.glow.enable = true;
        assert_eq!(active_stages(&look), ["glow"]);
    }
}
