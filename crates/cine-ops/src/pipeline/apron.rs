//! Apron sizing and host region-of-interest margins.
//!
//! The apron is the border every scratch buffer carries around the output
//! window so blurs near the window edge read real neighbours instead of
//! clamped copies. It is recomputed on every invocation from the active
//! operators and the render scale:
//!
//! - mist's fixed reach folds in with `max` (it does not stack),
//! - every other active reach is added,
//! - the total is rounded up and padded by [`APRON_PAD`].
//!
//! ```
//! use cine_ops::look::LookParams;
//! use cine_ops::pipeline::apron;
//!
//! let mut look = LookParams::default();
//! look.mist.enable = true;
//! look.dreamy.enable = true;
//! look.dreamy.radius = 10.0;
//! look.halation.enable = true;
//! look.halation.radius = 60.0;
//!
//! assert_eq!(apron::total_reach_for(&look, 1.0), 66.0);
//! assert_eq!(apron::for_look(&look, 1.0), 68);
//! ```

use cine_core::Bounds;

use crate::fx::{Reach, SpatialOp, spatial_chain};
use crate::fx::mist::MIST_REACH;
use crate::fx::sharpen::SHARPEN_REACH;
use crate::fx::streak::STREAK_LENGTH_SCALE;
use crate::look::LookParams;

/// Safety pad added after rounding.
pub const APRON_PAD: i32 = 2;

/// Constant slack in the host region of interest.
pub const ROI_PAD: f64 = 10.0;

/// Combined reach of the active operators in `ops`, before rounding.
pub fn total_reach(ops: &[Box<dyn SpatialOp>], render_scale: f32) -> f32 {
    ops.iter().filter(|op| op.is_active()).fold(0.0, |total, op| match op.reach(render_scale) {
        Reach::None => total,
        Reach::Max(r) => total.max(r.max(0.0)),
        Reach::Add(r) => total + r.max(0.0),
    })
}

/// Apron in pixels for `ops` at `render_scale`.
pub fn compute(ops: &[Box<dyn SpatialOp>], render_scale: f32) -> i32 {
    total_reach(ops, render_scale).ceil() as i32 + APRON_PAD
}

/// [`total_reach`] for a whole look.
pub fn total_reach_for(look: &LookParams, render_scale: f32) -> f32 {
    total_reach(&spatial_chain(look), render_scale)
}

/// [`compute`] for a whole look.
pub fn for_look(look: &LookParams, render_scale: f32) -> i32 {
    compute(&spatial_chain(look), render_scale)
}

/// Source margin a host should fetch around a requested window.
///
/// Unscaled and deliberately generous: it also covers the streak and
/// aberration reads that the apron does not reserve.
pub fn roi_margin(look: &LookParams) -> f64 {
    let mut total = ROI_PAD;
    if look.mist.enable {
        total += MIST_REACH as f64;
    }
    if look.dreamy.enable {
        total += look.dreamy.radius as f64;
    }
    if look.glow.enable {
        total += look.glow.radius as f64;
    }
    if look.halation.enable {
        total += look.halation.radius as f64;
    }
    if look.sharpen.enable {
        total += SHARPEN_REACH as f64;
    }
    if look.streak.enable {
        total += (look.streak.length * STREAK_LENGTH_SCALE) as f64;
    }
    if look.aberration.enable {
        total += look.aberration.amount as f64 * 20.0;
    }
    total
}

/// `window` grown by [`roi_margin`], rounded outward.
pub fn region_of_interest(look: &LookParams, window: Bounds) -> Bounds {
    window.expand(roi_margin(look).ceil() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_look_is_pad_only() {
        let mut look = LookParams::default();
        look.glow.radius = 40.0;
        assert_eq!(for_look(&look, 1.0), APRON_PAD);
    }

    #[test]
    fn test_mist_does_not_stack() {
        let mut look = LookParams::default();
        look.mist.enable = true;
        assert_eq!(total_reach_for(&look, 1.0), 6.0);
        look.glow.enable = true;
        look.glow.radius = 3.0;
        assert_eq!(total_reach_for(&look, 1.0), 9.0);
    }

    #[test]
    fn test_render_scale_shrinks_apron() {
        let mut look = LookParams::default();
        look.glow.enable = true;
        look.glow.radius = 20.0;
        look.sharpen.enable = true;
        assert_eq!(for_look(&look, 1.0), 24);
        // Sharpen's reach does not scale.
        assert_eq!(for_look(&look, 0.5), 14);
    }

    #[test]
    fn test_streak_and_aberration_not_reserved() {
        let mut look = LookParams::default();
        look.streak.enable = true;
        look.streak.amount = 1.0;
        look.aberration.enable = true;
        look.aberration.amount = 2.0;
        assert_eq!(for_look(&look, 1.0), APRON_PAD);
        assert_eq!(roi_margin(&look), 10.0 + 40.0 + 40.0);
    }

    #[test]
    fn test_region_of_interest() {
        let mut look = LookParams::default();
        look.mist.enable = true;
        let roi = region_of_interest(&look, Bounds::new(0, 0, 10, 10));
        assert_eq!(roi, Bounds::new(-16, -16, 26, 26));
    }
}
