//! Rec.709 luminance.
//!
//! Every operator masks and zones by the same weighted sum
//! `Y = 0.2126*R + 0.7152*G + 0.0722*B`, applied to scene-linear values.

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Rec.709 luminance of an RGB triple.
///
/// # Example
///
/// ```
/// use cine_core::luminance;
///
/// assert!((luminance([1.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}
