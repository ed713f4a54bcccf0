//! Scalar helpers shared by every operator.

pub use cine_core::luminance;

/// Cubic Hermite ramp between `edge0` and `edge1`.
///
/// A collapsed or inverted range degrades to a hard step at `edge1`.
///
/// ```
/// use cine_ops::math::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smoothstep(0.4, 0.4, 0.39), 0.0);
/// assert_eq!(smoothstep(0.4, 0.4, 0.4), 1.0);
/// ```
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend `x*(1-a) + y*a`.
#[inline]
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Per-channel [`mix`].
#[inline]
pub fn mix3(x: [f32; 3], y: [f32; 3], a: f32) -> [f32; 3] {
    [mix(x[0], y[0], a), mix(x[1], y[1], a), mix(x[2], y[2], a)]
}

/// Multiplies every channel by `s`.
#[inline]
pub fn scale3(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Adds `b * s` to `a`.
#[inline]
pub fn add_scaled3(a: [f32; 3], b: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] + b[0] * s, a[1] + b[1] * s, a[2] + b[2] * s]
}

/// Splits a pixel into luminance and chroma vector.
#[inline]
pub fn split_chroma(rgb: [f32; 3]) -> (f32, [f32; 3]) {
    let l = luminance(rgb);
    (l, [rgb[0] - l, rgb[1] - l, rgb[2] - l])
}

/// Euclidean length of a chroma vector.
#[inline]
pub fn magnitude(c: [f32; 3]) -> f32 {
    (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt()
}

/// Rescales `rgb` so its luminance becomes `target`, guarding tiny inputs.
#[inline]
pub fn with_luminance(rgb: [f32; 3], current: f32, target: f32, eps: f32) -> [f32; 3] {
    scale3(rgb, target / current.max(eps))
}
