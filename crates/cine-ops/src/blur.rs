//! Separable box blurs and the three-pass Gaussian approximation.
//!
//! All passes run in O(width * height) regardless of radius using a sliding
//! window sum. Borders replicate the edge pixel (clamp-to-edge), never
//! zero-pad. Alpha is carried through untouched; only RGB is averaged.
//!
//! Every pass reads one [`FrameBuffer`] and writes a different one. Taking
//! `&FrameBuffer` and `&mut FrameBuffer` makes the non-aliasing requirement a
//! compile-time guarantee; callers that need an in-place result ping-pong
//! through a scratch buffer as [`gaussian_blur`] does.
//!
//! # Example
//!
//! ```rust
//! use cine_core::{Bounds, FrameBuffer};
//! use cine_ops::blur::gaussian_blur;
//!
//! let mut img = FrameBuffer::filled(Bounds::from_size(32, 32), [0.5, 0.5, 0.5, 1.0]);
//! let mut temp = FrameBuffer::new(img.bounds());
//! gaussian_blur(&mut img, &mut temp, 6);
//! assert!((img.at(16, 16)[0] - 0.5).abs() < 1e-5);
//! ```

use cine_core::{FrameBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Horizontal box blur of radius `radius` from `src` into `dst`.
///
/// A radius below 1 copies `src` unchanged.
pub fn box_blur_horizontal(src: &FrameBuffer, dst: &mut FrameBuffer, radius: usize) {
    debug_assert_eq!(src.bounds(), dst.bounds(), "blur buffers must share bounds");
    if radius < 1 || src.pixel_count() == 0 {
        dst.copy_from(src);
        return;
    }
    let w = src.width();
    let inv = 1.0 / (2 * radius + 1) as f32;

    for y in 0..src.height() {
        let row = src.row(y);
        let out = dst.row_mut(y);

        // Seed with the left edge replicated r+1 times plus samples 1..=r.
        let mut sum = [row[0], row[1], row[2]].map(|v| v * (radius + 1) as f32);
        for i in 1..=radius {
            let p = i.min(w - 1) * CHANNELS;
            for c in 0..3 {
                sum[c] += row[p + c];
            }
        }

        for x in 0..w {
            let o = x * CHANNELS;
            for c in 0..3 {
                out[o + c] = sum[c] * inv;
            }
            out[o + 3] = row[o + 3];

            let add = (x + radius + 1).min(w - 1) * CHANNELS;
            let sub = x.saturating_sub(radius) * CHANNELS;
            for c in 0..3 {
                sum[c] += row[add + c] - row[sub + c];
            }
        }
    }
}

/// Vertical box blur of radius `radius` from `src` into `dst`.
///
/// Walks rows top to bottom with one running sum per column so memory is
/// touched in storage order. A radius below 1 copies `src` unchanged.
pub fn box_blur_vertical(src: &FrameBuffer, dst: &mut FrameBuffer, radius: usize) {
    debug_assert_eq!(src.bounds(), dst.bounds(), "blur buffers must share bounds");
    if radius < 1 || src.pixel_count() == 0 {
        dst.copy_from(src);
        return;
    }
    let h = src.height();
    let stride = src.width() * CHANNELS;
    let inv = 1.0 / (2 * radius + 1) as f32;

    let mut sums: Vec<f32> = src.row(0).iter().map(|v| v * (radius + 1) as f32).collect();
    for i in 1..=radius {
        let row = src.row(i.min(h - 1));
        for (s, v) in sums.iter_mut().zip(row) {
            *s += v;
        }
    }

    for y in 0..h {
        let alpha_row = src.row(y);
        let out = dst.row_mut(y);
        for o in (0..stride).step_by(CHANNELS) {
            out[o] = sums[o] * inv;
            out[o + 1] = sums[o + 1] * inv;
            out[o + 2] = sums[o + 2] * inv;
            out[o + 3] = alpha_row[o + 3];
        }

        let add = src.row((y + radius + 1).min(h - 1));
        let sub = src.row(y.saturating_sub(radius));
        for ((s, a), b) in sums.iter_mut().zip(add).zip(sub) {
            *s += a - b;
        }
    }
}

/// Box radii whose three-pass cascade approximates a Gaussian of `sigma`.
///
/// A box of odd width `w` adds `(w^2 - 1) / 12` to the variance, so the
/// cascade hits `sigma^2` when the squared widths sum to `12 sigma^2 + 3`.
/// Widths are searched among the four odd values around the ideal equal
/// width; the closest sum wins, ties going to the narrower spread of widths.
///
/// ```
/// use cine_ops::blur::gaussian_box_radii;
///
/// assert_eq!(gaussian_box_radii(2.0), [0, 2, 2]);
/// assert_eq!(gaussian_box_radii(6.0), [4, 5, 7]);
/// ```
pub fn gaussian_box_radii(sigma: f32) -> [usize; 3] {
    let var12 = 12.0 * sigma * sigma;
    let target = var12 + 3.0;
    let mut wl = (var12 / 3.0 + 1.0).sqrt().floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let candidates = [wl - 2, wl, wl + 2, wl + 4].map(|w| w.max(1));

    let mut best = ([wl.max(1); 3], f32::INFINITY, i32::MAX);
    for (i, &a) in candidates.iter().enumerate() {
        for (j, &b) in candidates.iter().enumerate().skip(i) {
            for &c in &candidates[j..] {
                let err = ((a * a + b * b + c * c) as f32 - target).abs();
                let spread = c - a;
                if err < best.1 || (err == best.1 && spread < best.2) {
                    best = ([a, b, c], err, spread);
                }
            }
        }
    }
    best.0.map(|w| ((w - 1) / 2) as usize)
}

/// In-place Gaussian approximation of `radius` (sigma = radius / 2).
///
/// `temp` is scratch of identical bounds. Each pass blurs `buf` horizontally
/// into `temp` and back vertically into `buf`, so the result lands in `buf`
/// without a final copy.
pub fn gaussian_blur(buf: &mut FrameBuffer, temp: &mut FrameBuffer, radius: usize) {
    if radius < 1 {
        return;
    }
    let sigma = (radius as f32 / 2.0).max(0.1);
    let radii = gaussian_box_radii(sigma);
    trace!(radius, ?radii, width = buf.width(), height = buf.height(), "gaussian_blur");

    for r in radii {
        box_blur_horizontal(buf, temp, r);
        box_blur_vertical(temp, buf, r);
    }
}

/// In-place horizontal-only streak blur: three box passes of `radius`.
pub fn streak_blur(buf: &mut FrameBuffer, temp: &mut FrameBuffer, radius: usize) {
    if radius < 1 {
        return;
    }
    trace!(radius, width = buf.width(), "streak_blur");

    box_blur_horizontal(buf, temp, radius);
    box_blur_horizontal(temp, buf, radius);
    box_blur_horizontal(buf, temp, radius);
    std::mem::swap(buf, temp);
}

/// Blur applied to an effect source before recombination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurKind {
    /// Three-pass box Gaussian approximation of the given radius.
    Gaussian(usize),
    /// Three horizontal box passes of the given radius.
    Streak(usize),
}

impl BlurKind {
    /// Blurs `buf` in place using `temp` as scratch.
    pub fn apply(self, buf: &mut FrameBuffer, temp: &mut FrameBuffer) {
        match self {
            BlurKind::Gaussian(r) => gaussian_blur(buf, temp, r),
            BlurKind::Streak(r) => streak_blur(buf, temp, r),
        }
    }

    /// Radius of a single pass.
    pub fn radius(self) -> usize {
        match self {
            BlurKind::Gaussian(r) | BlurKind::Streak(r) => r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cine_core::Bounds;

    fn ramp(width: u32, height: u32) -> FrameBuffer {
        let mut buf = FrameBuffer::new(Bounds::from_size(width, height));
        for y in 0..height as usize {
            for x in 0..width as usize {
                let v = (x * 7 + y * 13) as f32 * 0.01;
                buf.set_pixel(x, y, [v, v * 0.5, 1.0 - v, 0.25]);
            }
        }
        buf
    }

    #[test]
    fn test_box_horizontal_interior_mean() {
        let src = ramp(20, 3);
        let mut dst = FrameBuffer::new(src.bounds());
        let r = 3;
        box_blur_horizontal(&src, &mut dst, r);

        for x in r..20 - r {
            let mean: f32 = (x - r..=x + r).map(|i| src.pixel(i, 1)[0]).sum::<f32>() / 7.0;
            assert_abs_diff_eq!(dst.pixel(x, 1)[0], mean, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_box_replicates_edges() {
        let mut src = FrameBuffer::new(Bounds::from_size(5, 1));
        for x in 0..5 {
            src.set_pixel(x, 0, [x as f32, 0.0, 0.0, 1.0]);
        }
        let mut dst = FrameBuffer::new(src.bounds());
        box_blur_horizontal(&src, &mut dst, 1);
        // Window at x=0 is [0, 0, 1]
        assert_abs_diff_eq!(dst.pixel(0, 0)[0], 1.0 / 3.0, epsilon = 1e-6);
        // Window at x=4 is [3, 4, 4]
        assert_abs_diff_eq!(dst.pixel(4, 0)[0], 11.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_box_vertical_matches_transpose() {
        let src = ramp(4, 15);
        let mut dst = FrameBuffer::new(src.bounds());
        box_blur_vertical(&src, &mut dst, 2);
        let mean: f32 = (5..=9).map(|y| src.pixel(2, y)[1]).sum::<f32>() / 5.0;
        assert_abs_diff_eq!(dst.pixel(2, 7)[1], mean, epsilon = 1e-5);
    }

    #[test]
    fn test_box_keeps_alpha() {
        let src = ramp(9, 9);
        let mut dst = FrameBuffer::new(src.bounds());
        box_blur_horizontal(&src, &mut dst, 2);
        assert!(dst.pixels().all(|p| p[3] == 0.25));
        box_blur_vertical(&src, &mut dst, 2);
        assert!(dst.pixels().all(|p| p[3] == 0.25));
    }

    #[test]
    fn test_box_zero_radius_copies() {
        let src = ramp(6, 6);
        let mut dst = FrameBuffer::new(src.bounds());
        box_blur_horizontal(&src, &mut dst, 0);
        assert_eq!(src, dst);
    }

    #[test]
    fn test_gaussian_radii_small_sigma() {
        assert_eq!(gaussian_box_radii(0.1), [0, 0, 0]);
        // Widths 1, 5, 5 give variance exactly 4.
        assert_eq!(gaussian_box_radii(2.0), [0, 2, 2]);
        assert_eq!(gaussian_box_radii(3.0), [1, 3, 3]);
    }

    #[test]
    fn test_gaussian_preserves_constant() {
        let mut img = FrameBuffer::filled(Bounds::from_size(17, 11), [0.3, 0.6, 0.9, 1.0]);
        let mut temp = FrameBuffer::new(img.bounds());
        gaussian_blur(&mut img, &mut temp, 8);
        for p in img.pixels() {
            assert_abs_diff_eq!(p[0], 0.3, epsilon = 1e-5);
            assert_abs_diff_eq!(p[2], 0.9, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_streak_is_horizontal_only() {
        let mut img = FrameBuffer::new(Bounds::from_size(41, 9));
        img.set_pixel(20, 4, [1.0, 1.0, 1.0, 0.0]);
        let mut temp = FrameBuffer::new(img.bounds());
        streak_blur(&mut img, &mut temp, 4);

        assert!(img.pixel(14, 4)[0] > 0.0);
        assert_eq!(img.pixel(20, 3)[0], 0.0);
        assert_eq!(img.pixel(20, 5)[0], 0.0);
        let total: f32 = (0..41).map(|x| img.pixel(x, 4)[0]).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-5);
    }
}
