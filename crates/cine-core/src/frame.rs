//! Owned RGBA frame buffers.
//!
//! A [`FrameBuffer`] is a row-major block of 4-channel `f32` pixels whose
//! top-left sample sits at [`Bounds::x1`]/[`Bounds::y1`] in host coordinates.
//! The pipeline uses three of them per call (working image, effect source and
//! blur scratch), all covering the same apron-expanded rectangle.
//!
//! Two addressing modes exist:
//!
//! - **local** `(x, y)` with `0 <= x < width`, used by tight loops
//! - **global** host coordinates through [`FrameBuffer::at`]
//!
//! Indexing is bounds-checked by `debug_assert!` in addition to the slice
//! checks Rust always performs.
//!
//! # Example
//!
//! ```rust
//! use cine_core::{Bounds, FrameBuffer};
//!
//! let mut buf = FrameBuffer::new(Bounds::new(10, 10, 14, 12));
//! buf.set_pixel(0, 0, [1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(buf.at(10, 10), [1.0, 0.5, 0.25, 1.0]);
//! ```

use crate::error::{Error, Result};
use crate::rect::Bounds;

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// RGBA `f32` pixel storage anchored at an origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameBuffer {
    bounds: Bounds,
    data: Vec<f32>,
}

impl FrameBuffer {
    /// Allocates a zeroed buffer covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            data: vec![0.0; bounds.area() * CHANNELS],
        }
    }

    /// Allocates a buffer with every pixel set to `pixel`.
    pub fn filled(bounds: Bounds, pixel: [f32; 4]) -> Self {
        let mut buf = Self::new(bounds);
        buf.fill(pixel);
        buf
    }

    /// Wraps existing interleaved RGBA samples.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for inverted bounds and
    /// [`Error::DimensionMismatch`] when `data` has the wrong length.
    pub fn from_data(bounds: Bounds, data: Vec<f32>) -> Result<Self> {
        if bounds.x2 < bounds.x1 || bounds.y2 < bounds.y1 {
            return Err(Error::InvalidDimensions(format!("inverted bounds {bounds}")));
        }
        let expected = bounds
            .width()
            .checked_mul(bounds.height())
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| Error::InvalidDimensions(format!("{bounds} overflows")))?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch { expected, actual: data.len() });
        }
        Ok(Self { bounds, data })
    }

    /// Covered rectangle in host coordinates.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.bounds.area()
    }

    /// Interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Sample offset of local pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width() && y < self.height(),
            "local pixel ({x}, {y}) outside {}x{}",
            self.width(),
            self.height()
        );
        (y * self.width() + x) * CHANNELS
    }

    /// Reads local pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Writes local pixel `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [f32; 4]) {
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Reads the pixel at host coordinates.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> [f32; 4] {
        debug_assert!(self.bounds.contains(x, y), "({x}, {y}) outside {}", self.bounds);
        self.pixel((x - self.bounds.x1) as usize, (y - self.bounds.y1) as usize)
    }

    /// Fallible variant of [`FrameBuffer::at`].
    pub fn try_at(&self, x: i32, y: i32) -> Result<[f32; 4]> {
        if !self.bounds.contains(x, y) {
            return Err(Error::OutOfBounds { x, y, bounds: self.bounds.to_string() });
        }
        Ok(self.at(x, y))
    }

    /// Samples of local row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let stride = self.width() * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Mutable samples of local row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let stride = self.width() * CHANNELS;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Iterates pixels as 4-sample chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterates mutable pixels as 4-sample chunks.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Sets every pixel to `pixel`.
    pub fn fill(&mut self, pixel: [f32; 4]) {
        for px in self.pixels_mut() {
            px.copy_from_slice(&pixel);
        }
    }

    /// Copies every sample from a buffer of identical bounds.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        debug_assert_eq!(self.bounds, other.bounds, "copy between mismatched buffers");
        self.data.copy_from_slice(&other.data);
    }

    /// Copies the pixels of `region` into a new buffer.
    ///
    /// `region` must lie inside this buffer.
    pub fn crop(&self, region: Bounds) -> FrameBuffer {
        debug_assert!(self.bounds.contains_bounds(&region), "{region} outside {}", self.bounds);
        let mut out = FrameBuffer::new(region);
        let x0 = (region.x1 - self.bounds.x1) as usize;
        let y0 = (region.y1 - self.bounds.y1) as usize;
        let span = region.width() * CHANNELS;
        for y in 0..region.height() {
            let start = self.index(x0, y0 + y);
            out.row_mut(y).copy_from_slice(&self.data[start..start + span]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_zeroed() {
        let buf = FrameBuffer::new(Bounds::new(-2, -2, 2, 1));
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.data().len(), 48);
        assert!(buf.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_frame_from_data_validates() {
        assert!(FrameBuffer::from_data(Bounds::new(0, 0, 2, 2), vec![0.0; 16]).is_ok());
        assert!(matches!(
            FrameBuffer::from_data(Bounds::new(0, 0, 2, 2), vec![0.0; 15]),
            Err(Error::DimensionMismatch { expected: 16, actual: 15 })
        ));
        assert!(matches!(
            FrameBuffer::from_data(Bounds::new(3, 0, 2, 2), vec![]),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_frame_global_addressing() {
        let mut buf = FrameBuffer::new(Bounds::new(5, 7, 9, 10));
        buf.set_pixel(3, 2, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(buf.at(8, 9), [0.1, 0.2, 0.3, 0.4]);
        assert!(buf.try_at(9, 9).is_err());
        assert_eq!(buf.try_at(8, 9).ok(), Some([0.1, 0.2, 0.3, 0.4]));
    }

    #[test]
    fn test_frame_rows_and_crop() {
        let mut buf = FrameBuffer::new(Bounds::new(0, 0, 4, 4));
        for y in 0..4 {
            for x in 0..4 {
                buf.set_pixel(x, y, [x as f32, y as f32, 0.0, 1.0]);
            }
        }
        assert_eq!(buf.row(2)[4..8], [1.0, 2.0, 0.0, 1.0]);

        let crop = buf.crop(Bounds::new(1, 2, 3, 4));
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.at(1, 2), [1.0, 2.0, 0.0, 1.0]);
        assert_eq!(crop.at(2, 3), [2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_frame_fill_and_copy() {
        let a = FrameBuffer::filled(Bounds::from_size(3, 2), [0.5, 0.5, 0.5, 1.0]);
        let mut b = FrameBuffer::new(Bounds::from_size(3, 2));
        b.copy_from(&a);
        assert_eq!(a, b);
        assert_eq!(b.pixels().count(), 6);
    }
}
