//! Host pixel accessors.
//!
//! The frame processor never sees host storage directly. It reads through
//! [`SourceImage`], which clamps out-of-range lookups to the nearest valid
//! pixel, and writes through [`DestinationImage`]. [`FrameBuffer`] implements
//! both in host coordinates so tests and the CLI can drive the pipeline
//! without an adapter.

use crate::frame::{FrameBuffer, CHANNELS};
use crate::rect::Bounds;

/// Read-only source pixels.
///
/// Must stay immutable while any `process_window` call reads it; concurrent
/// calls on disjoint windows share one source.
pub trait SourceImage {
    /// Rectangle of valid pixels.
    fn bounds(&self) -> Bounds;

    /// Reads a pixel known to lie inside [`SourceImage::bounds`].
    fn pixel(&self, x: i32, y: i32) -> [f32; 4];

    /// Reads a pixel with edge clamping.
    ///
    /// Coordinates outside the bounds resolve to the nearest edge pixel; an
    /// empty source reads as transparent black.
    fn clamped_pixel(&self, x: i32, y: i32) -> [f32; 4] {
        let b = self.bounds();
        if b.is_empty() {
            return [0.0; 4];
        }
        let (cx, cy) = b.clamp(x, y);
        self.pixel(cx, cy)
    }
}

/// Writable destination pixels.
pub trait DestinationImage {
    /// Rectangle that may be written.
    fn bounds(&self) -> Bounds;

    /// Writes a single pixel.
    fn set_pixel(&mut self, x: i32, y: i32, px: [f32; 4]);

    /// Writes a horizontal run of interleaved RGBA samples starting at `(x, y)`.
    fn write_span(&mut self, x: i32, y: i32, samples: &[f32]) {
        for (i, px) in samples.chunks_exact(CHANNELS).enumerate() {
            self.set_pixel(x + i as i32, y, [px[0], px[1], px[2], px[3]]);
        }
    }
}

impl SourceImage for FrameBuffer {
    fn bounds(&self) -> Bounds {
        FrameBuffer::bounds(self)
    }

    fn pixel(&self, x: i32, y: i32) -> [f32; 4] {
        self.at(x, y)
    }
}

impl DestinationImage for FrameBuffer {
    fn bounds(&self) -> Bounds {
        FrameBuffer::bounds(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, px: [f32; 4]) {
        let b = FrameBuffer::bounds(self);
        debug_assert!(b.contains(x, y), "write ({x}, {y}) outside {b}");
        FrameBuffer::set_pixel(self, (x - b.x1) as usize, (y - b.y1) as usize, px);
    }

    fn write_span(&mut self, x: i32, y: i32, samples: &[f32]) {
        let b = FrameBuffer::bounds(self);
        debug_assert!(b.contains(x, y), "span start ({x}, {y}) outside {b}");
        let start = self.index((x - b.x1) as usize, (y - b.y1) as usize);
        self.data_mut()[start..start + samples.len()].copy_from_slice(samples);
    }
}
