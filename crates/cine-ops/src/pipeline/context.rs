//! Per-invocation inputs and frame constants.

use cine_core::{Bounds, FrameBuffer};

use crate::grade::grain::frame_seed;
use crate::{OpsError, OpsResult};

/// What the host asks for in one `process_window` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Output window, in host pixel coordinates.
    pub window: Bounds,
    /// Uniform scale applied to spatial radii (1.0 = full resolution).
    pub render_scale: f32,
    /// Host time in frames or seconds; seeds grain.
    pub time: f64,
    /// Source region of definition, used to normalise UVs and grain scale.
    pub source_rod: Bounds,
}

impl RenderRequest {
    /// Full-resolution request at time 0.
    pub fn new(window: Bounds, source_rod: Bounds) -> Self {
        Self { window, render_scale: 1.0, time: 0.0, source_rod }
    }

    /// Request covering a whole image.
    pub fn full_frame(rod: Bounds) -> Self {
        Self::new(rod, rod)
    }

    /// Sets the render scale.
    pub fn with_render_scale(mut self, render_scale: f32) -> Self {
        self.render_scale = render_scale;
        self
    }

    /// Sets the host time.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Rejects a non-finite or non-positive render scale and non-finite time.
    pub fn validate(&self) -> OpsResult<()> {
        if !self.render_scale.is_finite() || self.render_scale <= 0.0 {
            return Err(OpsError::InvalidParameter(format!("render scale {}", self.render_scale)));
        }
        if !self.time.is_finite() {
            return Err(OpsError::InvalidParameter(format!("time {}", self.time)));
        }
        Ok(())
    }
}

/// Frame-level constants, computed once and shared by every operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Uniform radius scale.
    pub render_scale: f32,
    /// Host time.
    pub time: f64,
    /// Grain seed derived from `time`.
    pub frame_seed: i32,
    /// Source region of definition.
    pub source_rod: Bounds,
    /// Requested output window.
    pub window: Bounds,
    /// Window expanded by the apron; the extent of every scratch buffer.
    pub buffer: Bounds,
}

impl FrameContext {
    /// Derives the constants for `request` with an apron of `apron` pixels.
    pub fn new(request: &RenderRequest, apron: i32) -> Self {
        Self {
            render_scale: request.render_scale,
            time: request.time,
            frame_seed: frame_seed(request.time),
            source_rod: request.source_rod,
            window: request.window,
            buffer: request.window.expand(apron),
        }
    }

    /// Source image width in pixels.
    #[inline]
    pub fn image_width(&self) -> usize {
        self.source_rod.width()
    }

    /// Source image height in pixels.
    #[inline]
    pub fn image_height(&self) -> usize {
        self.source_rod.height()
    }

    /// Width over height, guarded against empty sources.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.image_width() as f32 / self.image_height().max(1) as f32
    }

    /// Normalised image coordinates of host pixel `(x, y)`.
    ///
    /// `(0, 0)` is the top-left corner of the region of definition and
    /// `(1, 1)` its bottom-right; apron pixels fall outside that range.
    #[inline]
    pub fn uv(&self, x: i32, y: i32) -> [f32; 2] {
        let w = self.image_width().max(1) as f32;
        let h = self.image_height().max(1) as f32;
        [(x - self.source_rod.x1) as f32 / w, (y - self.source_rod.y1) as f32 / h]
    }

    /// Host pixel containing normalised coordinates (floored, so UVs left
    /// of or above the region map to the pixel they fall in).
    #[inline]
    pub fn pixel_at_uv(&self, u: f32, v: f32) -> (i32, i32) {
        let x = u * self.image_width().max(1) as f32 + self.source_rod.x1 as f32;
        let y = v * self.image_height().max(1) as f32 + self.source_rod.y1 as f32;
        (x.floor() as i32, y.floor() as i32)
    }
}

/// The three scratch buffers of one invocation.
///
/// `image` holds the running result (buffer A). `effect` receives extracted
/// or copied signals (buffer B) and `scratch` is blur-internal (Temp). All
/// three share the apron-expanded bounds; `effect` and `scratch` stay empty
/// when no spatial operator runs.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Running image.
    pub image: FrameBuffer,
    /// Effect source or blur result.
    pub effect: FrameBuffer,
    /// Blur scratch.
    pub scratch: FrameBuffer,
}

impl Workspace {
    /// Allocates the image buffer, plus effect and scratch when `spatial`.
    pub fn new(bounds: Bounds, spatial: bool) -> Self {
        let side = || if spatial { FrameBuffer::new(bounds) } else { FrameBuffer::default() };
        Self { image: FrameBuffer::new(bounds), effect: side(), scratch: side() }
    }

    /// Bounds of the running image.
    pub fn bounds(&self) -> Bounds {
        self.image.bounds()
    }

    /// Total bytes held by the three buffers.
    pub fn allocated_bytes(&self) -> usize {
        [&self.image, &self.effect, &self.scratch].iter().map(|b| b.data().len()).sum::<usize>()
            * std::mem::size_of::<f32>()
    }
}
