//! Tile-parallel rendering using Rayon.
//!
//! A full window is split into horizontal bands, each rendered by an
//! independent [`process_window`] call with its own apron and scratch
//! buffers, writing straight into its slice of the shared output. Bands never
//! share mutable state, so the only requirement is a `Sync` source.
//!
//! Tiling is exact for per-pixel operators. A three-pass box cascade can
//! reach a few pixels past the apron that sizes it, and streak and aberration
//! reads are not reserved at all, so bands may differ from a single-window
//! render near their edges by the blur tail. Render in one window when a
//! bit-exact result is required.
//!
//! # Example
//!
//! ```rust
//! use cine_core::{Bounds, FrameBuffer};
//! use cine_ops::look::LookParams;
//! use cine_ops::parallel::render_tiles;
//! use cine_ops::pipeline::RenderRequest;
//!
//! let src = FrameBuffer::filled(Bounds::from_size(64, 48), [0.2, 0.3, 0.4, 1.0]);
//! let out = render_tiles(&src, &RenderRequest::full_frame(src.bounds()), &LookParams::default(), 16).unwrap();
//! assert_eq!(out.bounds(), src.bounds());
//! ```

use cine_core::{Bounds, CHANNELS, DestinationImage, FrameBuffer, SourceImage};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::look::LookParams;
use crate::pipeline::{RenderRequest, process_window};
use crate::{OpsError, OpsResult};

/// Destination over one band's rows of a shared output buffer.
struct Band<'a> {
    bounds: Bounds,
    data: &'a mut [f32],
}

impl Band<'_> {
    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds.contains(x, y), "({x}, {y}) outside band {}", self.bounds);
        ((y - self.bounds.y1) as usize * self.bounds.width() + (x - self.bounds.x1) as usize) * CHANNELS
    }
}

impl DestinationImage for Band<'_> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_pixel(&mut self, x: i32, y: i32, px: [f32; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    fn write_span(&mut self, x: i32, y: i32, samples: &[f32]) {
        let i = self.offset(x, y);
        self.data[i..i + samples.len()].copy_from_slice(samples);
    }
}

/// Renders `request.window` in parallel bands of `tile_rows` rows.
///
/// The result matches a single [`process_window`] call wherever every
/// spatial read stays inside the apron. Elsewhere it is approximate by the
/// part of each kernel that falls outside the apron.
pub fn render_tiles<S>(source: &S, request: &RenderRequest, look: &LookParams, tile_rows: usize) -> OpsResult<FrameBuffer>
where
    S: SourceImage + Sync + ?Sized,
{
    request.validate()?;
    if tile_rows == 0 {
        return Err(OpsError::InvalidParameter("tile_rows must be > 0".into()));
    }
    let window = request.window;
    let band_len = window
        .width()
        .checked_mul(CHANNELS)
        .and_then(|v| v.checked_mul(tile_rows))
        .ok_or_else(|| OpsError::InvalidDimensions("tile size overflows".into()))?;

    let mut out = FrameBuffer::new(window);
    if window.is_empty() {
        return Ok(out);
    }

    let bands: Vec<Bounds> = window.bands(tile_rows).collect();
    debug!(window = %window, tile_rows, bands = bands.len(), "render_tiles");

    out.data_mut().par_chunks_mut(band_len).zip(bands).for_each(|(data, bounds)| {
        trace!(band = %bounds, "tile");
        let mut band = Band { bounds, data };
        let band_request = RenderRequest { window: bounds, ..*request };
        process_window(source, &mut band, &band_request, look);
    });

    Ok(out)
}
