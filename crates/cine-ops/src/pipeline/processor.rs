//! The per-window frame processor.
//!
//! One call renders one output window:
//!
//! 1. size the apron from the active spatial operators,
//! 2. allocate the workspace over the apron-expanded window,
//! 3. Stage 0: fetch each source pixel (edge-clamped), run the active
//!    per-pixel operators, store with alpha 1,
//! 4. Stage 1: run each active spatial operator over the whole workspace,
//! 5. crop to the window and write row spans to the destination.
//!
//! The call is synchronous and single-threaded. Concurrent calls on disjoint
//! windows of one frame are safe as long as the source is not mutated.

use cine_core::{Bounds, CHANNELS, DestinationImage, FrameBuffer, SourceImage};
use tracing::{debug, trace};

use super::apron;
use super::context::{FrameContext, RenderRequest, Workspace};
use crate::fx::{SpatialOp, spatial_chain};
use crate::grade::{PixelOp, PixelSite, apply_chain, pixel_chain};
use crate::look::LookParams;
use crate::OpsResult;

/// What one invocation did, for logging and inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Apron in pixels.
    pub apron: i32,
    /// Extent of the scratch buffers.
    pub buffer: Bounds,
    /// Per-pixel operators that ran.
    pub pixel_ops: Vec<&'static str>,
    /// Spatial operators that ran.
    pub spatial_ops: Vec<&'static str>,
    /// Scratch memory held at peak.
    pub scratch_bytes: usize,
}

/// Renders `request.window` of `source` through `look` into `dest`.
///
/// `dest` must cover the window; this is checked in debug builds only.
pub fn process_window<S, D>(source: &S, dest: &mut D, request: &RenderRequest, look: &LookParams) -> RenderStats
where
    S: SourceImage + ?Sized,
    D: DestinationImage + ?Sized,
{
    debug_assert!(
        dest.bounds().contains_bounds(&request.window),
        "destination {} does not cover window {}",
        dest.bounds(),
        request.window
    );

    let spatial = spatial_chain(look);
    let apron = apron::compute(&spatial, request.render_scale);
    let frame = FrameContext::new(request, apron);

    let pixel: Vec<Box<dyn PixelOp>> = pixel_chain(look, &frame).into_iter().filter(|op| op.is_active()).collect();
    let spatial: Vec<Box<dyn SpatialOp>> = spatial.into_iter().filter(|op| op.is_active()).collect();

    let mut ws = Workspace::new(frame.buffer, !spatial.is_empty());
    let stats = RenderStats {
        apron,
        buffer: frame.buffer,
        pixel_ops: pixel.iter().map(|op| op.name()).collect(),
        spatial_ops: spatial.iter().map(|op| op.name()).collect(),
        scratch_bytes: ws.allocated_bytes(),
    };
    debug!(
        window = %request.window,
        apron,
        buffer = %frame.buffer,
        pixel_ops = ?stats.pixel_ops,
        spatial_ops = ?stats.spatial_ops,
        "process_window"
    );

    if request.window.is_empty() {
        return stats;
    }

    run_pixel_stage(source, &pixel, &mut ws.image);

    for op in &spatial {
        trace!(op = op.name(), "spatial stage");
        op.render(&mut ws, &frame);
    }

    write_window(&ws.image, request.window, dest);
    stats
}

/// Renders `request.window` into a freshly allocated buffer.
pub fn render<S: SourceImage + ?Sized>(source: &S, request: &RenderRequest, look: &LookParams) -> FrameBuffer {
    let mut out = FrameBuffer::new(request.window);
    process_window(source, &mut out, request, look);
    out
}

/// Renders a whole interleaved RGBA image of `width` x `height` at full scale.
pub fn render_image(data: Vec<f32>, width: u32, height: u32, look: &LookParams, time: f64) -> OpsResult<FrameBuffer> {
    let source = FrameBuffer::from_data(Bounds::from_size(width, height), data)?;
    let request = RenderRequest::full_frame(source.bounds()).with_time(time);
    request.validate()?;
    Ok(render(&source, &request, look))
}

/// Stage 0 over the whole workspace, alpha forced to 1.
fn run_pixel_stage<S: SourceImage + ?Sized>(source: &S, ops: &[Box<dyn PixelOp>], image: &mut FrameBuffer) {
    let b = image.bounds();
    trace!(width = b.width(), height = b.height(), ops = ops.len(), "pixel stage");

    for y in 0..image.height() {
        let gy = b.y1 + y as i32;
        for (x, px) in image.row_mut(y).chunks_exact_mut(CHANNELS).enumerate() {
            let gx = b.x1 + x as i32;
            let s = source.clamped_pixel(gx, gy);
            let [r, g, bl] = apply_chain(ops, [s[0], s[1], s[2]], PixelSite { x: gx, y: gy });
            px.copy_from_slice(&[r, g, bl, 1.0]);
        }
    }
}

/// Copies the `window` rows of `image` into `dest`.
fn write_window<D: DestinationImage + ?Sized>(image: &FrameBuffer, window: Bounds, dest: &mut D) {
    let b = image.bounds();
    let x0 = (window.x1 - b.x1) as usize * CHANNELS;
    let span = window.width() * CHANNELS;
    for gy in window.y1..window.y2 {
        let row = image.row((gy - b.y1) as usize);
        dest.write_span(window.x1, gy, &row[x0..x0 + span]);
    }
}
