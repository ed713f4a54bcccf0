//! Extract, blur, recombine.

use crate::blur::BlurKind;
use crate::pipeline::{FrameContext, Workspace};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// What goes into the effect buffer before blurring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    /// Copy of the working image, alpha included.
    Image,
    /// Per-pixel [`Composite::extract`] output with alpha 0.
    Extracted,
}

/// The three steps of a blur-based effect.
pub(crate) trait Composite {
    fn source(&self) -> Source;

    /// Derived signal for one pixel. Only called for [`Source::Extracted`].
    fn extract(&self, rgb: [f32; 3]) -> [f32; 3] {
        rgb
    }

    fn blur(&self, frame: &FrameContext) -> BlurKind;

    /// Merges the blurred signal back into the running pixel.
    fn combine(&self, rgb: [f32; 3], blurred: [f32; 3]) -> [f32; 3];
}

pub(crate) fn render<C: Composite + ?Sized>(op: &C, ws: &mut Workspace, frame: &FrameContext) {
    let Workspace { image, effect, scratch } = ws;

    match op.source() {
        Source::Image => effect.copy_from(image),
        Source::Extracted => {
            for (dst, src) in effect.pixels_mut().zip(image.pixels()) {
                let [r, g, b] = op.extract([src[0], src[1], src[2]]);
                dst.copy_from_slice(&[r, g, b, 0.0]);
            }
        }
    }

    let kind = op.blur(frame);
    trace!(?kind, "composite blur");
    kind.apply(effect, scratch);

    for (px, bl) in image.pixels_mut().zip(effect.pixels()) {
        let out = op.combine([px[0], px[1], px[2]], [bl[0], bl[1], bl[2]]);
        px[..3].copy_from_slice(&out);
    }
}
