//! Lateral chromatic aberration.
//!
//! Red is sampled further from the optical centre and blue closer to it, by
//! an offset that grows with the square of the distance. Green and alpha are
//! untouched. Sampling is nearest-pixel from a snapshot of the running image,
//! clamped to the working buffer.

use cine_core::CHANNELS;
#[allow(unused_imports)]
use tracing::{debug, trace};

use super::{Reach, SpatialOp};
use crate::pipeline::{FrameContext, Workspace};

/// Aberration controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AberrationParams {
    /// Module switch.
    pub enable: bool,
    /// Fringe strength.
    pub amount: f32,
    /// Optical centre offset, -1..1 on each axis.
    pub center: [f32; 2],
}

impl Default for AberrationParams {
    fn default() -> Self {
        Self { enable: false, amount: 0.0, center: [0.0, 0.0] }
    }
}

/// Chromatic aberration operator.
#[derive(Debug, Clone)]
pub struct ChromaticAberration {
    params: AberrationParams,
}

impl ChromaticAberration {
    /// Creates the operator.
    pub fn new(params: AberrationParams) -> Self {
        Self { params }
    }

    /// Displacement of the red sample from `uv`; blue uses the negation.
    pub fn offset(&self, uv: [f32; 2]) -> [f32; 2] {
        let c = self.params.center;
        let d = [uv[0] - (0.5 + 0.5 * c[0]), uv[1] - (0.5 + 0.5 * c[1])];
        let shift = d[0].hypot(d[1]) * self.params.amount * 0.02;
        [d[0] * shift, d[1] * shift]
    }
}

impl SpatialOp for ChromaticAberration {
    fn name(&self) -> &'static str {
        "aberration"
    }

    fn is_active(&self) -> bool {
        self.params.enable && self.params.amount > 0.0
    }

    fn reach(&self, _render_scale: f32) -> Reach {
        Reach::None
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        let Workspace { image, effect, .. } = ws;
        effect.copy_from(image);
        let b = image.bounds();
        trace!(amount = self.params.amount, width = b.width(), height = b.height(), "aberration");

        let fetch = |u: f32, v: f32| {
            let (x, y) = frame.pixel_at_uv(u, v);
            let (x, y) = b.clamp(x, y);
            effect.at(x, y)
        };

        for y in 0..image.height() {
            let gy = b.y1 + y as i32;
            for (x, px) in image.row_mut(y).chunks_exact_mut(CHANNELS).enumerate() {
                let uv = frame.uv(b.x1 + x as i32, gy);
                let [ox, oy] = self.offset(uv);
                px[0] = fetch(uv[0] + ox, uv[1] + oy)[0];
                px[2] = fetch(uv[0] - ox, uv[1] - oy)[2];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RenderRequest;
    use cine_core::Bounds;

    fn op(amount: f32) -> ChromaticAberration {
        ChromaticAberration::new(AberrationParams { enable: true, amount, center: [0.0, 0.0] })
    }

    #[test]
    fn test_no_offset_at_centre() {
        assert_eq!(op(5.0).offset([0.5, 0.5]), [0.0, 0.0]);
        let o = op(5.0).offset([1.0, 0.5]);
        assert!(o[0] > 0.0 && o[1] == 0.0);
    }

    #[test]
    fn test_zero_amount_inactive() {
        assert!(!op(0.0).is_active());
    }

    #[test]
    fn test_fringes_at_edge() {
        let bounds = Bounds::from_size(200, 10);
        let frame = FrameContext::new(&RenderRequest::full_frame(bounds), 0);
        let mut ws = Workspace::new(bounds, true);
        for y in 0..10 {
            for x in 0..200 {
                let v = x as f32 / 200.0;
                ws.image.set_pixel(x, y, [v, v, v, 1.0]);
            }
        }
        op(10.0).render(&mut ws, &frame);

        // Right edge: red pulls from further right, blue from further left.
        let px = ws.image.pixel(190, 5);
        assert!(px[0] > px[1]);
        assert!(px[2] < px[1]);
        assert_eq!(px[3], 1.0);
        // Centre column is untouched.
        let c = ws.image.pixel(100, 5);
        assert_eq!(c[0], c[1]);
    }
}
