//! Vignette: darken, lighten or defocus toward the frame edges.

use cine_core::CHANNELS;
#[allow(unused_imports)]
use tracing::{debug, trace};

use super::{Reach, SpatialOp, blur_radius};
use crate::blur::gaussian_blur;
use crate::math::{luminance, mix3, smoothstep};
use crate::pipeline::{FrameContext, Workspace};

/// Defocus reach per unit of `defocus_softness` at full resolution.
pub const DEFOCUS_REACH_SCALE: f32 = 20.0;

/// What the vignette mask drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VignetteKind {
    /// Luminance-preserving darkening.
    #[default]
    Dark,
    /// Luminance-preserving lightening.
    Light,
    /// Blend toward a blurred copy.
    Defocus,
}

/// Vignette controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteParams {
    /// Module switch.
    pub enable: bool,
    /// Effect type.
    pub kind: VignetteKind,
    /// Darken/lighten strength.
    pub amount: f32,
    /// Affect the centre instead of the edges.
    pub invert: bool,
    /// Radius of the unaffected area.
    pub size: f32,
    /// 0 is a rectangle, 1 an ellipse.
    pub roundness: f32,
    /// Width of the falloff.
    pub softness: f32,
    /// Blend toward the blurred copy for [`VignetteKind::Defocus`].
    pub defocus_amount: f32,
    /// Defocus blur size, scaled by [`DEFOCUS_REACH_SCALE`].
    pub defocus_softness: f32,
    /// Centre offset, -1..1 on each axis.
    pub center: [f32; 2],
    /// Additive tint in the masked area.
    pub tint: [f32; 3],
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            enable: false,
            kind: VignetteKind::Dark,
            amount: 0.0,
            invert: false,
            size: 0.5,
            roundness: 0.5,
            softness: 0.5,
            defocus_amount: 0.0,
            defocus_softness: 0.0,
            center: [0.0, 0.0],
            tint: [0.0, 0.0, 0.0],
        }
    }
}

/// Vignette operator.
#[derive(Debug, Clone)]
pub struct Vignette {
    params: VignetteParams,
}

impl Vignette {
    /// Creates the operator.
    pub fn new(params: VignetteParams) -> Self {
        Self { params }
    }

    /// Mask strength at normalised coordinates `uv` for an image of `aspect`.
    pub fn mask(&self, uv: [f32; 2], aspect: f32) -> f32 {
        let p = &self.params;
        let mut dx = uv[0] - (0.5 + 0.5 * p.center[0]);
        let mut dy = uv[1] - (0.5 + 0.5 * p.center[1]);
        if aspect > 1.0 {
            dx *= aspect;
        } else if aspect > 0.0 {
            dy /= aspect;
        }

        let square = dx.abs().max(dy.abs());
        let dist = square + (dx.hypot(dy) - square) * p.roundness;
        let start = 0.7 * p.size;
        let v = smoothstep(start, start + p.softness.max(0.01), dist);
        if p.invert { 1.0 - v } else { v }
    }

    fn defocus_reach(&self, render_scale: f32) -> f32 {
        (self.params.defocus_softness * DEFOCUS_REACH_SCALE * render_scale).max(0.0)
    }

    fn shade(&self, rgb: [f32; 3], mask: f32) -> [f32; 3] {
        let p = &self.params;
        let l = luminance(rgb);
        let k = match p.kind {
            VignetteKind::Light => 1.0 + p.amount * mask,
            _ => 1.0 - p.amount * mask,
        };
        let mut out = rgb;
        if l > 1e-6 {
            let ratio = (l * k).max(0.0) / l;
            out = out.map(|v| v * ratio);
        }
        if p.tint.iter().any(|&t| t > 0.0) {
            let s = mask * p.amount * 0.5;
            for (v, t) in out.iter_mut().zip(p.tint) {
                *v += t * s;
            }
        }
        out
    }

    fn render_shade(&self, ws: &mut Workspace, frame: &FrameContext) {
        let image = &mut ws.image;
        let b = image.bounds();
        let aspect = frame.aspect();
        for y in 0..image.height() {
            let gy = b.y1 + y as i32;
            for (x, px) in image.row_mut(y).chunks_exact_mut(CHANNELS).enumerate() {
                let mask = self.mask(frame.uv(b.x1 + x as i32, gy), aspect);
                if mask <= 0.0 {
                    continue;
                }
                let out = self.shade([px[0], px[1], px[2]], mask);
                px[..3].copy_from_slice(&out);
            }
        }
    }

    fn render_defocus(&self, ws: &mut Workspace, frame: &FrameContext) {
        let reach = self.defocus_reach(frame.render_scale);
        let amount = self.params.defocus_amount;
        if reach <= 0.0 || amount <= 0.0 {
            return;
        }
        let Workspace { image, effect, scratch } = ws;
        effect.copy_from(image);
        gaussian_blur(effect, scratch, blur_radius(reach));

        let b = image.bounds();
        let aspect = frame.aspect();
        for y in 0..image.height() {
            let gy = b.y1 + y as i32;
            let blurred = effect.row(y);
            for (x, (px, bl)) in
                image.row_mut(y).chunks_exact_mut(CHANNELS).zip(blurred.chunks_exact(CHANNELS)).enumerate()
            {
                let mask = self.mask(frame.uv(b.x1 + x as i32, gy), aspect);
                if mask <= 0.0 {
                    continue;
                }
                let out = mix3([px[0], px[1], px[2]], [bl[0], bl[1], bl[2]], mask * amount);
                px[..3].copy_from_slice(&out);
            }
        }
    }
}

impl SpatialOp for Vignette {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn is_active(&self) -> bool {
        self.params.enable
    }

    fn reach(&self, render_scale: f32) -> Reach {
        match self.params.kind {
            VignetteKind::Defocus if self.defocus_reach(render_scale) > 0.0 => {
                Reach::Add(self.defocus_reach(render_scale))
            }
            _ => Reach::None,
        }
    }

    fn render(&self, ws: &mut Workspace, frame: &FrameContext) {
        trace!(kind = ?self.params.kind, "vignette");
        match self.params.kind {
            VignetteKind::Dark | VignetteKind::Light => self.render_shade(ws, frame),
            VignetteKind::Defocus => self.render_defocus(ws, frame),
        }
    }
}
