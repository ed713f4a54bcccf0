//! End-to-end pipeline tests for cine-ops.

use approx::assert_abs_diff_eq;
use cine_core::{Bounds, FrameBuffer, luminance};
use cine_ops::grade::{HighlightParams, PixelOp, PixelSite, apply_chain, pixel_chain};
use cine_ops::pipeline::{FrameContext, RenderRequest, apron, is_identity, process_window, render};
use cine_ops::LookParams;

fn neutral_look() -> LookParams {
    let mut look = LookParams::default();
    look.tonal.strength = 0.0;
    look.highlight = HighlightParams::bypass();
    look
}

fn test_card(w: u32, h: u32) -> FrameBuffer {
    let mut img = FrameBuffer::new(Bounds::from_size(w, h));
    for y in 0..h as usize {
        for x in 0..w as usize {
            let u = x as f32 / w as f32;
            let v = y as f32 / h as f32;
            let hot = if (x / 7 + y / 5) % 9 == 0 { 2.5 } else { 0.0 };
            img.set_pixel(x, y, [u + hot, v * 0.8 + hot, (1.0 - u) * 0.6 + hot, 1.0]);
        }
    }
    img
}

#[test]
fn test_apron_example() {
    let mut look = neutral_look();
    look.mist.enable = true;
    look.dreamy.enable = true;
    look.dreamy.radius = 10.0;
    look.glow.radius = 40.0;
    look.halation.enable = true;
    look.halation.radius = 60.0;

    assert_eq!(apron::total_reach_for(&look, 1.0), 66.0);
    assert_eq!(apron::for_look(&look, 1.0), 68);
}

#[test]
fn test_neutral_look_is_bit_identical() {
    let look = neutral_look();
    assert!(is_identity(&look));

    let src = test_card(48, 27);
    let out = render(&src, &RenderRequest::full_frame(src.bounds()), &look);
    for (a, b) in src.pixels().zip(out.pixels()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_disabled_modules_are_idempotent() {
    let src = test_card(32, 18);
    let req = RenderRequest::full_frame(src.bounds());
    let base = render(&src, &req, &neutral_look());

    let mut look = neutral_look();
    look.ingest.enable = false;
    look.ingest.exposure_trim = 1.5;
    look.film.amount = 0.0;
    look.film.highlight_warmth = 1.0;
    look.energy.vibrance = 2.0;
    look.split_tone.strength = 1.0;
    look.grain.amount = 1.0;
    look.dither.enable = true;
    look.dither.amount = 0.0;
    look.glow.amount = 5.0;
    look.vignette.amount = 1.0;

    assert!(is_identity(&look));
    let out = render(&src, &req, &look);
    assert_eq!(out, base);
    assert_eq!(render(&out, &req, &look), base);
}

#[test]
fn test_uniform_frame_equals_pixel_chain() {
    let colour = [0.42, 0.31, 0.2, 1.0];
    let src = FrameBuffer::filled(Bounds::from_size(40, 30), colour);

    let mut look = LookParams::default();
    look.ingest.exposure_trim = 0.3;
    look.ingest.temperature = 0.2;
    look.film.amount = 0.6;
    look.film.preset = cine_ops::grade::FilmPreset::Portra;
    look.tonal.contrast = 1.3;
    look.energy.enable = true;
    look.energy.vibrance = 1.4;
    look.highlight.threshold = 0.4;
    look.split_tone.enable = true;
    look.split_tone.strength = 0.5;

    let req = RenderRequest::new(Bounds::new(5, 5, 35, 25), src.bounds());
    let out = render(&src, &req, &look);

    let frame = FrameContext::new(&req, apron::for_look(&look, 1.0));
    let ops: Vec<Box<dyn PixelOp>> = pixel_chain(&look, &frame).into_iter().filter(|op| op.is_active()).collect();
    let expected = apply_chain(&ops, [colour[0], colour[1], colour[2]], PixelSite { x: 0, y: 0 });

    for p in out.pixels() {
        assert_eq!(&p[..3], &expected[..]);
        assert_eq!(p[3], 1.0);
    }
    assert_ne!(expected, [colour[0], colour[1], colour[2]]);
}

#[test]
fn test_static_grain_is_deterministic() {
    let src = FrameBuffer::filled(Bounds::from_size(64, 64), [0.35, 0.35, 0.35, 1.0]);
    let mut look = neutral_look();
    look.grain.enable = true;
    look.grain.amount = 0.6;
    look.grain.temporal_speed = 0.0;

    let at = |time: f64| render(&src, &RenderRequest::full_frame(src.bounds()).with_time(time), &look);

    let a = at(1.0);
    assert_eq!(a, at(1.0));
    // Frames 24 and 36 fall in the same 24-frame hold.
    assert_eq!(a, at(1.5));
    assert_ne!(a, at(2.0));
    assert!(a.pixels().any(|p| p[0] != 0.35));
}

#[test]
fn test_tiles_are_seamless() {
    let src = test_card(60, 48);
    let mut look = neutral_look();
    look.mist.enable = true;
    look.mist.strength = 0.4;
    look.mist.threshold = 0.3;
    look.glow.enable = true;
    look.glow.amount = 0.5;
    look.glow.radius = 4.0;
    look.vignette.enable = true;
    look.vignette.amount = 0.6;

    let req = RenderRequest::full_frame(src.bounds());
    let whole = render(&src, &req, &look);

    let mut tiled = FrameBuffer::new(src.bounds());
    for band in src.bounds().bands(13) {
        for cols in [Bounds::new(0, band.y1, 25, band.y2), Bounds::new(25, band.y1, 60, band.y2)] {
            process_window(&src, &mut tiled, &RenderRequest { window: cols, ..req }, &look);
        }
    }

    for (a, b) in whole.pixels().zip(tiled.pixels()) {
        for c in 0..4 {
            assert_abs_diff_eq!(a[c], b[c], epsilon = 1e-4);
        }
    }
}

#[test]
fn test_mist_only_lifts() {
    let src = test_card(50, 40);
    let mut look = neutral_look();
    look.mist.enable = true;
    look.mist.strength = 1.5;
    look.mist.threshold = 0.2;
    look.mist.warmth = -0.8;

    let out = render(&src, &RenderRequest::full_frame(src.bounds()), &look);
    for (a, b) in src.pixels().zip(out.pixels()) {
        assert!(luminance([b[0], b[1], b[2]]) >= luminance([a[0], a[1], a[2]]) - 1e-6);
    }
}

#[test]
fn test_render_scale_changes_blur_extent() {
    let src = test_card(80, 40);
    let mut look = neutral_look();
    look.dreamy.enable = true;
    look.dreamy.radius = 20.0;

    let full = process_window(
        &src,
        &mut FrameBuffer::new(src.bounds()),
        &RenderRequest::full_frame(src.bounds()),
        &look,
    );
    let half = process_window(
        &src,
        &mut FrameBuffer::new(src.bounds()),
        &RenderRequest::full_frame(src.bounds()).with_render_scale(0.5),
        &look,
    );
    assert_eq!(full.apron, 22);
    assert_eq!(half.apron, 12);
}
