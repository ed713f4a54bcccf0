//! Benchmarks for cine-ops blurs and frame rendering.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cine_core::{Bounds, FrameBuffer};
use cine_ops::blur::{gaussian_blur, streak_blur};
use cine_ops::grade::HighlightParams;
use cine_ops::parallel::render_tiles;
use cine_ops::pipeline::{RenderRequest, render};
use cine_ops::LookParams;

fn test_card(w: u32, h: u32) -> FrameBuffer {
    let mut img = FrameBuffer::new(Bounds::from_size(w, h));
    for y in 0..h as usize {
        for x in 0..w as usize {
            let u = x as f32 / w as f32;
            let v = y as f32 / h as f32;
            let hot = if (x / 11 + y / 7) % 13 == 0 { 3.0 } else { 0.0 };
            img.set_pixel(x, y, [u + hot, v + hot, 1.0 - u + hot, 1.0]);
        }
    }
    img
}

fn spatial_look() -> LookParams {
    let mut look = LookParams::default();
    look.mist.enable = true;
    look.mist.strength = 0.3;
    look.glow.enable = true;
    look.glow.amount = 0.4;
    look.halation.enable = true;
    look.halation.amount = 0.3;
    look.halation.radius = 20.0;
    look.vignette.enable = true;
    look.vignette.amount = 0.5;
    look
}

/// Gaussian approximation and streak at growing radii.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    let src = test_card(512, 512);
    let mut temp = FrameBuffer::new(src.bounds());
    group.throughput(Throughput::Elements(src.pixel_count() as u64));

    for radius in [2usize, 10, 40] {
        group.bench_with_input(BenchmarkId::new("gaussian", radius), &radius, |b, &r| {
            b.iter(|| {
                let mut img = src.clone();
                gaussian_blur(&mut img, &mut temp, black_box(r));
                img
            })
        });
        group.bench_with_input(BenchmarkId::new("streak", radius), &radius, |b, &r| {
            b.iter(|| {
                let mut img = src.clone();
                streak_blur(&mut img, &mut temp, black_box(r));
                img
            })
        });
    }

    group.finish();
}

/// Whole-frame rendering: per-pixel only, spatial, and tiled spatial.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let src = test_card(960, 540);
    let request = RenderRequest::full_frame(src.bounds());
    group.throughput(Throughput::Elements(src.pixel_count() as u64));

    let mut pixel_look = LookParams::default();
    pixel_look.film.amount = 0.5;
    pixel_look.grain.enable = true;
    pixel_look.grain.amount = 0.3;
    let mut neutral = LookParams::default();
    neutral.tonal.strength = 0.0;
    neutral.highlight = HighlightParams::bypass();
    let spatial = spatial_look();

    group.bench_function("identity", |b| b.iter(|| render(&src, black_box(&request), &neutral)));
    group.bench_function("pixel_stage", |b| b.iter(|| render(&src, black_box(&request), &pixel_look)));
    group.bench_function("spatial", |b| b.iter(|| render(&src, black_box(&request), &spatial)));
    for rows in [32usize, 135] {
        group.bench_with_input(BenchmarkId::new("tiled_spatial", rows), &rows, |b, &rows| {
            b.iter(|| render_tiles(&src, black_box(&request), &spatial, rows))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_blur, bench_render);
criterion_main!(benches);
