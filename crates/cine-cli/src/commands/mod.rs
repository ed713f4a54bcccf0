//! CLI command implementations

pub mod inspect;
pub mod render;
pub mod template;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use cine_core::{Bounds, FrameBuffer};
use cine_look::LookFile;
use cine_ops::LookParams;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Loads a PNG as an RGBA frame, code values mapped to `0..1`.
///
/// Values are used as they are stored; no transfer function is removed.
pub fn load_png(path: &Path) -> Result<FrameBuffer> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().with_context(|| format!("Failed to decode: {}", path.display()))?;

    let size = reader.output_buffer_size().context("Cannot determine PNG buffer size")?;
    let mut buf = vec![0u8; size];
    let info = reader.next_frame(&mut buf).with_context(|| format!("Failed to decode: {}", path.display()))?;
    let bytes = &buf[..info.buffer_size()];

    let samples: Vec<f32> = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&v| v as f32 / 255.0).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]) as f32 / 65535.0)
            .collect(),
        depth => bail!("Unsupported PNG bit depth {:?} in {}", depth, path.display()),
    };

    let data: Vec<f32> = match info.color_type {
        png::ColorType::Rgba => samples,
        png::ColorType::Rgb => samples.chunks_exact(3).flat_map(|c| [c[0], c[1], c[2], 1.0]).collect(),
        png::ColorType::GrayscaleAlpha => samples.chunks_exact(2).flat_map(|c| [c[0], c[0], c[0], c[1]]).collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&g| [g, g, g, 1.0]).collect(),
        other => bail!("Unsupported PNG color type {:?} in {}", other, path.display()),
    };

    debug!(path = %path.display(), width = info.width, height = info.height, "loaded PNG");
    FrameBuffer::from_data(Bounds::from_size(info.width, info.height), data)
        .with_context(|| format!("Malformed image: {}", path.display()))
}

/// Saves an RGBA frame as an 8- or 16-bit PNG, clamping to `0..1`.
pub fn save_png(path: &Path, image: &FrameBuffer, sixteen_bit: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_compression(png::Compression::default());

    let bytes: Vec<u8> = if sixteen_bit {
        encoder.set_depth(png::BitDepth::Sixteen);
        image
            .data()
            .iter()
            .flat_map(|&v| ((v.clamp(0.0, 1.0) * 65535.0).round() as u16).to_be_bytes())
            .collect()
    } else {
        encoder.set_depth(png::BitDepth::Eight);
        image.data().iter().map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8).collect()
    };

    let mut writer = encoder.write_header().with_context(|| format!("Failed to save: {}", path.display()))?;
    writer.write_image_data(&bytes).with_context(|| format!("Failed to save: {}", path.display()))?;
    writer.finish().with_context(|| format!("Failed to save: {}", path.display()))?;
    Ok(())
}

/// Look parameters from an optional look file, the default look otherwise.
pub fn load_look(path: Option<&Path>) -> Result<LookParams> {
    let Some(path) = path else {
        return Ok(LookParams::default());
    };
    let file = LookFile::from_file(path).with_context(|| format!("Failed to load look: {}", path.display()))?;
    if let Some(name) = &file.name {
        info!(look = %name, "using look");
    }
    file.to_params().with_context(|| format!("Invalid look: {}", path.display()))
}
