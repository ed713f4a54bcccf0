//! Render command
//!
//! Grades a PNG through a look, optionally in parallel tiles.

use std::time::Instant;

use crate::RenderArgs;
use anyhow::{Context, Result};
use cine_ops::parallel::render_tiles;
use cine_ops::pipeline::{RenderRequest, active_stages, apron, render};
use tracing::{debug, info, trace};

pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "render::run");

    let look = super::load_look(args.look.as_deref())?;
    let source = super::load_png(&args.input)?;

    let request = RenderRequest::full_frame(source.bounds())
        .with_render_scale(args.scale)
        .with_time(args.time);
    request.validate().context("Invalid render request")?;

    let stages = active_stages(&look);
    info!(
        width = source.width(),
        height = source.height(),
        apron = apron::for_look(&look, args.scale),
        stages = stages.len(),
        "Rendering"
    );
    if verbose {
        println!("Rendering {} through: {}", args.input.display(), stages.join(", "));
    }

    let start = Instant::now();
    let output = if args.tile_rows == 0 {
        render(&source, &request, &look)
    } else {
        render_tiles(&source, &request, &look, args.tile_rows).context("Tiled render failed")?
    };
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "render finished");

    super::save_png(&args.output, &output, args.sixteen_bit)?;

    if verbose {
        println!("Wrote {}", args.output.display());
    }

    Ok(())
}
