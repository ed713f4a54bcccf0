//! Inspect command
//!
//! Reports what a look costs before rendering it: apron, host region of
//! interest, active stages and scratch memory for a window.

use crate::InspectArgs;
use anyhow::{Result, ensure};
use cine_core::{Bounds, CHANNELS};
use cine_ops::fx::spatial_chain;
use cine_ops::pipeline::{active_stages, apron, is_identity};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: InspectArgs, verbose: bool) -> Result<()> {
    trace!(scale = args.scale, width = args.width, height = args.height, "inspect::run");
    ensure!(args.scale.is_finite() && args.scale > 0.0, "render scale must be positive, got {}", args.scale);

    let look = super::load_look(args.look.as_deref())?;
    let window = Bounds::from_size(args.width, args.height);

    let pad = apron::for_look(&look, args.scale);
    let reach = apron::total_reach_for(&look, args.scale);
    let roi = apron::region_of_interest(&look, window);
    let spatial = spatial_chain(&look).iter().any(|op| op.is_active());
    let buffer = window.expand(pad);
    let buffers = if spatial { 3 } else { 1 };
    let scratch = buffer.area() * CHANNELS * std::mem::size_of::<f32>() * buffers;

    println!("Apron:          {} px (reach {:.2} at scale {})", pad, reach, args.scale);
    println!("ROI margin:     {:.1} px", apron::roi_margin(&look));
    println!("Identity:       {}", if is_identity(&look) { "yes" } else { "no" });
    let stages = active_stages(&look);
    println!("Active stages:  {}", if stages.is_empty() { "(none)".to_string() } else { stages.join(", ") });

    if verbose {
        println!("Window:         {}", window);
        println!("Buffer:         {}", buffer);
        println!("Source ROI:     {}", roi);
        println!("Scratch:        {} buffers, {:.1} MB", buffers, scratch as f64 / (1024.0 * 1024.0));
    }

    Ok(())
}
