//! Template command
//!
//! Emits the default look with every key spelled out.

use crate::TemplateArgs;
use anyhow::{Context, Result};
use cine_look::LookFile;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: TemplateArgs, verbose: bool) -> Result<()> {
    trace!("template::run");
    let yaml = LookFile::template().context("Failed to serialise default look")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, yaml).with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose {
                println!("Wrote {}", path.display());
            }
        }
        None => print!("{yaml}"),
    }

    Ok(())
}
