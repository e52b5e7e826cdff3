// src/commands/build.rs

//! Source distribution building

use super::find_metadata_file;
use anyhow::{Context, Result};
use sdistkit::{BuildOptions, SdistBuilder};
use std::path::Path;
use tracing::info;

/// Build a source distribution for the project at `path`
pub fn cmd_build(path: &str, output: Option<&str>) -> Result<()> {
    let metadata_path = find_metadata_file(path)?;

    let options = BuildOptions::from_env().context("Failed to read build options")?;
    if let Some(epoch) = options.source_date_epoch {
        info!("Using SOURCE_DATE_EPOCH={} for all timestamps", epoch);
    }

    let builder = SdistBuilder::new(&metadata_path, options)
        .with_context(|| format!("Failed to load {}", metadata_path.display()))?;

    let target = builder
        .build(output.map(Path::new))
        .context("Failed to build source distribution")?;

    println!("{}", target.display());
    Ok(())
}
