// src/commands/mod.rs
//! Command handlers for the sdistkit CLI

mod build;
mod inspect;

pub use build::cmd_build;
pub use inspect::cmd_inspect;

use anyhow::Result;
use sdistkit::METADATA_FILE;
use std::path::{Path, PathBuf};

/// Resolve a CLI path argument to the metadata file it refers to
fn find_metadata_file(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);

    let metadata_path = if path.is_dir() {
        path.join(METADATA_FILE)
    } else {
        path.to_path_buf()
    };

    if !metadata_path.is_file() {
        anyhow::bail!("No {} found at {}", METADATA_FILE, metadata_path.display());
    }

    Ok(metadata_path)
}
