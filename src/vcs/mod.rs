// src/vcs/mod.rs
//! Version control collaborators
//!
//! The archive builder only packages what the VCS tracks, and refuses to build
//! when the VCS reports untracked or deleted files. Each supported system
//! implements [`Vcs`]; [`identify_vcs`] picks one for a source directory.

mod git;
mod hg;

pub use git::Git;
pub use hg::Mercurial;

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A version control system that can report file status
pub trait Vcs {
    /// Short human-readable name (used in log messages)
    fn name(&self) -> &'static str;

    /// Files tracked by the VCS, as `/`-separated paths relative to `root`
    fn list_tracked_files(&self, root: &Path) -> Result<Vec<String>>;

    /// Files that are untracked (and not ignored) or deleted, relative to `root`
    fn list_untracked_deleted_files(&self, root: &Path) -> Result<Vec<String>>;
}

/// Find the VCS managing `root`
///
/// Checks `root` and then each ancestor for a `.git` or `.hg` entry.
pub fn identify_vcs(root: &Path) -> Result<Box<dyn Vcs>> {
    let root = root.canonicalize()?;
    for dir in root.ancestors() {
        if dir.join(".git").exists() {
            debug!("Found git repository at {}", dir.display());
            return Ok(Box::new(Git));
        }
        if dir.join(".hg").is_dir() {
            debug!("Found Mercurial repository at {}", dir.display());
            return Ok(Box::new(Mercurial));
        }
    }

    Err(Error::VcsNotFound(root))
}

/// Run a VCS command in `root` and split its NUL-separated output
fn run_listing(vcs: &'static str, program: &str, args: &[&str], root: &Path) -> Result<Vec<String>> {
    debug!("Running {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| Error::VcsCommand {
            vcs,
            message: format!("failed to run {}: {}. Is it installed?", program, e),
        })?;

    if !output.status.success() {
        return Err(Error::VcsCommand {
            vcs,
            message: format!(
                "{} {} exited with {}: {}",
                program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(split_nul(&output.stdout))
}

/// Split `-z`/`-0` style output into paths, normalizing separators to `/`
fn split_nul(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|b| *b == 0)
        .filter(|s| !s.is_empty())
        .map(|s| String::from_utf8_lossy(s).replace('\\', "/"))
        .collect()
}
