// src/vcs/hg.rs

//! Mercurial file listings via `hg status`
//!
//! Passing `.` as the file pattern makes hg print paths relative to the
//! working directory instead of the repository root.

use super::{run_listing, Vcs};
use crate::error::Result;
use std::path::Path;

/// Mercurial repositories
#[derive(Debug, Clone, Copy, Default)]
pub struct Mercurial;

impl Vcs for Mercurial {
    fn name(&self) -> &'static str {
        "mercurial"
    }

    fn list_tracked_files(&self, root: &Path) -> Result<Vec<String>> {
        run_listing(
            self.name(),
            "hg",
            &["status", "--clean", "--added", "--modified", "--no-status", "-0", "."],
            root,
        )
    }

    fn list_untracked_deleted_files(&self, root: &Path) -> Result<Vec<String>> {
        run_listing(
            self.name(),
            "hg",
            &["status", "--deleted", "--unknown", "--no-status", "-0", "."],
            root,
        )
    }
}
