// src/vcs/git.rs

//! Git file listings via `git ls-files`

use super::{run_listing, Vcs};
use crate::error::Result;
use std::path::Path;

/// Git repositories
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

impl Vcs for Git {
    fn name(&self) -> &'static str {
        "git"
    }

    fn list_tracked_files(&self, root: &Path) -> Result<Vec<String>> {
        run_listing(
            self.name(),
            "git",
            &["ls-files", "--recurse-submodules", "-z"],
            root,
        )
    }

    fn list_untracked_deleted_files(&self, root: &Path) -> Result<Vec<String>> {
        run_listing(
            self.name(),
            "git",
            &["ls-files", "--deleted", "--others", "--exclude-standard", "-z"],
            root,
        )
    }
}
