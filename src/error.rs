// src/error.rs

//! Error types for sdistkit
//!
//! Every failure aborts the build; nothing here is retried. Filesystem errors
//! are surfaced unchanged so callers see the original OS message.

use crate::metadata::MetadataError;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a source distribution
#[derive(Error, Debug)]
pub enum Error {
    /// The VCS reports untracked or deleted files that would be packaged
    #[error(
        "Untracked or deleted files in the source directory {}. \
         Commit, undo or ignore these files in your VCS: {}",
        root.display(),
        files.join(", ")
    )]
    UntrackedFiles { root: PathBuf, files: Vec<String> },

    /// The source directory is not under any supported VCS
    #[error("Directory {} is not in a recognised version control system", .0.display())]
    VcsNotFound(PathBuf),

    /// The VCS tool could not be run or exited unsuccessfully
    #[error("{vcs} failed: {message}")]
    VcsCommand { vcs: &'static str, message: String },

    /// SOURCE_DATE_EPOCH is set but is not an integer Unix timestamp
    #[error("Invalid SOURCE_DATE_EPOCH value {value:?}: {source}")]
    InvalidSourceDateEpoch {
        value: String,
        source: ParseIntError,
    },

    /// Reading or validating the package metadata failed
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
