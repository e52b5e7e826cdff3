// src/lib.rs

//! sdistkit: reproducible source distributions for Python packages
//!
//! Builds a `<name>-<version>.tar.gz` source distribution from a project
//! described by `sdist.toml`.
//!
//! # Architecture
//!
//! - VCS-first: only files the VCS tracks are packaged, and untracked or
//!   deleted files abort the build
//! - Discovery: sub-packages and package data are derived from the directory
//!   structure, not declared
//! - Legacy manifests: a generated `setup.py` and `PKG-INFO` keep pre-PEP 517
//!   tooling working
//! - Reproducible: fixed ownership, normalized modes and `SOURCE_DATE_EPOCH`
//!   timestamps make rebuilds byte-identical

pub mod discovery;
mod error;
pub mod legacy;
pub mod metadata;
pub mod requirements;
pub mod sdist;
pub mod vcs;

pub use discovery::{auto_packages, PackageTree, ALL_PACKAGES};
pub use error::{Error, Result};
pub use metadata::{Metadata, MetadataError, MetadataFile, Module, METADATA_FILE};
pub use requirements::{convert_requires, parse_requirement, Requirements, NO_EXTRA};
pub use sdist::{include_path, BuildOptions, SdistBuilder, SOURCE_DATE_EPOCH};
pub use vcs::{identify_vcs, Git, Mercurial, Vcs};
