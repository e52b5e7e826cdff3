// src/sdist/mod.rs
//! Source distribution builder
//!
//! Builds `<name>-<version>.tar.gz` from the files the VCS tracks, plus a
//! generated `PKG-INFO` and (unless the repository has its own) a generated
//! `setup.py`. With `SOURCE_DATE_EPOCH` set, two builds of the same tree
//! produce byte-identical archives.

mod archive;

pub use archive::{clean_header, normalize_file_permissions, ArchiveWriter};

use crate::discovery::{auto_packages, PackageTree, BYTECODE_CACHE_DIR};
use crate::error::{Error, Result};
use crate::legacy::{self, Layout};
use crate::metadata::{Metadata, MetadataFile, Module};
use crate::requirements::{convert_requires, Requirements};
use crate::vcs::{identify_vcs, Vcs};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable holding the build-wide timestamp override
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Options that affect the bytes of the archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Unix timestamp stamped on every entry and on the gzip header
    pub source_date_epoch: Option<u64>,
}

impl BuildOptions {
    /// Read options from the process environment
    pub fn from_env() -> Result<Self> {
        let value = std::env::var_os(SOURCE_DATE_EPOCH).map(|v| v.to_string_lossy().into_owned());
        Self::from_source_date_epoch(value.as_deref())
    }

    /// Options for a raw `SOURCE_DATE_EPOCH` value
    ///
    /// Unset or empty means no override; anything else must be an integer.
    pub fn from_source_date_epoch(value: Option<&str>) -> Result<Self> {
        let source_date_epoch = match value.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<u64>().map_err(|source| {
                Error::InvalidSourceDateEpoch {
                    value: raw.to_string(),
                    source,
                }
            })?),
        };
        Ok(Self { source_date_epoch })
    }
}

/// Whether a VCS path belongs in the archive
///
/// Excludes the `dist/` output directory, bytecode caches and `.pyc` files.
pub fn include_path(path: &str) -> bool {
    !(path.starts_with("dist/")
        || path.split('/').any(|segment| segment == BYTECODE_CACHE_DIR)
        || path.ends_with(".pyc"))
}

/// Source distribution builder
pub struct SdistBuilder {
    metadata_path: PathBuf,
    srcdir: PathBuf,
    file: MetadataFile,
    module: Module,
    options: BuildOptions,
    vcs: Option<Box<dyn Vcs>>,
}

impl SdistBuilder {
    /// Create a builder for the project described by `metadata_path`
    ///
    /// The source directory is the directory holding the metadata file.
    pub fn new(metadata_path: &Path, options: BuildOptions) -> Result<Self> {
        let file = MetadataFile::from_file(metadata_path)?;
        let srcdir = match metadata_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let module = Module::resolve(&file.metadata.module, &srcdir)?;
        debug!(
            "Module {} at {} (package: {})",
            module.name,
            module.path.display(),
            module.is_package
        );

        Ok(Self {
            metadata_path: metadata_path.to_path_buf(),
            srcdir,
            file,
            module,
            options,
            vcs: None,
        })
    }

    /// Use a specific VCS instead of detecting one from the source directory
    pub fn with_vcs(mut self, vcs: Box<dyn Vcs>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.file.metadata
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// `<name>-<version>`: archive stem and top-level directory inside it
    pub fn dist_dirname(&self) -> String {
        format!("{}-{}", self.metadata().name(), self.metadata().version)
    }

    /// Sub-packages and package data, for package-directory modules
    pub fn package_tree(&self) -> Result<Option<PackageTree>> {
        if self.module.is_package {
            Ok(Some(auto_packages(&self.module.path)?))
        } else {
            Ok(None)
        }
    }

    /// Requirements regrouped for `setup.py`
    pub fn requirements(&self) -> Requirements {
        convert_requires(self.metadata().reqs_by_extra())
    }

    /// Tracked files to package, filtered and sorted
    ///
    /// Fails if the VCS reports untracked or deleted files that would
    /// otherwise have been packaged.
    pub fn find_tracked_files(&self) -> Result<Vec<String>> {
        let identified;
        let vcs: &dyn Vcs = match &self.vcs {
            Some(vcs) => vcs.as_ref(),
            None => {
                identified = identify_vcs(&self.srcdir)?;
                identified.as_ref()
            }
        };

        let untracked_deleted: Vec<String> = vcs
            .list_untracked_deleted_files(&self.srcdir)?
            .into_iter()
            .filter(|p| include_path(p))
            .collect();
        if !untracked_deleted.is_empty() {
            return Err(Error::UntrackedFiles {
                root: self.srcdir.clone(),
                files: untracked_deleted,
            });
        }

        let files = vcs.list_tracked_files(&self.srcdir)?;
        info!("Found {} files tracked in {}", files.len(), vcs.name());

        let mut files: Vec<String> = files.into_iter().filter(|p| include_path(p)).collect();
        files.sort();
        Ok(files)
    }

    /// Render the legacy `setup.py`
    pub fn make_setup_py(&self) -> Result<String> {
        let tree = self.package_tree()?;
        let layout = match &tree {
            Some(tree) => Layout::Package(tree),
            None => Layout::Module(&self.module.name),
        };
        let entry_points = legacy::prep_entry_points(&self.file.entry_points());

        Ok(legacy::make_setup_py(
            self.metadata(),
            layout,
            &self.requirements(),
            &entry_points,
        ))
    }

    /// Render `PKG-INFO`
    pub fn make_pkg_info(&self) -> String {
        legacy::make_pkg_info(self.metadata())
    }

    /// Build the archive into `target_dir` (default: `dist/` beside the
    /// metadata file) and return its absolute path
    pub fn build(&self, target_dir: Option<&Path>) -> Result<PathBuf> {
        let target_dir = target_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.srcdir.join("dist"));

        // Everything that can fail on the source side happens before the
        // destination is touched
        let files_to_add = self.find_tracked_files()?;
        let setup_py = if files_to_add.iter().any(|f| f == "setup.py") {
            warn!("Using setup.py from repository, not generating setup.py");
            None
        } else {
            Some(self.make_setup_py()?)
        };
        let pkg_info = self.make_pkg_info();

        fs::create_dir_all(&target_dir)?;
        let tf_dir = self.dist_dirname();
        let target = target_dir.canonicalize()?.join(format!("{}.tar.gz", tf_dir));

        let mut archive = ArchiveWriter::create(&target, self.options.source_date_epoch)?;

        for relpath in &files_to_add {
            let path = self.srcdir.join(relpath);
            archive.append_path(&path, &format!("{}/{}", tf_dir, relpath))?;
        }

        if let Some(setup_py) = setup_py {
            info!("Writing generated setup.py");
            archive.append_bytes(&format!("{}/setup.py", tf_dir), setup_py.as_bytes())?;
        }

        archive.append_bytes(&format!("{}/PKG-INFO", tf_dir), pkg_info.as_bytes())?;

        let target = archive.finish()?;
        info!("Built sdist: {}", target.display());
        Ok(target)
    }
}
