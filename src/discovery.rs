// src/discovery.rs

//! Package tree discovery
//!
//! Walks a package directory and splits it into importable sub-packages
//! (directories holding `__init__.py`) and package data. Data directories are
//! attributed to the nearest enclosing sub-package on the filesystem, which is
//! the breakdown legacy installers need in `packages` / `package_data`.

use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

/// Package data key matching every package name
///
/// Always present in [`PackageTree::package_data`] with the `*` pattern, so
/// files no sub-package claims still ship with the root package.
pub const ALL_PACKAGES: &str = "";

/// Marker file that makes a directory importable
pub const INIT_FILE: &str = "__init__.py";

/// Bytecode cache directories, never packaged
pub const BYTECODE_CACHE_DIR: &str = "__pycache__";

/// Result of [`auto_packages`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTree {
    /// Dotted package names, sorted, root included
    pub packages: Vec<String>,
    /// Package name to sorted glob patterns of its data files
    pub package_data: BTreeMap<String, Vec<String>>,
}

/// Discover sub-packages and package data below `pkgdir`
pub fn auto_packages(pkgdir: &Path) -> Result<PackageTree> {
    let pkg_name = pkgdir
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .next_back()
        .unwrap_or_default();

    let mut packages = vec![pkg_name.clone()];
    let mut package_data: BTreeMap<String, Vec<String>> = BTreeMap::new();
    package_data
        .entry(ALL_PACKAGES.to_string())
        .or_default()
        .push("*".to_string());

    // Relative paths (as segments) of sub-packages seen so far in this walk
    let mut subpkg_paths: BTreeSet<Vec<String>> = BTreeSet::new();

    let walker = WalkDir::new(pkgdir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == BYTECODE_CACHE_DIR));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let rel_parts: Vec<String> = entry
            .path()
            .strip_prefix(pkgdir)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        if entry.path().join(INIT_FILE).is_file() {
            let dotted = dotted_name(&pkg_name, &rel_parts);
            debug!("Found sub-package {}", dotted);
            packages.push(dotted);
            subpkg_paths.insert(rel_parts);
        } else {
            let (pkg, from_nearest) = find_nearest_pkg(&pkg_name, &subpkg_paths, &rel_parts);
            package_data
                .entry(pkg)
                .or_default()
                .push(format!("{}/*", from_nearest));
        }
    }

    packages.sort();
    for patterns in package_data.values_mut() {
        patterns.sort();
    }

    Ok(PackageTree {
        packages,
        package_data,
    })
}

/// Find the closest sub-package enclosing a data directory
///
/// Returns the dotted package name and the directory's path relative to that
/// package. Falls back to the root package when no ancestor is a
/// sub-package.
fn find_nearest_pkg(
    pkg_name: &str,
    subpkg_paths: &BTreeSet<Vec<String>>,
    rel_parts: &[String],
) -> (String, String) {
    for i in (1..rel_parts.len()).rev() {
        let ancestor = &rel_parts[..i];
        if subpkg_paths.contains(ancestor) {
            return (dotted_name(pkg_name, ancestor), rel_parts[i..].join("/"));
        }
    }

    (pkg_name.to_string(), rel_parts.join("/"))
}

fn dotted_name(pkg_name: &str, parts: &[String]) -> String {
    let mut name = pkg_name.to_string();
    for part in parts {
        name.push('.');
        name.push_str(part);
    }
    name
}
