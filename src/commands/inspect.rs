// src/commands/inspect.rs

//! Show what a build would generate without writing anything

use super::find_metadata_file;
use anyhow::{Context, Result};
use sdistkit::{BuildOptions, SdistBuilder};

/// Print packages, package data and normalized requirements
pub fn cmd_inspect(path: &str) -> Result<()> {
    let metadata_path = find_metadata_file(path)?;
    let builder = SdistBuilder::new(&metadata_path, BuildOptions::default())
        .with_context(|| format!("Failed to load {}", metadata_path.display()))?;

    let metadata = builder.metadata();
    println!("{} {}", metadata.name(), metadata.version);
    println!("  Module: {} ({})", builder.module().name, builder.module().path.display());

    match builder.package_tree().context("Failed to discover packages")? {
        Some(tree) => {
            println!("  Packages:");
            for package in &tree.packages {
                println!("    {}", package);
            }
            println!("  Package data:");
            for (package, patterns) in &tree.package_data {
                let label = if package.is_empty() { "(all)" } else { package.as_str() };
                println!("    {}: {}", label, patterns.join(", "));
            }
        }
        None => println!("  Single-file module"),
    }

    let requirements = builder.requirements();
    if requirements.is_empty() {
        println!("  Requirements: none");
    } else {
        println!("  Requirements:");
        for req in &requirements.install_requires {
            println!("    {}", req);
        }
        for (key, reqs) in &requirements.extras_require {
            println!("    [{}] {}", key, reqs.join(", "));
        }
    }

    Ok(())
}
