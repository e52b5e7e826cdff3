// src/cli/mod.rs
//! CLI definitions for sdistkit
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "sdistkit")]
#[command(author, version, about = "Build reproducible source distributions", long_about = None)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a source distribution (.tar.gz)
    Build {
        /// Path to sdist.toml or the directory containing it
        #[arg(default_value = ".")]
        path: String,

        /// Output directory (defaults to dist/ beside sdist.toml)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show discovered packages, package data and normalized requirements
    Inspect {
        /// Path to sdist.toml or the directory containing it
        #[arg(default_value = ".")]
        path: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
