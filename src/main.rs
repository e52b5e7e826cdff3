// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Build { path, output }) => commands::cmd_build(&path, output.as_deref()),
        Some(Commands::Inspect { path }) => commands::cmd_inspect(&path),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "sdistkit", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("sdistkit v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'sdistkit --help' for usage information");
            Ok(())
        }
    }
}
