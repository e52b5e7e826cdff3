// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: project path
fn path_arg() -> Arg {
    Arg::new("path")
        .default_value(".")
        .help("Path to sdist.toml or the directory containing it")
}

fn build_cli() -> Command {
    Command::new("sdistkit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("sdistkit Contributors")
        .about("Build reproducible source distributions")
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Show debug output"),
        )
        .subcommand(
            Command::new("build")
                .about("Build a source distribution (.tar.gz)")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .help("Output directory (defaults to dist/ beside sdist.toml)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show discovered packages, package data and normalized requirements")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    if let Err(e) = fs::write(man_dir.join("sdistkit.1"), buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
