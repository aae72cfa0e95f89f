//! Operator entry point for paddock manifest generation.
//!
//! Thin wiring only: argument parsing, logging init, exit codes. All
//! behavior lives in `paddock-manifest`. Exits non-zero only when a run
//! aborts (in practice: the data directory is missing); finding zero cars
//! is a successful run that writes nothing.

#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use paddock_manifest::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "paddock", about = "Generate car manifests for sim data folders")]
struct Cli {
    /// Base data directory containing one subfolder per sim.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Write one manifest.json at the data root, grouping cars by sim folder.
    Root,
    /// Write a separate manifest.json inside each sim folder.
    PerFolder,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.mode {
        Mode::Root => {
            let report = generate_root_manifest(&cli.data_dir)?;
            if report.cars_written == 0 {
                tracing::info!("no valid cars found, no manifest written");
            }
        }
        Mode::PerFolder => {
            let summary = generate_folder_manifests(&cli.data_dir)?;
            if summary.cars_written == 0 {
                tracing::info!("no valid cars found, no manifests written");
            }
        }
    }

    Ok(())
}
