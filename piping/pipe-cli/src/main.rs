//! Pipe network generator and inspector.
//!
//! # Commands
//!
//! - `pipegen generate --nodes <N>` - Grow a network and print a summary
//! - `pipegen inspect <FILE>` - Summarize a saved network without regenerating
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `info`).

mod generate;
mod inspect;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Lattice pipe network generator
#[derive(Parser)]
#[command(name = "pipegen")]
#[command(about = "Generate and inspect lattice pipe networks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grow a new network from the origin
    Generate(generate::GenerateArgs),

    /// Summarize a saved network
    Inspect {
        /// JSON file written by `generate --output`
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Also list every edge
        #[arg(long)]
        edges: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Inspect { file, edges } => inspect::run(&file, edges),
    }
}
