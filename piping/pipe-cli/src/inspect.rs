//! The `inspect` command.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pipe_io::load_json;

use crate::report;

/// Runs the command.
pub fn run(path: &Path, list_edges: bool) -> Result<()> {
    let table = load_json(path).with_context(|| format!("failed to load {}", path.display()))?;

    println!();
    println!("{} {}", "Pipe Network".bold(), path.display());
    println!("{}", "============".bold());

    let graph = report::print_summary(&table);

    if list_edges {
        println!();
        println!("{}", "Edges".bold());
        for (u, v) in graph.edges() {
            println!("  {u} -- {v}");
        }
    }

    Ok(())
}
