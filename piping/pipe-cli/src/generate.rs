//! The `generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use pipe_gen::{CouplerElbowWeights, DegreeDistribution, GeneratorConfig, generate_network};
use pipe_io::save_json;
use tracing::info;

use crate::report;

/// Options for `pipegen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Maximum number of nodes to place
    #[arg(long)]
    pub nodes: usize,

    /// Remove cycles so the network is a tree
    #[arg(long)]
    pub tree: bool,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the network as JSON to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Degree weights, one per degree starting at --min-degree
    #[arg(long, value_delimiter = ',')]
    pub weights: Option<Vec<f64>>,

    /// Degree of the first weight
    #[arg(long, requires = "weights")]
    pub min_degree: Option<usize>,

    /// Weight of going straight when one port is forced and one is needed
    #[arg(long)]
    pub coupler: Option<f64>,

    /// Weight of bending when one port is forced and one is needed
    #[arg(long)]
    pub elbow: Option<f64>,

    /// Always choose extra ports uniformly
    #[arg(long)]
    pub no_special_cases: bool,
}

impl GenerateArgs {
    /// Builds the generator configuration these options describe.
    #[must_use]
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(self.nodes)
            .with_tree_mode(self.tree)
            .with_special_cases(!self.no_special_cases);

        if let Some(weights) = &self.weights {
            config = config.with_degrees(DegreeDistribution::new(
                self.min_degree.unwrap_or(1),
                weights.clone(),
            ));
        }

        let defaults = CouplerElbowWeights::default();
        config = config.with_coupler_elbow(CouplerElbowWeights::new(
            self.coupler.unwrap_or(defaults.coupler),
            self.elbow.unwrap_or(defaults.elbow),
        ));

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Runs the command.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = args.to_config();
    let generation = generate_network(&config).context("generation failed")?;

    println!();
    println!("{}", "Generated Pipe Network".bold());
    println!("{}", "======================".bold());
    println!("  mode:        {}", if config.tree_mode() { "tree" } else { "graph" });
    if let Some(seed) = config.seed() {
        println!("  seed:        {seed}");
    }
    println!("  stopped:     {}", generation.termination);
    println!("  saturated:   {}", generation.stats.saturated);
    println!("  severed:     {}", generation.stats.severed_links);
    println!(
        "  two-port:    {} couplers, {} elbows",
        generation.stats.couplers, generation.stats.elbows
    );

    report::print_summary(&generation.table);

    if let Some(path) = &args.output {
        save_json(&generation.table, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote network to {}", path.display());
        println!();
        println!("{} {}", "Saved".green().bold(), path.display());
    }

    Ok(())
}
