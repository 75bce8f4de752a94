//! Shared network summary output.

use owo_colors::OwoColorize;
use pipe_gen::PipeGraph;
use pipe_types::{FittingKind, NodeTable};

/// Prints node, edge, component and fitting counts for `table`.
pub fn print_summary(table: &NodeTable) -> PipeGraph {
    let graph = PipeGraph::from_table(table);

    println!("  nodes:       {}", graph.node_count());
    println!("  edges:       {}", graph.edge_count());
    println!("  components:  {}", graph.component_count());
    println!("  open ends:   {}", graph.open_end_count());
    println!("  max degree:  {}", max_degree(&graph));
    println!(
        "  acyclic:     {}",
        if graph.is_forest() { "yes".green().to_string() } else { "no".yellow().to_string() }
    );
    if !graph.is_reciprocal() {
        println!("  {}", "warning: some ports are not answered by their neighbor".yellow());
    }
    if let Some((lo, hi)) = graph.bounds() {
        println!("  bounds:      {lo} .. {hi}");
    }

    let rows = fitting_rows(&graph);
    if !rows.is_empty() {
        println!();
        println!("{}", "Fittings".bold());
        for (kind, count) in rows {
            println!("  {:<16} {count}", kind.name());
        }
    }

    graph
}

/// Largest number of linked neighbors of any node.
fn max_degree(graph: &PipeGraph) -> usize {
    graph
        .nodes()
        .iter()
        .map(|node| graph.degree(node.id))
        .max()
        .unwrap_or(0)
}

/// Fitting counts ordered by port count, omitting kinds that never occur.
fn fitting_rows(graph: &PipeGraph) -> Vec<(FittingKind, usize)> {
    let histogram = graph.fitting_histogram();
    FittingKind::ALL
        .into_iter()
        .filter_map(|kind| histogram.get(&kind).map(|&count| (kind, count)))
        .collect()
}
