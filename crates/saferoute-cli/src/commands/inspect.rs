//! Inspect command handler: validate an edge list and report graph size.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use saferoute_cli::output::{render_json, render_stats_text, GraphStats, OutputFormat};
use saferoute_cli::terminal::ColorPalette;
use saferoute_lib::{build_graph, EdgeList};

/// Arguments for the inspect command.
#[derive(Debug, Clone, Args)]
pub struct InspectCommandArgs {
    /// CSV edge list with from, to, time, oneway and risk columns.
    #[arg(long, env = "SAFEROUTE_EDGES")]
    pub edges: PathBuf,
}

/// Handle the inspect subcommand.
pub fn handle_inspect_command(
    args: &InspectCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let edges = EdgeList::from_path(&args.edges)
        .with_context(|| format!("failed to load edge list from {}", args.edges.display()))?;
    let graph = build_graph(edges.records()).context("failed to build road graph")?;
    let stats = GraphStats::new(edges.len(), &graph);

    match format {
        OutputFormat::Text => print!("{}", render_stats_text(&stats, palette)),
        OutputFormat::Json => render_json(&stats)?,
    }

    Ok(())
}
