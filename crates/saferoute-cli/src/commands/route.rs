//! Route command handler for computing and ranking routes between two nodes.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use saferoute_lib::{
    build_graph, plan_route, EdgeList, NodeId, RiskIndex, RouteAlgorithm, RouteRequest,
    RouteSummary, SearchLimits, DEFAULT_ALTERNATIVES,
};
use saferoute_cli::output::{render_json, render_route_text, OutputFormat};
use saferoute_cli::terminal::ColorPalette;

/// Algorithm choice exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Fastest route only.
    Dijkstra,
    /// Fastest route plus alternatives that avoid its roads.
    #[default]
    Alternatives,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::Alternatives => RouteAlgorithm::Alternatives,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// CSV edge list with from, to, time, oneway and risk columns.
    #[arg(long, env = "SAFEROUTE_EDGES")]
    pub edges: PathBuf,
    /// Origin node id.
    #[arg(long = "from", allow_hyphen_values = true)]
    pub from: NodeId,
    /// Destination node id.
    #[arg(long = "to", allow_hyphen_values = true)]
    pub to: NodeId,
    /// Algorithm to use when planning the route.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Alternatives)]
    pub algorithm: AlgorithmArg,
    /// Total number of routes to find, fastest included.
    #[arg(long, short = 'k', default_value_t = DEFAULT_ALTERNATIVES)]
    pub alternatives: usize,
    /// Give up after expanding this many partial routes.
    #[arg(long)]
    pub max_expansions: Option<usize>,
    /// Fail instead of showing fewer routes than requested.
    #[arg(long)]
    pub strict: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = match RouteAlgorithm::from(self.algorithm) {
            RouteAlgorithm::Dijkstra => RouteRequest::fastest(self.from, self.to),
            RouteAlgorithm::Alternatives => {
                RouteRequest::alternatives(self.from, self.to, self.alternatives)
            }
        };
        let limits = SearchLimits {
            max_expansions: self.max_expansions,
        };
        request.with_limits(limits).allow_partial(!self.strict)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    args: &RouteCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let edges = EdgeList::from_path(&args.edges)
        .with_context(|| format!("failed to load edge list from {}", args.edges.display()))?;
    let graph = build_graph(edges.records()).context("failed to build road graph")?;

    for node in [args.from, args.to] {
        if !graph.contains_node(node) {
            bail!(
                "node {} does not appear in {}",
                node,
                args.edges.display()
            );
        }
    }

    let request = args.to_request();
    let plan = plan_route(&graph, &request)
        .with_context(|| format!("failed to plan a route from {} to {}", args.from, args.to))?;

    let risks = RiskIndex::from_records(edges.records());
    let summary = RouteSummary::from_plan(&plan, &risks).context("failed to rank routes by risk")?;

    match format {
        OutputFormat::Text => print!("{}", render_route_text(&summary, palette)),
        OutputFormat::Json => render_json(&summary)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            edges: PathBuf::from("roads.csv"),
            from: 1,
            to: 2,
            algorithm: AlgorithmArg::Alternatives,
            alternatives: 4,
            max_expansions: Some(100),
            strict: false,
        }
    }

    #[test]
    fn alternatives_args_map_to_request() {
        let request = args().to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::Alternatives);
        assert_eq!(request.alternatives, 4);
        assert_eq!(request.limits.max_expansions, Some(100));
        assert!(request.allow_partial);
    }

    #[test]
    fn dijkstra_args_ignore_alternative_count() {
        let request = RouteCommandArgs {
            algorithm: AlgorithmArg::Dijkstra,
            strict: true,
            ..args()
        }
        .to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(request.alternatives, 1);
        assert!(!request.allow_partial);
    }
}
