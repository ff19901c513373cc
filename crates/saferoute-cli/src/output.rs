//! Output formatting for route and graph reports.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use saferoute_lib::{describe_danger, Graph, NodeId, RankedRoute, RouteSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON for downstream renderers.
    Json,
}

/// Render a route summary as text: travel times per path, then the safety ranking.
pub fn render_route_text(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}Routes from {} to {}{} (algorithm: {})",
        p.white_bold, summary.origin, summary.destination, p.reset, summary.algorithm
    );
    for route in &summary.routes {
        render_route_line(&mut out, route, p);
    }
    if summary.routes.len() < summary.requested {
        let _ = writeln!(
            out,
            "{}Only {} of {} requested routes exist.{}",
            p.yellow,
            summary.routes.len(),
            summary.requested,
            p.reset
        );
    }

    let _ = writeln!(out, "\n{}Safety ranking:{}", p.white_bold, p.reset);
    for route in summary.by_safety() {
        let color = p.path_color(route.path_number);
        if route.safety_rank == 1 {
            let _ = writeln!(
                out,
                "  {color}The safest path: Path {}{}",
                route.path_number, p.reset
            );
        } else {
            let _ = writeln!(
                out,
                "  {color}Path {} is {}{}",
                route.path_number,
                describe_danger(route.relative_danger),
                p.reset
            );
        }
    }
    out
}

fn render_route_line(out: &mut String, route: &RankedRoute, p: &ColorPalette) {
    let color = p.path_color(route.path_number);
    let label = if route.path_number == 1 {
        " [fastest]"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "{color}Path {}{label}:{} {}",
        route.path_number,
        p.reset,
        join_nodes(&route.nodes, p)
    );
    let _ = writeln!(
        out,
        "    {}time {:.2} min | risk {:.2} | {} hops{}",
        p.gray,
        route.total_time,
        route.total_risk,
        route.hop_count(),
        p.reset
    );
}

fn join_nodes(nodes: &[NodeId], p: &ColorPalette) -> String {
    let separator = format!("{} -> {}", p.gray, p.reset);
    nodes
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Render any serialisable report as pretty-printed JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Node and edge counts for a loaded edge list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphStats {
    pub records: usize,
    pub nodes: usize,
    pub directed_edges: usize,
}

impl GraphStats {
    pub fn new(records: usize, graph: &Graph) -> Self {
        Self {
            records,
            nodes: graph.node_count(),
            directed_edges: graph.edge_count(),
        }
    }
}

/// Render graph statistics as text.
pub fn render_stats_text(stats: &GraphStats, palette: &ColorPalette) -> String {
    format!(
        "{}Edge list{}\n  records:        {}\n  nodes:          {}\n  directed edges: {}\n",
        palette.white_bold,
        palette.reset,
        format_with_separators(stats.records as u64),
        format_with_separators(stats.nodes as u64),
        format_with_separators(stats.directed_edges as u64)
    )
}
