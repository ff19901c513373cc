//! SafeRoute library entry points.
//!
//! This crate loads road-segment edge lists, builds the routing graph, finds
//! the fastest route and a bounded set of alternatives, and ranks those routes
//! by accumulated accident risk. Higher-level consumers (the CLI, map
//! renderers) should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod records;
pub mod risk;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph, NodeId};
pub use output::{describe_danger, RankedRoute, RouteSummary};
pub use path::{
    k_shortest_paths, k_shortest_paths_with_limits, shortest_path, shortest_path_with_limits,
    ExcludedEdges, Route, SearchLimits,
};
pub use records::{EdgeList, EdgeRecord};
pub use risk::{rank_by_risk, relative_danger, route_risk, EdgeRiskLookup, RiskIndex, RiskRank};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest, DEFAULT_ALTERNATIVES};
