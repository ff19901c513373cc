//! Route planning strategies implementing the Strategy pattern.
//!
//! The `RoutePlanner` trait lets `plan_route` stay agnostic of whether a
//! request asks for the single fastest route or a set of alternatives.

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::path::{k_shortest_paths_with_limits, shortest_path_with_limits, Route, SearchLimits};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Number of routes this planner tries to produce.
    fn requested_routes(&self) -> usize;

    /// Execute the search on the given graph, fastest route first.
    fn find_routes(&self, graph: &Graph, origin: NodeId, destination: NodeId)
        -> Result<Vec<Route>>;
}

/// Dijkstra planner returning only the fastest route.
#[derive(Debug, Clone, Default)]
pub struct FastestPlanner {
    limits: SearchLimits,
}

impl FastestPlanner {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl RoutePlanner for FastestPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn requested_routes(&self) -> usize {
        1
    }

    fn find_routes(
        &self,
        graph: &Graph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<Route>> {
        shortest_path_with_limits(graph, origin, destination, &self.limits).map(|route| vec![route])
    }
}

/// Planner producing the fastest route plus alternatives that avoid its edges.
#[derive(Debug, Clone)]
pub struct AlternativesPlanner {
    count: usize,
    limits: SearchLimits,
}

impl AlternativesPlanner {
    pub fn new(count: usize, limits: SearchLimits) -> Self {
        Self { count, limits }
    }
}

impl RoutePlanner for AlternativesPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Alternatives
    }

    fn requested_routes(&self) -> usize {
        self.count
    }

    fn find_routes(
        &self,
        graph: &Graph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<Route>> {
        k_shortest_paths_with_limits(graph, origin, destination, self.count, &self.limits)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Dijkstra => Box::new(FastestPlanner::new(request.limits)),
        RouteAlgorithm::Alternatives => Box::new(AlternativesPlanner::new(
            request.alternatives,
            request.limits,
        )),
    }
}
