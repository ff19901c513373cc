//! Route planning entry point.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Fastest route only, or fastest plus alternatives
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned routes, fastest first
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```ignore
//! use saferoute_lib::{build_graph, plan_route, EdgeList, RouteRequest};
//!
//! let edges = EdgeList::from_path("roads.csv".as_ref())?;
//! let graph = build_graph(edges.records())?;
//! let plan = plan_route(&graph, &RouteRequest::alternatives(101, 202, 3))?;
//! println!("{} routes", plan.routes.len());
//! ```

mod planner;

pub use planner::{select_planner, AlternativesPlanner, FastestPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{Route, SearchLimits};

/// Number of routes requested when the caller does not specify one.
pub const DEFAULT_ALTERNATIVES: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm, fastest route only.
    Dijkstra,
    /// Fastest route followed by alternatives that avoid its edges.
    #[default]
    Alternatives,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::Alternatives => "alternatives",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: NodeId,
    pub destination: NodeId,
    pub algorithm: RouteAlgorithm,
    /// Total number of routes (fastest included) for [`RouteAlgorithm::Alternatives`].
    pub alternatives: usize,
    pub limits: SearchLimits,
    /// Return the routes that were found instead of failing when fewer than
    /// `alternatives` exist.
    pub allow_partial: bool,
}

impl RouteRequest {
    /// Request only the fastest route.
    pub fn fastest(origin: NodeId, destination: NodeId) -> Self {
        Self {
            origin,
            destination,
            algorithm: RouteAlgorithm::Dijkstra,
            alternatives: 1,
            limits: SearchLimits::default(),
            allow_partial: false,
        }
    }

    /// Request `count` routes, fastest first.
    pub fn alternatives(origin: NodeId, destination: NodeId, count: usize) -> Self {
        Self {
            algorithm: RouteAlgorithm::Alternatives,
            alternatives: count,
            ..Self::fastest(origin, destination)
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.algorithm == RouteAlgorithm::Alternatives && self.alternatives == 0 {
            return Err(Error::InvalidRequest {
                message: "at least one route must be requested".to_string(),
            });
        }
        if self.limits.max_expansions == Some(0) {
            return Err(Error::InvalidRequest {
                message: "expansion budget must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Planned routes returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    /// Number of routes the planner attempted to find.
    pub requested: usize,
    /// Routes in ascending travel time.
    pub routes: Vec<Route>,
}

impl RoutePlan {
    /// Whether fewer routes than requested were found.
    pub fn is_partial(&self) -> bool {
        self.routes.len() < self.requested
    }

    pub fn fastest(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// Compute routes for `request` on `graph`.
///
/// The plan always contains at least one route. An unreachable destination
/// is reported as [`Error::NoPathFound`] for either algorithm.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    request.validate()?;

    let planner = select_planner(request);
    let requested = planner.requested_routes();

    let routes = match planner.find_routes(graph, request.origin, request.destination) {
        Ok(routes) => routes,
        Err(Error::InsufficientPaths { found: 0, .. }) => {
            return Err(Error::NoPathFound {
                origin: request.origin,
                destination: request.destination,
            })
        }
        Err(Error::InsufficientPaths {
            requested,
            found,
            routes,
        }) if request.allow_partial => {
            warn!(
                "only {} of {} requested routes exist between {} and {}",
                found, requested, request.origin, request.destination
            );
            routes
        }
        Err(err) => return Err(err),
    };

    debug!(
        "planned {} route(s) from {} to {} with {}",
        routes.len(),
        request.origin,
        request.destination,
        planner.algorithm()
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        origin: request.origin,
        destination: request.destination,
        requested,
        routes,
    })
}
