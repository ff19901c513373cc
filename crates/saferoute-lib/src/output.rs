use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::risk::{rank_by_risk, relative_danger, EdgeRiskLookup};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// A planned route annotated with its safety ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRoute {
    /// 1-based position in travel-time order (1 = fastest).
    pub path_number: usize,
    pub nodes: Vec<NodeId>,
    pub total_time: f64,
    pub total_risk: f64,
    /// 1-based position in risk order (1 = safest).
    pub safety_rank: usize,
    /// Percent more dangerous than the safest route; `None` when the safest
    /// route has zero risk and the ratio is not comparable.
    pub relative_danger: Option<f64>,
}

impl RankedRoute {
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Structured representation of a route plan that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    pub requested: usize,
    /// Routes in travel-time order.
    pub routes: Vec<RankedRoute>,
}

impl RouteSummary {
    /// Rank the routes of `plan` by risk and attach relative danger figures.
    pub fn from_plan<L: EdgeRiskLookup + ?Sized>(plan: &RoutePlan, lookup: &L) -> Result<Self> {
        if plan.routes.is_empty() {
            return Err(Error::NoPathFound {
                origin: plan.origin,
                destination: plan.destination,
            });
        }

        let ranks = rank_by_risk(&plan.routes, lookup)?;
        let mut risks = vec![0.0; plan.routes.len()];
        let mut safety = vec![0; plan.routes.len()];
        for (position, rank) in ranks.iter().enumerate() {
            risks[rank.index] = rank.risk;
            safety[rank.index] = position + 1;
        }

        let deltas = match relative_danger(&risks) {
            Ok(deltas) => deltas.into_iter().map(Some).collect(),
            Err(Error::UndefinedRiskRatio) => vec![None; risks.len()],
            Err(err) => return Err(err),
        };

        let routes = plan
            .routes
            .iter()
            .enumerate()
            .map(|(index, route)| RankedRoute {
                path_number: index + 1,
                nodes: route.nodes.clone(),
                total_time: route.time,
                total_risk: risks[index],
                safety_rank: safety[index],
                relative_danger: deltas[index],
            })
            .collect();

        Ok(Self {
            algorithm: plan.algorithm,
            origin: plan.origin,
            destination: plan.destination,
            requested: plan.requested,
            routes,
        })
    }

    /// Routes ordered from safest to most dangerous.
    pub fn by_safety(&self) -> Vec<&RankedRoute> {
        let mut routes: Vec<_> = self.routes.iter().collect();
        routes.sort_by_key(|route| route.safety_rank);
        routes
    }

    pub fn safest(&self) -> Option<&RankedRoute> {
        self.routes.iter().find(|route| route.safety_rank == 1)
    }
}

/// Human description of a relative danger figure.
pub fn describe_danger(delta: Option<f64>) -> String {
    match delta {
        Some(percent) => format!("{percent:.2}% more dangerous"),
        None => "not comparable (safest path has zero risk)".to_string(),
    }
}
