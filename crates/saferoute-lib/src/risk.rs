//! Safety ranking of candidate routes.
//!
//! Each route's risk is the sum of the per-segment risk scores it traverses.
//! A segment is the unordered pair of its endpoints: a traversal `u -> v`
//! scores every record for `(u, v)` and every record for `(v, u)`. Edge lists
//! exported per direction therefore contribute both rows.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::path::Route;
use crate::records::EdgeRecord;

/// Source of per-segment risk values.
pub trait EdgeRiskLookup {
    /// Total risk recorded on the segment between `from` and `to` in either
    /// direction, or `None` when no record covers it.
    fn edge_risk(&self, from: NodeId, to: NodeId) -> Option<f64>;
}

/// Risk totals keyed by undirected segment.
#[derive(Debug, Clone, Default)]
pub struct RiskIndex {
    risks: HashMap<(NodeId, NodeId), f64>,
}

impl RiskIndex {
    /// Index the risk of every record with both endpoints present. Records
    /// on the same segment accumulate, whatever their direction, duplicates
    /// included.
    pub fn from_records(records: &[EdgeRecord]) -> Self {
        let mut risks: HashMap<(NodeId, NodeId), f64> = HashMap::with_capacity(records.len());
        for record in records {
            let (Some(from), Some(to)) = (record.from, record.to) else {
                continue;
            };
            *risks.entry(segment_key(from, to)).or_insert(0.0) += record.risk;
        }
        Self { risks }
    }

    /// Number of distinct segments.
    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }
}

impl EdgeRiskLookup for RiskIndex {
    fn edge_risk(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.risks.get(&segment_key(from, to)).copied()
    }
}

fn segment_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Aggregate risk of one route, identified by its position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskRank {
    pub index: usize,
    pub risk: f64,
}

/// Sum the risk along `route`.
pub fn route_risk<L: EdgeRiskLookup + ?Sized>(route: &Route, lookup: &L) -> Result<f64> {
    route.edges().try_fold(0.0, |total, (from, to)| {
        lookup
            .edge_risk(from, to)
            .map(|risk| total + risk)
            .ok_or(Error::UnknownEdge { from, to })
    })
}

/// Order routes from safest (lowest aggregate risk) to most dangerous.
/// Routes with equal risk keep their input order.
pub fn rank_by_risk<L: EdgeRiskLookup + ?Sized>(
    routes: &[Route],
    lookup: &L,
) -> Result<Vec<RiskRank>> {
    let mut ranks = routes
        .iter()
        .enumerate()
        .map(|(index, route)| route_risk(route, lookup).map(|risk| RiskRank { index, risk }))
        .collect::<Result<Vec<_>>>()?;

    ranks.sort_by(|a, b| a.risk.total_cmp(&b.risk));
    Ok(ranks)
}

/// Percentage by which each risk exceeds the lowest one:
/// `(risk - min) / min * 100`, in input order.
///
/// Fails with [`Error::UndefinedRiskRatio`] when the lowest risk is zero.
pub fn relative_danger(risks: &[f64]) -> Result<Vec<f64>> {
    let Some(baseline) = risks.iter().copied().min_by(f64::total_cmp) else {
        return Ok(Vec::new());
    };
    if baseline == 0.0 {
        return Err(Error::UndefinedRiskRatio);
    }

    Ok(risks
        .iter()
        .map(|risk| (risk - baseline) / baseline * 100.0)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(nodes: &[NodeId]) -> Route {
        Route {
            nodes: nodes.to_vec(),
            time: 0.0,
        }
    }

    #[test]
    fn reverse_traversal_matches_recorded_segment() {
        let index = RiskIndex::from_records(&[EdgeRecord::twoway(1, 2, 1.0, 4.0)]);
        assert_eq!(index.edge_risk(2, 1), Some(4.0));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn both_directions_of_a_segment_accumulate() {
        let index = RiskIndex::from_records(&[
            EdgeRecord::twoway(1, 2, 1.0, 4.0),
            EdgeRecord::twoway(2, 1, 1.0, 9.0),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.edge_risk(1, 2), Some(13.0));
        assert_eq!(index.edge_risk(2, 1), Some(13.0));
        assert_eq!(route_risk(&route(&[1, 2]), &index).expect("risk"), 13.0);
    }

    #[test]
    fn duplicate_records_are_summed() {
        let index = RiskIndex::from_records(&[
            EdgeRecord::oneway(3, 4, 1.0, 2.0),
            EdgeRecord::oneway(3, 4, 1.0, 5.0),
        ]);
        assert_eq!(index.edge_risk(4, 3), Some(7.0));
    }

    #[test]
    fn records_without_endpoints_are_skipped() {
        let mut broken = EdgeRecord::oneway(1, 2, 1.0, 6.0);
        broken.to = None;
        let index = RiskIndex::from_records(&[broken]);
        assert!(index.is_empty());
        assert_eq!(index.edge_risk(1, 2), None);
    }

    #[test]
    fn missing_segment_is_an_error_not_zero() {
        let index = RiskIndex::from_records(&[EdgeRecord::oneway(1, 2, 1.0, 3.0)]);
        let err = route_risk(&route(&[1, 2, 3]), &index).unwrap_err();
        assert!(matches!(err, Error::UnknownEdge { from: 2, to: 3 }));
    }

    #[test]
    fn trivial_route_has_zero_risk() {
        let index = RiskIndex::default();
        assert_eq!(route_risk(&route(&[5]), &index).expect("risk"), 0.0);
    }

    #[test]
    fn ranks_ascending_and_keeps_ties_stable() {
        let index = RiskIndex::from_records(&[
            EdgeRecord::oneway(1, 2, 1.0, 10.0),
            EdgeRecord::oneway(1, 3, 1.0, 25.0),
            EdgeRecord::oneway(1, 4, 1.0, 10.0),
        ]);
        let routes = [route(&[1, 3]), route(&[1, 2]), route(&[1, 4])];

        let ranks = rank_by_risk(&routes, &index).expect("ranks");
        let order: Vec<_> = ranks.iter().map(|rank| (rank.index, rank.risk)).collect();
        assert_eq!(order, vec![(1, 10.0), (2, 10.0), (0, 25.0)]);
    }

    #[test]
    fn relative_danger_against_safest() {
        let deltas = relative_danger(&[10.0, 25.0]).expect("defined");
        assert_eq!(deltas, vec![0.0, 150.0]);
    }

    #[test]
    fn relative_danger_in_input_order() {
        let deltas = relative_danger(&[30.0, 20.0, 20.0]).expect("defined");
        assert_eq!(deltas, vec![50.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_baseline_is_undefined() {
        assert!(matches!(
            relative_danger(&[0.0, 12.0, 40.0]),
            Err(Error::UndefinedRiskRatio)
        ));
    }

    #[test]
    fn empty_input_has_no_deltas() {
        assert!(relative_danger(&[]).expect("empty").is_empty());
    }
}
