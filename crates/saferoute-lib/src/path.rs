use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// A simple path through the graph together with its accumulated travel time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub time: f64,
}

impl Route {
    /// Zero-length route that starts and ends at `node`.
    pub fn trivial(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            time: 0.0,
        }
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs along the route.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Optional bounds applied to a single search.
///
/// The default is unbounded. Alternative-route search keeps complete node
/// sequences in its queue, so large or dense graphs should set
/// `max_expansions` to keep queries predictable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of queue entries expanded before the search gives up.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

struct ExpansionBudget {
    limit: Option<usize>,
    used: usize,
}

impl ExpansionBudget {
    fn new(limits: &SearchLimits) -> Self {
        Self {
            limit: limits.max_expansions,
            used: 0,
        }
    }

    fn spend(&mut self) -> Result<()> {
        self.used += 1;
        match self.limit {
            Some(limit) if self.used > limit => Err(Error::SearchBudgetExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// Directed edges barred from alternative-route expansion within one query.
///
/// Entries are only ever added, so the set size never decreases.
#[derive(Debug, Clone, Default)]
pub struct ExcludedEdges {
    edges: HashSet<(NodeId, NodeId)>,
}

impl ExcludedEdges {
    /// Add `from -> to`; returns `false` if it was already excluded.
    pub fn insert(&mut self, from: NodeId, to: NodeId) -> bool {
        self.edges.insert((from, to))
    }

    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Exclude every edge of `nodes` and, for each newly excluded edge
    /// `(u, v)`, the edges of the same path that continue from `v`.
    pub fn exclude_route(&mut self, nodes: &[NodeId]) {
        let route_edges: Vec<(NodeId, NodeId)> =
            nodes.windows(2).map(|pair| (pair[0], pair[1])).collect();

        for &(from, to) in &route_edges {
            if !self.insert(from, to) {
                continue;
            }
            for &(next_from, next_to) in route_edges.iter().filter(|(start, _)| *start == to) {
                self.insert(next_from, next_to);
            }
        }
    }

    /// Excluded pairs in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<_> = self.edges.iter().copied().collect();
        edges.sort_unstable();
        edges
    }
}

/// Find the fastest route between `origin` and `destination` with Dijkstra's
/// algorithm.
///
/// Among routes of equal travel time the lexicographically smallest node
/// sequence wins, the same rule [`k_shortest_paths`] applies, so both searches
/// agree on the fastest route.
pub fn shortest_path(graph: &Graph, origin: NodeId, destination: NodeId) -> Result<Route> {
    shortest_path_with_limits(graph, origin, destination, &SearchLimits::default())
}

/// [`shortest_path`] with an optional expansion budget.
pub fn shortest_path_with_limits(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    limits: &SearchLimits,
) -> Result<Route> {
    if origin == destination {
        return Ok(Route::trivial(origin));
    }

    // Best known (cost, node sequence) per node; queue entries use the same key.
    let mut best: HashMap<NodeId, PartialRoute> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut budget = ExpansionBudget::new(limits);

    let start = PartialRoute::new(0.0, vec![origin]);
    best.insert(origin, start.clone());
    queue.push(start);

    while let Some(PartialRoute { cost, nodes }) = queue.pop() {
        let Some(&node) = nodes.last() else {
            continue;
        };
        // Lazy deletion: stale entries for finalised nodes are skipped.
        if !visited.insert(node) {
            continue;
        }

        if node == destination {
            debug!(
                "dijkstra finalised {} nodes before reaching {}",
                visited.len(),
                destination
            );
            return Ok(Route {
                nodes,
                time: cost.0,
            });
        }

        budget.spend()?;

        for edge in graph.neighbours(node) {
            let next = edge.target;
            if visited.contains(&next) {
                continue;
            }

            let mut extended = Vec::with_capacity(nodes.len() + 1);
            extended.extend_from_slice(&nodes);
            extended.push(next);
            let candidate = PartialRoute::new(cost.0 + edge.time, extended);

            // Heap order is reversed: greater means cheaper, or equal cost
            // with a smaller node sequence.
            if best.get(&next).map_or(true, |current| candidate > *current) {
                best.insert(next, candidate.clone());
                queue.push(candidate);
            }
        }
    }

    Err(Error::NoPathFound {
        origin,
        destination,
    })
}

/// Find up to `k` routes between `origin` and `destination`, fastest first.
///
/// Partial routes are expanded from a single priority queue ordered by travel
/// time, then by node sequence. Extensions never revisit a node already on the
/// partial route. Once the first (fastest) route completes, its edges are
/// excluded from every later expansion; routes queued before that point may
/// still share edges with it. The exclusion set is fixed after the first route.
///
/// Returns [`Error::InsufficientPaths`] carrying the completed routes when
/// fewer than `k` exist. `k == 0` yields an empty list.
pub fn k_shortest_paths(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    k: usize,
) -> Result<Vec<Route>> {
    k_shortest_paths_with_limits(graph, origin, destination, k, &SearchLimits::default())
}

/// [`k_shortest_paths`] with an optional expansion budget.
pub fn k_shortest_paths_with_limits(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    k: usize,
    limits: &SearchLimits,
) -> Result<Vec<Route>> {
    let mut routes: Vec<Route> = Vec::with_capacity(k);
    if k == 0 {
        return Ok(routes);
    }

    let mut excluded = ExcludedEdges::default();
    let mut queue = BinaryHeap::new();
    let mut budget = ExpansionBudget::new(limits);

    queue.push(PartialRoute::new(0.0, vec![origin]));

    while routes.len() < k {
        let Some(PartialRoute { cost, nodes }) = queue.pop() else {
            break;
        };
        let Some(&last) = nodes.last() else {
            continue;
        };

        if last == destination {
            if routes.is_empty() {
                excluded.exclude_route(&nodes);
                debug!(
                    "fastest route found with cost {:.3}; excluding {} edges",
                    cost.0,
                    excluded.len()
                );
            }
            routes.push(Route {
                nodes,
                time: cost.0,
            });
            continue;
        }

        budget.spend()?;

        for edge in graph.neighbours(last) {
            let next = edge.target;
            if nodes.contains(&next) || excluded.contains(last, next) {
                continue;
            }

            let mut extended = Vec::with_capacity(nodes.len() + 1);
            extended.extend_from_slice(&nodes);
            extended.push(next);
            queue.push(PartialRoute::new(cost.0 + edge.time, extended));
        }
    }

    debug!(
        "alternative search finished with {} of {} routes after {} expansions",
        routes.len(),
        k,
        budget.used
    );

    if routes.len() < k {
        return Err(Error::InsufficientPaths {
            requested: k,
            found: routes.len(),
            routes,
        });
    }

    Ok(routes)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Queue entry for both searches: cost so far plus the full node
/// sequence. Equal costs pop in lexicographic node-sequence order.
#[derive(Clone, Debug, Eq, PartialEq)]
struct PartialRoute {
    cost: FloatOrd,
    nodes: Vec<NodeId>,
}

impl PartialRoute {
    fn new(cost: f64, nodes: Vec<NodeId>) -> Self {
        Self {
            cost: FloatOrd(cost),
            nodes,
        }
    }
}

impl Ord for PartialRoute {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.nodes.cmp(&self.nodes))
    }
}

impl PartialOrd for PartialRoute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_route_adds_every_edge_once() {
        let mut excluded = ExcludedEdges::default();
        excluded.exclude_route(&[1, 2, 3, 4]);

        assert_eq!(excluded.to_sorted_vec(), vec![(1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn excluded_set_never_shrinks() {
        let mut excluded = ExcludedEdges::default();
        let mut sizes = vec![excluded.len()];

        excluded.exclude_route(&[1, 2, 3]);
        sizes.push(excluded.len());
        excluded.insert(1, 2);
        sizes.push(excluded.len());
        excluded.exclude_route(&[3, 4]);
        sizes.push(excluded.len());

        assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]), "{sizes:?}");
        assert_eq!(excluded.len(), 3);
    }

    #[test]
    fn single_node_route_excludes_nothing() {
        let mut excluded = ExcludedEdges::default();
        excluded.exclude_route(&[7]);
        assert!(excluded.is_empty());
    }

    #[test]
    fn partial_routes_tie_break_lexicographically() {
        let mut heap = BinaryHeap::new();
        heap.push(PartialRoute::new(1.0, vec![1, 3]));
        heap.push(PartialRoute::new(1.0, vec![1, 2, 9]));
        heap.push(PartialRoute::new(0.5, vec![1, 9]));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.nodes)).collect();
        assert_eq!(order, vec![vec![1, 9], vec![1, 2, 9], vec![1, 3]]);
    }

    #[test]
    fn budget_allows_exactly_limit_expansions() {
        let mut budget = ExpansionBudget::new(&SearchLimits::with_max_expansions(2));
        assert!(budget.spend().is_ok());
        assert!(budget.spend().is_ok());
        assert!(matches!(
            budget.spend(),
            Err(Error::SearchBudgetExceeded { limit: 2 })
        ));
    }

    #[test]
    fn route_edges_follow_node_order() {
        let route = Route {
            nodes: vec![4, 5, 6],
            time: 2.0,
        };
        assert_eq!(route.edges().collect::<Vec<_>>(), vec![(4, 5), (5, 6)]);
        assert_eq!(route.hop_count(), 2);
        assert_eq!(Route::trivial(4).hop_count(), 0);
    }
}
