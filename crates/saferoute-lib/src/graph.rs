use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::records::EdgeRecord;

/// Opaque identifier for a road-network node (for example an OSM node id).
pub type NodeId = i64;

/// Outgoing adjacency entry within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub time: f64,
    pub risk: f64,
}

/// Directed road graph used by the route finder.
///
/// The adjacency is shared behind an [`Arc`], so clones are cheap read-only
/// snapshots that can be handed to concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
    edge_count: usize,
}

impl Graph {
    /// Return the outgoing edges for a node, in insertion order.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the directed edge `from -> to`.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of distinct nodes referenced by any edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed adjacency entries.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Build the routing graph from road-segment records.
///
/// Each record inserts `from -> to`; two-way records also insert `to -> from`
/// with the same weights. A later record for an existing `(from, to)` pair
/// replaces the earlier weights instead of adding a parallel entry.
pub fn build_graph(records: &[EdgeRecord]) -> Result<Graph> {
    let mut builder = GraphBuilder::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        builder.add_record(index, record)?;
    }
    let graph = builder.finish();
    info!(
        "built graph with {} nodes and {} directed edges from {} records",
        graph.node_count(),
        graph.edge_count(),
        records.len()
    );
    Ok(graph)
}

#[derive(Debug, Default)]
struct GraphBuilder {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    // (from, to) -> position in adjacency[from], keeps replacement O(1).
    positions: HashMap<(NodeId, NodeId), usize>,
}

impl GraphBuilder {
    fn with_capacity(records: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(records),
            positions: HashMap::with_capacity(records * 2),
        }
    }

    fn add_record(&mut self, index: usize, record: &EdgeRecord) -> Result<()> {
        let (from, to) = validate(index, record)?;
        self.insert(from, to, record.time, record.risk);
        if !record.oneway {
            self.insert(to, from, record.time, record.risk);
        }
        Ok(())
    }

    fn insert(&mut self, from: NodeId, to: NodeId, time: f64, risk: f64) {
        let edge = Edge {
            target: to,
            time,
            risk,
        };
        // Both endpoints become known nodes even when `to` has no outgoing edges.
        self.adjacency.entry(to).or_default();
        let outgoing = self.adjacency.entry(from).or_default();
        match self.positions.entry((from, to)) {
            Entry::Occupied(slot) => outgoing[*slot.get()] = edge,
            Entry::Vacant(slot) => {
                slot.insert(outgoing.len());
                outgoing.push(edge);
            }
        }
    }

    fn finish(self) -> Graph {
        Graph {
            edge_count: self.positions.len(),
            adjacency: Arc::new(self.adjacency),
        }
    }
}

fn validate(index: usize, record: &EdgeRecord) -> Result<(NodeId, NodeId)> {
    let malformed = |reason: String| Error::MalformedEdge { index, reason };

    let from = record
        .from
        .ok_or_else(|| malformed("missing from endpoint".to_string()))?;
    let to = record
        .to
        .ok_or_else(|| malformed("missing to endpoint".to_string()))?;

    if !record.time.is_finite() || record.time < 0.0 {
        return Err(malformed(format!(
            "time must be a finite non-negative number, got {}",
            record.time
        )));
    }
    if !record.risk.is_finite() || record.risk < 0.0 {
        return Err(malformed(format!(
            "risk must be a finite non-negative number, got {}",
            record.risk
        )));
    }

    Ok((from, to))
}
