#![allow(dead_code)]

use std::path::PathBuf;

use saferoute_lib::{build_graph, EdgeList, EdgeRecord, Graph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn sample_edges() -> EdgeList {
    EdgeList::from_path(&fixtures_dir().join("sample_roads.csv")).expect("load sample_roads.csv")
}

pub fn sample_graph() -> Graph {
    build_graph(sample_edges().records()).expect("fixture graph builds")
}

/// A->B(1), B->C(1), A->C(5), all one-way, with A=1, B=2, C=3.
pub fn triangle_records() -> Vec<EdgeRecord> {
    vec![
        EdgeRecord::oneway(1, 2, 1.0, 1.0),
        EdgeRecord::oneway(2, 3, 1.0, 1.0),
        EdgeRecord::oneway(1, 3, 5.0, 1.0),
    ]
}

pub fn triangle_graph() -> Graph {
    build_graph(&triangle_records()).expect("triangle builds")
}
