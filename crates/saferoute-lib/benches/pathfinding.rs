use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use saferoute_lib::{
    build_graph, k_shortest_paths, plan_route, shortest_path, EdgeRecord, Graph, NodeId,
    RouteRequest,
};
use std::hint::black_box;

const GRID: i64 = 5;

fn node(row: i64, col: i64) -> NodeId {
    row * GRID + col
}

/// Two-way grid with slightly uneven weights so routes are not all tied.
fn grid_records() -> Vec<EdgeRecord> {
    let mut records = Vec::new();
    for row in 0..GRID {
        for col in 0..GRID {
            let weight = 1.0 + ((row * 7 + col * 3) % 5) as f64 * 0.1;
            if col + 1 < GRID {
                records.push(EdgeRecord::twoway(
                    node(row, col),
                    node(row, col + 1),
                    weight,
                    (row % 3) as f64,
                ));
            }
            if row + 1 < GRID {
                records.push(EdgeRecord::twoway(
                    node(row, col),
                    node(row + 1, col),
                    weight + 0.05,
                    (col % 4) as f64,
                ));
            }
        }
    }
    records
}

static RECORDS: Lazy<Vec<EdgeRecord>> = Lazy::new(grid_records);
static GRAPH: Lazy<Graph> = Lazy::new(|| build_graph(&RECORDS).expect("grid builds"));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;
    let origin = node(0, 0);
    let destination = node(GRID - 1, GRID - 1);

    c.bench_function("build_grid_graph", |b| {
        b.iter(|| black_box(build_graph(&RECORDS).expect("grid builds").edge_count()));
    });

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        b.iter(|| {
            let route = shortest_path(graph, origin, destination).expect("route exists");
            black_box(route.hop_count())
        });
    });

    c.bench_function("alternatives_k3_grid_corner_to_corner", |b| {
        b.iter(|| {
            let routes = k_shortest_paths(graph, origin, destination, 3).expect("routes exist");
            black_box(routes.len())
        });
    });

    c.bench_function("plan_route_alternatives_grid", |b| {
        let request = RouteRequest::alternatives(origin, node(2, 3), 3);
        b.iter(|| {
            let plan = plan_route(graph, &request).expect("plan");
            black_box(plan.routes.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
