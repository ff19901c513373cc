use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/sample_roads.csv")
        .canonicalize()
        .expect("fixture edge list present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("saferoute");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("SAFEROUTE_EDGES");
    cmd
}

fn route(from: &str, to: &str) -> Command {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--edges")
        .arg(fixture_path())
        .arg("--from")
        .arg(from)
        .arg("--to")
        .arg(to);
    cmd
}

#[test]
fn default_route_lists_three_paths_and_ranking() {
    route("1", "6")
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: alternatives"))
        .stdout(predicate::str::contains("Path 1 [fastest]: 1 -> 2 -> 3 -> 6"))
        .stdout(predicate::str::contains("Path 2: 1 -> 2 -> 3 -> 5 -> 6"))
        .stdout(predicate::str::contains("Path 3: 1 -> 2 -> 5 -> 6"))
        .stdout(predicate::str::contains("The safest path: Path 1"))
        .stdout(predicate::str::contains("Path 2 is 33.33% more dangerous"))
        .stdout(predicate::str::contains("Path 3 is 41.67% more dangerous"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn dijkstra_algorithm_returns_single_route() {
    route("1", "6")
        .arg("--algorithm")
        .arg("dijkstra")
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"))
        .stdout(predicate::str::contains("Path 1 [fastest]: 1 -> 2 -> 3 -> 6"))
        .stdout(predicate::str::contains("time 6.00 min | risk 12.00 | 3 hops"))
        .stdout(predicate::str::contains("Path 2").not());
}

#[test]
fn json_format_emits_ranked_routes() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .arg("route")
        .arg("--edges")
        .arg(fixture_path())
        .arg("--from")
        .arg("1")
        .arg("--to")
        .arg("6")
        .output()
        .expect("run saferoute");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["algorithm"], "alternatives");
    assert_eq!(json["requested"], 3);

    let routes = json["routes"].as_array().expect("routes array");
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0]["nodes"], serde_json::json!([1, 2, 3, 6]));
    assert_eq!(routes[0]["total_risk"], 12.0);
    assert_eq!(routes[0]["safety_rank"], 1);
    assert_eq!(routes[2]["safety_rank"], 3);
}

#[test]
fn requesting_more_routes_than_exist_reports_partial_result() {
    route("1", "6")
        .arg("--alternatives")
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only 5 of 8 requested routes exist."))
        .stdout(predicate::str::contains("Path 5: 1 -> 7 -> 6"))
        .stdout(predicate::str::contains("The safest path: Path 5"));
}

#[test]
fn strict_mode_fails_when_routes_are_missing() {
    route("1", "6")
        .arg("--alternatives")
        .arg("8")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "requested 8 routes but only 5 could be found",
        ));
}

#[test]
fn unreachable_destination_fails() {
    route("1", "9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no route found between 1 and 9"));
}

#[test]
fn unknown_node_is_rejected() {
    route("1", "42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("node 42 does not appear"));
}

#[test]
fn tiny_expansion_budget_is_reported() {
    route("1", "6")
        .arg("--max-expansions")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeded its budget of 1 expansions"));
}

#[test]
fn malformed_edge_list_is_rejected() {
    let temp = tempdir().expect("create temp dir");
    let path = temp.path().join("bad.csv");
    fs::write(&path, "from,to,time,oneway,risk\n1,2,-3,0,1\n").expect("write csv");

    cli()
        .arg("route")
        .arg("--edges")
        .arg(&path)
        .arg("--from")
        .arg("1")
        .arg("--to")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to build road graph"));
}

#[test]
fn edges_path_can_come_from_environment() {
    cli()
        .env("SAFEROUTE_EDGES", fixture_path())
        .arg("route")
        .arg("--from")
        .arg("1")
        .arg("--to")
        .arg("6")
        .arg("--algorithm")
        .arg("dijkstra")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 -> 2 -> 3 -> 6"));
}

#[test]
fn inspect_reports_graph_size() {
    cli()
        .arg("inspect")
        .arg("--edges")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("records:        11"))
        .stdout(predicate::str::contains("nodes:          9"))
        .stdout(predicate::str::contains("directed edges: 18"));
}

#[test]
fn inspect_json_output() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .arg("inspect")
        .arg("--edges")
        .arg(fixture_path())
        .output()
        .expect("run saferoute");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["records"], 11);
    assert_eq!(json["nodes"], 9);
    assert_eq!(json["directed_edges"], 18);
}
