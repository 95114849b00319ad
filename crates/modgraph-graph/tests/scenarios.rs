//! Known-topology regression tests for the dependency engine.
//!
//! Each test uses a hand-crafted edge list with analytically known levels,
//! cycles and orderings.

use modgraph_core::{CompatibilityRecord, CompatibilityStatus, DependencyEdge, Snapshot};
use modgraph_graph::DependencyEngine;
use modgraph_graph::graph::build_graph;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn edges(pairs: &[(&str, &str)]) -> Vec<DependencyEdge> {
    pairs
        .iter()
        .map(|(from, to)| DependencyEdge::new(*from, *to))
        .collect()
}

fn engine(pairs: &[(&str, &str)]) -> DependencyEngine {
    DependencyEngine::new(&Snapshot::new(edges(pairs), Vec::new()))
}

// ---------------------------------------------------------------------------
// Chains and levels
// ---------------------------------------------------------------------------

#[test]
fn simple_chain_levels_and_order() {
    let engine = engine(&[("A", "B"), ("B", "C")]);
    let graph = engine.graph();

    assert!(!graph.has_cycles);
    assert_eq!(graph.level("C"), Some(0));
    assert_eq!(graph.level("B"), Some(1));
    assert_eq!(graph.level("A"), Some(2));

    let mut deps = engine.get_module_dependencies("A");
    deps.sort();
    assert_eq!(deps, vec!["B", "C"]);

    assert_eq!(
        engine.get_installation_order(&["A", "B", "C"]),
        vec!["C", "B", "A"]
    );
}

#[test]
fn diamond_takes_longest_branch() {
    // A → B → D, A → C, C → E → D
    let graph = build_graph(&edges(&[
        ("A", "B"),
        ("A", "C"),
        ("B", "D"),
        ("C", "E"),
        ("E", "D"),
    ]));

    assert_eq!(graph.level("D"), Some(0));
    assert_eq!(graph.level("B"), Some(1));
    assert_eq!(graph.level("E"), Some(1));
    assert_eq!(graph.level("C"), Some(2));
    assert_eq!(graph.level("A"), Some(3));
    assert_eq!(graph.levels.get(&1), Some(&vec!["B".to_string(), "E".to_string()]));
}

#[test]
fn unrelated_modules_are_ignored_by_install_order() {
    let engine = engine(&[("crm", "core"), ("sales", "crm"), ("hr", "core")]);
    assert_eq!(engine.get_installation_order(&["sales", "hr"]), vec!["sales", "hr"]);
    assert_eq!(
        engine.get_installation_order(&["sales", "core", "crm"]),
        vec!["core", "crm", "sales"]
    );
}

#[test]
fn unknown_keys_return_empty_closures() {
    let engine = engine(&[("A", "B")]);
    assert!(engine.get_module_dependencies("Z").is_empty());
    assert!(engine.get_module_dependents("Z").is_empty());
}

// ---------------------------------------------------------------------------
// Cycles
// ---------------------------------------------------------------------------

#[test]
fn two_cycle_is_reported_once() {
    let engine = engine(&[("A", "B"), ("B", "A")]);
    let graph = engine.graph();

    assert!(graph.has_cycles);
    assert_eq!(graph.cycles.len(), 1);
    let cycle = &graph.cycles[0];
    assert!(
        cycle == &vec!["A".to_string(), "B".to_string()]
            || cycle == &vec!["B".to_string(), "A".to_string()]
    );

    let reports = engine.cycle_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].members, vec!["A", "B"]);
    assert_eq!(reports[0].suggested_breaks.len(), 1);
}

#[test]
fn cycle_members_appear_in_each_others_closures() {
    let engine = engine(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let deps = engine.get_module_dependencies("A");
    assert!(deps.contains(&"A".to_string()));
    assert!(deps.contains(&"B".to_string()));
    assert!(deps.contains(&"C".to_string()));
}

#[test]
fn install_order_with_cycle_emits_each_key_once() {
    let engine = engine(&[("A", "B"), ("B", "A")]);
    let mut order = engine.get_installation_order(&["A", "B"]);
    assert_eq!(order.len(), 2);
    order.sort();
    assert_eq!(order, vec!["A", "B"]);
}

// ---------------------------------------------------------------------------
// Inactive edges and core
// ---------------------------------------------------------------------------

#[test]
fn inactive_edges_are_invisible() {
    let snapshot = Snapshot::new(
        vec![
            DependencyEdge::new("crm", "core"),
            DependencyEdge::new("crm", "legacy").inactive(),
        ],
        Vec::new(),
    );
    let engine = DependencyEngine::new(&snapshot);

    assert!(!engine.is_known_module("legacy"));
    assert_eq!(engine.get_module_dependencies("crm"), vec!["core"]);
    assert!(engine.summary().has_core);
}

#[test]
fn snapshot_json_feeds_the_engine() {
    let snapshot = Snapshot::from_json(
        r#"{
            "dependencies": [
                {"module_key": "crm", "depends_on": "core", "dependency_type": "required"},
                {"module_key": "sales", "depends_on": "crm", "dependency_type": "optional"},
                {"module_key": "old", "depends_on": "crm", "is_active": false}
            ],
            "compatibility": [
                {"module_a": "sales", "module_b": "crm", "status": "incompatible", "notes": "clashing hooks"}
            ]
        }"#,
    )
    .expect("parse snapshot");
    let engine = DependencyEngine::new(&snapshot);

    assert_eq!(engine.get_module_dependents("core"), vec!["crm", "sales"]);
    let record = engine.check_compatibility("crm", "sales").expect("record");
    assert_eq!(record.status, CompatibilityStatus::Incompatible);
    assert_eq!(record.notes.as_deref(), Some("clashing hooks"));
}

#[test]
fn compatibility_has_no_transitive_inference() {
    let snapshot = Snapshot::new(
        Vec::new(),
        vec![
            CompatibilityRecord::new("A", "B", CompatibilityStatus::Compatible),
            CompatibilityRecord::new("B", "C", CompatibilityStatus::Compatible),
        ],
    );
    let engine = DependencyEngine::new(&snapshot);
    assert!(engine.check_compatibility("A", "C").is_none());
}

#[test]
fn graph_serializes_to_json() {
    let graph = build_graph(&edges(&[("A", "B")]));
    let value = serde_json::to_value(&graph).expect("serialize");

    assert_eq!(value["has_cycles"], false);
    assert_eq!(value["nodes"]["A"]["level"], 1);
    assert_eq!(value["nodes"]["B"]["dependents"][0], "A");
    assert_eq!(value["levels"]["0"][0], "B");
}
