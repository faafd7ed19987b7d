//! Tests for the constrained MST engine.

use super::engine::{compute_mst, list_tree_edges, Infeasibility, MstEngine, INFEASIBLE_COST};
use crate::graph::{load_graph, Edge, EdgeRecord, NetworkGraph};

fn rec(a: &str, b: &str, cost: i64, visibility: i64) -> EdgeRecord {
    EdgeRecord::new(a, b, cost, visibility, false)
}

fn decoy(a: &str, b: &str) -> EdgeRecord {
    EdgeRecord::new(a, b, 0, 0, true)
}

fn pairs(edges: &[Edge]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|e| {
            let (lo, hi) = e.canonical_pair();
            (lo.to_string(), hi.to_string())
        })
        .collect()
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

#[test]
fn test_tree_reaches_far_node_through_cheaper_path() {
    let graph = load_graph(&[rec("A", "B", 1, 5), rec("A", "C", 9, 5), rec("B", "D", 3, 5)]);
    let result = compute_mst(&graph, "A", 5);
    assert!(result.feasible);
    assert_eq!(result.total_cost, 13);
    assert_eq!(
        pairs(&list_tree_edges(&result)),
        vec![pair("A", "B"), pair("A", "C"), pair("B", "D")]
    );
}

#[test]
fn test_decoy_edge_removes_both_endpoints_from_tree() {
    // C-D is a decoy, so C and D are decoy nodes and only A-B remains.
    let graph = load_graph(&[
        rec("A", "B", 1, 5),
        rec("A", "C", 9, 5),
        rec("B", "D", 3, 5),
        decoy("C", "D"),
    ]);
    let result = compute_mst(&graph, "A", 5);
    assert!(result.feasible);
    assert_eq!(result.total_cost, 1);
    assert_eq!(pairs(&result.edges), vec![pair("A", "B")]);
}

#[test]
fn test_disjoint_components_infeasible() {
    let graph = load_graph(&[rec("A", "B", 1, 1), rec("C", "D", 1, 1)]);
    for start in ["A", "B", "C", "D"] {
        let result = compute_mst(&graph, start, 10);
        assert!(!result.feasible);
        assert_eq!(result.total_cost, INFEASIBLE_COST);
        assert!(result.edges.is_empty());
        assert_eq!(
            result.infeasibility,
            Some(Infeasibility::Disconnected {
                reached: 2,
                required: 4
            })
        );
    }
}

#[test]
fn test_decoy_start_infeasible() {
    let graph = load_graph(&[rec("A", "B", 1, 1), decoy("B", "Z")]);
    let result = compute_mst(&graph, "Z", 10);
    assert!(!result.feasible);
    assert_eq!(result.total_cost, INFEASIBLE_COST);
    assert_eq!(
        result.infeasibility,
        Some(Infeasibility::StartNotReal {
            start: "Z".to_string()
        })
    );
}

#[test]
fn test_absent_start_infeasible() {
    let graph = load_graph(&[rec("A", "B", 1, 1)]);
    let result = compute_mst(&graph, "Q", 10);
    assert!(!result.feasible);
    assert!(matches!(
        result.infeasibility,
        Some(Infeasibility::StartNotReal { .. })
    ));
}

#[test]
fn test_visibility_ceiling_forces_costlier_edges() {
    let graph = load_graph(&[rec("A", "B", 1, 9), rec("A", "C", 5, 1), rec("C", "B", 5, 1)]);

    let strict = compute_mst(&graph, "A", 5);
    assert!(strict.feasible);
    assert_eq!(strict.total_cost, 10);
    assert!(strict.edges.iter().all(|e| e.visibility() <= 5));

    let loose = compute_mst(&graph, "A", 9);
    assert_eq!(loose.total_cost, 6);
}

#[test]
fn test_visibility_ceiling_can_disconnect() {
    let graph = load_graph(&[rec("A", "B", 1, 2), rec("B", "C", 1, 8)]);
    let result = compute_mst(&graph, "A", 7);
    assert!(!result.feasible);
    assert_eq!(
        result.infeasibility,
        Some(Infeasibility::Disconnected {
            reached: 2,
            required: 3
        })
    );
}

#[test]
fn test_equal_costs_break_on_canonical_pair() {
    let square = [
        rec("A", "B", 1, 1),
        rec("B", "C", 1, 1),
        rec("C", "D", 1, 1),
        rec("D", "A", 1, 1),
    ];
    let graph = load_graph(&square);
    let result = compute_mst(&graph, "A", 1);
    assert_eq!(result.total_cost, 3);
    assert_eq!(
        pairs(&result.edges),
        vec![pair("A", "B"), pair("A", "D"), pair("B", "C")]
    );

    let mut reversed = square.to_vec();
    reversed.reverse();
    let flipped = load_graph(&reversed);
    assert_eq!(compute_mst(&flipped, "A", 1).edges, result.edges);
}

#[test]
fn test_equal_cost_and_pair_break_on_visibility() {
    let graph = load_graph(&[rec("A", "B", 1, 3), rec("B", "A", 1, 2)]);
    let result = compute_mst(&graph, "A", 5);
    assert_eq!(result.edges.len(), 1);
    assert_eq!(result.edges[0].visibility(), 2);
}

#[test]
fn test_stale_frontier_edge_is_discarded() {
    // B-C is still queued when C joins through A-C and must be skipped.
    let graph = load_graph(&[
        rec("A", "B", 1, 1),
        rec("A", "C", 2, 1),
        rec("B", "C", 3, 1),
        rec("C", "D", 4, 1),
    ]);
    let result = compute_mst(&graph, "A", 1);
    assert!(result.feasible);
    assert_eq!(result.total_cost, 7);
    assert_eq!(
        pairs(&result.edges),
        vec![pair("A", "B"), pair("A", "C"), pair("C", "D")]
    );
}

#[test]
fn test_single_real_node_is_trivially_spanned() {
    let mut graph = load_graph(&[rec("A", "B", 1, 1)]);
    graph.remove_node("B");
    let result = compute_mst(&graph, "A", 1);
    assert!(result.feasible);
    assert_eq!(result.total_cost, 0);
    assert!(result.edges.is_empty());
}

#[test]
fn test_self_loop_never_selected() {
    let graph = load_graph(&[rec("A", "A", 0, 0), rec("A", "B", 4, 0)]);
    let result = compute_mst(&graph, "A", 0);
    assert_eq!(pairs(&result.edges), vec![pair("A", "B")]);
    assert_eq!(result.total_cost, 4);
}

#[test]
fn test_negative_costs_are_summed() {
    let graph = load_graph(&[rec("A", "B", -3, 1), rec("B", "C", 2, 1), rec("A", "C", 5, 1)]);
    let result = compute_mst(&graph, "C", 1);
    assert_eq!(result.total_cost, -1);
    assert!(result.feasible);
}

#[test]
fn test_engine_buffer_resets_between_calls() {
    let graph = load_graph(&[rec("A", "B", 1, 1), rec("B", "C", 2, 9)]);
    let mut engine = MstEngine::new(9);

    let first = engine.compute(&graph, "A");
    assert!(first.feasible);
    assert_eq!(engine.tree_edges().len(), 2);
    assert_eq!(engine.total_cost(), 3);

    let second = engine.compute(&graph, "Nope");
    assert!(!second.feasible);
    assert!(engine.tree_edges().is_empty());
    assert_eq!(engine.total_cost(), INFEASIBLE_COST);

    let third = engine.compute(&graph, "C");
    assert_eq!(engine.tree_edges().len(), 2);
    assert_eq!(third.total_cost, 3);
}

#[test]
fn test_engine_list_tree_edges_canonical() {
    let graph = load_graph(&[rec("D", "C", 1, 1), rec("C", "B", 2, 1), rec("B", "A", 3, 1)]);
    let mut engine = MstEngine::new(1);
    engine.compute(&graph, "D");
    let listed: Vec<String> = engine
        .list_tree_edges()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        listed,
        vec![
            "A - B | Cost: 3 | Visibility: 1",
            "B - C | Cost: 2 | Visibility: 1",
            "C - D | Cost: 1 | Visibility: 1",
        ]
    );
}

#[test]
fn test_recompute_after_breach_avoids_removed_node() {
    let mut graph: NetworkGraph = load_graph(&[
        rec("A", "B", 1, 1),
        rec("B", "C", 1, 1),
        rec("A", "C", 5, 1),
        rec("C", "D", 2, 1),
    ]);
    assert_eq!(compute_mst(&graph, "A", 1).total_cost, 4);

    graph.remove_node("B");
    let result = compute_mst(&graph, "A", 1);
    assert!(result.feasible);
    assert_eq!(result.total_cost, 7);
    assert!(result.edges.iter().all(|e| !e.touches("B")));
}

#[test]
fn test_breach_can_split_network() {
    let mut graph = load_graph(&[rec("A", "B", 1, 1), rec("B", "C", 1, 1)]);
    graph.remove_node("B");
    let result = compute_mst(&graph, "A", 1);
    assert!(!result.feasible);
}

#[test]
fn test_repeated_runs_identical() {
    let graph = load_graph(&[
        rec("N1", "N2", 2, 1),
        rec("N2", "N3", 2, 1),
        rec("N1", "N3", 2, 1),
        rec("N3", "N4", 2, 1),
        rec("N4", "N1", 2, 1),
    ]);
    let first = compute_mst(&graph, "N1", 1);
    let second = compute_mst(&graph, "N1", 1);
    assert_eq!(first, second);
}
