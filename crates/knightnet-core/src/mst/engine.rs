//! Constrained minimum spanning tree over the real-node subgraph.
//!
//! Prim-style growth from a start node. Only eligible edges (non-decoy,
//! under the visibility ceiling, both endpoints real) ever enter the
//! frontier, and an edge is taken only when exactly one endpoint is
//! already in the tree.

use std::collections::{BTreeSet, BinaryHeap, HashSet};

use serde::Serialize;

use crate::graph::{is_eligible, Edge, NetworkGraph};

use super::ordering::{display_order, FrontierEntry};

/// Cost reported when no spanning tree exists.
pub const INFEASIBLE_COST: i64 = -1;

/// Why a computation produced no tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Infeasibility {
    /// The start node is absent or decoy-marked.
    StartNotReal {
        /// The rejected start node.
        start: String,
    },
    /// Some real nodes cannot be reached under the visibility ceiling.
    Disconnected {
        /// Real nodes reached from the start, the start included.
        reached: usize,
        /// Real nodes in the graph.
        required: usize,
    },
}

/// Outcome of one MST computation.
///
/// When `feasible` is false, `total_cost` is [`INFEASIBLE_COST`] and `edges`
/// is empty; partial trees are never reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstResult {
    /// Whether every real node was connected.
    pub feasible: bool,
    /// Sum of tree edge costs, or `-1` when infeasible.
    pub total_cost: i64,
    /// Tree edges in selection order.
    pub edges: Vec<Edge>,
    /// Present only when `feasible` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infeasibility: Option<Infeasibility>,
}

impl MstResult {
    fn infeasible(reason: Infeasibility) -> Self {
        Self {
            feasible: false,
            total_cost: INFEASIBLE_COST,
            edges: Vec::new(),
            infeasibility: Some(reason),
        }
    }
}

/// MST engine bound to a visibility ceiling.
///
/// Keeps the last computed tree; every [`compute`](Self::compute) call
/// replaces it.
///
/// # Example
///
/// ```rust
/// use knightnet_core::graph::{load_graph, EdgeRecord};
/// use knightnet_core::mst::MstEngine;
///
/// let graph = load_graph(&[
///     EdgeRecord::new("A", "B", 4, 1, false),
///     EdgeRecord::new("B", "C", 1, 1, false),
///     EdgeRecord::new("A", "C", 2, 1, false),
/// ]);
/// let mut engine = MstEngine::new(3);
/// let result = engine.compute(&graph, "A");
/// assert!(result.feasible);
/// assert_eq!(result.total_cost, 3);
/// ```
#[derive(Debug, Clone)]
pub struct MstEngine {
    max_visibility: i64,
    tree: Vec<Edge>,
    total_cost: i64,
}

impl MstEngine {
    /// Creates an engine that ignores edges with visibility above `max_visibility`.
    #[must_use]
    pub fn new(max_visibility: i64) -> Self {
        Self {
            max_visibility,
            tree: Vec::new(),
            total_cost: INFEASIBLE_COST,
        }
    }

    /// Returns the visibility ceiling.
    #[must_use]
    pub fn max_visibility(&self) -> i64 {
        self.max_visibility
    }

    /// Returns the last tree's total cost, or `-1` if it was infeasible or never computed.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Returns the last tree in selection order.
    #[must_use]
    pub fn tree_edges(&self) -> &[Edge] {
        &self.tree
    }

    /// Returns the last tree in canonical display order.
    #[must_use]
    pub fn list_tree_edges(&self) -> Vec<Edge> {
        sorted_for_display(&self.tree)
    }

    /// Computes the MST connecting every real node of `graph`, grown from `start`.
    pub fn compute(&mut self, graph: &NetworkGraph, start: &str) -> MstResult {
        self.tree.clear();
        self.total_cost = INFEASIBLE_COST;

        let real = graph.real_nodes();
        if !real.contains(start) {
            tracing::debug!(start, "start node is not a real node");
            return MstResult::infeasible(Infeasibility::StartNotReal {
                start: start.to_string(),
            });
        }

        let (tree, cost, reached) = grow(graph, &real, start, self.max_visibility);
        if reached < real.len() {
            tracing::debug!(
                start,
                reached,
                required = real.len(),
                max_visibility = self.max_visibility,
                "network not fully connectable"
            );
            return MstResult::infeasible(Infeasibility::Disconnected {
                reached,
                required: real.len(),
            });
        }

        self.tree = tree;
        self.total_cost = cost;
        tracing::debug!(
            start,
            edges = self.tree.len(),
            total_cost = cost,
            "spanning tree computed"
        );

        MstResult {
            feasible: true,
            total_cost: cost,
            edges: self.tree.clone(),
            infeasibility: None,
        }
    }
}

/// Prim growth. Returns the selected edges, their cost, and how many real nodes were reached.
fn grow(
    graph: &NetworkGraph,
    real: &BTreeSet<String>,
    start: &str,
    max_visibility: i64,
) -> (Vec<Edge>, i64, usize) {
    let mut visited: HashSet<&str> = HashSet::with_capacity(real.len());
    let mut frontier = BinaryHeap::new();
    let mut tree = Vec::with_capacity(real.len().saturating_sub(1));
    let mut cost = 0i64;

    visited.insert(start);
    push_frontier(graph, start, real, max_visibility, &visited, &mut frontier);

    while visited.len() < real.len() {
        let Some(FrontierEntry { edge, .. }) = frontier.pop() else {
            break;
        };

        let a_in = visited.contains(edge.endpoint_a());
        let b_in = visited.contains(edge.endpoint_b());
        if a_in == b_in {
            tracing::trace!(edge = %edge, "discarding stale frontier edge");
            continue;
        }

        let next = if a_in {
            edge.endpoint_b()
        } else {
            edge.endpoint_a()
        };
        tracing::trace!(edge = %edge, node = next, "edge joins tree");

        cost = cost.saturating_add(edge.cost());
        tree.push(edge.clone());
        visited.insert(next);
        push_frontier(graph, next, real, max_visibility, &visited, &mut frontier);
    }

    (tree, cost, visited.len())
}

/// Pushes every eligible edge from `node` to a node outside the tree.
fn push_frontier<'g>(
    graph: &'g NetworkGraph,
    node: &str,
    real: &BTreeSet<String>,
    max_visibility: i64,
    visited: &HashSet<&str>,
    frontier: &mut BinaryHeap<FrontierEntry<'g>>,
) {
    for (id, edge) in graph.incident_edges(node) {
        if !is_eligible(edge, real, max_visibility) {
            continue;
        }
        if edge
            .other_endpoint(node)
            .is_some_and(|other| !visited.contains(other))
        {
            frontier.push(FrontierEntry { id, edge });
        }
    }
}

fn sorted_for_display(edges: &[Edge]) -> Vec<Edge> {
    let mut sorted = edges.to_vec();
    sorted.sort_by(display_order);
    sorted
}

/// Computes the MST of `graph`'s real nodes from `start` under `max_visibility`.
///
/// Convenience wrapper over a one-shot [`MstEngine`].
#[must_use]
pub fn compute_mst(graph: &NetworkGraph, start: &str, max_visibility: i64) -> MstResult {
    MstEngine::new(max_visibility).compute(graph, start)
}

/// Returns a result's tree edges sorted by canonical endpoint pair.
#[must_use]
pub fn list_tree_edges(result: &MstResult) -> Vec<Edge> {
    sorted_for_display(&result.edges)
}
