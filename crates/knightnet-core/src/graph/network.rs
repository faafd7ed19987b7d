//! In-memory network graph with an edge arena and per-node adjacency.
//!
//! Each undirected link is stored once in the arena; adjacency lists hold
//! [`EdgeId`]s into it, so both endpoints observe the same edge.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::loader::{self, LoadPolicy, LoadReport};
use crate::mst::ordering::display_order;

use super::types::{Edge, EdgeId, EdgeRecord};

/// Undirected communication network with decoy tracking.
///
/// Nodes exist implicitly as adjacency keys. Any node touched by a decoy edge
/// is a decoy node for as long as it stays in the graph.
#[derive(Debug, Default, Clone)]
pub struct NetworkGraph {
    /// Edge arena. Removed edges become `None` so ids stay stable.
    edges: Vec<Option<Edge>>,
    /// Node -> incident edge ids, in insertion order.
    adjacency: IndexMap<String, Vec<EdgeId>>,
    decoy_nodes: HashSet<String>,
}

impl NetworkGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(expected_edges: usize, expected_nodes: usize) -> Self {
        Self {
            edges: Vec::with_capacity(expected_edges),
            adjacency: IndexMap::with_capacity(expected_nodes),
            decoy_nodes: HashSet::new(),
        }
    }

    /// Builds a graph from decoded records.
    ///
    /// # Example
    ///
    /// ```rust
    /// use knightnet_core::graph::{EdgeRecord, NetworkGraph};
    ///
    /// let records = vec![
    ///     EdgeRecord::new("A", "B", 1, 2, false),
    ///     EdgeRecord::new("B", "Z", 1, 2, true),
    /// ];
    /// let graph = NetworkGraph::from_records(&records);
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.real_nodes().into_iter().collect::<Vec<_>>(), vec!["A"]);
    /// ```
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EdgeRecord>,
    {
        let records = records.into_iter();
        let mut graph = Self::with_capacity(records.size_hint().0, 0);
        for record in records {
            graph.insert_record(record);
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            decoys = graph.decoy_nodes.len(),
            "network graph built"
        );
        graph
    }

    /// Loads a record file and builds a graph from every row the policy accepts.
    pub fn load(path: impl AsRef<Path>, policy: LoadPolicy) -> Result<(Self, LoadReport)> {
        let report = loader::load_records(path, policy)?;
        let graph = Self::from_records(&report.records);
        Ok((graph, report))
    }

    fn insert_record(&mut self, record: &EdgeRecord) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge::from(record)));

        if record.is_decoy {
            self.decoy_nodes.insert(record.node_a.clone());
            self.decoy_nodes.insert(record.node_b.clone());
        }

        self.adjacency
            .entry(record.node_a.clone())
            .or_default()
            .push(id);
        if record.node_b != record.node_a {
            self.adjacency
                .entry(record.node_b.clone())
                .or_default()
                .push(id);
        }
        id
    }

    // ── Nodes ──────────────────────────────────────────────────────────

    /// Returns true if `node` has an adjacency entry.
    #[must_use]
    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns the total number of nodes, decoys included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns all node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Returns true if `node` has been touched by a decoy edge.
    #[must_use]
    pub fn is_decoy_node(&self, node: &str) -> bool {
        self.decoy_nodes.contains(node)
    }

    /// Returns the nodes never touched by a decoy edge, in sorted order.
    ///
    /// Derived on every call. Do not hold the result across [`remove_node`](Self::remove_node).
    #[must_use]
    pub fn real_nodes(&self) -> BTreeSet<String> {
        self.adjacency
            .keys()
            .filter(|node| !self.decoy_nodes.contains(*node))
            .cloned()
            .collect()
    }

    /// Removes a node and every edge incident to it (cascade delete).
    ///
    /// Returns `false` when the node was not present; the graph is unchanged.
    pub fn remove_node(&mut self, node: &str) -> bool {
        let incident = self.adjacency.shift_remove(node);
        self.decoy_nodes.remove(node);
        let Some(incident) = incident else {
            return false;
        };

        let mut removed_edges = 0usize;
        for edge_id in incident {
            let Some(edge) = self.edges.get_mut(edge_id.0).and_then(Option::take) else {
                continue;
            };
            removed_edges += 1;
            if let Some(other) = edge.other_endpoint(node) {
                if let Some(ids) = self.adjacency.get_mut(other) {
                    ids.retain(|&id| id != edge_id);
                }
            }
        }

        tracing::debug!(node, removed_edges, "node removed from network");
        true
    }

    // ── Edges ──────────────────────────────────────────────────────────

    /// Returns the number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Gets an edge by id. Returns `None` for removed edges.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// Gets a mutable edge by id. The change is visible from both endpoints.
    #[must_use]
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Gets all edges incident to a node, in insertion order.
    #[must_use]
    pub fn incident_edges(&self, node: &str) -> Vec<(EdgeId, &Edge)> {
        self.adjacency
            .get(node)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.edge(id).map(|edge| (id, edge)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the degree of a node.
    #[must_use]
    pub fn degree(&self, node: &str) -> usize {
        self.adjacency.get(node).map_or(0, Vec::len)
    }

    /// Returns every live edge once, in arena order.
    pub fn all_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|edge| (EdgeId(idx), edge)))
    }

    /// Returns the real-only subgraph under a visibility ceiling, in display order.
    #[must_use]
    pub fn eligible_edges(&self, max_visibility: i64) -> Vec<&Edge> {
        let real = self.real_nodes();
        let mut edges: Vec<&Edge> = self
            .all_edges()
            .map(|(_, edge)| edge)
            .filter(|edge| is_eligible(edge, &real, max_visibility))
            .collect();
        edges.sort_by(|a, b| display_order(a, b));
        edges
    }
}

/// Returns true if the MST engine may use `edge`.
///
/// The edge must not be a decoy, must sit at or under the ceiling, and must
/// join two real nodes.
#[must_use]
pub fn is_eligible(edge: &Edge, real_nodes: &BTreeSet<String>, max_visibility: i64) -> bool {
    !edge.is_decoy()
        && edge.visibility() <= max_visibility
        && real_nodes.contains(edge.endpoint_a())
        && real_nodes.contains(edge.endpoint_b())
}
