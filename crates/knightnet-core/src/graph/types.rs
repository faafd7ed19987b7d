//! Record and edge types for the network graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One decoded row of the record source: an undirected link between two nodes.
///
/// # Example
///
/// ```rust
/// use knightnet_core::graph::EdgeRecord;
///
/// let record = EdgeRecord::new("A", "B", 4, 2, false);
/// assert_eq!(record.node_a, "A");
/// assert!(!record.is_decoy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint as written in the source.
    pub node_a: String,
    /// Second endpoint as written in the source.
    pub node_b: String,
    /// Traversal cost. Not validated, may be negative.
    pub cost: i64,
    /// Exposure level; higher is easier to detect.
    pub visibility: i64,
    /// Whether this link is a decoy.
    pub is_decoy: bool,
}

impl EdgeRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(node_a: &str, node_b: &str, cost: i64, visibility: i64, is_decoy: bool) -> Self {
        Self {
            node_a: node_a.to_string(),
            node_b: node_b.to_string(),
            cost,
            visibility,
            is_decoy,
        }
    }
}

/// Index of an edge in the graph's edge arena.
///
/// Both endpoints' adjacency lists hold the same `EdgeId`, so an edge is
/// stored exactly once however many lists refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Returns the raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An undirected, stored edge.
///
/// `endpoint_a`/`endpoint_b` keep the order of the source record but carry
/// no direction. Use [`Edge::canonical_pair`] whenever order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    endpoint_a: String,
    endpoint_b: String,
    cost: i64,
    visibility: i64,
    is_decoy: bool,
}

impl Edge {
    /// Creates an edge from its endpoints and attributes.
    #[must_use]
    pub fn new(
        endpoint_a: &str,
        endpoint_b: &str,
        cost: i64,
        visibility: i64,
        is_decoy: bool,
    ) -> Self {
        Self {
            endpoint_a: endpoint_a.to_string(),
            endpoint_b: endpoint_b.to_string(),
            cost,
            visibility,
            is_decoy,
        }
    }

    /// Returns the first stored endpoint.
    #[must_use]
    pub fn endpoint_a(&self) -> &str {
        &self.endpoint_a
    }

    /// Returns the second stored endpoint.
    #[must_use]
    pub fn endpoint_b(&self) -> &str {
        &self.endpoint_b
    }

    /// Returns the traversal cost.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Returns the visibility level.
    #[must_use]
    pub fn visibility(&self) -> i64 {
        self.visibility
    }

    /// Returns true if this edge is a decoy link.
    #[must_use]
    pub fn is_decoy(&self) -> bool {
        self.is_decoy
    }

    /// Sets the traversal cost.
    pub fn set_cost(&mut self, cost: i64) {
        self.cost = cost;
    }

    /// Sets the visibility level.
    pub fn set_visibility(&mut self, visibility: i64) {
        self.visibility = visibility;
    }

    /// Returns true if `node` is one of the two endpoints.
    #[must_use]
    pub fn touches(&self, node: &str) -> bool {
        self.endpoint_a == node || self.endpoint_b == node
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    ///
    /// A self-loop returns `node` itself.
    #[must_use]
    pub fn other_endpoint(&self, node: &str) -> Option<&str> {
        if self.endpoint_a == node {
            Some(&self.endpoint_b)
        } else if self.endpoint_b == node {
            Some(&self.endpoint_a)
        } else {
            None
        }
    }

    /// Returns `(min(a, b), max(a, b))` by lexicographic order.
    #[must_use]
    pub fn canonical_pair(&self) -> (&str, &str) {
        if self.endpoint_a <= self.endpoint_b {
            (&self.endpoint_a, &self.endpoint_b)
        } else {
            (&self.endpoint_b, &self.endpoint_a)
        }
    }
}

impl From<&EdgeRecord> for Edge {
    fn from(record: &EdgeRecord) -> Self {
        Self::new(
            &record.node_a,
            &record.node_b,
            record.cost,
            record.visibility,
            record.is_decoy,
        )
    }
}

/// Renders as `A - B | Cost: 3 | Visibility: 2`, smaller endpoint first.
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.canonical_pair();
        write!(
            f,
            "{} - {} | Cost: {} | Visibility: {}",
            low, high, self.cost, self.visibility
        )
    }
}
