//! Network graph model.
//!
//! Provides the record and edge types plus [`NetworkGraph`], which stores each
//! undirected link once and tracks decoy-marked nodes.
//!
//! # Example
//!
//! ```rust
//! use knightnet_core::graph::{load_graph, EdgeRecord};
//!
//! let mut graph = load_graph(&[
//!     EdgeRecord::new("A", "B", 1, 5, false),
//!     EdgeRecord::new("B", "C", 2, 5, false),
//! ]);
//! assert_eq!(graph.real_nodes().len(), 3);
//!
//! graph.remove_node("B");
//! assert_eq!(graph.edge_count(), 0);
//! assert_eq!(graph.real_nodes().len(), 2);
//! ```

mod network;
mod types;


pub use network::{is_eligible, NetworkGraph};
pub use types::{Edge, EdgeId, EdgeRecord};

/// Builds a [`NetworkGraph`] from decoded records.
#[must_use]
pub fn load_graph(records: &[EdgeRecord]) -> NetworkGraph {
    NetworkGraph::from_records(records)
}
