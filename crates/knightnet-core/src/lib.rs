//! # KnightNet Core
//!
//! Decoy-aware, visibility-constrained minimum spanning trees.
//!
//! A KnightNet network is an undirected weighted graph in which some links are
//! decoys and every link has a visibility level. The engine connects every
//! real (never decoy-touched) node using only non-decoy links at or below a
//! visibility ceiling, and can recompute after a node is breached.
//!
//! ## Quick Start
//!
//! ```rust
//! use knightnet_core::graph::{load_graph, EdgeRecord};
//! use knightnet_core::mst::{compute_mst, list_tree_edges};
//!
//! let mut graph = load_graph(&[
//!     EdgeRecord::new("A", "B", 1, 5, false),
//!     EdgeRecord::new("A", "C", 9, 5, false),
//!     EdgeRecord::new("B", "C", 3, 5, false),
//!     EdgeRecord::new("C", "X", 1, 1, true),
//! ]);
//!
//! // C touches a decoy link, so only A and B are real.
//! let result = compute_mst(&graph, "A", 5);
//! assert!(result.feasible);
//! assert_eq!(result.total_cost, 1);
//!
//! graph.remove_node("B");
//! let after = compute_mst(&graph, "A", 5);
//! assert!(after.feasible);
//! assert!(list_tree_edges(&after).is_empty());
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::doc_markdown, clippy::uninlined_format_args))]

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
#[cfg(test)]
mod loader_tests;
pub mod mst;

pub use config::KnightNetConfig;
pub use error::{Error, Result};
pub use graph::{load_graph, Edge, EdgeId, EdgeRecord, NetworkGraph};
pub use loader::{LoadPolicy, LoadReport};
pub use mst::{compute_mst, list_tree_edges, MstEngine, MstResult};
