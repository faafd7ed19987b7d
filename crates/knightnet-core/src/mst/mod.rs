//! Constrained minimum spanning tree engine.
//!
//! - [`engine`]: Prim growth over eligible edges, feasibility reporting
//! - [`ordering`]: frontier tie-break and report ordering

pub mod engine;
pub mod ordering;

#[cfg(test)]
mod engine_tests;

pub use engine::{
    compute_mst, list_tree_edges, Infeasibility, MstEngine, MstResult, INFEASIBLE_COST,
};
pub use ordering::{display_order, frontier_order};
