//! Edge ordering policies for the MST frontier and for reporting.
//!
//! Ordering lives here rather than on [`Edge`] so the frontier and the
//! report can each use the key they need.

use std::cmp::Ordering;

use crate::graph::{Edge, EdgeId};

/// Frontier priority: cost, then canonical endpoint pair, then visibility.
///
/// All ascending. Endpoint pairs compare as `(min, max)` tuples, so the order
/// does not depend on which endpoint a record listed first.
#[must_use]
pub fn frontier_order(a: &Edge, b: &Edge) -> Ordering {
    a.cost()
        .cmp(&b.cost())
        .then_with(|| a.canonical_pair().cmp(&b.canonical_pair()))
        .then_with(|| a.visibility().cmp(&b.visibility()))
}

/// Report order: canonical endpoint pair ascending.
#[must_use]
pub fn display_order(a: &Edge, b: &Edge) -> Ordering {
    a.canonical_pair().cmp(&b.canonical_pair())
}

/// A frontier candidate, ordered so that `BinaryHeap` pops the lowest edge first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry<'g> {
    pub(crate) id: EdgeId,
    pub(crate) edge: &'g Edge,
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap. Arena id settles exact duplicates.
        frontier_order(other.edge, self.edge).then_with(|| other.id.cmp(&self.id))
    }
}
