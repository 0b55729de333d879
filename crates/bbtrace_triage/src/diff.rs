//! Coverage diff between two executions.

use crate::edge::Edge;
use crate::trace::ExecutionTrace;
use std::collections::BTreeSet;

/// Symmetric difference of two canonical edge sets, partitioned by origin.
///
/// Membership is keyed on `(from_pc, to_pc)` only: an edge that fired a
/// different number of times in each run is not a difference. This is the
/// operation behind the triage question "what new control flow did this
/// input reach?".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeDiff {
    only_in_a: Vec<(u64, u64)>,
    only_in_b: Vec<(u64, u64)>,
}

impl EdgeDiff {
    /// Diff the canonical edge sets of two traces. Pure: neither trace is
    /// touched.
    #[must_use]
    pub fn between(a: &ExecutionTrace, b: &ExecutionTrace) -> Self {
        Self::from_edges(a.edges(), b.edges())
    }

    /// Diff two edge slices directly.
    #[must_use]
    pub fn from_edges(a: &[Edge], b: &[Edge]) -> Self {
        let set_a: BTreeSet<(u64, u64)> = a.iter().map(Edge::endpoints).collect();
        let set_b: BTreeSet<(u64, u64)> = b.iter().map(Edge::endpoints).collect();
        Self {
            only_in_a: set_a.difference(&set_b).copied().collect(),
            only_in_b: set_b.difference(&set_a).copied().collect(),
        }
    }

    /// Edge pairs present only in the first input, ascending.
    #[must_use]
    pub fn only_in_a(&self) -> &[(u64, u64)] {
        &self.only_in_a
    }

    /// Edge pairs present only in the second input, ascending.
    #[must_use]
    pub fn only_in_b(&self) -> &[(u64, u64)] {
        &self.only_in_b
    }

    /// Number of edges unique to the first input.
    #[must_use]
    pub fn a_count(&self) -> usize {
        self.only_in_a.len()
    }

    /// Number of edges unique to the second input.
    #[must_use]
    pub fn b_count(&self) -> usize {
        self.only_in_b.len()
    }

    /// Whether the two coverage sets are identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}
