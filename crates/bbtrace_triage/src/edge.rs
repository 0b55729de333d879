//! Control-flow edges and their canonical form.

use bbtrace_capture::EdgeRecord;
use std::collections::BTreeSet;

/// One distinct control-flow transition with its hit count.
///
/// The derived ordering is lexicographic on the full triple, which is
/// exactly the canonical ordering produced by [`canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Source basic-block address.
    pub from_pc: u64,
    /// Destination basic-block address.
    pub to_pc: u64,
    /// How many times this edge fired during the run.
    pub hit_count: u32,
}

impl Edge {
    /// The `(from_pc, to_pc)` pair identifying this edge for coverage
    /// purposes, hit count dropped.
    #[must_use]
    pub const fn endpoints(&self) -> (u64, u64) {
        (self.from_pc, self.to_pc)
    }
}

impl From<&EdgeRecord> for Edge {
    fn from(record: &EdgeRecord) -> Self {
        Self {
            from_pc: record.prev,
            to_pc: record.next,
            hit_count: record.hit,
        }
    }
}

/// Reduce raw edge records to canonical form: exact duplicate triples
/// collapse to one, the rest sort ascending.
///
/// Execution order is not preserved. Input may arrive in any order with any
/// amount of duplication; the result is the same set either way.
#[must_use]
pub fn canonicalize(records: &[EdgeRecord]) -> Vec<Edge> {
    let set: BTreeSet<Edge> = records.iter().map(Edge::from).collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(prev: u64, next: u64, hit: u32) -> EdgeRecord {
        EdgeRecord { prev, next, hit }
    }

    #[test]
    fn test_duplicates_collapse() {
        let edges = canonicalize(&[rec(1, 2, 3), rec(1, 2, 3), rec(1, 2, 3)]);
        assert_eq!(
            edges,
            vec![Edge {
                from_pc: 1,
                to_pc: 2,
                hit_count: 3,
            }]
        );
    }

    #[test]
    fn test_distinct_hit_counts_are_distinct_triples() {
        let edges = canonicalize(&[rec(1, 2, 3), rec(1, 2, 4)]);
        assert_eq!(edges.len(), 2);
        assert!(edges[0] < edges[1]);
    }

    #[test]
    fn test_output_is_sorted() {
        let edges = canonicalize(&[rec(9, 1, 1), rec(2, 8, 1), rec(2, 3, 5)]);
        let mut sorted = edges.clone();
        sorted.sort();
        assert_eq!(edges, sorted);
    }

    #[test]
    fn test_empty_input() {
        assert!(canonicalize(&[]).is_empty());
    }

    fn arb_records() -> impl Strategy<Value = Vec<EdgeRecord>> {
        proptest::collection::vec(
            (0u64..32, 0u64..32, 0u32..4).prop_map(|(prev, next, hit)| EdgeRecord {
                prev,
                next,
                hit,
            }),
            0..128,
        )
    }

    proptest::proptest! {
        #[test]
        fn prop_order_independent(records in arb_records().prop_shuffle()) {
            let mut sorted = records.clone();
            sorted.sort_by_key(|r| (r.prev, r.next, r.hit));
            prop_assert_eq!(canonicalize(&records), canonicalize(&sorted));
        }

        #[test]
        fn prop_idempotent_under_duplication(records in arb_records()) {
            let mut doubled = records.clone();
            doubled.extend_from_slice(&records);
            prop_assert_eq!(canonicalize(&records), canonicalize(&doubled));
        }
    }
}
