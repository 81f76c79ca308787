//! Independent validity checks for matchings.
//!
//! These predicates re-derive validity from the graph alone, without
//! trusting anything the searches did, so tests can hold the matchers to
//! their contracts. The matchers never call them at runtime.

use std::collections::BTreeSet;

use crate::data_structures::graph::{CompatibilityGraph, WeightedGraph};
use crate::data_structures::pairing::Matching;

/// Whether `matching` is a perfect matching of `graph`.
///
/// Checks that every referenced participant exists in the graph, every
/// pair is a link in both directions, no participant appears twice, and
/// the matching covers the whole group.
pub fn is_perfect_matching(graph: &CompatibilityGraph, matching: &Matching) -> bool {
    let mut used: BTreeSet<&str> = BTreeSet::new();
    for pair in matching.pairs() {
        let (a, b) = (pair.first(), pair.second());
        if !graph.contains(a) || !graph.contains(b) {
            return false;
        }
        if !graph.linked(a, b) || !graph.linked(b, a) {
            return false;
        }
        if !used.insert(a) || !used.insert(b) {
            return false;
        }
    }
    used.len() == graph.len()
}

/// Whether `matching` is a vertex-disjoint set of real edges of `graph`.
///
/// Coverage is not required; the empty matching is valid for any graph.
pub fn is_valid_matching(graph: &WeightedGraph, matching: &Matching) -> bool {
    let mut used: BTreeSet<&str> = BTreeSet::new();
    for pair in matching.pairs() {
        let (a, b) = (pair.first(), pair.second());
        if graph.edge_weight(a, b).is_err() || graph.edge_weight(b, a).is_err() {
            return false;
        }
        if !used.insert(a) || !used.insert(b) {
            return false;
        }
    }
    true
}
