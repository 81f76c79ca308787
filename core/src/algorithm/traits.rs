//! Core matcher trait definitions.
//!
//! This module establishes the generic interface shared by the pairing
//! searches: a [`Matcher`] turns one read-only graph into one result and
//! keeps [`SearchStatistics`] about the walk it took to get there. Both
//! concrete matchers are plain values; constructing one is free, and a
//! single instance may be reused across runs (statistics reset on each
//! run).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::graph::GraphError;

/// Errors surfaced by the matching helpers.
///
/// The searches themselves are infallible: "no perfect matching" is a
/// normal negative result, and the maximum-weight search always returns a
/// (possibly empty) matching. Only the weight evaluator can fail, when a
/// matching is scored against a graph that lacks one of its edges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("Matching references an edge absent from the graph: {0}")]
    EdgeLookup(#[from] GraphError),
}

/// Counters accumulated over a single matcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Search-tree nodes entered, counting the root.
    pub nodes_explored: usize,

    /// Complete candidate matchings handed to the weight evaluator.
    /// Always zero for the existence search, which stops at the first
    /// success instead of scoring alternatives.
    pub candidates_evaluated: usize,

    /// Deepest recursion level reached, at most half the participant
    /// count for the existence search and the participant count for the
    /// weight search.
    pub max_depth: usize,
}

impl SearchStatistics {
    /// Folds counters from an independently explored branch into this
    /// set.
    pub(crate) fn absorb(&mut self, other: &SearchStatistics) {
        self.nodes_explored += other.nodes_explored;
        self.candidates_evaluated += other.candidates_evaluated;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// A backtracking search from one graph to one result.
///
/// # Invariants
///
/// - The input graph is never mutated; branch bookkeeping lives in
///   private per-run state.
/// - Runs are deterministic: the same input yields the same output,
///   tie-breaks included, because traversal follows sorted participant
///   order.
/// - `statistics()` reflects the most recent `run`.
pub trait Matcher {
    /// Graph type consumed by the search.
    type Input: ?Sized;

    /// Result type produced by the search.
    type Output;

    /// Short human-readable name.
    fn name(&self) -> &'static str;

    /// Algorithm family, `"matching"` for both searches in this crate.
    fn category(&self) -> &'static str;

    /// One-paragraph description of the procedure and its guarantees.
    fn description(&self) -> String;

    /// Executes the search against `input`, resetting statistics first.
    fn run(&mut self, input: &Self::Input) -> Self::Output;

    /// Counters from the most recent `run`.
    fn statistics(&self) -> &SearchStatistics;
}
