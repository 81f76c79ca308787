//! Maximum-weight matching search.
//!
//! Finds, among all vertex-disjoint sets of edges of a weighted graph, one
//! whose summed weight is maximal. The optimum is not required to cover
//! every participant, and "pair nobody" (weight 0) is always a candidate,
//! so edges with negative weight can never drag the answer below zero.
//!
//! # Procedure
//!
//! Branch-and-explore over a pool of undecided participants. At each step
//! the first undecided participant (sorted order) is decided: either it
//! stays unpaired while the rest of the pool is solved, or it is paired
//! with one of its still-undecided neighbors and the shrunken pool is
//! solved. Every complete assignment is scored by the weight evaluator,
//! and the running best, seeded with the empty matching at weight 0,
//! advances only on a strictly greater total. Ties therefore keep the
//! candidate reached first under sorted traversal, which makes repeated
//! runs return the same answer.
//!
//! This enumerates every matching of the graph exactly once per
//! structurally distinct partial assignment. On a path of n participants
//! the number of matchings grows as a Fibonacci sequence, so the search is
//! exponential by nature and intended for groups of a few tens of
//! participants.
//!
//! # Parallelism
//!
//! The branches at the root of the search tree are independent, so they
//! are fanned out across a rayon thread pool; each branch runs the
//! sequential search on its own pool copy. Branch results are collected in
//! traversal order and reduced with the same strictly-greater rule, so the
//! outcome is identical to the fully sequential search, tie-breaks
//! included.

use std::collections::BTreeSet;

use log::debug;
use rayon::prelude::*;

use crate::algorithm::traits::{Matcher, MatchingError, SearchStatistics};
use crate::data_structures::graph::WeightedGraph;
use crate::data_structures::pairing::{Matching, Pair};

/// Sums the weight of `matching` against `graph`.
///
/// Pure function; for every pair the weight is looked up from the first
/// endpoint's neighbor map under the second endpoint. A pair that is not
/// an edge of `graph` yields an error rather than a silent zero.
pub fn matching_weight(graph: &WeightedGraph, matching: &Matching) -> Result<f64, MatchingError> {
    let mut total = 0.0;
    for pair in matching.pairs() {
        total += graph.edge_weight(pair.first(), pair.second())? as f64;
    }
    Ok(total)
}

/// A complete candidate with its evaluated weight.
type Scored = (Matching, f64);

/// Exhaustive branch-and-explore search for the heaviest matching.
#[derive(Debug, Clone, Default)]
pub struct MaxWeightMatcher {
    statistics: SearchStatistics,
}

impl MaxWeightMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Solves the pool in `undecided` given the pairs already committed in
/// `chosen`. Returns the best complete candidate found in this subtree,
/// where "best" starts from the empty matching at weight 0. Both
/// `undecided` and `chosen` are restored to their state at entry.
fn explore<'g>(
    graph: &'g WeightedGraph,
    undecided: &mut BTreeSet<&'g str>,
    chosen: &mut Vec<Pair>,
    depth: usize,
    stats: &mut SearchStatistics,
) -> Scored {
    stats.nodes_explored += 1;
    stats.max_depth = stats.max_depth.max(depth);

    let Some(&person) = undecided.iter().next() else {
        // Everyone is decided: score the assignment. Candidates are
        // assembled from edges of the graph, so the lookup cannot fail;
        // an inconsistent graph only demotes this candidate.
        let candidate: Matching = chosen.iter().cloned().collect();
        stats.candidates_evaluated += 1;
        let weight = matching_weight(graph, &candidate).unwrap_or(f64::NEG_INFINITY);
        return (candidate, weight);
    };
    undecided.remove(person);

    let mut best: Scored = (Matching::new(), 0.0);

    // Branch one: leave `person` unpaired.
    let skipped = explore(graph, undecided, chosen, depth + 1, stats);
    if skipped.1 > best.1 {
        best = skipped;
    }

    // Remaining branches: pair `person` with each undecided neighbor.
    for (partner, _) in graph.neighbors(person) {
        if !undecided.remove(partner) {
            continue;
        }
        chosen.push(Pair::new(person, partner));
        let paired = explore(graph, undecided, chosen, depth + 1, stats);
        if paired.1 > best.1 {
            best = paired;
        }
        chosen.pop();
        undecided.insert(partner);
    }

    undecided.insert(person);
    best
}

impl Matcher for MaxWeightMatcher {
    type Input = WeightedGraph;
    type Output = Matching;

    fn name(&self) -> &'static str {
        "maximum-weight matching"
    }

    fn category(&self) -> &'static str {
        "matching"
    }

    fn description(&self) -> String {
        "Exhaustive branch-and-explore search for the vertex-disjoint set \
         of edges with the greatest total weight. The empty matching is \
         always a candidate, so negative-weight edges never make the \
         result worse than pairing nobody."
            .to_owned()
    }

    fn run(&mut self, graph: &WeightedGraph) -> Matching {
        self.statistics = SearchStatistics::default();

        let participants: BTreeSet<&str> = graph.participants().collect();
        debug!(
            "searching for a maximum-weight matching over {} participants",
            participants.len()
        );

        let Some(&first) = participants.iter().next() else {
            return Matching::new();
        };
        self.statistics.nodes_explored += 1;

        // Root branches in the order the sequential search visits them:
        // skip `first`, then pair `first` with each other participant it
        // is linked to.
        let mut branches: Vec<Option<&str>> = vec![None];
        branches.extend(
            graph
                .neighbors(first)
                .map(|(partner, _)| partner)
                .filter(|partner| *partner != first && participants.contains(partner))
                .map(Some),
        );

        let branch_results: Vec<(Scored, SearchStatistics)> = branches
            .par_iter()
            .map(|branch| {
                let mut stats = SearchStatistics::default();
                let mut undecided = participants.clone();
                undecided.remove(first);
                let mut chosen = Vec::new();
                if let Some(partner) = branch {
                    undecided.remove(partner);
                    chosen.push(Pair::new(first, *partner));
                }
                let best = explore(graph, &mut undecided, &mut chosen, 1, &mut stats);
                (best, stats)
            })
            .collect();

        // In-order reduction keeps tie-breaking identical to the
        // sequential traversal.
        let mut best: Scored = (Matching::new(), 0.0);
        for (candidate, stats) in branch_results {
            self.statistics.absorb(&stats);
            if candidate.1 > best.1 {
                best = candidate;
            }
        }

        debug!(
            "maximum-weight search done: weight={}, pairs={}, candidates evaluated={}",
            best.1,
            best.0.len(),
            self.statistics.candidates_evaluated
        );
        best.0
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

/// Finds a matching of `graph` with maximal total weight.
///
/// Always succeeds; the empty graph, isolated participants, and graphs
/// whose every edge is negative all yield the empty matching. Among
/// equally heavy optima the one reached first under sorted traversal is
/// returned.
pub fn maximum_weight_matching(graph: &WeightedGraph) -> Matching {
    MaxWeightMatcher::new().run(graph)
}
