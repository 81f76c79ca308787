//! Perfect-matching existence search.
//!
//! Decides whether a compatibility graph admits a perfect matching, a
//! pairing that uses every participant exactly once, and reconstructs one
//! when it exists.
//!
//! # Procedure
//!
//! Classic exhaustive backtracking. With no participants left, the empty
//! matching is trivially perfect. Otherwise the first unpaired participant
//! (sorted order) is taken and every still-unpaired neighbor is tried as
//! its partner; each attempt removes both from the pool and recurses on
//! the remainder. The first fully successful assignment is returned as-is:
//! once a perfect matching is found there is no reason to enumerate
//! alternatives. If no partner works, the current pool has no perfect
//! matching and the caller backtracks.
//!
//! Because the chosen participant must be paired with *someone* in any
//! perfect matching of the pool, trying exactly its neighbors is a
//! complete case split, and a participant left with zero available
//! partners refutes the whole branch immediately. Every recursion level
//! removes two participants, bounding the depth at half the group size.
//!
//! # Complexity
//!
//! Exponential in the worst case, by design. The search is intended for
//! groups of at most a few tens of participants, where pruning on the
//! first unpairable participant keeps real inputs fast.

use std::collections::BTreeSet;

use log::debug;

use crate::algorithm::traits::{Matcher, SearchStatistics};
use crate::data_structures::graph::CompatibilityGraph;
use crate::data_structures::pairing::{Matching, Pair};

/// Exhaustive backtracking search for a perfect matching.
#[derive(Debug, Clone, Default)]
pub struct PerfectMatcher {
    statistics: SearchStatistics,
}

impl PerfectMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to pair off everyone in `remaining`. On success the chosen
    /// pairs are left in `chosen`; on failure both `remaining` and
    /// `chosen` are restored to their state at entry.
    fn search<'g>(
        &mut self,
        graph: &'g CompatibilityGraph,
        remaining: &mut BTreeSet<&'g str>,
        chosen: &mut Vec<Pair>,
        depth: usize,
    ) -> bool {
        self.statistics.nodes_explored += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);

        let Some(&person) = remaining.iter().next() else {
            return true; // everyone is paired
        };
        remaining.remove(person);

        for partner in graph.neighbors(person) {
            // remove doubles as the "still unpaired" membership test
            if !remaining.remove(partner) {
                continue;
            }
            chosen.push(Pair::new(person, partner));
            if self.search(graph, remaining, chosen, depth + 1) {
                return true;
            }
            chosen.pop();
            remaining.insert(partner);
        }

        // No partner admits a perfect matching of the rest, so no perfect
        // matching pairs `person` at all.
        remaining.insert(person);
        false
    }
}

impl Matcher for PerfectMatcher {
    type Input = CompatibilityGraph;
    type Output = Option<Matching>;

    fn name(&self) -> &'static str {
        "perfect matching existence"
    }

    fn category(&self) -> &'static str {
        "matching"
    }

    fn description(&self) -> String {
        "Exhaustive backtracking search deciding whether a compatibility \
         graph admits a pairing that covers every participant exactly \
         once, reconstructing one such pairing when it exists."
            .to_owned()
    }

    fn run(&mut self, graph: &CompatibilityGraph) -> Option<Matching> {
        self.statistics = SearchStatistics::default();

        let mut remaining: BTreeSet<&str> = graph.participants().collect();
        let mut chosen = Vec::with_capacity(remaining.len() / 2);
        debug!(
            "searching for a perfect matching over {} participants",
            remaining.len()
        );

        let found = self.search(graph, &mut remaining, &mut chosen, 0);
        debug!(
            "perfect matching search done: found={}, nodes explored={}",
            found, self.statistics.nodes_explored
        );

        found.then(|| chosen.into_iter().collect())
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

/// Decides whether `graph` admits a perfect matching.
///
/// Returns `Some(matching)` with one concrete perfect matching, or `None`
/// when no pairing can cover every participant. Which of several valid
/// matchings is returned follows sorted traversal order and is otherwise
/// unspecified.
pub fn has_perfect_matching(graph: &CompatibilityGraph) -> Option<Matching> {
    PerfectMatcher::new().run(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{for_each_permutation, init_logging};
    use crate::validation::is_perfect_matching;

    #[test]
    fn empty_group_is_trivially_matched() {
        let graph = CompatibilityGraph::new();
        let matching = has_perfect_matching(&graph).expect("empty group matches");
        assert!(matching.is_empty());
    }

    #[test]
    fn single_participant_cannot_be_matched() {
        let mut graph = CompatibilityGraph::new();
        graph.add_participant("A");
        assert_eq!(has_perfect_matching(&graph), None);
    }

    #[test]
    fn two_linked_participants_match() {
        let graph = CompatibilityGraph::from_links(&[("A", "B")]);
        let matching = has_perfect_matching(&graph).expect("pair matches");

        let expected: Matching = [Pair::new("A", "B")].into_iter().collect();
        assert_eq!(matching, expected);
    }

    #[test]
    fn triangle_has_no_perfect_matching() {
        let graph = CompatibilityGraph::from_links(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(has_perfect_matching(&graph), None);
    }

    #[test]
    fn square_has_a_perfect_matching() {
        let graph =
            CompatibilityGraph::from_links(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let matching = has_perfect_matching(&graph).expect("square matches");
        assert!(is_perfect_matching(&graph, &matching));
    }

    #[test]
    fn pentagon_has_no_perfect_matching() {
        // Odd cycle: one participant always stays unpaired.
        let graph = CompatibilityGraph::from_links(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "A"),
        ]);
        assert_eq!(has_perfect_matching(&graph), None);
    }

    #[test]
    fn complete_group_of_seven_has_no_perfect_matching() {
        let people = ["A", "B", "C", "D", "E", "F", "G"];
        let mut links = Vec::new();
        for i in 0..people.len() {
            for j in (i + 1)..people.len() {
                links.push((people[i], people[j]));
            }
        }
        let graph = CompatibilityGraph::from_links(&links);
        assert_eq!(has_perfect_matching(&graph), None);
    }

    #[test]
    fn line_of_six_matches_under_every_naming() {
        // The search order depends on participant names; a correct search
        // must find the unique pairing of a path graph regardless.
        let mut people = ["A", "B", "C", "D", "E", "F"];
        for_each_permutation(&mut people, &mut |p| {
            let graph = CompatibilityGraph::from_links(&[
                (p[0], p[1]),
                (p[1], p[2]),
                (p[2], p[3]),
                (p[3], p[4]),
                (p[4], p[5]),
            ]);

            let matching = has_perfect_matching(&graph).expect("path of six matches");
            assert!(is_perfect_matching(&graph, &matching));
        });
    }

    #[test]
    fn forked_line_fails_under_every_naming() {
        // Two leaves hang off each inner vertex of a central edge; the
        // leaves outnumber their only possible partners.
        let mut people = ["A", "B", "C", "D", "E", "F"];
        for_each_permutation(&mut people, &mut |p| {
            let graph = CompatibilityGraph::from_links(&[
                (p[0], p[2]),
                (p[1], p[2]),
                (p[2], p[3]),
                (p[3], p[4]),
                (p[3], p[5]),
            ]);
            assert_eq!(has_perfect_matching(&graph), None);
        });
    }

    #[test]
    fn triangle_with_pendants_matches_under_every_naming() {
        let mut people = ["A", "B", "C", "D", "E", "F"];
        for_each_permutation(&mut people, &mut |p| {
            let graph = CompatibilityGraph::from_links(&[
                (p[0], p[1]),
                (p[1], p[2]),
                (p[2], p[3]),
                (p[3], p[1]),
                (p[2], p[4]),
                (p[3], p[5]),
            ]);

            let matching = has_perfect_matching(&graph).expect("graph matches");
            assert!(is_perfect_matching(&graph, &matching));
        });
    }

    #[test]
    fn caterpillar_matches_under_every_naming() {
        let mut people = ["A", "B", "C", "D", "E", "F"];
        for_each_permutation(&mut people, &mut |p| {
            let graph = CompatibilityGraph::from_links(&[
                (p[0], p[1]),
                (p[1], p[2]),
                (p[0], p[3]),
                (p[1], p[4]),
                (p[2], p[5]),
            ]);

            let matching = has_perfect_matching(&graph).expect("caterpillar matches");
            assert!(is_perfect_matching(&graph, &matching));
        });
    }

    #[test]
    fn wide_caterpillar_with_double_legs_fails_quickly() {
        // Spine of ten, two legs per spine vertex: thirty participants,
        // no perfect matching. Sound pruning keeps this near-instant.
        init_logging();
        const ROW: usize = 10;
        let mut links = Vec::new();
        for i in 0..ROW - 1 {
            links.push((i.to_string(), (i + 1).to_string()));
        }
        for i in 0..ROW {
            links.push((i.to_string(), (i + ROW).to_string()));
            links.push((i.to_string(), (i + 2 * ROW).to_string()));
        }
        let graph = CompatibilityGraph::from_links(&links);
        assert_eq!(has_perfect_matching(&graph), None);
    }

    #[test]
    fn millipede_matches_quickly() {
        // Spine of ten, one leg per spine vertex: pairing each spine
        // vertex with its leg is the perfect matching.
        init_logging();
        const ROW: usize = 10;
        let mut links = Vec::new();
        for i in 0..ROW - 1 {
            links.push((i.to_string(), (i + 1).to_string()));
        }
        for i in 0..ROW {
            links.push((i.to_string(), (i + ROW).to_string()));
        }
        let graph = CompatibilityGraph::from_links(&links);

        let matching = has_perfect_matching(&graph).expect("millipede matches");
        assert!(is_perfect_matching(&graph, &matching));
    }

    #[test]
    fn repeated_runs_agree() {
        let graph =
            CompatibilityGraph::from_links(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);

        let first = has_perfect_matching(&graph);
        let second = has_perfect_matching(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn matcher_reports_statistics() {
        let mut matcher = PerfectMatcher::new();
        let graph = CompatibilityGraph::from_links(&[("A", "B"), ("C", "D")]);

        let matching = matcher.run(&graph).expect("two disjoint pairs match");
        assert_eq!(matching.len(), 2);
        assert_eq!(matcher.name(), "perfect matching existence");
        assert_eq!(matcher.category(), "matching");
        assert!(matcher.statistics().nodes_explored >= 3);
        assert_eq!(matcher.statistics().max_depth, 2);
        assert_eq!(matcher.statistics().candidates_evaluated, 0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_links() -> impl Strategy<Value = Vec<(String, String)>> {
            prop::collection::vec((0usize..8, 0usize..8), 0..16).prop_map(|raw| {
                raw.into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (format!("p{a}"), format!("p{b}")))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn found_matchings_always_validate(links in arbitrary_links()) {
                let graph = CompatibilityGraph::from_links(&links);
                if let Some(matching) = has_perfect_matching(&graph) {
                    prop_assert!(is_perfect_matching(&graph, &matching));
                }
            }

            #[test]
            fn odd_groups_never_match(links in arbitrary_links()) {
                let graph = CompatibilityGraph::from_links(&links);
                if graph.len() % 2 == 1 {
                    prop_assert_eq!(has_perfect_matching(&graph), None);
                }
            }
        }
    }
}
