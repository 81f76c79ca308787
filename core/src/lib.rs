//! pairmatch core
//!
//! Exhaustive backtracking matchers over undirected graphs of named
//! participants. Two questions are answered:
//!
//! - does a *perfect matching* exist, a pairing that uses every
//!   participant exactly once ([`has_perfect_matching`]), and
//! - which vertex-disjoint set of edges carries the greatest total
//!   weight, coverage not required ([`maximum_weight_matching`]).
//!
//! Both searches enumerate the solution space exactly rather than running
//! a polynomial matching algorithm, so they are meant for groups of a few
//! tens of participants where correctness and reproducibility matter more
//! than asymptotics.
//!
//! # Example
//!
//! ```
//! use pairmatch_core::{maximum_weight_matching, WeightedGraph};
//!
//! let graph = WeightedGraph::from_weighted_links(&[
//!     ("ann", "ben", 1),
//!     ("ben", "cas", 3),
//!     ("cas", "dee", 1),
//! ]);
//!
//! let matching = maximum_weight_matching(&graph);
//! assert_eq!(matching.len(), 1); // ben-cas outweighs both end edges
//! ```
//!
//! # Determinism
//!
//! Participants are traversed in sorted order, so both searches return the
//! same answer for the same input on every run; among equally valid or
//! equally heavy answers the one reached first under that order wins.
//!
//! Copyright (c) 2025 pairmatch contributors

pub mod algorithm;
pub mod data_structures;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::algorithm::matching::{
    has_perfect_matching, matching_weight, maximum_weight_matching, MaxWeightMatcher,
    PerfectMatcher,
};
pub use crate::algorithm::traits::{Matcher, MatchingError, SearchStatistics};
pub use crate::data_structures::graph::{CompatibilityGraph, GraphError, WeightedGraph};
pub use crate::data_structures::pairing::{Matching, Pair};
pub use crate::validation::{is_perfect_matching, is_valid_matching};
