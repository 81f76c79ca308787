//! Matching search procedures.
//!
//! Two independent searches share nothing but the pairing value types:
//! [`existence`] decides whether every participant can be paired off, and
//! [`max_weight`] hunts for the heaviest vertex-disjoint pairing. Both are
//! exact exhaustive backtracking searches, tractable only for groups of a
//! few dozen participants.

pub mod existence;
pub mod max_weight;

pub use self::existence::{has_perfect_matching, PerfectMatcher};
pub use self::max_weight::{matching_weight, maximum_weight_matching, MaxWeightMatcher};
