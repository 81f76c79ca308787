//! Participant graph representations.
//!
//! Two read-only views of a group of participants back the matchers: a
//! [`CompatibilityGraph`] records who may be paired with whom, and a
//! [`WeightedGraph`] additionally scores each possible pairing with an
//! integer weight. Both are thin newtypes over ordered maps.
//!
//! # Ordering policy
//!
//! Participants iterate in sorted (lexicographic) order everywhere. The
//! searches pick participants and partners in that order, so among several
//! equally valid or equally weighted answers the one reached first under
//! sorted traversal is returned. This makes results reproducible across
//! runs and platforms.
//!
//! # Symmetry invariant
//!
//! Both graphs model undirected relations: a link from A to B must be
//! mirrored by a link from B to A, with the same weight in the weighted
//! case. The `from_links` / `add_link` constructors maintain this by
//! construction. Graphs assembled by other means (deserialization,
//! hand-edited data) can be checked with [`CompatibilityGraph::validate`]
//! and [`WeightedGraph::validate`]; the matchers themselves never repair
//! or reject asymmetric input, they just walk it deterministically.
//!
//! Copyright (c) 2025 pairmatch contributors

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by graph lookups and integrity checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("No edge between '{from}' and '{to}'")]
    MissingEdge { from: String, to: String },

    #[error("Link from '{from}' to '{to}' has no reverse counterpart")]
    AsymmetricLink { from: String, to: String },

    #[error("Edge '{from}'-'{to}' weighs {forward} one way and {backward} the other")]
    InconsistentWeight {
        from: String,
        to: String,
        forward: i64,
        backward: i64,
    },

    #[error("Participant '{0}' is referenced as a neighbor but missing as a key")]
    UnknownParticipant(String),
}

/// Undirected compatibility relation: participant to the set of
/// participants it may be paired with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityGraph {
    links: BTreeMap<String, BTreeSet<String>>,
}

impl CompatibilityGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a list of undirected links.
    ///
    /// Each entry registers both endpoints as participants and adds the
    /// link in both directions.
    pub fn from_links<S: AsRef<str>>(links: &[(S, S)]) -> Self {
        let mut graph = Self::new();
        for (a, b) in links {
            graph.add_link(a.as_ref(), b.as_ref());
        }
        graph
    }

    /// Registers a participant with no links yet. No-op if already present.
    pub fn add_participant(&mut self, participant: impl Into<String>) {
        self.links.entry(participant.into()).or_default();
    }

    /// Adds an undirected link, registering both endpoints.
    pub fn add_link(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let (a, b) = (a.into(), b.into());
        debug_assert_ne!(a, b, "self-links are not representable");
        self.links.entry(a.clone()).or_default().insert(b.clone());
        self.links.entry(b).or_default().insert(a);
    }

    /// Iterates participants in sorted order.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// Iterates the neighbors of `participant` in sorted order.
    ///
    /// Unknown participants have no neighbors.
    pub fn neighbors<'a>(&'a self, participant: &str) -> impl Iterator<Item = &'a str> {
        self.links
            .get(participant)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Whether `participant` is registered in the graph.
    #[inline]
    pub fn contains(&self, participant: &str) -> bool {
        self.links.contains_key(participant)
    }

    /// Whether `a` lists `b` as a neighbor.
    pub fn linked(&self, a: &str, b: &str) -> bool {
        self.links.get(a).is_some_and(|nbrs| nbrs.contains(b))
    }

    /// Number of participants.
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Checks the symmetry invariant: every neighbor exists as a key and
    /// lists the owner back. Returns the first violation found.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (person, neighbors) in &self.links {
            for neighbor in neighbors {
                let Some(reverse) = self.links.get(neighbor) else {
                    return Err(GraphError::UnknownParticipant(neighbor.clone()));
                };
                if !reverse.contains(person) {
                    return Err(GraphError::AsymmetricLink {
                        from: person.clone(),
                        to: neighbor.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Undirected weighted relation: participant to a map from neighbor to
/// integer link weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedGraph {
    links: BTreeMap<String, BTreeMap<String, i64>>,
}

impl WeightedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a list of weighted undirected links.
    ///
    /// Each entry sets the weight in both directions; a later entry for
    /// the same two participants overwrites the earlier weight.
    pub fn from_weighted_links<S: AsRef<str>>(links: &[(S, S, i64)]) -> Self {
        let mut graph = Self::new();
        for (a, b, weight) in links {
            graph.add_link(a.as_ref(), b.as_ref(), *weight);
        }
        graph
    }

    /// Registers a participant with no links yet. No-op if already present.
    pub fn add_participant(&mut self, participant: impl Into<String>) {
        self.links.entry(participant.into()).or_default();
    }

    /// Adds an undirected weighted link, registering both endpoints and
    /// overwriting any previous weight between the two.
    pub fn add_link(&mut self, a: impl Into<String>, b: impl Into<String>, weight: i64) {
        let (a, b) = (a.into(), b.into());
        debug_assert_ne!(a, b, "self-links are not representable");
        self.links
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.links.entry(b).or_default().insert(a, weight);
    }

    /// Iterates participants in sorted order.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// Iterates `(neighbor, weight)` entries of `participant` in sorted
    /// neighbor order. Unknown participants have no neighbors.
    pub fn neighbors<'a>(&'a self, participant: &str) -> impl Iterator<Item = (&'a str, i64)> {
        self.links
            .get(participant)
            .into_iter()
            .flatten()
            .map(|(neighbor, weight)| (neighbor.as_str(), *weight))
    }

    /// Whether `participant` is registered in the graph.
    #[inline]
    pub fn contains(&self, participant: &str) -> bool {
        self.links.contains_key(participant)
    }

    /// Looks up the weight of the edge from `from` to `to`.
    ///
    /// Unlike a plain map lookup this reports a missing edge as an error
    /// rather than a silent zero, so a matching evaluated against the
    /// wrong graph fails loudly.
    pub fn edge_weight(&self, from: &str, to: &str) -> Result<i64, GraphError> {
        self.links
            .get(from)
            .and_then(|nbrs| nbrs.get(to))
            .copied()
            .ok_or_else(|| GraphError::MissingEdge {
                from: from.to_owned(),
                to: to.to_owned(),
            })
    }

    /// Number of participants.
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Checks the symmetry invariant: every neighbor exists as a key and
    /// carries the same weight in both directions.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (person, neighbors) in &self.links {
            for (neighbor, &forward) in neighbors {
                let Some(reverse) = self.links.get(neighbor) else {
                    return Err(GraphError::UnknownParticipant(neighbor.clone()));
                };
                match reverse.get(person) {
                    None => {
                        return Err(GraphError::AsymmetricLink {
                            from: person.clone(),
                            to: neighbor.clone(),
                        });
                    }
                    Some(&backward) if backward != forward => {
                        return Err(GraphError::InconsistentWeight {
                            from: person.clone(),
                            to: neighbor.clone(),
                            forward,
                            backward,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
