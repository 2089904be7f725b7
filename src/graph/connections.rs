//! Weighted, symmetric co-authorship graph

use super::identity::IdentityMap;
use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Collaborator key → number of co-occurrences
pub type Collaborators = HashMap<String, u64>;

/// Person key → collaborators with collaboration counts.
///
/// Keys are identifiers when a name resolves, raw names otherwise. Every
/// edge is added in both directions within the same record, so the graph
/// stays symmetric; pairs whose keys resolve to the same person are skipped,
/// so there are no self-edges. Counts only grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConnectionGraph {
    adjacency: HashMap<String, Collaborators>,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every ordered pair of distinct participants in one record.
    ///
    /// Participants are the primary author followed by the coauthors, with
    /// duplicates kept: a name listed twice contributes twice.
    pub fn record_collaboration(&mut self, record: &Record, identity: &IdentityMap) {
        let keys: Vec<&str> = record
            .participants()
            .map(|participant| identity.resolve(participant))
            .collect();

        for (i, from) in keys.iter().enumerate() {
            for (j, to) in keys.iter().enumerate() {
                if i == j || from == to {
                    continue;
                }
                self.increment(from, to);
            }
        }
    }

    fn increment(&mut self, from: &str, to: &str) {
        *self
            .adjacency
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0) += 1;
    }

    /// Collaborators of a person key
    pub fn collaborators(&self, key: &str) -> Option<&Collaborators> {
        self.adjacency.get(key)
    }

    /// Collaboration count between two keys (0 when unconnected)
    pub fn weight(&self, from: &str, to: &str) -> u64 {
        self.adjacency
            .get(from)
            .and_then(|collaborators| collaborators.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Every person key with at least one collaborator
    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collaborators)> {
        self.adjacency.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of people with at least one collaborator
    pub fn person_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected collaborator pairs
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(HashMap::len).sum();
        directed / 2
    }

    /// Sum of the counts over undirected pairs
    pub fn total_weight(&self) -> u64 {
        let directed: u64 = self
            .adjacency
            .values()
            .flat_map(|collaborators| collaborators.values())
            .sum();
        directed / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check that every edge has a mirror with the same count
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(from, collaborators)| {
            collaborators
                .iter()
                .all(|(to, count)| self.weight(to, from) == *count)
        })
    }

    pub fn has_self_loops(&self) -> bool {
        self.adjacency
            .iter()
            .any(|(key, collaborators)| collaborators.contains_key(key))
    }
}
