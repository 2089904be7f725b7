//! Summary statistics over a built index
//!
//! Counts are taken over person keys: every resolved participant that
//! appears in the by-person table, whether or not they have collaborators.

use crate::graph::KnowledgeIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Size and connectivity of a co-authorship graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStats {
    /// Records in the index
    pub records: usize,
    /// Distinct author identifiers
    pub identifiers: usize,
    /// Distinct documents
    pub documents: usize,
    /// Distinct person keys (authors and coauthors)
    pub people: usize,
    /// People with at least one collaborator
    pub connected_authors: usize,
    /// People who never share a record with anyone else
    pub isolated_authors: usize,
    /// Coauthor mentions naming another author of the dataset
    pub cross_linked_mentions: usize,
    /// Undirected collaborator pairs
    pub edges: usize,
    /// Sum of collaboration counts over undirected pairs
    pub total_weight: u64,
    /// 2 * edges / people
    pub average_degree: f64,
    pub components: usize,
    pub largest_component: usize,
}

impl GraphStats {
    pub fn compute(index: &KnowledgeIndex) -> Self {
        let tables = index.tables();
        let connections = index.connections();

        let people = tables.by_person.len();
        let connected_authors = connections.person_count();
        let edges = connections.edge_count();

        let components = connected_components(index);
        let largest_component = components.iter().map(HashSet::len).max().unwrap_or(0);

        Self {
            records: index.record_count(),
            identifiers: tables.by_identifier.len(),
            documents: tables.by_document.len(),
            people,
            connected_authors,
            isolated_authors: people.saturating_sub(connected_authors),
            cross_linked_mentions: cross_linked_mentions(index),
            edges,
            total_weight: connections.total_weight(),
            average_degree: if people == 0 {
                0.0
            } else {
                2.0 * edges as f64 / people as f64
            },
            components: components.len(),
            largest_component,
        }
    }
}

/// Count coauthor mentions that point at a dataset author.
///
/// A mention counts once per identifier whose name matches it, unless that
/// identifier or name belongs to the row's own author.
pub fn cross_linked_mentions(index: &KnowledgeIndex) -> usize {
    let identity = index.identity();
    let mut by_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for identifier in index.tables().by_identifier.keys() {
        if let Some(name) = identity.name_for(identifier) {
            by_name.entry(name).or_default().push(identifier.as_str());
        }
    }

    let mut count = 0;
    for record in index.records() {
        for mention in &record.coauthor_names {
            if record.author_name.as_deref() == Some(mention.as_str()) {
                continue;
            }
            let Some(identifiers) = by_name.get(mention.as_str()) else {
                continue;
            };
            count += identifiers
                .iter()
                .filter(|&&id| record.author_identifier.as_deref() != Some(id))
                .count();
        }
    }
    count
}

/// Connected components over every person key (isolated people are
/// singleton components)
pub fn connected_components(index: &KnowledgeIndex) -> Vec<HashSet<&str>> {
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for person in index.tables().by_person.keys() {
        adj.entry(person.as_str()).or_default();
    }
    for (person, collaborators) in index.connections().iter() {
        adj.entry(person)
            .or_default()
            .extend(collaborators.keys().map(String::as_str));
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut components: Vec<HashSet<&str>> = Vec::new();

    for &start in adj.keys() {
        if visited.contains(start) {
            continue;
        }

        let mut component: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![start];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            component.insert(current);

            if let Some(neighbors) = adj.get(current) {
                stack.extend(neighbors.iter().copied().filter(|n| !visited.contains(n)));
            }
        }

        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn stats_for_two_clusters_and_a_loner() {
        let index = KnowledgeIndex::build(vec![
            Record::new("A", "d1", "Alice").with_coauthors(["Bob", "Carol"]),
            Record::new("B", "d2", "Bob").with_coauthors(["Alice"]),
            Record::new("D", "d3", "Dan").with_coauthors(["Erin"]),
            Record::new("F", "d4", "Fay"),
        ]);
        let stats = GraphStats::compute(&index);

        assert_eq!(stats.records, 4);
        assert_eq!(stats.identifiers, 4);
        // A, B, Carol, D, Erin, F
        assert_eq!(stats.people, 6);
        assert_eq!(stats.connected_authors, 5);
        assert_eq!(stats.isolated_authors, 1);
        // Bob on d1, Alice on d2
        assert_eq!(stats.cross_linked_mentions, 2);
        // A-B, A-Carol, B-Carol, D-Erin
        assert_eq!(stats.edges, 4);
        assert_eq!(stats.total_weight, 5);
        assert_eq!(stats.components, 3);
        assert_eq!(stats.largest_component, 3);
        assert!((stats.average_degree - 8.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_index_has_zero_stats() {
        let stats = GraphStats::compute(&KnowledgeIndex::default());
        assert_eq!(stats, GraphStats::default());
    }

    #[test]
    fn cross_links_skip_the_row_author_and_outsiders() {
        let index = KnowledgeIndex::build(vec![
            Record::new("A", "d1", "Alice").with_coauthors(["Alice", "Bob", "Zed"]),
            Record::new("B", "d2", "Bob"),
            Record::new("B2", "d3", "Bob").with_coauthors(["Alice"]),
        ]);
        // d1 names Bob, who holds B and B2; d3 names Alice
        assert_eq!(cross_linked_mentions(&index), 3);
    }

    #[test]
    fn components_include_isolated_people() {
        let index = KnowledgeIndex::build(vec![Record::new("A", "d1", "Alice"), Record::new("B", "d2", "Bob")]);
        let components = connected_components(&index);
        assert_eq!(components.len(), 2);
        assert!(components.iter().all(|c| c.len() == 1));
    }
}
