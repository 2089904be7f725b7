//! Fixture datasets
//!
//! Hand-written fixtures for behavioural tests plus a seeded generator for
//! invariant checks over many shapes of dirty data.

use coauthor_graph::Record;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The two mirrored rows used throughout the query docs
pub fn alice_and_bob() -> Vec<Record> {
    vec![
        Record::new("A", "d1", "Alice").with_coauthors(["Bob"]),
        Record::new("B", "d2", "Bob").with_coauthors(["Alice"]),
    ]
}

/// A small research group with repeat collaborations, an outside
/// coauthor who never authors a row, and a conflicting alias
pub fn small_lab() -> Vec<Record> {
    vec![
        Record::new("0000-0001", "10.1/a", "Alice Smith")
            .with_coauthors(["Bob Jones", "Carol White"])
            .with_extra("author_position", "first"),
        Record::new("0000-0002", "10.1/a", "Bob Jones")
            .with_coauthors(["Alice Smith", "Carol White"])
            .with_extra("author_position", "middle"),
        Record::new("0000-0001", "10.1/b", "Alice Smith")
            .with_coauthors(["Bob Jones", "Dan External"])
            .with_extra("author_position", "last"),
        Record::new("0000-0009", "10.1/c", "Alice Smith")
            .with_coauthors(["Erin Green"])
            .with_extra("author_position", "first"),
        Record::new("0000-0005", "10.1/d", "Erin Green").with_extra("author_position", "first"),
    ]
}

/// Shape of a generated dataset
#[derive(Debug, Clone)]
pub struct RandomDatasetConfig {
    pub rows: usize,
    pub people: usize,
    pub documents: usize,
    pub max_coauthors: usize,
    /// Probability that a row has no identifier
    pub missing_identifier: f64,
    /// Probability that a row reuses a name with a fresh identifier
    pub alias_rate: f64,
}

impl Default for RandomDatasetConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            people: 15,
            documents: 25,
            max_coauthors: 4,
            missing_identifier: 0.1,
            alias_rate: 0.1,
        }
    }
}

/// Seeded random dataset with duplicates, aliases and missing identifiers
pub fn random_dataset(seed: u64, config: &RandomDatasetConfig) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..config.people).map(|i| format!("Person {i}")).collect();

    (0..config.rows)
        .map(|row| {
            let person = rng.gen_range(0..config.people);
            let identifier = if rng.gen_bool(config.alias_rate) {
                format!("ALIAS-{row}")
            } else {
                format!("ID-{person}")
            };
            let document = format!("doc-{}", rng.gen_range(0..config.documents));

            let count = rng.gen_range(0..=config.max_coauthors);
            let coauthors: Vec<String> = (0..count)
                .filter_map(|_| names.choose(&mut rng).cloned())
                .collect();

            let mut record = Record::new(identifier, document, names[person].clone()).with_coauthors(coauthors);
            if rng.gen_bool(config.missing_identifier) {
                record.author_identifier = None;
            }
            record
        })
        .collect()
}
