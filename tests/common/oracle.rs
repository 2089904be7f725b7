//! Brute-force expectations computed straight from the records

use coauthor_graph::Record;
use std::collections::HashMap;

/// First-wins name → identifier map, rebuilt independently of the library
fn first_identifiers(records: &[Record]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for record in records {
        if let (Some(name), Some(id)) = (&record.author_name, &record.author_identifier) {
            map.entry(name.clone()).or_insert_with(|| id.clone());
        }
    }
    map
}

/// Resolved participant keys of one record, duplicates kept
pub fn participant_keys(record: &Record, names: &HashMap<String, String>) -> Vec<String> {
    let primary = record
        .author_name
        .clone()
        .or_else(|| record.author_identifier.clone());
    primary
        .into_iter()
        .chain(record.coauthor_names.iter().cloned())
        .map(|token| names.get(&token).cloned().unwrap_or(token))
        .collect()
}

/// Expected count for every ordered pair of distinct keys.
///
/// Per record, a pair contributes `occurrences(a) * occurrences(b)`.
pub fn expected_weights(records: &[Record]) -> HashMap<(String, String), u64> {
    let names = first_identifiers(records);
    let mut weights: HashMap<(String, String), u64> = HashMap::new();

    for record in records {
        let mut occurrences: HashMap<String, u64> = HashMap::new();
        for key in participant_keys(record, &names) {
            *occurrences.entry(key).or_insert(0) += 1;
        }
        for (a, na) in &occurrences {
            for (b, nb) in &occurrences {
                if a != b {
                    *weights.entry((a.clone(), b.clone())).or_insert(0) += na * nb;
                }
            }
        }
    }
    weights
}
