//! Name ↔ identifier resolution with first-occurrence-wins semantics

use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Bidirectional association between declared author names and identifiers.
///
/// Each direction keeps the first mapping seen in ingestion order. A later
/// record pairing a known name with a different identifier (or the reverse)
/// is ignored, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentityMap {
    #[serde(rename = "name_to_orcid")]
    name_to_identifier: HashMap<String, String>,
    #[serde(rename = "orcid_to_name")]
    identifier_to_name: HashMap<String, String>,
    #[serde(skip)]
    conflicts: usize,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// First pass: scan every record in order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut map = Self::new();
        for record in records {
            map.observe(record);
        }
        map
    }

    /// Register the name/identifier pair of one record.
    ///
    /// Rows lacking either side contribute nothing.
    pub fn observe(&mut self, record: &Record) {
        let (Some(name), Some(identifier)) = (
            record.author_name.as_deref(),
            record.author_identifier.as_deref(),
        ) else {
            return;
        };

        match self.name_to_identifier.get(name) {
            None => {
                self.name_to_identifier
                    .insert(name.to_string(), identifier.to_string());
            }
            Some(existing) if existing != identifier => {
                self.conflicts += 1;
                tracing::warn!(
                    name,
                    kept = %existing,
                    ignored = identifier,
                    "name already mapped to another identifier"
                );
            }
            Some(_) => {}
        }

        match self.identifier_to_name.get(identifier) {
            None => {
                self.identifier_to_name
                    .insert(identifier.to_string(), name.to_string());
            }
            Some(existing) if existing != name => {
                self.conflicts += 1;
                tracing::debug!(
                    identifier,
                    kept = %existing,
                    ignored = name,
                    "identifier already mapped to another name"
                );
            }
            Some(_) => {}
        }
    }

    /// Map a name to its identifier; any other token comes back unchanged.
    ///
    /// Total and pure: an identifier or an unresolvable raw name is its own key.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.name_to_identifier
            .get(token)
            .map(String::as_str)
            .unwrap_or(token)
    }

    pub fn identifier_for(&self, name: &str) -> Option<&str> {
        self.name_to_identifier.get(name).map(String::as_str)
    }

    pub fn name_for(&self, identifier: &str) -> Option<&str> {
        self.identifier_to_name.get(identifier).map(String::as_str)
    }

    pub fn name_to_identifier(&self) -> &HashMap<String, String> {
        &self.name_to_identifier
    }

    pub fn identifier_to_name(&self) -> &HashMap<String, String> {
        &self.identifier_to_name
    }

    /// Number of conflicting pairs ignored by first-wins
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_identifier.is_empty() && self.identifier_to_name.is_empty()
    }
}
