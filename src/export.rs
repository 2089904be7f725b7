//! Presentation payload
//!
//! The rendering layer consumes the whole index as one JSON object with
//! fixed top-level keys. Field names here are part of that contract.

use crate::graph::{ByDocumentIndex, ByIdentifierIndex, ByPersonIndex, ConnectionGraph, KnowledgeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// Borrowed view of an index in the presentation shape
#[derive(Debug, Clone, Serialize)]
pub struct IndexPayload<'a> {
    pub orcid: &'a ByIdentifierIndex,
    pub doi: &'a ByDocumentIndex,
    /// Declared author name of every row, in row order; `null` where absent
    pub author_name: Vec<Option<&'a str>>,
    pub coauthors: &'a ByPersonIndex,
    pub connections: &'a ConnectionGraph,
    pub name_to_orcid: &'a HashMap<String, String>,
    pub orcid_to_name: &'a HashMap<String, String>,
}

impl<'a> IndexPayload<'a> {
    pub fn new(index: &'a KnowledgeIndex) -> Self {
        let tables = index.tables();
        let identity = index.identity();
        Self {
            orcid: &tables.by_identifier,
            doi: &tables.by_document,
            author_name: index.author_names(),
            coauthors: &tables.by_person,
            connections: index.connections(),
            name_to_orcid: identity.name_to_identifier(),
            orcid_to_name: identity.identifier_to_name(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    #[test]
    fn payload_has_every_top_level_key() {
        let index = KnowledgeIndex::build(vec![
            Record::new("A", "d1", "Alice").with_coauthors(["Bob"]),
            Record::new("B", "d2", "Bob").with_coauthors(["Alice"]),
        ]);
        let value = IndexPayload::new(&index).to_value().unwrap();

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["orcid", "doi", "author_name", "coauthors", "connections", "name_to_orcid", "orcid_to_name"]
        );
        assert_eq!(value["author_name"], json!(["Alice", "Bob"]));
        assert_eq!(value["connections"]["A"], json!({ "B": 2 }));
        assert_eq!(value["name_to_orcid"]["Bob"], "B");
        assert_eq!(value["doi"]["d1"]["coauthors"], json!(["Bob"]));
    }

    #[test]
    fn nameless_rows_serialize_as_null() {
        let mut nameless = Record::new("B", "d2", "Bob");
        nameless.author_name = None;
        let index = KnowledgeIndex::build(vec![Record::new("A", "d1", "Alice"), nameless]);
        let value = IndexPayload::new(&index).to_value().unwrap();
        assert_eq!(value["author_name"], json!(["Alice", null]));
    }

    #[test]
    fn empty_index_payload_is_all_empty() {
        let index = KnowledgeIndex::default();
        let value = IndexPayload::new(&index).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "orcid": {},
                "doi": {},
                "author_name": [],
                "coauthors": {},
                "connections": {},
                "name_to_orcid": {},
                "orcid_to_name": {}
            })
        );
    }
}
