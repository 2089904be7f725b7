//! Record lookup tables: by identifier, by document, by person

use super::identity::IdentityMap;
use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// `authorIdentifier` → every record carrying it, in ingestion order
pub type ByIdentifierIndex = HashMap<String, Vec<Arc<Record>>>;

/// `documentIdentifier` → the last record seen for it
pub type ByDocumentIndex = HashMap<String, Arc<Record>>;

/// Resolved person key → every record the person takes part in
pub type ByPersonIndex = HashMap<String, Vec<Arc<Record>>>;

/// The three record lookup structures, filled during the second pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct LookupTables {
    #[serde(rename = "orcid")]
    pub by_identifier: ByIdentifierIndex,
    #[serde(rename = "doi")]
    pub by_document: ByDocumentIndex,
    #[serde(rename = "coauthors")]
    pub by_person: ByPersonIndex,
}

impl LookupTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// File one record into all three tables.
    ///
    /// The by-document entry is overwritten by later rows. The by-person
    /// table receives the record once per participant, duplicates included.
    pub fn insert(&mut self, record: &Arc<Record>, identity: &IdentityMap) {
        if let Some(identifier) = record.author_identifier.as_deref() {
            self.by_identifier
                .entry(identifier.to_string())
                .or_default()
                .push(Arc::clone(record));
        }

        if let Some(document) = record.document_identifier.as_deref() {
            let replaced = self
                .by_document
                .insert(document.to_string(), Arc::clone(record))
                .is_some();
            if replaced {
                tracing::trace!(document, "document row replaced by a later row");
            }
        }

        for participant in record.participants() {
            let key = identity.resolve(participant);
            self.by_person
                .entry(key.to_string())
                .or_default()
                .push(Arc::clone(record));
        }
    }

    pub fn records_for_identifier(&self, identifier: &str) -> Option<&[Arc<Record>]> {
        self.by_identifier.get(identifier).map(Vec::as_slice)
    }

    pub fn record_for_document(&self, document: &str) -> Option<&Arc<Record>> {
        self.by_document.get(document)
    }

    pub fn records_for_person(&self, key: &str) -> Option<&[Arc<Record>]> {
        self.by_person.get(key).map(Vec::as_slice)
    }
}
