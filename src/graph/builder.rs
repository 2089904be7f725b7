//! KnowledgeIndex: the immutable bundle built from a set of records

use super::connections::ConnectionGraph;
use super::identity::IdentityMap;
use super::index::LookupTables;
use crate::query::IndexQuery;
use crate::record::{CellParseError, Record};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// A coauthor cell recovered during normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildWarning {
    /// Zero-based data row index in the source
    pub row: usize,
    #[serde(serialize_with = "serialize_display")]
    pub anomaly: CellParseError,
}

fn serialize_display<S: Serializer>(error: &CellParseError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Facts about how an index was built
#[derive(Debug, Clone, Serialize)]
pub struct IndexMetadata {
    pub built_at: DateTime<Utc>,
    /// Where the rows came from (file path or description)
    pub source: Option<String>,
    pub rows: usize,
    pub warnings: Vec<BuildWarning>,
}

impl IndexMetadata {
    pub fn new(rows: usize) -> Self {
        Self {
            built_at: Utc::now(),
            source: None,
            rows,
            warnings: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<BuildWarning>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// The finished, read-only index set.
///
/// Built once from an ordered record list in two passes: identity
/// resolution over every record, then lookup tables and the connection
/// graph together, visiting each record once. Nothing mutates afterwards;
/// share it behind `Arc` and rebuild for a changed dataset.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    records: Vec<Arc<Record>>,
    identity: IdentityMap,
    tables: LookupTables,
    connections: ConnectionGraph,
    metadata: IndexMetadata,
}

impl KnowledgeIndex {
    /// Build from records in ingestion order
    pub fn build(records: Vec<Record>) -> Self {
        let rows = records.len();
        Self::build_with_metadata(records, IndexMetadata::new(rows))
    }

    pub fn build_with_metadata(records: Vec<Record>, metadata: IndexMetadata) -> Self {
        let records: Vec<Arc<Record>> = records.into_iter().map(Arc::new).collect();

        let identity = IdentityMap::from_records(records.iter().map(|record| &**record));
        tracing::debug!(
            names = identity.name_to_identifier().len(),
            identifiers = identity.identifier_to_name().len(),
            conflicts = identity.conflicts(),
            "identity pass complete"
        );

        let mut tables = LookupTables::new();
        let mut connections = ConnectionGraph::new();
        for record in &records {
            tables.insert(record, &identity);
            connections.record_collaboration(record, &identity);
        }

        tracing::info!(
            records = records.len(),
            identifiers = tables.by_identifier.len(),
            documents = tables.by_document.len(),
            people = tables.by_person.len(),
            edges = connections.edge_count(),
            warnings = metadata.warnings.len(),
            "knowledge index built"
        );

        Self {
            records,
            identity,
            tables,
            connections,
            metadata,
        }
    }

    /// Query façade over this index
    pub fn query(&self) -> IndexQuery<'_> {
        IndexQuery::new(self)
    }

    /// Records in ingestion order
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn identity(&self) -> &IdentityMap {
        &self.identity
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Declared author name of every row, in row order (`None` where absent)
    pub fn author_names(&self) -> Vec<Option<&str>> {
        self.records
            .iter()
            .map(|record| record.author_name.as_deref())
            .collect()
    }

    /// Group records by the text value of a column.
    ///
    /// Works for known fields (by wire name) and pass-through columns.
    /// Rows without a value are skipped; groups appear in order of first
    /// appearance and keep row order inside.
    pub fn group_by_column(&self, column: &str) -> Vec<(String, Vec<Arc<Record>>)> {
        let mut groups: Vec<(String, Vec<Arc<Record>>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in &self.records {
            let Some(value) = record.column_text(column) else {
                continue;
            };
            match positions.get(&value) {
                Some(&idx) => groups[idx].1.push(Arc::clone(record)),
                None => {
                    positions.insert(value.clone(), groups.len());
                    groups.push((value, vec![Arc::clone(record)]));
                }
            }
        }

        groups
    }
}

impl Default for KnowledgeIndex {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}
