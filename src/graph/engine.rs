//! IndexEngine: registry of published knowledge indexes

use super::builder::KnowledgeIndex;
use crate::record::Record;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Identifier for a loaded dataset
///
/// Serializes as a plain string (UUID or a chosen name like "veriset")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    /// Create a new random DatasetId (UUID-based)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DatasetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DatasetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Holds the current index of every dataset.
///
/// Indexes are published whole: a rebuild happens off to the side and the
/// finished `Arc<KnowledgeIndex>` replaces the old one in a single insert.
/// Readers take a clone of the `Arc` and query it without holding any lock,
/// so they see either the old index or the new one, never a partial build.
#[derive(Debug, Default)]
pub struct IndexEngine {
    datasets: DashMap<DatasetId, Arc<KnowledgeIndex>>,
}

impl IndexEngine {
    pub fn new() -> Self {
        Self {
            datasets: DashMap::new(),
        }
    }

    /// Publish a finished index, returning the one it replaced
    pub fn publish(&self, id: DatasetId, index: KnowledgeIndex) -> Option<Arc<KnowledgeIndex>> {
        let previous = self.datasets.insert(id.clone(), Arc::new(index));
        tracing::info!(dataset = %id, replaced = previous.is_some(), "index published");
        previous
    }

    /// Build an index from records and publish it
    pub fn rebuild(&self, id: DatasetId, records: Vec<Record>) -> Arc<KnowledgeIndex> {
        let index = Arc::new(KnowledgeIndex::build(records));
        self.datasets.insert(id, Arc::clone(&index));
        index
    }

    /// Current index for a dataset
    pub fn get(&self, id: &DatasetId) -> Option<Arc<KnowledgeIndex>> {
        self.datasets.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, id: &DatasetId) -> Option<Arc<KnowledgeIndex>> {
        self.datasets.remove(id).map(|(_, index)| index)
    }

    pub fn list(&self) -> Vec<DatasetId> {
        self.datasets.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    pub fn has_dataset(&self, id: &DatasetId) -> bool {
        self.datasets.contains_key(id)
    }
}
