//! Ingest pipeline: rows → normalized records → knowledge index

use super::traits::{IngestError, IngestResult, RowSource};
use crate::config::IndexConfig;
use crate::graph::{BuildWarning, IndexMetadata, KnowledgeIndex};
use crate::record::{Normalizer, RawRow, Record};

/// Records plus the anomalies recovered while normalizing them
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<Record>,
    pub warnings: Vec<BuildWarning>,
}

/// Drives one build from a row source.
///
/// Structural problems (unreadable source, missing required column, empty
/// dataset) abort with an `IngestError`. Cell-level problems never do: a
/// bad coauthor cell is recovered by the normalizer and reported as a
/// `BuildWarning` in the index metadata.
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    normalizer: Normalizer,
    allow_empty: bool,
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(&IndexConfig::default())
    }
}

impl IngestPipeline {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            normalizer: Normalizer::from_config(config),
            allow_empty: config.allow_empty,
        }
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Read, normalize and build
    pub fn run(&self, source: &mut dyn RowSource) -> IngestResult<KnowledgeIndex> {
        let name = source.describe();
        let rows = source.rows()?;
        tracing::debug!(source = %name, rows = rows.len(), "rows read");

        let rows_read = rows.len();
        let batch = self.normalize_rows(&name, &rows)?;
        let metadata = IndexMetadata::new(rows_read)
            .with_source(name)
            .with_warnings(batch.warnings);

        Ok(KnowledgeIndex::build_with_metadata(batch.records, metadata))
    }

    /// Check columns and normalize every row in order
    pub fn normalize_rows(&self, source_name: &str, rows: &[RawRow]) -> IngestResult<NormalizedBatch> {
        if rows.is_empty() {
            if self.allow_empty {
                return Ok(NormalizedBatch::default());
            }
            return Err(IngestError::EmptyDataset(source_name.to_string()));
        }

        self.check_columns(source_name, &rows[0])?;

        let mut batch = NormalizedBatch::default();
        for (row, raw) in rows.iter().enumerate() {
            let normalized = self.normalizer.normalize(raw);
            if let Some(anomaly) = normalized.anomaly {
                tracing::warn!(source = source_name, row, %anomaly, "coauthor cell recovered");
                batch.warnings.push(BuildWarning { row, anomaly });
            }
            batch.records.push(normalized.record);
        }
        Ok(batch)
    }

    fn check_columns(&self, source_name: &str, first: &RawRow) -> IngestResult<()> {
        for column in self.normalizer.columns().required() {
            if !first.has_column(column) {
                return Err(IngestError::MissingColumn {
                    column: column.to_string(),
                    source_name: source_name.to_string(),
                });
            }
        }
        Ok(())
    }
}
