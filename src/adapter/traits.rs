//! RowSource trait: the contract ingestion sources implement
//!
//! A source turns some tabular input (a CSV file, a JSON document, a
//! workbook) into an ordered list of flat rows. It knows nothing about
//! records or indexes; normalization happens in the pipeline.

use crate::config::ConfigError;
use crate::record::RawRow;
use thiserror::Error;

/// Errors that abort ingestion
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("workbook error: {0}")]
    Xlsx(#[from] calamine::Error),

    #[error("missing required column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("unsupported input: {0}")]
    Unsupported(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// The contract ingestion sources implement.
pub trait RowSource {
    /// Human-readable origin, e.g. the file path
    fn describe(&self) -> String;

    /// Read every data row in source order.
    ///
    /// Called once per build; sources are not expected to be re-readable.
    fn rows(&mut self) -> IngestResult<Vec<RawRow>>;
}

/// Rows already in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    name: String,
    rows: Vec<RawRow>,
}

impl MemoryRowSource {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RowSource for MemoryRowSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn rows(&mut self) -> IngestResult<Vec<RawRow>> {
        Ok(std::mem::take(&mut self.rows))
    }
}
