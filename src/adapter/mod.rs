//! Ingestion adapters
//!
//! Sources yield ordered flat rows; the pipeline normalizes them and builds
//! the knowledge index. CSV and JSON are always available, Excel workbooks
//! with the `xlsx` feature.

mod csv_source;
mod ingest;
mod json_source;
mod traits;
#[cfg(feature = "xlsx")]
mod xlsx_source;

pub use csv_source::{sniff_delimiter, CsvRowSource};
pub use ingest::{IngestPipeline, NormalizedBatch};
pub use json_source::JsonRowSource;
pub use traits::{IngestError, IngestResult, MemoryRowSource, RowSource};
#[cfg(feature = "xlsx")]
pub use xlsx_source::XlsxRowSource;

use crate::config::IndexConfig;
use crate::graph::KnowledgeIndex;
use std::path::Path;
use std::str::FromStr;

/// Input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Xlsx,
}

impl SourceFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" | "jsonl" | "ndjson" => Some(Self::Json),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(IngestError::Unsupported(format!("unknown format '{other}'"))),
        }
    }
}

/// Open a row source for a file
pub fn open_source(
    path: &Path,
    format: Option<SourceFormat>,
    config: &IndexConfig,
) -> IngestResult<Box<dyn RowSource>> {
    let format = format
        .or_else(|| SourceFormat::from_path(path))
        .ok_or_else(|| IngestError::Unsupported(format!("cannot infer format of {}", path.display())))?;

    match format {
        SourceFormat::Csv => {
            let delimiter = config.csv_delimiter.map(|c| c as u8);
            Ok(Box::new(CsvRowSource::from_path(path).with_delimiter(delimiter)))
        }
        SourceFormat::Json => Ok(Box::new(JsonRowSource::from_path(path))),
        #[cfg(feature = "xlsx")]
        SourceFormat::Xlsx => Ok(Box::new(XlsxRowSource::from_path(path))),
        #[cfg(not(feature = "xlsx"))]
        SourceFormat::Xlsx => Err(IngestError::Unsupported(
            "workbook input requires the `xlsx` feature".to_string(),
        )),
    }
}

/// Load a file and build its index
///
/// The configuration is validated first; a config built in code has not
/// been through [`IndexConfig::from_yaml`].
pub fn load_path(path: &Path, format: Option<SourceFormat>, config: &IndexConfig) -> IngestResult<KnowledgeIndex> {
    config.validate()?;
    let mut source = open_source(path, format, config)?;
    IngestPipeline::new(config).run(source.as_mut())
}
