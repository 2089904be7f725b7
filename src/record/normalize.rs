//! Raw row to `Record` conversion

use super::cell::{CellValue, RawRow};
use super::coauthors::{parse_coauthors, CellParseError};
use super::{field, Extras, Record};
use crate::config::{ColumnMap, IndexConfig};

/// A normalized row plus any recovered coauthor-cell anomaly
#[derive(Debug, Clone)]
pub struct Normalized {
    pub record: Record,
    pub anomaly: Option<CellParseError>,
}

/// Converts raw rows into canonical records.
///
/// Identifier and name cells become trimmed text; blank cells and configured
/// missing-value markers become `None`. Columns outside the column map are
/// carried over verbatim in source order.
#[derive(Debug, Clone)]
pub struct Normalizer {
    columns: ColumnMap,
    missing_markers: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}

impl Normalizer {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            columns,
            missing_markers: Vec::new(),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            missing_markers: config.missing_markers.clone(),
        }
    }

    pub fn with_missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn normalize(&self, row: &RawRow) -> Normalized {
        let coauthor_cell = row
            .get(&self.columns.coauthors)
            .filter(|cell| !self.is_missing(cell));
        let coauthors = parse_coauthors(coauthor_cell);

        let mut extras = Extras::new();
        for (column, value) in row.iter() {
            if self.columns.is_known(column) {
                continue;
            }
            // Keep wire names unambiguous when a known field was remapped
            if field::RESERVED.contains(&column) {
                extras.push(format!("extra_{}", column), value.clone());
            } else {
                extras.push(column, value.clone());
            }
        }

        let record = Record {
            author_identifier: self.scalar(row, &self.columns.identifier),
            document_identifier: self.scalar(row, &self.columns.document),
            author_name: self.scalar(row, &self.columns.author_name),
            coauthor_names: coauthors.names,
            extras,
        };

        Normalized {
            record,
            anomaly: coauthors.anomaly,
        }
    }

    fn scalar(&self, row: &RawRow, column: &str) -> Option<String> {
        row.get(column)
            .and_then(CellValue::as_scalar_text)
            .filter(|text| !self.is_marker(text))
    }

    fn is_missing(&self, cell: &CellValue) -> bool {
        match cell {
            CellValue::Text(text) => self.is_marker(text.trim()),
            CellValue::Float(f) => f.is_nan(),
            other => other.is_empty(),
        }
    }

    fn is_marker(&self, text: &str) -> bool {
        self.missing_markers.iter().any(|marker| marker == text)
    }
}
