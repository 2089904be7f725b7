//! CSV row source with delimiter sniffing

use super::traits::{IngestResult, RowSource};
use crate::record::{CellValue, RawRow};
use std::path::{Path, PathBuf};

const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

/// Pick the most frequent candidate delimiter in the header line
pub fn sniff_delimiter(data: &[u8]) -> u8 {
    let header = data.split(|b| *b == b'\n').next().unwrap_or(data);
    let mut counts = [0usize; 3];
    for byte in header {
        for (i, delimiter) in DELIMITER_CANDIDATES.iter().enumerate() {
            if byte == delimiter {
                counts[i] += 1;
            }
        }
    }

    counts
        .into_iter()
        .enumerate()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(i, count)| (*count, std::cmp::Reverse(*i)))
        .map(|(i, _)| DELIMITER_CANDIDATES[i])
        .unwrap_or(b',')
}

enum Input {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// Reads a CSV file (or in-memory text) with a header row.
///
/// Every data row becomes a `RawRow` keyed by header name; blank cells are
/// `CellValue::Empty`. Rows shorter than the header are padded, longer rows
/// keep only the named columns.
pub struct CsvRowSource {
    input: Input,
    delimiter: Option<u8>,
}

impl CsvRowSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: Input::File(path.as_ref().to_path_buf()),
            delimiter: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: Input::Bytes(text.into().into_bytes()),
            delimiter: None,
        }
    }

    /// Use a fixed delimiter instead of sniffing
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn read_bytes(&self) -> IngestResult<Vec<u8>> {
        match &self.input {
            Input::File(path) => Ok(std::fs::read(path)?),
            Input::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl RowSource for CsvRowSource {
    fn describe(&self) -> String {
        match &self.input {
            Input::File(path) => path.display().to_string(),
            Input::Bytes(_) => "<inline csv>".to_string(),
        }
    }

    fn rows(&mut self) -> IngestResult<Vec<RawRow>> {
        let data = self.read_bytes()?;
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(&data));
        let shown = char::from(delimiter);
        tracing::debug!(source = %self.describe(), delimiter = ?shown, "reading csv");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(&data[..]);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            let row: RawRow = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let cell = record.get(i).map(CellValue::from_text).unwrap_or(CellValue::Empty);
                    (header.clone(), cell)
                })
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}
