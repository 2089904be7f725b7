//! Excel workbook row source (first worksheet, header in the first row)

use super::traits::{IngestError, IngestResult, RowSource};
use crate::record::{CellValue, RawRow};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};

pub struct XlsxRowSource {
    path: PathBuf,
}

impl XlsxRowSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(_) => CellValue::Empty,
        other => CellValue::from_text(&other.to_string()),
    }
}

fn header_name(cell: &Data, position: usize) -> String {
    cell_value(cell)
        .as_scalar_text()
        .unwrap_or_else(|| format!("column_{position}"))
}

impl RowSource for XlsxRowSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn rows(&mut self) -> IngestResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::EmptyDataset(format!("{} has no worksheets", self.describe())))??;

        let mut rows_iter = range.rows();
        let Some(header_row) = rows_iter.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(cell, i))
            .collect();
        tracing::debug!(source = %self.describe(), columns = headers.len(), "reading worksheet");

        let mut rows = Vec::new();
        for row in rows_iter {
            let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            let raw: RawRow = headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), cells.get(i).cloned().unwrap_or(CellValue::Empty)))
                .collect();
            rows.push(raw);
        }

        Ok(rows)
    }
}
