//! JSON row source: an array of objects, or one object per line

use super::traits::{IngestError, IngestResult, RowSource};
use crate::record::{CellValue, RawRow};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

enum Input {
    File(PathBuf),
    Text(String),
}

/// Reads rows from JSON.
///
/// Accepts either a top-level array of objects or JSON Lines. Object key
/// order is kept as column order. Array values stay structured
/// (`CellValue::List`), so coauthor lists need no literal decoding.
pub struct JsonRowSource {
    input: Input,
}

impl JsonRowSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: Input::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: Input::Text(text.into()),
        }
    }

    fn read_text(&self) -> IngestResult<String> {
        match &self.input {
            Input::File(path) => Ok(std::fs::read_to_string(path)?),
            Input::Text(text) => Ok(text.clone()),
        }
    }
}

fn object_to_row(object: &Map<String, Value>) -> RawRow {
    object
        .iter()
        .map(|(column, value)| (column.clone(), CellValue::from_json(value)))
        .collect()
}

fn value_to_row(value: &Value, position: usize) -> IngestResult<RawRow> {
    match value {
        Value::Object(object) => Ok(object_to_row(object)),
        other => Err(IngestError::Unsupported(format!(
            "row {position} is not a JSON object: {other}"
        ))),
    }
}

impl RowSource for JsonRowSource {
    fn describe(&self) -> String {
        match &self.input {
            Input::File(path) => path.display().to_string(),
            Input::Text(_) => "<inline json>".to_string(),
        }
    }

    fn rows(&mut self) -> IngestResult<Vec<RawRow>> {
        let text = self.read_text()?;
        let trimmed = text.trim_start();

        if trimmed.starts_with('[') {
            let values: Vec<Value> = serde_json::from_str(trimmed)?;
            return values
                .iter()
                .enumerate()
                .map(|(i, value)| value_to_row(value, i))
                .collect();
        }

        let mut rows = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line)?;
            rows.push(value_to_row(&value, i)?);
        }
        Ok(rows)
    }
}
