//! Canonical publication records
//!
//! A `Record` is one author contribution: who wrote it (identifier and
//! declared name), which document it belongs to, the coauthor names listed
//! on that row, and every other column carried through untouched.

mod cell;
mod coauthors;
mod normalize;

pub use cell::{CellValue, RawRow};
pub use coauthors::{decode_list_literal, parse_coauthors, CellParseError, CoauthorCell};
pub use normalize::{Normalized, Normalizer};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Wire names of the known record fields
pub mod field {
    pub const ORCID: &str = "orcid";
    pub const DOI: &str = "doi";
    pub const AUTHOR_NAME: &str = "author_name";
    pub const COAUTHORS: &str = "coauthors";

    pub const RESERVED: [&str; 4] = [ORCID, DOI, AUTHOR_NAME, COAUTHORS];
}

/// Columns not claimed by a known field, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras(Vec<(String, CellValue)>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: CellValue) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Extras {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One normalized author contribution.
///
/// Absent identifier or name cells are `None`; they are never replaced by a
/// placeholder string. Records are immutable once built and shared behind
/// `Arc` by every index structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "orcid")]
    pub author_identifier: Option<String>,
    #[serde(rename = "doi")]
    pub document_identifier: Option<String>,
    pub author_name: Option<String>,
    #[serde(rename = "coauthors")]
    pub coauthor_names: Vec<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl Record {
    /// Create a record with the three key fields set and no coauthors
    pub fn new(
        author_identifier: impl Into<String>,
        document_identifier: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            author_identifier: Some(author_identifier.into()),
            document_identifier: Some(document_identifier.into()),
            author_name: Some(author_name.into()),
            coauthor_names: Vec::new(),
            extras: Extras::new(),
        }
    }

    pub fn with_coauthors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coauthor_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.extras.push(name, value.into());
        self
    }

    /// The token standing for the primary author: the declared name, or the
    /// identifier when the row carries no name.
    pub fn primary_participant(&self) -> Option<&str> {
        self.author_name
            .as_deref()
            .or(self.author_identifier.as_deref())
    }

    /// Primary author followed by every listed coauthor, duplicates kept
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.primary_participant()
            .into_iter()
            .chain(self.coauthor_names.iter().map(String::as_str))
    }

    /// Text value of any column, known or extra
    pub fn column_text(&self, column: &str) -> Option<String> {
        match column {
            field::ORCID => self.author_identifier.clone(),
            field::DOI => self.document_identifier.clone(),
            field::AUTHOR_NAME => self.author_name.clone(),
            field::COAUTHORS => None,
            other => self.extras.get(other).and_then(CellValue::as_scalar_text),
        }
    }
}
