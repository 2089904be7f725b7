//! Query kinds, outcomes and errors

use crate::graph::Collaborators;
use crate::record::Record;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by the query façade
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid query kind: {0} (expected orcid, doi, author_name or connections)")]
    InvalidQueryKind(String),

    #[error("no {kind} entry for '{value}'")]
    NotFound { kind: QueryKind, value: String },

    #[error("no records involve '{0}'")]
    UnknownPerson(String),
}

impl QueryError {
    pub fn not_found(kind: QueryKind, value: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnknownPerson(_))
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// The closed set of lookup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Author identifier → every record carrying it
    Identifier,
    /// Document identifier → the record stored for it
    Document,
    /// Declared name → identifier of the first matching record
    Name,
    /// Person key → collaborators with counts
    Connections,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [Self::Identifier, Self::Document, Self::Name, Self::Connections];

    /// Wire name used by the query surface
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "orcid",
            Self::Document => "doi",
            Self::Name => "author_name",
            Self::Connections => "connections",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = QueryError;

    /// Accepts the wire names and their descriptive aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orcid" | "identifier" => Ok(Self::Identifier),
            "doi" | "document" => Ok(Self::Document),
            "author_name" | "name" => Ok(Self::Name),
            "connections" => Ok(Self::Connections),
            other => Err(QueryError::InvalidQueryKind(other.to_string())),
        }
    }
}

/// Data returned by a successful lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Records(Vec<Arc<Record>>),
    Record(Arc<Record>),
    Identifier(String),
    Connections(Collaborators),
}

impl QueryOutcome {
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Records(_) => QueryKind::Identifier,
            Self::Record(_) => QueryKind::Document,
            Self::Identifier(_) => QueryKind::Name,
            Self::Connections(_) => QueryKind::Connections,
        }
    }
}
