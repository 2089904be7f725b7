//! Index configuration loaded from YAML
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration for datasets with the standard
//! `orcid` / `doi` / `author_name` / `coauthors` columns.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which source column feeds each known record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub identifier: String,
    pub document: String,
    pub author_name: String,
    pub coauthors: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            identifier: "orcid".to_string(),
            document: "doi".to_string(),
            author_name: "author_name".to_string(),
            coauthors: "coauthors".to_string(),
        }
    }
}

impl ColumnMap {
    /// Columns every source must provide
    pub fn required(&self) -> [&str; 4] {
        [
            self.identifier.as_str(),
            self.document.as_str(),
            self.author_name.as_str(),
            self.coauthors.as_str(),
        ]
    }

    pub fn is_known(&self, column: &str) -> bool {
        self.required().contains(&column)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub columns: ColumnMap,
    /// Cell texts that mean "no value" (pandas writes `nan`)
    pub missing_markers: Vec<String>,
    /// Accept a dataset with no rows instead of failing the load
    pub allow_empty: bool,
    /// Fixed CSV delimiter; sniffed from the file when unset
    pub csv_delimiter: Option<char>,
    pub log_level: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            missing_markers: vec!["nan".to_string(), "NaN".to_string()],
            allow_empty: false,
            csv_delimiter: None,
            log_level: "info".to_string(),
        }
    }
}

impl IndexConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: IndexConfig = if text.trim().is_empty() {
            IndexConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Load the user configuration if present, otherwise the defaults
    pub fn discover() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for column in self.columns.required() {
            if column.trim().is_empty() {
                return Err(ConfigError::Invalid("column names must not be empty".into()));
            }
            if !seen.insert(column) {
                return Err(ConfigError::Invalid(format!(
                    "column '{}' is mapped to more than one field",
                    column
                )));
            }
        }
        if let Some(delimiter) = self.csv_delimiter {
            if !delimiter.is_ascii() {
                return Err(ConfigError::Invalid(format!(
                    "csv delimiter must be a single ASCII character, got {:?}",
                    delimiter
                )));
            }
        }
        Ok(())
    }
}

/// `<config dir>/coauthor-graph/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("coauthor-graph").join("config.yaml"))
}
