//! coauthor-graph: in-memory knowledge index over publication records
//!
//! Ingests one row per author contribution (author identifier, document
//! identifier, declared name, coauthor list) and builds an immutable index
//! answering four lookups: records by identifier, record by document,
//! identifier by name, and a person's collaborators with counts.
//!
//! # Core Concepts
//!
//! - **Records**: normalized rows with typed key fields and pass-through extras
//! - **Identity map**: first-seen name ↔ identifier resolution
//! - **Connection graph**: symmetric collaboration counts between person keys
//! - **Index engine**: datasets published whole, shared behind `Arc`
//!
//! # Example
//!
//! ```
//! use coauthor_graph::{KnowledgeIndex, Record};
//!
//! let index = KnowledgeIndex::build(vec![
//!     Record::new("A", "d1", "Alice").with_coauthors(["Bob"]),
//!     Record::new("B", "d2", "Bob").with_coauthors(["Alice"]),
//! ]);
//! assert_eq!(index.query().lookup_by_name("Alice").unwrap(), "A");
//! assert_eq!(index.query().lookup_connections("A").unwrap()["B"], 2);
//! ```

pub mod adapter;
pub mod config;
pub mod export;
mod graph;
pub mod logging;
pub mod query;
pub mod record;

pub use adapter::{load_path, IngestError, IngestPipeline, IngestResult, RowSource, SourceFormat};
pub use config::{ColumnMap, ConfigError, IndexConfig};
pub use export::IndexPayload;
pub use graph::{
    BuildWarning, ByDocumentIndex, ByIdentifierIndex, ByPersonIndex, Collaborators, ConnectionGraph,
    DatasetId, IdentityMap, IndexEngine, IndexMetadata, KnowledgeIndex, LookupTables,
};
pub use query::{GraphStats, IndexQuery, QueryError, QueryKind, QueryOutcome, QueryResult};
pub use record::{CellParseError, CellValue, RawRow, Record};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
