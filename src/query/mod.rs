//! Query façade over a built knowledge index
//!
//! Four lookup kinds (identifier, document, name, connections) dispatched
//! through a closed `QueryKind` enum, plus person lookups, collaborator
//! rankings and graph statistics.

mod facade;
mod stats;
mod types;

pub use facade::IndexQuery;
pub use stats::{connected_components, cross_linked_mentions, GraphStats};
pub use types::{QueryError, QueryKind, QueryOutcome, QueryResult};
