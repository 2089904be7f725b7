//! Core index structures: identity map, lookup tables, connection graph

mod builder;
mod connections;
mod engine;
mod identity;
mod index;


pub use builder::{BuildWarning, IndexMetadata, KnowledgeIndex};
pub use connections::{Collaborators, ConnectionGraph};
pub use engine::{DatasetId, IndexEngine};
pub use identity::IdentityMap;
pub use index::{ByDocumentIndex, ByIdentifierIndex, ByPersonIndex, LookupTables};
