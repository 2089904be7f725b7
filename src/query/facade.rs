//! Typed lookups over a finished index

use super::types::{QueryError, QueryKind, QueryOutcome, QueryResult};
use crate::graph::{Collaborators, KnowledgeIndex};
use crate::record::Record;
use std::sync::Arc;

/// Read-only query façade borrowing a `KnowledgeIndex`.
///
/// Every lookup is a pure read; misses come back as
/// [`QueryError::NotFound`], never as a panic.
#[derive(Debug, Clone, Copy)]
pub struct IndexQuery<'a> {
    index: &'a KnowledgeIndex,
}

impl<'a> IndexQuery<'a> {
    pub fn new(index: &'a KnowledgeIndex) -> Self {
        Self { index }
    }

    /// All records carrying an author identifier, in ingestion order
    pub fn lookup_by_identifier(&self, identifier: &str) -> QueryResult<&'a [Arc<Record>]> {
        self.index
            .tables()
            .records_for_identifier(identifier)
            .ok_or_else(|| QueryError::not_found(QueryKind::Identifier, identifier))
    }

    /// The record stored for a document (the last row seen for it)
    pub fn lookup_by_document(&self, document: &str) -> QueryResult<&'a Arc<Record>> {
        self.index
            .tables()
            .record_for_document(document)
            .ok_or_else(|| QueryError::not_found(QueryKind::Document, document))
    }

    /// Identifier of the first record declaring this exact name.
    ///
    /// Scans records rather than the identity map, so a name whose only
    /// rows lack an identifier is reported as not found.
    pub fn lookup_by_name(&self, name: &str) -> QueryResult<&'a str> {
        self.index
            .records()
            .iter()
            .filter(|record| record.author_name.as_deref() == Some(name))
            .find_map(|record| record.author_identifier.as_deref())
            .ok_or_else(|| QueryError::not_found(QueryKind::Name, name))
    }

    /// Collaborators of a person, by identifier or raw name.
    ///
    /// A name that resolves to an identifier is looked up under that
    /// identifier; otherwise the key is used as given. An identifier that
    /// lost its name to an earlier one is followed through its name to the
    /// canonical key.
    pub fn lookup_connections(&self, key: &str) -> QueryResult<&'a Collaborators> {
        let connections = self.index.connections();
        let identity = self.index.identity();
        connections
            .collaborators(identity.resolve(key))
            .or_else(|| connections.collaborators(key))
            .or_else(|| {
                identity
                    .name_for(key)
                    .and_then(|name| connections.collaborators(identity.resolve(name)))
            })
            .ok_or_else(|| QueryError::not_found(QueryKind::Connections, key))
    }

    /// Every record a person takes part in, as author or coauthor.
    ///
    /// Same key resolution as [`lookup_connections`](Self::lookup_connections).
    pub fn lookup_by_person(&self, token: &str) -> QueryResult<&'a [Arc<Record>]> {
        let tables = self.index.tables();
        let identity = self.index.identity();
        tables
            .records_for_person(identity.resolve(token))
            .or_else(|| tables.records_for_person(token))
            .or_else(|| {
                identity
                    .name_for(token)
                    .and_then(|name| tables.records_for_person(identity.resolve(name)))
            })
            .ok_or_else(|| QueryError::UnknownPerson(token.to_string()))
    }

    /// A person's collaborators ranked by count, ties broken by key
    pub fn top_collaborators(&self, key: &str, limit: usize) -> QueryResult<Vec<(&'a str, u64)>> {
        let mut ranked: Vec<(&'a str, u64)> = self
            .lookup_connections(key)?
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Dispatch a lookup by its textual kind
    pub fn run(&self, kind: &str, value: &str) -> QueryResult<QueryOutcome> {
        self.execute(kind.parse()?, value)
    }

    /// Dispatch a lookup by kind
    pub fn execute(&self, kind: QueryKind, value: &str) -> QueryResult<QueryOutcome> {
        let outcome = match kind {
            QueryKind::Identifier => QueryOutcome::Records(self.lookup_by_identifier(value)?.to_vec()),
            QueryKind::Document => QueryOutcome::Record(Arc::clone(self.lookup_by_document(value)?)),
            QueryKind::Name => QueryOutcome::Identifier(self.lookup_by_name(value)?.to_string()),
            QueryKind::Connections => QueryOutcome::Connections(self.lookup_connections(value)?.clone()),
        };
        tracing::debug!(kind = %kind, value, "query answered");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> KnowledgeIndex {
        KnowledgeIndex::build(vec![
            Record::new("A", "d1", "Alice").with_coauthors(["Bob", "Carol"]),
            Record::new("B", "d2", "Bob").with_coauthors(["Alice"]),
            Record::new("A", "d3", "Alice").with_coauthors(["Carol", "Dan"]),
        ])
    }

    #[test]
    fn identifier_lookup_returns_all_rows() {
        let index = index();
        let records = index.query().lookup_by_identifier("A").unwrap();
        assert_eq!(records.len(), 2);
        assert!(index.query().lookup_by_identifier("Z").unwrap_err().is_not_found());
    }

    #[test]
    fn name_lookup_uses_first_record_with_identifier() {
        let mut anonymous = Record::new("x", "d0", "Erin");
        anonymous.author_identifier = None;
        let index = KnowledgeIndex::build(vec![anonymous, Record::new("E", "d9", "Erin")]);
        assert_eq!(index.query().lookup_by_name("Erin").unwrap(), "E");
        assert!(index.query().lookup_by_name("erin").is_err());
    }

    #[test]
    fn connections_accept_name_or_identifier() {
        let index = index();
        let query = index.query();
        assert_eq!(query.lookup_connections("A").unwrap(), query.lookup_connections("Alice").unwrap());
        // Carol never authored a row, so she is keyed by name
        assert_eq!(query.lookup_connections("Carol").unwrap()["A"], 2);
    }

    #[test]
    fn person_lookup_covers_author_and_coauthor_roles() {
        let index = index();
        let query = index.query();
        assert_eq!(query.lookup_by_person("Bob").unwrap().len(), 2);
        assert_eq!(query.lookup_by_person("B").unwrap().len(), 2);
        assert_eq!(query.lookup_by_person("Dan").unwrap().len(), 1);
        assert_eq!(
            query.lookup_by_person("Zed").unwrap_err(),
            QueryError::UnknownPerson("Zed".into())
        );
    }

    #[test]
    fn shadowed_identifier_reaches_the_canonical_person() {
        let index = KnowledgeIndex::build(vec![
            Record::new("A1", "d1", "Alice"),
            Record::new("A2", "d2", "Alice").with_coauthors(["Erin"]),
        ]);
        let query = index.query();

        assert_eq!(query.lookup_by_identifier("A2").unwrap().len(), 1);
        assert_eq!(query.lookup_by_person("A2").unwrap(), query.lookup_by_person("A1").unwrap());
        assert_eq!(query.lookup_by_person("A2").unwrap().len(), 2);
        assert_eq!(query.lookup_connections("A2").unwrap()["Erin"], 1);
        assert!(query.lookup_connections("A3").unwrap_err().is_not_found());
    }

    #[test]
    fn top_collaborators_rank_by_count_then_key() {
        let index = index();
        let top = index.query().top_collaborators("Alice", 3).unwrap();
        // B: d1 + d2, Carol: d1 + d3, Dan: d3
        assert_eq!(top, vec![("B", 2), ("Carol", 2), ("Dan", 1)]);
        assert_eq!(index.query().top_collaborators("A", 1).unwrap().len(), 1);
    }

    #[test]
    fn run_dispatches_textual_kinds() {
        let index = index();
        let query = index.query();
        match query.run("doi", "d2").unwrap() {
            QueryOutcome::Record(record) => assert_eq!(record.author_name.as_deref(), Some("Bob")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            query.run("author_name", "Bob").unwrap(),
            QueryOutcome::Identifier("B".into())
        );
        assert_eq!(
            query.run("invalid", "A").unwrap_err(),
            QueryError::InvalidQueryKind("invalid".into())
        );
    }

    #[test]
    fn empty_index_reports_not_found_for_every_kind() {
        let index = KnowledgeIndex::default();
        for kind in QueryKind::ALL {
            let err = index.query().execute(kind, "anything").unwrap_err();
            assert_eq!(err, QueryError::not_found(kind, "anything"));
        }
    }
}
