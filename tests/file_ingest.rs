//! File-backed ingestion: CSV and JSON through the pipeline

mod common;

use coauthor_graph::adapter::{CsvRowSource, IngestPipeline, JsonRowSource, RowSource};
use coauthor_graph::{load_path, CellParseError, IndexConfig, IngestError, SourceFormat};
use common::{write_csv, write_json};

const LAB_CSV: &str = "\
orcid,doi,author_name,coauthors,author_position
0000-0001,10.1/a,Alice Smith,\"['Bob Jones', 'Carol White']\",first
0000-0002,10.1/a,Bob Jones,\"['Alice Smith', 'Carol White']\",middle
0000-0001,10.1/b,Alice Smith,\"Bob Jones, Carol White\",last
0000-0003,10.1/c,Carol White,nan,first
0000-0004,10.1/d,Dan Brown,\"__import__('os').system('ls')\",first
";

#[test]
fn csv_dataset_builds_and_answers_queries() {
    let dataset = write_csv(LAB_CSV);
    let index = load_path(dataset.path(), None, &IndexConfig::default()).unwrap();
    let query = index.query();

    assert_eq!(index.record_count(), 5);
    assert_eq!(query.lookup_by_name("Carol White").unwrap(), "0000-0003");
    assert_eq!(query.lookup_by_identifier("0000-0001").unwrap().len(), 2);

    // Bob and Carol resolve to identifiers on both rows of 10.1/a
    let alice = query.lookup_connections("0000-0001").unwrap();
    assert_eq!(alice.get("0000-0002"), Some(&2));
    assert_eq!(alice.get("0000-0003"), Some(&2));
    // The unbracketed cell is one name
    assert_eq!(alice.get("Bob Jones, Carol White"), Some(&1));
}

#[test]
fn csv_missing_markers_and_unsafe_cells() {
    let dataset = write_csv(LAB_CSV);
    let index = load_path(dataset.path(), None, &IndexConfig::default()).unwrap();

    let carol = index.query().lookup_by_document("10.1/c").unwrap();
    assert!(carol.coauthor_names.is_empty());

    let dan = index.query().lookup_by_document("10.1/d").unwrap();
    assert_eq!(dan.coauthor_names, vec!["__import__('os').system('ls')"]);

    let warnings = &index.metadata().warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].row, 4);
    assert!(matches!(warnings[0].anomaly, CellParseError::UnsafeRejected(_)));
}

#[test]
fn semicolon_csv_is_sniffed() {
    let dataset = write_csv("orcid;doi;author_name;coauthors\nA;d1;Alice;['Bob']\nB;d2;Bob;['Alice']\n");
    let index = load_path(dataset.path(), Some(SourceFormat::Csv), &IndexConfig::default()).unwrap();
    assert_eq!(index.query().lookup_connections("Alice").unwrap().get("B"), Some(&2));
}

#[test]
fn configured_delimiter_is_used() {
    let config = IndexConfig::from_yaml("csv_delimiter: \"|\"\n").unwrap();
    let dataset = write_csv("orcid|doi|author_name|coauthors\nA|d1|Alice|['Bob']\n");
    let index = load_path(dataset.path(), None, &config).unwrap();
    assert_eq!(index.query().lookup_by_document("d1").unwrap().coauthor_names, vec!["Bob"]);
}

#[test]
fn missing_required_column_fails_the_load() {
    let dataset = write_csv("orcid,doi,author_name\nA,d1,Alice\n");
    let err = load_path(dataset.path(), None, &IndexConfig::default()).unwrap_err();
    match err {
        IngestError::MissingColumn { column, source_name } => {
            assert_eq!(column, "coauthors");
            assert!(source_name.ends_with("dataset.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_only_csv_is_an_empty_dataset() {
    let dataset = write_csv("orcid,doi,author_name,coauthors\n");
    let err = load_path(dataset.path(), None, &IndexConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyDataset(_)));

    let config = IndexConfig::from_yaml("allow_empty: true\n").unwrap();
    let index = load_path(dataset.path(), None, &config).unwrap();
    assert!(index.is_empty());
    assert!(index.query().run("orcid", "A").unwrap_err().is_not_found());
}

#[test]
fn json_dataset_with_structured_lists() {
    let dataset = write_json(
        r#"[
            {"orcid": "A", "doi": "d1", "author_name": "Alice", "coauthors": ["Bob", "Bob"], "year": 2011},
            {"orcid": "B", "doi": "d2", "author_name": "Bob", "coauthors": []}
        ]"#,
    );
    let index = load_path(dataset.path(), None, &IndexConfig::default()).unwrap();

    // Bob listed twice on d1
    assert_eq!(index.query().lookup_connections("A").unwrap().get("B"), Some(&2));
    assert!(index.metadata().warnings.is_empty());
    let record = index.query().lookup_by_document("d1").unwrap();
    assert_eq!(record.column_text("year").as_deref(), Some("2011"));
}

#[test]
fn sources_can_be_driven_directly() {
    let dataset = write_json("{\"orcid\": \"A\", \"doi\": \"d1\", \"author_name\": \"Alice\", \"coauthors\": null}\n");
    let mut source = JsonRowSource::from_path(dataset.path());
    assert!(source.describe().ends_with("dataset.json"));
    let index = IngestPipeline::default().run(&mut source).unwrap();
    assert_eq!(index.record_count(), 1);

    let mut inline = CsvRowSource::from_text("orcid,doi,author_name,coauthors\nA,d1,Alice,\n");
    let index = IngestPipeline::default().run(&mut inline).unwrap();
    assert!(index.records()[0].coauthor_names.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_path(std::path::Path::new("/nonexistent/dataset.csv"), None, &IndexConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}
