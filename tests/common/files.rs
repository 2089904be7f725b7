//! Temp-file datasets for file-backed ingestion tests

use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// A dataset written to a temp directory; removed on drop
pub struct TempDataset {
    dir: TempDir,
    file: std::path::PathBuf,
}

impl TempDataset {
    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

fn write_named(name: &str, contents: &str) -> TempDataset {
    let dir = TempDir::new().expect("create temp dir");
    let file = dir.path().join(name);
    std::fs::write(&file, contents).expect("write dataset");
    TempDataset { dir, file }
}

/// Write CSV text as `<tmp>/dataset.csv`
pub fn write_csv(contents: &str) -> TempDataset {
    write_named("dataset.csv", contents)
}

/// Write JSON text as `<tmp>/dataset.json`
pub fn write_json(contents: &str) -> TempDataset {
    write_named("dataset.json", contents)
}

/// Write text to an anonymous temp file with the given suffix
pub fn write_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
