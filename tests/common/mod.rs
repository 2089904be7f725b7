//! Common test utilities for coauthor-graph integration tests
//!
//! Fixture datasets, randomized dataset generation, temp-file writers and
//! a brute-force oracle for expected collaboration counts.
#![allow(dead_code)]

pub mod datasets;
pub mod files;
pub mod oracle;

pub use datasets::{alice_and_bob, random_dataset, small_lab, RandomDatasetConfig};
pub use files::{write_csv, write_json, TempDataset};
pub use oracle::{expected_weights, participant_keys};
