//! coauthor-graph CLI: build a co-authorship index from a dataset file and query it.
//!
//! Usage:
//!   coauthor-graph summary <FILE>
//!   coauthor-graph query <FILE> --kind <KIND> --value <VALUE>
//!   coauthor-graph person <FILE> <TOKEN>
//!   coauthor-graph top <FILE> <KEY> [--limit N]
//!   coauthor-graph group <FILE> <COLUMN>
//!   coauthor-graph export <FILE> [--output PATH]

use clap::{Parser, Subcommand};
use coauthor_graph::{load_path, logging, GraphStats, IndexConfig, IndexPayload, KnowledgeIndex, SourceFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "coauthor-graph",
    version,
    about = "Co-authorship knowledge index over publication records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Input format: csv, json or xlsx (inferred from the extension by default)
    #[arg(long, global = true)]
    format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print record, people and graph counts
    Summary {
        /// Dataset file
        file: PathBuf,
    },
    /// Run one lookup: orcid, doi, author_name or connections
    Query {
        /// Dataset file
        file: PathBuf,
        /// Lookup kind
        #[arg(long)]
        kind: String,
        /// Value to look up
        #[arg(long)]
        value: String,
    },
    /// Records a person takes part in, by name or identifier
    Person {
        /// Dataset file
        file: PathBuf,
        /// Name or identifier
        token: String,
    },
    /// Strongest collaborators of a person
    Top {
        /// Dataset file
        file: PathBuf,
        /// Name or identifier
        key: String,
        /// Number of collaborators to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Group records by the value of a column
    Group {
        /// Dataset file
        file: PathBuf,
        /// Column name (known field or pass-through column)
        column: String,
    },
    /// Write the full index as JSON
    Export {
        /// Dataset file
        file: PathBuf,
        /// Output path (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<IndexConfig, String> {
    let loaded = match path {
        Some(path) => IndexConfig::load(path),
        None => IndexConfig::discover(),
    };
    loaded.map_err(|e| format!("Failed to load configuration: {}", e))
}

fn build_index(file: &Path, format: Option<&str>, config: &IndexConfig) -> Result<KnowledgeIndex, String> {
    let format = format
        .map(str::parse::<SourceFormat>)
        .transpose()
        .map_err(|e| e.to_string())?;
    load_path(file, format, config).map_err(|e| format!("Failed to load '{}': {}", file.display(), e))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_summary(index: &KnowledgeIndex) -> i32 {
    let stats = GraphStats::compute(index);
    let metadata = index.metadata();
    println!("Source:            {}", metadata.source.as_deref().unwrap_or("-"));
    println!("Built at:          {}", metadata.built_at.to_rfc3339());
    println!("Rows:              {}", metadata.rows);
    println!("Warnings:          {}", metadata.warnings.len());
    println!("Identifiers:       {}", stats.identifiers);
    println!("Documents:         {}", stats.documents);
    println!("People:            {}", stats.people);
    println!("Connected authors: {}", stats.connected_authors);
    println!("Isolated authors:  {}", stats.isolated_authors);
    println!("Cross-links:       {}", stats.cross_linked_mentions);
    println!("Edges:             {}", stats.edges);
    println!("Total weight:      {}", stats.total_weight);
    println!("Average degree:    {:.2}", stats.average_degree);
    println!("Components:        {} (largest {})", stats.components, stats.largest_component);
    for warning in &metadata.warnings {
        println!("  row {}: {}", warning.row, warning.anomaly);
    }
    0
}

fn cmd_query(index: &KnowledgeIndex, kind: &str, value: &str) -> i32 {
    match index.query().run(kind, value) {
        Ok(outcome) => print_json(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_person(index: &KnowledgeIndex, token: &str) -> i32 {
    match index.query().lookup_by_person(token) {
        Ok(records) => print_json(&records),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_top(index: &KnowledgeIndex, key: &str, limit: usize) -> i32 {
    match index.query().top_collaborators(key, limit) {
        Ok(ranked) => {
            for (collaborator, count) in ranked {
                let name = index.identity().name_for(collaborator).unwrap_or(collaborator);
                println!("{:>5}  {}", count, name);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_group(index: &KnowledgeIndex, column: &str) -> i32 {
    let groups = index.group_by_column(column);
    if groups.is_empty() {
        eprintln!("Error: no values in column '{}'", column);
        return 1;
    }
    for (value, records) in groups {
        println!("{:>5}  {}", records.len(), value);
    }
    0
}

fn cmd_export(index: &KnowledgeIndex, output: Option<&Path>) -> i32 {
    let json = match IndexPayload::new(index).to_json_pretty() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match output {
        Some(path) => match std::fs::write(path, json) {
            Ok(()) => {
                println!("Wrote index to {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: cannot write '{}': {}", path.display(), e);
                1
            }
        },
        None => {
            println!("{}", json);
            0
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let explicit = cli.log_level.is_some();
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    if let Err(e) = logging::init(level, explicit) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let file = match &cli.command {
        Commands::Summary { file }
        | Commands::Query { file, .. }
        | Commands::Person { file, .. }
        | Commands::Top { file, .. }
        | Commands::Group { file, .. }
        | Commands::Export { file, .. } => file.clone(),
    };
    let index = match build_index(&file, cli.format.as_deref(), &config) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Summary { .. } => cmd_summary(&index),
        Commands::Query { kind, value, .. } => cmd_query(&index, &kind, &value),
        Commands::Person { token, .. } => cmd_person(&index, &token),
        Commands::Top { key, limit, .. } => cmd_top(&index, &key, limit),
        Commands::Group { column, .. } => cmd_group(&index, &column),
        Commands::Export { output, .. } => cmd_export(&index, output.as_deref()),
    };
    std::process::exit(code);
}
