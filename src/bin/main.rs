//! erdai CLI - normalize catalog rows and infer relationships
//!
//! Usage:
//!   erdai extract --columns <cols.json> [--fks <fks.json>] [--schema <name>]
//!   erdai infer <metadata.json>
//!   erdai erd <metadata.json> [--relations <relations.json>]
//!
//! All output is JSON on stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use erdai::config::Settings;
use erdai::erd::{build_erd, ErdGraph};
use erdai::inference::{InferenceEngine, InferredRelation};
use erdai::metadata::{extract_metadata, ColumnRow, FkRow, SchemaMetadata, StaticCatalog};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "erdai")]
#[command(about = "erdai - schema metadata normalization and relationship inference")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to erdai.toml / $ERDAI_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw catalog rows into schema metadata
    Extract {
        /// JSON array of column rows
        #[arg(long)]
        columns: PathBuf,

        /// JSON array of foreign-key rows
        #[arg(long)]
        fks: Option<PathBuf>,

        /// Schema name (falls back to extract.default_schema)
        #[arg(short, long)]
        schema: Option<String>,
    },

    /// Infer relationships from schema metadata
    Infer {
        /// Schema metadata JSON produced by `extract`
        metadata: PathBuf,
    },

    /// Build an ERD graph from schema metadata
    Erd {
        /// Schema metadata JSON produced by `extract`
        metadata: PathBuf,

        /// Relations JSON (inferred when omitted)
        #[arg(short, long)]
        relations: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging.level);

    match run(cli, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let engine = InferenceEngine::new(settings.inference.clone());

    match cli.command {
        Commands::Extract {
            columns,
            fks,
            schema,
        } => {
            let schema = resolve_schema(schema, settings)?;
            let column_rows: Vec<ColumnRow> = read_json(&columns)?;
            let fk_rows: Vec<FkRow> = match fks {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };

            let metadata = extract(&schema, column_rows, fk_rows).await?;
            print_json(&metadata, cli.pretty)
        }

        Commands::Infer { metadata } => {
            let metadata: SchemaMetadata = read_json(&metadata)?;
            print_json(&engine.infer(&metadata), cli.pretty)
        }

        Commands::Erd {
            metadata,
            relations,
        } => {
            let metadata: SchemaMetadata = read_json(&metadata)?;
            let relations: Option<Vec<InferredRelation>> = match relations {
                Some(path) => Some(read_json(&path)?),
                None => None,
            };
            print_json(&erd_graph(&engine, &metadata, relations), cli.pretty)
        }
    }
}

/// Schema from the command line, else `extract.default_schema`.
fn resolve_schema(
    schema: Option<String>,
    settings: &Settings,
) -> Result<String, Box<dyn std::error::Error>> {
    match schema {
        Some(s) => Ok(s),
        None => Ok(settings
            .extract
            .resolved_default_schema()?
            .ok_or("no schema given and extract.default_schema is not set")?),
    }
}

async fn extract(
    schema: &str,
    column_rows: Vec<ColumnRow>,
    fk_rows: Vec<FkRow>,
) -> Result<SchemaMetadata, Box<dyn std::error::Error>> {
    let catalog = StaticCatalog::new().with_schema(schema, column_rows, fk_rows);
    let normalized = extract_metadata(&catalog, schema).await?;
    if normalized.has_diagnostics() {
        warn!(
            skipped = normalized.diagnostics.len(),
            "some foreign-key rows were skipped"
        );
    }
    Ok(normalized.metadata)
}

/// Build the graph, inferring relations when none were supplied.
fn erd_graph(
    engine: &InferenceEngine,
    metadata: &SchemaMetadata,
    relations: Option<Vec<InferredRelation>>,
) -> ErdGraph {
    let relations = relations.unwrap_or_else(|| engine.infer(metadata));
    build_erd(metadata, relations)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
    Ok(value)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
