//! surveydiff CLI: diff survey responses against a knowledge graph.
//!
//! Usage:
//!   surveydiff run <INPUT> [--config path] [--snapshot path | --sqlite path | --endpoint url]
//!   surveydiff import <NTRIPLES> --sqlite <DB>
//!   surveydiff codes [degree|role|geo]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use surveydiff::config::{DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_SECS};
use surveydiff::{
    DegreeCode, DocumentFormat, GeoTable, ServiceRoleCode, StoreConfig, SyncConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "surveydiff",
    version,
    about = "Reconcile survey responses against a knowledge graph as add/sub triple sets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log every lookup and minted identifier
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff a survey file and write the add, sub and exception files
    Run {
        /// Survey CSV file
        input: PathBuf,
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Read graph state from an N-Triples snapshot
        #[arg(long, conflicts_with_all = ["sqlite", "endpoint"])]
        snapshot: Option<PathBuf>,
        /// Read graph state from a SQLite store
        #[arg(long, conflicts_with = "endpoint")]
        sqlite: Option<PathBuf>,
        /// Read graph state from a SPARQL endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Geographic code table (code,name)
        #[arg(long)]
        geo_table: Option<PathBuf>,
        /// Patent table (number,title,issued)
        #[arg(long)]
        patent_table: Option<PathBuf>,
        /// Document format: rdfxml or ntriples
        #[arg(long)]
        format: Option<DocumentFormat>,
        /// Directory for output files (default: next to the input)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Load an N-Triples snapshot into a SQLite store
    Import {
        /// N-Triples file
        ntriples: PathBuf,
        /// SQLite database to create or extend
        #[arg(long, required = true)]
        sqlite: PathBuf,
        /// Namespace for identifiers minted against this store
        #[arg(long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,
    },
    /// Print a code table
    Codes {
        #[arg(value_enum, default_value = "degree")]
        table: CodeTable,
        /// Geographic code table to print (required for `geo`)
        #[arg(long)]
        geo_table: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CodeTable {
    Degree,
    Role,
    Geo,
}

/// Overrides from `run` flags, applied on top of the config file
struct RunOverrides {
    snapshot: Option<PathBuf>,
    sqlite: Option<PathBuf>,
    endpoint: Option<String>,
    geo_table: Option<PathBuf>,
    patent_table: Option<PathBuf>,
    format: Option<DocumentFormat>,
    out_dir: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "surveydiff=debug" } else { "surveydiff=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, overrides: RunOverrides) -> Result<SyncConfig, String> {
    let mut config = match path {
        Some(path) => SyncConfig::load(path).map_err(|e| e.to_string())?,
        None => SyncConfig::default(),
    };

    if let Some(snapshot) = overrides.snapshot {
        config.store = StoreConfig::Memory {
            snapshot: Some(snapshot),
        };
    } else if let Some(path) = overrides.sqlite {
        config.store = StoreConfig::Sqlite { path };
    } else if let Some(endpoint) = overrides.endpoint {
        config.store = match config.store {
            // keep credentials from the config file
            StoreConfig::Sparql {
                username,
                password,
                timeout_secs,
                ..
            } => StoreConfig::Sparql {
                endpoint,
                username,
                password,
                timeout_secs,
            },
            _ => StoreConfig::Sparql {
                endpoint,
                username: None,
                password: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        };
    }
    if overrides.geo_table.is_some() {
        config.geo_table = overrides.geo_table;
    }
    if overrides.patent_table.is_some() {
        config.patent_table = overrides.patent_table;
    }
    if let Some(format) = overrides.format {
        config.format = format;
    }
    if overrides.out_dir.is_some() {
        config.out_dir = overrides.out_dir;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn cmd_run(input: &Path, config: Option<&Path>, overrides: RunOverrides) -> i32 {
    let config = match load_config(config, overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match surveydiff::run(input, &config) {
        Ok(summary) => {
            println!(
                "{} rows: {} triples to add, {} to retract, {} rows skipped",
                summary.rows, summary.added, summary.retracted, summary.exceptions
            );
            println!("  add: {}", summary.paths.add.display());
            println!("  sub: {}", summary.paths.sub.display());
            println!("  exceptions: {}", summary.paths.exceptions.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_import(ntriples: &Path, sqlite: &Path, namespace: &str) -> i32 {
    match surveydiff::pipeline::import_snapshot(ntriples, sqlite, namespace) {
        Ok(n) => {
            println!("Imported {} triples into {}", n, sqlite.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_codes(table: CodeTable, geo_table: Option<&Path>) -> i32 {
    match table {
        CodeTable::Degree => {
            for degree in DegreeCode::ALL {
                println!(
                    "{:>3}  {:<8} {:<32} {}",
                    degree.code(),
                    degree.abbreviation(),
                    degree.label(),
                    degree.iri()
                );
            }
        }
        CodeTable::Role => {
            for role in ServiceRoleCode::ALL {
                println!("{:>3}  {:<24} {}", role.code(), role.label(), role.role_class());
            }
        }
        CodeTable::Geo => {
            let Some(path) = geo_table else {
                eprintln!("Error: --geo-table is required to print geographic codes");
                return 1;
            };
            let table = match GeoTable::load(path) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 1;
                }
            };
            for (code, name) in table.iter() {
                let kind = surveydiff::codes::GeoKind::for_code(code);
                println!("{:>3}  {:<40} {}", code, name, kind.class_iri());
            }
        }
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Run {
            input,
            config,
            snapshot,
            sqlite,
            endpoint,
            geo_table,
            patent_table,
            format,
            out_dir,
        } => cmd_run(
            &input,
            config.as_deref(),
            RunOverrides {
                snapshot,
                sqlite,
                endpoint,
                geo_table,
                patent_table,
                format,
                out_dir,
            },
        ),
        Commands::Import {
            ntriples,
            sqlite,
            namespace,
        } => cmd_import(&ntriples, &sqlite, &namespace),
        Commands::Codes { table, geo_table } => cmd_codes(table, geo_table.as_deref()),
    };
    std::process::exit(code);
}
