//! Run configuration
//!
//! A YAML file whose every field has a default, so an empty file (or none at
//! all) is a valid configuration:
//!
//! ```yaml
//! namespace: http://vivo.ufl.edu/individual/
//! store:
//!   kind: sparql
//!   endpoint: https://sparql.example.edu/query
//!   username: reader
//! geo_table: data/geo_codes.csv
//! format: rdfxml
//! groups:
//!   awards: 9
//!   degrees: 4
//! ```

use crate::graph::Iri;
use crate::output::DocumentFormat;
use crate::query::sparql::iri_ref;
use crate::storage::{
    EndpointSettings, GraphStore, MemoryGraph, SparqlEndpoint, SqliteGraph, StorageResult,
};
use crate::survey::GroupCounts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "http://vivo.ufl.edu/individual/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where current graph state is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// An N-Triples snapshot loaded into memory. Left without a snapshot
    /// there is nothing to read, and `SyncConfig::validate` refuses to run.
    Memory {
        #[serde(default)]
        snapshot: Option<PathBuf>,
    },
    /// A snapshot previously imported into SQLite, opened read-only
    Sqlite { path: PathBuf },
    /// A live SPARQL endpoint
    Sparql {
        endpoint: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory { snapshot: None }
    }
}

impl StoreConfig {
    /// Open the configured store, minting into `namespace`
    pub fn open(&self, namespace: &str) -> StorageResult<Box<dyn GraphStore>> {
        let store: Box<dyn GraphStore> = match self {
            StoreConfig::Memory { snapshot: Some(path) } => Box::new(MemoryGraph::load(path, namespace)?),
            StoreConfig::Memory { snapshot: None } => Box::new(MemoryGraph::new(namespace)),
            StoreConfig::Sqlite { path } => Box::new(SqliteGraph::open_read_only(path, namespace)?),
            StoreConfig::Sparql {
                endpoint,
                username,
                password,
                timeout_secs,
            } => Box::new(SparqlEndpoint::new(
                EndpointSettings {
                    url: endpoint.clone(),
                    username: username.clone(),
                    password: password.clone(),
                    timeout: Duration::from_secs(*timeout_secs),
                },
                namespace,
            )?),
        };
        Ok(store)
    }

    pub fn describe(&self) -> String {
        match self {
            StoreConfig::Memory { snapshot: Some(path) } => format!("memory ({})", path.display()),
            StoreConfig::Memory { snapshot: None } => "memory (empty)".to_string(),
            StoreConfig::Sqlite { path } => format!("sqlite ({})", path.display()),
            StoreConfig::Sparql { endpoint, .. } => format!("sparql ({endpoint})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// IRI prefix for minted identifiers
    pub namespace: String,
    pub store: StoreConfig,
    /// `code,name` table for geographic focus codes
    pub geo_table: Option<PathBuf>,
    /// `number,title,issued` table of known patents
    pub patent_table: Option<PathBuf>,
    pub format: DocumentFormat,
    /// Output directory; defaults to the input file's directory
    pub out_dir: Option<PathBuf>,
    pub groups: GroupCounts,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            store: StoreConfig::default(),
            geo_table: None,
            patent_table: None,
            format: DocumentFormat::default(),
            out_dir: None,
            groups: GroupCounts::default(),
        }
    }
}

impl SyncConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null, not as an empty map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SyncConfig = serde_yaml::from_str(text)?;
        config.validate_fields()?;
        Ok(config)
    }

    /// Check the configuration is runnable: well-formed fields and a graph
    /// source to read from. CLI overrides are applied before this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_fields()?;
        if let StoreConfig::Memory { snapshot: None } = self.store {
            return Err(ConfigError::Invalid(
                "no graph source: set store.snapshot, store.path or store.endpoint \
                 (or pass --snapshot, --sqlite or --endpoint)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn validate_fields(&self) -> Result<(), ConfigError> {
        let namespace = self.namespace.as_str();
        if !(namespace.ends_with('/') || namespace.ends_with('#')) {
            return Err(ConfigError::Invalid(format!(
                "namespace must end with '/' or '#': {namespace}"
            )));
        }
        iri_ref(&Iri::from(namespace)).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if let StoreConfig::Sparql { endpoint, .. } = &self.store {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "sparql endpoint must be an http(s) URL: {endpoint}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::OpenStore;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = SyncConfig::from_yaml("").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.groups.degrees, 4);
        assert_eq!(config.format, DocumentFormat::RdfXml);
    }

    #[test]
    fn parses_sparql_store_and_partial_groups() {
        let yaml = r#"
namespace: http://vivo.example.edu/individual/
store:
  kind: sparql
  endpoint: https://sparql.example.edu/query
  username: reader
format: ntriples
groups:
  awards: 3
"#;
        let config = SyncConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.format, DocumentFormat::NTriples);
        assert_eq!(config.groups.awards, 3);
        assert_eq!(config.groups.roles, 9);
        match config.store {
            StoreConfig::Sparql {
                endpoint,
                username,
                password,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "https://sparql.example.edu/query");
                assert_eq!(username.as_deref(), Some("reader"));
                assert_eq!(password, None);
                assert_eq!(timeout_secs, DEFAULT_TIMEOUT_SECS);
            }
            other => panic!("unexpected store: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_fields_and_bad_namespace() {
        assert!(matches!(
            SyncConfig::from_yaml("namespce: http://x/"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SyncConfig::from_yaml("namespace: http://vivo.example.edu/individual"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SyncConfig::from_yaml("namespace: \"http://bad host/\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn a_run_needs_a_graph_source() {
        let config = SyncConfig::from_yaml("format: ntriples").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = SyncConfig::from_yaml("store:\n  kind: memory\n  snapshot: graph.nt\n").unwrap();
        assert!(config.validate().is_ok());
        let config = SyncConfig::from_yaml("store:\n  kind: sqlite\n  path: graph.db\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn opens_memory_and_sqlite_stores() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("graph.nt");
        std::fs::write(
            &snapshot,
            "<http://ex.org/a> <http://www.w3.org/2000/01/rdf-schema#label> \"A\" .\n",
        )
        .unwrap();

        let memory = StoreConfig::Memory {
            snapshot: Some(snapshot),
        };
        let store = memory.open(DEFAULT_NAMESPACE).unwrap();
        assert!(store.is_in_use(&Iri::from("http://ex.org/a")).unwrap());

        let db = dir.path().join("graph.db");
        SqliteGraph::open(&db, DEFAULT_NAMESPACE).unwrap();
        let sqlite = StoreConfig::Sqlite { path: db };
        let store = sqlite.open(DEFAULT_NAMESPACE).unwrap();
        assert!(!store.is_in_use(&Iri::from("http://ex.org/a")).unwrap());
        assert!(sqlite.describe().starts_with("sqlite ("));
    }

    #[test]
    fn missing_sqlite_store_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo").join("graph.db");
        let sqlite = StoreConfig::Sqlite { path: path.clone() };
        assert!(sqlite.open(DEFAULT_NAMESPACE).is_err());
        assert!(!path.exists());
    }
}
