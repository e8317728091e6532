//! One run: one survey file in, one add document, one sub document and one
//! exception log out.
//!
//! Structural problems (bad config, missing columns, unreadable tables, an
//! unreachable store) abort before any output exists. Row-level problems
//! only ever reach the exception log.

use crate::codes::GeoTable;
use crate::config::{ConfigError, SyncConfig};
use crate::diff::DiffAccumulator;
use crate::graph::Prefixes;
use crate::output::{write_outputs, OutputError, OutputPaths};
use crate::storage::{GraphStore, OpenStore, SqliteGraph, StorageError};
use crate::survey::{
    InputError, OfflineRegistry, PatentRegistry, PatentTable, RowOrchestrator, Survey, SurveyLayout,
};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("graph store: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Counts and locations from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub added: usize,
    pub retracted: usize,
    pub exceptions: usize,
    pub paths: OutputPaths,
}

/// Diff every row of `survey` against `store`
pub fn diff_survey(
    survey: &Survey,
    store: &dyn GraphStore,
    layout: &SurveyLayout,
    geo: &GeoTable,
    registry: &dyn PatentRegistry,
) -> DiffAccumulator {
    RowOrchestrator::new(store, layout, geo, registry).process_all(survey.rows())
}

/// Run the whole pipeline for `input`
pub fn run(input: &Path, config: &SyncConfig) -> Result<RunSummary, RunError> {
    config.validate()?;

    let survey = Survey::load(input)?;
    let layout = SurveyLayout::new(config.groups);
    layout.validate(survey.columns().iter().map(String::as_str))?;
    info!(rows = survey.len(), input = %input.display(), "survey loaded");

    let geo = match &config.geo_table {
        Some(path) => GeoTable::load(path)?,
        None => GeoTable::new(),
    };
    let registry: Box<dyn PatentRegistry> = match &config.patent_table {
        Some(path) => Box::new(PatentTable::load(path)?),
        None => Box::new(OfflineRegistry),
    };

    let store = config.store.open(&config.namespace)?;
    info!(store = %config.store.describe(), "graph store opened");

    let acc = diff_survey(&survey, store.as_ref(), &layout, &geo, registry.as_ref());

    let paths = OutputPaths::for_input(input, config.out_dir.as_deref(), config.format);
    write_outputs(&acc, &paths, config.format, &Prefixes::standard())?;
    info!(
        add = %paths.add.display(),
        sub = %paths.sub.display(),
        exceptions = %paths.exceptions.display(),
        "outputs written"
    );

    Ok(RunSummary {
        rows: survey.len(),
        added: acc.add_set().len(),
        retracted: acc.sub_set().len(),
        exceptions: acc.exceptions().len(),
        paths,
    })
}

/// Load an N-Triples snapshot into a SQLite store; returns the number of
/// new triples
pub fn import_snapshot(ntriples: &Path, db: &Path, namespace: &str) -> Result<usize, RunError> {
    let text = std::fs::read_to_string(ntriples).map_err(|source| InputError::Open {
        path: ntriples.to_path_buf(),
        source,
    })?;
    let store = SqliteGraph::open(db, namespace)?;
    let inserted = store.import_ntriples(&text)?;
    info!(inserted, db = %db.display(), "snapshot imported");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn snapshot_config(dir: &Path) -> SyncConfig {
        let snapshot = dir.join("graph.nt");
        std::fs::write(
            &snapshot,
            "<http://ex.org/a> <http://www.w3.org/2000/01/rdf-schema#label> \"A\" .\n",
        )
        .unwrap();
        SyncConfig {
            store: StoreConfig::Memory {
                snapshot: Some(snapshot),
            },
            ..SyncConfig::default()
        }
    }

    fn assert_no_outputs(input: &Path, config: &SyncConfig) {
        let paths = OutputPaths::for_input(input, None, config.format);
        assert!(!paths.add.exists());
        assert!(!paths.sub.exists());
        assert!(!paths.exceptions.exists());
    }

    #[test]
    fn missing_columns_abort_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        std::fs::write(&input, "uf_id_number,last_name\n1,Smith\n").unwrap();

        let config = snapshot_config(dir.path());
        let err = run(&input, &config).unwrap_err();
        assert!(matches!(err, RunError::Input(InputError::MissingColumns(_))));
        assert_no_outputs(&input, &config);
    }

    #[test]
    fn run_without_graph_source_aborts_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        std::fs::write(&input, "uf_id_number,last_name\n1,Smith\n").unwrap();

        let config = SyncConfig::default();
        let err = run(&input, &config).unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::Invalid(_))));
        assert_no_outputs(&input, &config);
    }

    #[test]
    fn missing_sqlite_store_aborts_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        let header = SurveyLayout::default().expected_columns().join(",");
        std::fs::write(&input, format!("{header}\n")).unwrap();
        let db = dir.path().join("typo").join("graph.db");

        let config = SyncConfig {
            store: StoreConfig::Sqlite { path: db.clone() },
            ..SyncConfig::default()
        };
        let err = run(&input, &config).unwrap_err();
        assert!(matches!(err, RunError::Storage(StorageError::MissingStore(_))));
        assert!(!db.exists());
        assert!(!dir.path().join("typo").exists());
        assert_no_outputs(&input, &config);
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = snapshot_config(dir.path());
        let err = run(Path::new("/nonexistent/survey.csv"), &config).unwrap_err();
        assert!(matches!(err, RunError::Input(InputError::Open { .. })));
    }

    #[test]
    fn import_then_count() {
        let dir = tempfile::tempdir().unwrap();
        let nt = dir.path().join("graph.nt");
        std::fs::write(
            &nt,
            "# snapshot\n<http://ex.org/a> <http://www.w3.org/2000/01/rdf-schema#label> \"A\" .\n",
        )
        .unwrap();
        let db = dir.path().join("graph.db");

        assert_eq!(import_snapshot(&nt, &db, "http://ex.org/").unwrap(), 1);
        assert_eq!(import_snapshot(&nt, &db, "http://ex.org/").unwrap(), 0);

        let store = StoreConfig::Sqlite { path: db }.open("http://ex.org/").unwrap();
        assert!(store.is_in_use(&crate::graph::Iri::from("http://ex.org/a")).unwrap());
    }
}
