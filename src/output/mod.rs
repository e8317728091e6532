//! Run output: the add document, the sub document, and the exception log
//!
//! Documents are rendered in full before any file is created, so a failure
//! never leaves a truncated document behind.

mod ntriples;
mod rdfxml;

use crate::diff::{DiffAccumulator, ExceptionRecord, TripleSet};
use crate::graph::Prefixes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("predicate has no XML-qualified form: {0}")]
    Predicate(String),
}

/// Serialization of the add and sub documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    RdfXml,
    NTriples,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::RdfXml => "rdf",
            DocumentFormat::NTriples => "nt",
        }
    }

    /// Render one document
    pub fn render(self, title: &str, triples: &TripleSet, prefixes: &Prefixes) -> Result<String, OutputError> {
        match self {
            DocumentFormat::RdfXml => rdfxml::render(triples, prefixes),
            DocumentFormat::NTriples => Ok(ntriples::render(title, triples)),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdfxml" | "rdf" | "xml" => Ok(DocumentFormat::RdfXml),
            "ntriples" | "nt" => Ok(DocumentFormat::NTriples),
            other => Err(format!("unknown document format: {other} (expected rdfxml or ntriples)")),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::RdfXml => write!(f, "rdfxml"),
            DocumentFormat::NTriples => write!(f, "ntriples"),
        }
    }
}

/// Where a run writes its three files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub add: PathBuf,
    pub sub: PathBuf,
    pub exceptions: PathBuf,
}

impl OutputPaths {
    /// `<stem>_add.<ext>`, `<stem>_sub.<ext>` and `<stem>_exc.txt`, next to
    /// the input unless `out_dir` is given
    pub fn for_input(input: &Path, out_dir: Option<&Path>, format: DocumentFormat) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "survey".to_string());
        let dir = out_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let ext = format.extension();
        Self {
            add: dir.join(format!("{stem}_add.{ext}")),
            sub: dir.join(format!("{stem}_sub.{ext}")),
            exceptions: dir.join(format!("{stem}_exc.txt")),
        }
    }
}

/// One line per skipped row
pub fn render_exceptions(records: &[ExceptionRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
}

/// Render and write all three outputs of a run
pub fn write_outputs(
    acc: &DiffAccumulator,
    paths: &OutputPaths,
    format: DocumentFormat,
    prefixes: &Prefixes,
) -> Result<(), OutputError> {
    let add = format.render("surveydiff add", acc.add_set(), prefixes)?;
    let sub = format.render("surveydiff sub", acc.sub_set(), prefixes)?;
    let exceptions = render_exceptions(acc.exceptions());

    for (path, contents) in [(&paths.add, add), (&paths.sub, sub), (&paths.exceptions, exceptions)] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}
