//! Storage trait definitions

use crate::graph::{Iri, NTriplesError, Term};
use crate::query::{EntityQuery, QueryError, ValueQuery};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SPARQL endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Invalid SPARQL response: {0}")]
    InvalidResponse(String),

    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] NTriplesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No graph store at {}", .0.display())]
    MissingStore(PathBuf),

    #[error("{} is not a graph store (no triples table)", .0.display())]
    NotAGraphStore(PathBuf),

    #[error("Could not mint an unused identifier after {0} attempts")]
    MintExhausted(usize),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// The graph store a run reads from.
///
/// Stores are read-only for the duration of a run: every change is emitted
/// as an add/sub document instead. Minting is the one stateful operation,
/// and it only has to guarantee that identifiers are unused in the store and
/// unique within the run.
pub trait GraphStore: Send + Sync {
    /// First entity matching the query, or `None`.
    ///
    /// When several entities match, which one is returned is unspecified
    /// beyond being stable for a given store state.
    fn find_entity(&self, query: &EntityQuery) -> StorageResult<Option<Iri>>;

    /// Current objects of a subject/predicate pair, in store order
    fn values(&self, query: &ValueQuery) -> StorageResult<Vec<Term>>;

    /// True if the IRI occurs as a subject or object anywhere in the store
    fn is_in_use(&self, iri: &Iri) -> StorageResult<bool>;

    /// A fresh identifier, unused in the store and not minted before in this run
    fn mint_identifier(&self) -> StorageResult<Iri>;

    /// The first current object of a subject/predicate pair
    fn first_value(&self, query: &ValueQuery) -> StorageResult<Option<Term>> {
        Ok(self.values(query)?.into_iter().next())
    }
}

/// Extension trait for opening file-backed stores
pub trait OpenStore: GraphStore + Sized {
    /// Open or create a store at the given path, minting into `namespace`
    fn open(path: impl AsRef<Path>, namespace: &str) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory(namespace: &str) -> StorageResult<Self>;
}
