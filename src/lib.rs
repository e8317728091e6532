//! surveydiff: survey responses to knowledge-graph add/sub documents
//!
//! Reads tabular survey responses (one row per respondent) and produces the
//! minimal set of triple additions and retractions that bring an external
//! knowledge graph in line with the answers, leaving matching triples alone.
//!
//! # Core Concepts
//!
//! - **Rows**: one respondent's answers, verified against the graph by a
//!   stable identifier and a last-name cross-check
//! - **Scalar properties**: single-valued fields diffed against the current
//!   graph value; blank answers never retract anything
//! - **Composite records**: awards, degrees, patents and editorial roles,
//!   each created as a freshly minted entity
//! - **Add/sub sets**: the triples to assert and to retract, written out
//!   together with a per-row exception log
//!
//! # Example
//!
//! ```
//! use surveydiff::{GeoTable, MemoryGraph, OfflineRegistry, RowOrchestrator, Survey, SurveyLayout};
//!
//! let graph = MemoryGraph::new("http://vivo.ufl.edu/individual/");
//! let survey = Survey::from_reader("uf_id_number,last_name\n12345678,Conlon\n".as_bytes()).unwrap();
//! let layout = SurveyLayout::default();
//! let geo = GeoTable::new();
//!
//! let acc = RowOrchestrator::new(&graph, &layout, &geo, &OfflineRegistry).process_all(survey.rows());
//! // Nobody in an empty graph carries that identifier
//! assert_eq!(acc.exceptions().len(), 1);
//! ```

pub mod codes;
pub mod config;
pub mod diff;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod resolve;
pub mod storage;
pub mod survey;

pub use codes::{CodeLookup, DegreeCode, GeoTable, ServiceRoleCode};
pub use config::{ConfigError, StoreConfig, SyncConfig};
pub use diff::{DiffAccumulator, ExceptionRecord, RejectReason, ScalarDiff, TripleSet};
pub use graph::{Iri, Literal, Prefixes, Term, Triple};
pub use output::{DocumentFormat, OutputError, OutputPaths};
pub use pipeline::{run, RunError, RunSummary};
pub use resolve::EntityResolver;
pub use storage::{GraphStore, MemoryGraph, OpenStore, SparqlEndpoint, SqliteGraph, StorageError, StorageResult};
pub use survey::{
    InputError, OfflineRegistry, PatentRegistry, RowOrchestrator, Survey, SurveyLayout,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
