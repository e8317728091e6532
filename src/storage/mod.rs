//! Graph store backends
//!
//! Every backend implements `GraphStore`: typed-entity lookup, current-value
//! fetch, and identifier minting.
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryGraph` | `memory` | N-Triples snapshot held in memory |
//! | `SqliteGraph` | `sqlite` | Snapshot persisted in SQLite |
//! | `SparqlEndpoint` | `sparql` | Live SPARQL endpoint over HTTP |

mod memory;
mod mint;
mod sparql;
mod sqlite;
mod traits;

pub use memory::MemoryGraph;
pub use mint::{IdentifierMinter, MintStrategy};
pub use sparql::{EndpointSettings, SparqlEndpoint};
pub use sqlite::SqliteGraph;
pub use traits::{GraphStore, OpenStore, StorageError, StorageResult};
