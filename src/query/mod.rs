//! Query builder for graph lookups
//!
//! Typed queries that every store can evaluate natively; SPARQL-backed
//! stores render them to text through the escaping helpers in `sparql`.

mod find;
pub mod sparql;
mod types;

pub use find::EntityQuery;
pub use types::{QueryError, UsageQuery, ValueQuery};
