//! Property and usage queries, and query errors

use super::sparql::iri_ref;
use crate::graph::Iri;
use thiserror::Error;

/// Errors building a query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid IRI: {0:?}")]
    InvalidIri(String),
}

/// All current objects of `subject predicate ?o`, in store order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueQuery {
    pub subject: Iri,
    pub predicate: Iri,
}

impl ValueQuery {
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
        }
    }

    pub fn to_sparql(&self) -> Result<String, QueryError> {
        Ok(format!(
            "SELECT ?o WHERE {{\n  {} {} ?o .\n}}",
            iri_ref(&self.subject)?,
            iri_ref(&self.predicate)?
        ))
    }
}

/// Whether an IRI appears anywhere in the graph, as subject or object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageQuery {
    pub iri: Iri,
}

impl UsageQuery {
    pub fn new(iri: impl Into<Iri>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn to_sparql(&self) -> Result<String, QueryError> {
        let iri = iri_ref(&self.iri)?;
        Ok(format!(
            "ASK {{\n  {{ {iri} ?p ?o }}\n  UNION\n  {{ ?s ?p {iri} }}\n}}"
        ))
    }
}
