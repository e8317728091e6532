//! Find queries for locating an existing entity by a literal property value

use super::sparql::{iri_ref, string_literal};
use super::types::QueryError;
use crate::graph::vocab::{rdf, xsd};
use crate::graph::{Iri, Literal};

/// Query for the first entity of a type whose predicate equals a value.
///
/// The value matches either an untyped literal or an `xsd:string` literal,
/// since source graphs store both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    /// Required `rdf:type` of the entity
    pub entity_type: Iri,
    /// Predicate carrying the value
    pub predicate: Iri,
    /// Exact literal text to match
    pub value: String,
}

impl EntityQuery {
    pub fn new(entity_type: impl Into<Iri>, predicate: impl Into<Iri>, value: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            predicate: predicate.into(),
            value: value.into(),
        }
    }

    /// Check whether a stored literal satisfies the value condition
    pub fn matches_literal(&self, literal: &Literal) -> bool {
        literal.is_string_like() && literal.lexical == self.value
    }

    /// Render as a SPARQL SELECT returning at most one `?uri`
    pub fn to_sparql(&self) -> Result<String, QueryError> {
        let entity_type = iri_ref(&self.entity_type)?;
        let predicate = iri_ref(&self.predicate)?;
        let value = string_literal(&self.value);
        Ok(format!(
            "SELECT ?uri WHERE {{\n  ?uri {rdf_type} {entity_type} .\n  {{ ?uri {predicate} {value} }}\n  UNION\n  {{ ?uri {predicate} {value}^^{xsd_string} }}\n}}\nLIMIT 1",
            rdf_type = iri_ref(&Iri::from(rdf::TYPE))?,
            xsd_string = iri_ref(&Iri::from(xsd::STRING))?,
        ))
    }
}
