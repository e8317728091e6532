//! SPARQL term rendering
//!
//! Query text is only ever assembled from these two functions, so values
//! read from a survey cannot change the structure of a query.

use super::types::QueryError;
use crate::graph::{escape_literal, Iri};

/// Render `<iri>`, rejecting characters that are illegal inside an IRIREF
pub fn iri_ref(iri: &Iri) -> Result<String, QueryError> {
    let s = iri.as_str();
    let illegal = |c: char| {
        c.is_whitespace()
            || c.is_control()
            || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
    };
    if s.is_empty() || s.chars().any(illegal) {
        return Err(QueryError::InvalidIri(s.to_string()));
    }
    Ok(format!("<{}>", s))
}

/// Render a double-quoted string literal with SPARQL escapes
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_literal(value))
}
