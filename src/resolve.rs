//! Entity resolution
//!
//! Maps free-text survey answers (identifiers, organization and journal
//! names, concept labels, place names) to existing graph identifiers, and
//! fetches a subject's current property values.

use crate::graph::{Iri, Term};
use crate::query::{EntityQuery, ValueQuery};
use crate::storage::{GraphStore, StorageResult};
use tracing::debug;

#[derive(Clone, Copy)]
pub struct EntityResolver<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> EntityResolver<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a dyn GraphStore {
        self.store
    }

    /// First entity of `entity_type` whose `predicate` equals `value`.
    ///
    /// A blank value never matches and is not sent to the store.
    pub fn resolve(&self, entity_type: &str, predicate: &str, value: &str) -> StorageResult<Option<Iri>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        let query = EntityQuery::new(entity_type, predicate, value);
        let found = self.store.find_entity(&query)?;
        debug!(
            entity_type,
            predicate,
            value,
            found = found.as_ref().map(Iri::as_str),
            "resolve entity"
        );
        Ok(found)
    }

    /// The subject's current value for a predicate, if any
    pub fn current_value(&self, subject: &Iri, predicate: &str) -> StorageResult<Option<Term>> {
        self.store
            .first_value(&ValueQuery::new(subject.clone(), predicate))
    }

    /// Whether `subject predicate object` is already in the graph
    pub fn has_statement(&self, subject: &Iri, predicate: &str, object: &Term) -> StorageResult<bool> {
        let values = self
            .store
            .values(&ValueQuery::new(subject.clone(), predicate))?;
        Ok(values.iter().any(|v| v == object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::vocab::{bibo, rdf, vivo};
    use crate::graph::{Literal, Triple};
    use crate::storage::MemoryGraph;

    const NS: &str = "http://vivo.ufl.edu/individual/";

    fn graph() -> MemoryGraph {
        MemoryGraph::from_triples(
            NS,
            [
                Triple::new("http://ex.org/j1", rdf::TYPE, Term::iri(bibo::JOURNAL)),
                Triple::new("http://ex.org/j1", rdf::LABEL, Literal::plain("Circulation")),
                Triple::new("http://ex.org/p1", vivo::HAS_SUBJECT_AREA, Term::iri("http://ex.org/c1")),
                Triple::new("http://ex.org/p1", vivo::RESEARCH_OVERVIEW, Literal::plain("Old text")),
            ],
        )
    }

    #[test]
    fn resolves_existing_label() {
        let graph = graph();
        let resolver = EntityResolver::new(&graph);
        assert_eq!(
            resolver.resolve(bibo::JOURNAL, rdf::LABEL, "Circulation").unwrap(),
            Some(Iri::from("http://ex.org/j1"))
        );
    }

    #[test]
    fn unknown_and_blank_values_are_not_found() {
        let graph = graph();
        let resolver = EntityResolver::new(&graph);
        assert_eq!(resolver.resolve(bibo::JOURNAL, rdf::LABEL, "Nature").unwrap(), None);
        assert_eq!(resolver.resolve(bibo::JOURNAL, rdf::LABEL, "  ").unwrap(), None);
    }

    #[test]
    fn reads_current_value_and_statements() {
        let graph = graph();
        let resolver = EntityResolver::new(&graph);
        let person = Iri::from("http://ex.org/p1");
        assert_eq!(
            resolver.current_value(&person, vivo::RESEARCH_OVERVIEW).unwrap(),
            Some(Term::plain("Old text"))
        );
        assert_eq!(resolver.current_value(&person, vivo::ERA_COMMONS_ID).unwrap(), None);
        assert!(resolver
            .has_statement(&person, vivo::HAS_SUBJECT_AREA, &Term::iri("http://ex.org/c1"))
            .unwrap());
        assert!(!resolver
            .has_statement(&person, vivo::HAS_SUBJECT_AREA, &Term::iri("http://ex.org/c2"))
            .unwrap());
    }
}
