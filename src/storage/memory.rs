//! In-memory graph store
//!
//! Holds a graph snapshot as an ordered triple list. First-match lookups
//! follow insertion order, and minting is sequential, so runs over the same
//! snapshot are reproducible. Hash indexes over the list keep loading and
//! lookups linear in the snapshot size.

use super::mint::{IdentifierMinter, MintStrategy};
use super::traits::{GraphStore, StorageResult};
use crate::graph::vocab::rdf;
use crate::graph::{ntriples, Iri, Term, Triple};
use crate::query::{EntityQuery, ValueQuery};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Lookup tables over positions in the triple list
#[derive(Debug, Default)]
struct Index {
    present: HashSet<Triple>,
    /// subject -> predicate -> positions
    by_subject: HashMap<Iri, HashMap<Iri, Vec<usize>>>,
    /// predicate -> literal lexical form -> positions
    by_literal: HashMap<Iri, HashMap<String, Vec<usize>>>,
    /// subject -> rdf:type classes
    types: HashMap<Iri, HashSet<Iri>>,
    /// every IRI used as a subject or object
    in_use: HashSet<Iri>,
}

impl Index {
    fn add(&mut self, pos: usize, triple: &Triple) {
        self.present.insert(triple.clone());
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .push(pos);
        self.in_use.insert(triple.subject.clone());
        match &triple.object {
            Term::Iri(object) => {
                self.in_use.insert(object.clone());
                if triple.predicate.as_str() == rdf::TYPE {
                    self.types
                        .entry(triple.subject.clone())
                        .or_default()
                        .insert(object.clone());
                }
            }
            Term::Literal(lit) => {
                self.by_literal
                    .entry(triple.predicate.clone())
                    .or_default()
                    .entry(lit.lexical.clone())
                    .or_default()
                    .push(pos);
            }
        }
    }

    fn build(triples: &[Triple]) -> Self {
        let mut index = Self::default();
        for (pos, triple) in triples.iter().enumerate() {
            index.add(pos, triple);
        }
        index
    }
}

#[derive(Debug)]
pub struct MemoryGraph {
    triples: Vec<Triple>,
    index: Index,
    minter: IdentifierMinter,
}

impl MemoryGraph {
    /// Empty graph minting sequential identifiers into `namespace`
    pub fn new(namespace: &str) -> Self {
        Self {
            triples: Vec::new(),
            index: Index::default(),
            minter: IdentifierMinter::new(namespace, MintStrategy::Sequential),
        }
    }

    pub fn from_triples(namespace: &str, triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut graph = Self::new(namespace);
        for triple in triples {
            graph.insert(triple);
        }
        graph
    }

    /// Load an N-Triples snapshot
    pub fn from_ntriples(namespace: &str, text: &str) -> StorageResult<Self> {
        Ok(Self::from_triples(namespace, ntriples::parse_document(text)?))
    }

    pub fn load(path: impl AsRef<Path>, namespace: &str) -> StorageResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ntriples(namespace, &text)
    }

    /// Insert a triple unless it is already present
    pub fn insert(&mut self, triple: Triple) {
        if self.index.present.contains(&triple) {
            return;
        }
        let pos = self.triples.len();
        self.index.add(pos, &triple);
        self.triples.push(triple);
    }

    /// Remove a triple; returns whether it was present
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.remove_all(std::iter::once(triple)) > 0
    }

    /// Remove a batch of triples with one reindex; returns how many were present
    fn remove_all<'a>(&mut self, triples: impl IntoIterator<Item = &'a Triple>) -> usize {
        let doomed: HashSet<&Triple> = triples
            .into_iter()
            .filter(|t| self.index.present.contains(*t))
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        self.triples.retain(|t| !doomed.contains(t));
        let removed = doomed.len();
        self.index = Index::build(&self.triples);
        removed
    }

    /// Apply a diff as a downstream loader would: retractions, then assertions
    pub fn apply<'a>(
        &mut self,
        add: impl IntoIterator<Item = &'a Triple>,
        sub: impl IntoIterator<Item = &'a Triple>,
    ) {
        let sub: Vec<Triple> = sub.into_iter().cloned().collect();
        self.remove_all(&sub);
        for triple in add {
            self.insert(triple.clone());
        }
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    fn has_type(&self, subject: &Iri, entity_type: &Iri) -> bool {
        self.index
            .types
            .get(subject)
            .is_some_and(|classes| classes.contains(entity_type))
    }
}

impl GraphStore for MemoryGraph {
    fn find_entity(&self, query: &EntityQuery) -> StorageResult<Option<Iri>> {
        let Some(positions) = self
            .index
            .by_literal
            .get(&query.predicate)
            .and_then(|by_value| by_value.get(query.value.as_str()))
        else {
            return Ok(None);
        };
        let found = positions
            .iter()
            .map(|&pos| &self.triples[pos])
            .filter(|t| t.object.as_literal().is_some_and(|lit| query.matches_literal(lit)))
            .find(|t| self.has_type(&t.subject, &query.entity_type))
            .map(|t| t.subject.clone());
        Ok(found)
    }

    fn values(&self, query: &ValueQuery) -> StorageResult<Vec<Term>> {
        let positions = self
            .index
            .by_subject
            .get(&query.subject)
            .and_then(|by_predicate| by_predicate.get(&query.predicate));
        Ok(positions
            .into_iter()
            .flatten()
            .map(|&pos| self.triples[pos].object.clone())
            .collect())
    }

    fn is_in_use(&self, iri: &Iri) -> StorageResult<bool> {
        Ok(self.index.in_use.contains(iri))
    }

    fn mint_identifier(&self) -> StorageResult<Iri> {
        self.minter.mint(|iri| self.is_in_use(iri))
    }
}
