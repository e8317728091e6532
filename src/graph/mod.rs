//! RDF data model: terms, triples, vocabulary and the N-Triples codec

pub mod ntriples;
mod term;
pub mod vocab;

pub use ntriples::NTriplesError;
pub use term::{escape_literal, Iri, Literal, Term, Triple};
pub use vocab::Prefixes;
