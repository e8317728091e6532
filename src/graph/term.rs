//! RDF terms and triples
//!
//! A triple's subject and predicate are always IRIs. Its object is either an
//! IRI or a literal (lexical form + optional datatype + optional language).

use super::vocab::xsd;
use serde::{Deserialize, Serialize};

/// An expanded IRI (never a prefixed name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The N-Triples form, `<iri>`
    pub fn to_ntriples(&self) -> String {
        format!("<{}>", self.0)
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A literal value as it appears in the graph.
///
/// `datatype: None` is a plain (untyped) literal. Source graphs may hold the
/// same string either plain or typed as `xsd:string`; `is_string_like` treats
/// both as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<Iri>,
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal with no datatype or language tag
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// An `xsd:date` literal, `YYYY-MM-DD`
    pub fn date(date: chrono::NaiveDate) -> Self {
        Self::typed(date.format("%Y-%m-%d").to_string(), xsd::DATE)
    }

    /// An `xsd:dateTime` literal at midnight, `YYYY-MM-DDT00:00:00`
    pub fn date_time(date: chrono::NaiveDate) -> Self {
        Self::typed(date.format("%Y-%m-%dT00:00:00").to_string(), xsd::DATE_TIME)
    }

    /// True for plain literals and explicit `xsd:string` literals
    pub fn is_string_like(&self) -> bool {
        self.language.is_none()
            && self
                .datatype
                .as_ref()
                .map_or(true, |dt| dt.as_str() == xsd::STRING)
    }

    pub fn is_blank(&self) -> bool {
        self.lexical.trim().is_empty()
    }

    /// The N-Triples form, e.g. `"2010-01-01"^^<http://www.w3.org/2001/XMLSchema#date>`
    pub fn to_ntriples(&self) -> String {
        let quoted = format!("\"{}\"", escape_literal(&self.lexical));
        match (&self.datatype, &self.language) {
            (_, Some(lang)) => format!("{}@{}", quoted, lang),
            (Some(dt), None) => format!("{}^^{}", quoted, dt.to_ntriples()),
            (None, None) => quoted,
        }
    }
}

/// Escape a lexical form for a double-quoted N-Triples / SPARQL string
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// The object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<Iri>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn plain(lexical: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(lexical))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Iri(_) => None,
        }
    }

    /// The IRI string or the literal's lexical form
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::Literal(lit) => &lit.lexical,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Term::Iri(iri) => iri.as_str().is_empty(),
            Term::Literal(lit) => lit.is_blank(),
        }
    }

    pub fn to_ntriples(&self) -> String {
        match self {
            Term::Iri(iri) => iri.to_ntriples(),
            Term::Literal(lit) => lit.to_ntriples(),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

/// A single graph statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// One N-Triples statement, terminated with ` .`
    pub fn to_ntriples(&self) -> String {
        format!(
            "{} {} {} .",
            self.subject.to_ntriples(),
            self.predicate.to_ntriples(),
            self.object.to_ntriples()
        )
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_ntriples())
    }
}
