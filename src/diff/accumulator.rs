//! Diff accumulator types
//!
//! Domain vocabulary:
//! - TripleSet: ordered triples in append order
//! - DiffAccumulator: the add set, the sub set, and the exception log
//! - ExceptionRecord: a row that was skipped, and why

use super::scalar::ScalarDiff;
use crate::graph::Triple;

/// Ordered triples. Order is append order, so identical input gives
/// identical documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripleSet {
    triples: Vec<Triple>,
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    pub fn extend(&mut self, other: TripleSet) {
        self.triples.extend(other.triples);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No current entity carries the row's identifier
    IdentifierNotFound,
    /// The recorded name differs from the survey's name
    NameMismatch {
        graph_name: Option<String>,
        survey_name: String,
    },
    /// A graph lookup failed while processing the row
    LookupFailed(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound => write!(f, "not found"),
            Self::NameMismatch {
                graph_name,
                survey_name,
            } => write!(
                f,
                "last name in graph = {} does not match survey last name = {}",
                graph_name.as_deref().unwrap_or("(none)"),
                survey_name
            ),
            Self::LookupFailed(msg) => write!(f, "lookup failed: {}", msg),
        }
    }
}

/// A skipped row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRecord {
    pub row: usize,
    pub identifier: String,
    pub reason: RejectReason,
}

impl ExceptionRecord {
    pub fn new(row: usize, identifier: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            row,
            identifier: identifier.into(),
            reason,
        }
    }
}

impl std::fmt::Display for ExceptionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {} UFID {} {}", self.row, self.identifier, self.reason)
    }
}

/// The add and sub sets plus the exception log.
///
/// Handlers write into one accumulator per row; a completed row is merged
/// into the run's accumulator with `absorb`. Retractions can only enter
/// through `apply_scalar`.
#[derive(Debug, Clone, Default)]
pub struct DiffAccumulator {
    add: TripleSet,
    sub: TripleSet,
    exceptions: Vec<ExceptionRecord>,
    rows_absorbed: usize,
}

impl DiffAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a triple to the add set
    pub fn assert(&mut self, triple: Triple) {
        self.add.push(triple);
    }

    /// Record a scalar property diff
    pub fn apply_scalar(&mut self, diff: ScalarDiff) {
        if let Some(sub) = diff.sub {
            self.sub.push(sub);
        }
        if let Some(add) = diff.add {
            self.add.push(add);
        }
    }

    pub fn reject(&mut self, record: ExceptionRecord) {
        self.exceptions.push(record);
    }

    /// Merge a completed row's accumulator
    pub fn absorb(&mut self, row: DiffAccumulator) {
        self.add.extend(row.add);
        self.sub.extend(row.sub);
        self.exceptions.extend(row.exceptions);
        self.rows_absorbed += 1;
    }

    pub fn add_set(&self) -> &TripleSet {
        &self.add
    }

    pub fn sub_set(&self) -> &TripleSet {
        &self.sub
    }

    pub fn exceptions(&self) -> &[ExceptionRecord] {
        &self.exceptions
    }

    /// Rows merged with `absorb`
    pub fn rows_absorbed(&self) -> usize {
        self.rows_absorbed
    }

    /// True if nothing would be written to the add or sub document
    pub fn is_noop(&self) -> bool {
        self.add.is_empty() && self.sub.is_empty()
    }
}
