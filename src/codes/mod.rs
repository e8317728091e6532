//! Survey code tables
//!
//! Closed mappings from a survey's numeric choice codes to canonical labels
//! or graph identifiers. Every lookup is total: a code either maps, is blank,
//! or is not in the table, and callers omit the field for the last two.

mod degree;
mod geo;
mod role;

pub use degree::DegreeCode;
pub use geo::{GeoArea, GeoKind, GeoTable, STATE_CODE_MAX};
pub use role::ServiceRoleCode;

/// Outcome of a code table lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLookup<T> {
    /// The code maps to a table entry
    Known(T),
    /// No answer was given (blank or the "none" code `0`)
    Blank,
    /// An answer was given but the table has no entry for it
    Unrecognized(String),
}

impl<T> CodeLookup<T> {
    pub fn known(self) -> Option<T> {
        match self {
            CodeLookup::Known(value) => Some(value),
            CodeLookup::Blank | CodeLookup::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CodeLookup::Known(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CodeLookup<U> {
        match self {
            CodeLookup::Known(value) => CodeLookup::Known(f(value)),
            CodeLookup::Blank => CodeLookup::Blank,
            CodeLookup::Unrecognized(code) => CodeLookup::Unrecognized(code),
        }
    }
}

/// A survey choice answer is present when it is neither blank nor `0`
pub fn is_answered(code: &str) -> bool {
    let code = code.trim();
    !code.is_empty() && code != "0"
}

/// Shared lookup over a static table of `(code, entry)` pairs
fn lookup_in<T: Copy>(table: &[(&str, T)], code: &str) -> CodeLookup<T> {
    if !is_answered(code) {
        return CodeLookup::Blank;
    }
    let code = code.trim();
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, entry)| CodeLookup::Known(*entry))
        .unwrap_or_else(|| CodeLookup::Unrecognized(code.to_string()))
}
