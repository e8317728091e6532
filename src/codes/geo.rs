//! Geographic codes
//!
//! The survey's geographic choice list is supplied as a companion table of
//! `code,name` rows. Codes up to `STATE_CODE_MAX` are US states (plus DC);
//! everything above is a country.

use super::{is_answered, CodeLookup};
use crate::graph::vocab::vivo;
use crate::survey::InputError;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Highest code that names a US state rather than a country
pub const STATE_CODE_MAX: u32 = 51;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoKind {
    StateOrProvince,
    Country,
}

impl GeoKind {
    pub fn for_code(code: u32) -> Self {
        if code <= STATE_CODE_MAX {
            GeoKind::StateOrProvince
        } else {
            GeoKind::Country
        }
    }

    /// Class the area is looked up under
    pub fn class_iri(self) -> &'static str {
        match self {
            GeoKind::StateOrProvince => vivo::STATE_OR_PROVINCE,
            GeoKind::Country => vivo::COUNTRY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoArea {
    pub code: u32,
    pub name: String,
    pub kind: GeoKind,
}

#[derive(Debug, Clone, Default)]
pub struct GeoTable {
    entries: BTreeMap<u32, String>,
}

impl GeoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, code: u32, name: impl Into<String>) -> Self {
        self.entries.insert(code, name.into());
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| InputError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Read a `code,name` table with a header row
    pub fn from_reader(reader: impl Read) -> Result<Self, InputError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| InputError::MissingColumns(vec![name.to_string()]))
        };
        let code_idx = column("code")?;
        let name_idx = column("name")?;

        let mut table = Self::new();
        for (idx, record) in csv.records().enumerate() {
            let record = record?;
            let raw_code = record.get(code_idx).unwrap_or_default();
            let code: u32 = raw_code.parse().map_err(|_| InputError::InvalidValue {
                row: idx + 1,
                column: "code".to_string(),
                value: raw_code.to_string(),
            })?;
            let name = record.get(name_idx).unwrap_or_default();
            table.entries.insert(code, name.to_string());
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }

    pub fn lookup(&self, code: &str) -> CodeLookup<GeoArea> {
        if !is_answered(code) {
            return CodeLookup::Blank;
        }
        let code = code.trim();
        let Ok(number) = code.parse::<u32>() else {
            return CodeLookup::Unrecognized(code.to_string());
        };
        match self.entries.get(&number) {
            Some(name) => CodeLookup::Known(GeoArea {
                code: number,
                name: name.clone(),
                kind: GeoKind::for_code(number),
            }),
            None => CodeLookup::Unrecognized(code.to_string()),
        }
    }
}
