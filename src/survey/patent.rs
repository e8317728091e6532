//! Patent registry seam
//!
//! A survey row only carries patent numbers. Titles and issue dates come
//! from a registry; when none is available the patent is created with its
//! number alone.

use super::date::build_date;
use super::error::InputError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("patent registry unavailable: {0}")]
    Unavailable(String),

    #[error("malformed registry record for patent {number}: {message}")]
    Malformed { number: String, message: String },
}

/// What a registry knows about one patent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatentRecord {
    pub number: String,
    pub title: Option<String>,
    pub issued: Option<NaiveDate>,
}

impl PatentRecord {
    pub fn number_only(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: None,
            issued: None,
        }
    }
}

pub trait PatentRegistry {
    /// Look up a patent by number. `Ok(None)` means the registry has no
    /// record for it.
    fn lookup(&self, number: &str) -> Result<Option<PatentRecord>, RegistryError>;
}

/// A registry that knows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRegistry;

impl PatentRegistry for OfflineRegistry {
    fn lookup(&self, _number: &str) -> Result<Option<PatentRecord>, RegistryError> {
        Ok(None)
    }
}

/// Patent records read from a local `number,title,issued` table
#[derive(Debug, Clone, Default)]
pub struct PatentTable {
    records: HashMap<String, PatentRecord>,
}

impl PatentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PatentRecord) {
        self.records.insert(record.number.clone(), record);
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| InputError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// `issued` is `YYYY-MM-DD`; a blank or unreadable date is left unknown
    pub fn from_reader(reader: impl Read) -> Result<Self, InputError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let missing: Vec<String> = ["number", "title", "issued"]
            .into_iter()
            .filter(|name| !headers.iter().any(|h| h.eq_ignore_ascii_case(name)))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(InputError::MissingColumns(missing));
        }
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let (number_idx, title_idx, issued_idx) = (column("number"), column("title"), column("issued"));

        let mut table = Self::new();
        for record in csv.records() {
            let record = record?;
            let get = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or_default();
            let number = get(number_idx);
            if number.is_empty() {
                continue;
            }
            let title = Some(get(title_idx)).filter(|t| !t.is_empty()).map(str::to_string);
            table.insert(PatentRecord {
                number: number.to_string(),
                title,
                issued: parse_issued(get(issued_idx)),
            });
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PatentRegistry for PatentTable {
    fn lookup(&self, number: &str) -> Result<Option<PatentRecord>, RegistryError> {
        Ok(self.records.get(number.trim()).cloned())
    }
}

fn parse_issued(value: &str) -> Option<NaiveDate> {
    let mut parts = value.splitn(3, '-');
    let year = parts.next()?;
    build_date(year, parts.next().unwrap_or(""), parts.next().unwrap_or(""))
}
