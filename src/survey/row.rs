//! Survey rows and the CSV reader

use super::error::InputError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Column names of a survey file, shared by all of its rows
#[derive(Debug, Default)]
struct Columns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }
}

/// One respondent's answers, keyed by column name.
///
/// Rows are numbered from 1 in file order and never change once read.
#[derive(Debug, Clone)]
pub struct Row {
    number: usize,
    columns: Arc<Columns>,
    values: Vec<String>,
}

impl Row {
    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<'a>(number: usize, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (names, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .unzip();
        Self {
            number,
            columns: Arc::new(Columns::new(names)),
            values,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// The answer in `column`. Absent columns read as blank.
    pub fn field(&self, column: &str) -> &str {
        self.columns
            .index
            .get(column)
            .and_then(|&i| self.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether the answer in `column` is non-blank
    pub fn has(&self, column: &str) -> bool {
        !self.field(column).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

/// A parsed survey file
#[derive(Debug, Clone, Default)]
pub struct Survey {
    columns: Arc<Columns>,
    rows: Vec<Row>,
}

impl Survey {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| InputError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse CSV with a header row. Short records read as blank in the
    /// missing trailing columns.
    pub fn from_reader(reader: impl Read) -> Result<Self, InputError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let names: Vec<String> = csv.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let columns = Arc::new(Columns::new(names));

        let mut rows = Vec::new();
        for (idx, record) in csv.records().enumerate() {
            let record = record?;
            rows.push(Row {
                number: idx + 1,
                columns: Arc::clone(&columns),
                values: record.iter().map(str::to_string).collect(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.index.contains_key(name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
