use std::path::PathBuf;
use thiserror::Error;

/// Errors reading a survey file or one of its companion tables.
///
/// Every variant is structural: the run cannot continue past it.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing expected column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
