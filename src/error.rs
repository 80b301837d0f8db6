use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loader errors
// ---------------------------------------------------------------------------

/// Failure while reading a benchmark result file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: unreadable record")]
    Read {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected 3 comma-separated fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {column} value '{text}' is not a valid {expected}")]
    ParseField {
        line: u64,
        column: &'static str,
        text: String,
        expected: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Smoother errors
// ---------------------------------------------------------------------------

/// Invalid rolling-window parameters.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("rolling window must hold at least one value")]
    EmptyWindow,

    #[error("quantile {0} is outside [0, 1]")]
    QuantileOutOfRange(f64),
}
