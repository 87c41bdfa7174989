//! Error taxonomy for loading and analyzing trip data.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between resolving a city and producing a report.
///
/// Missing optional columns (gender, birth year) are deliberately absent here:
/// they are detected at load time and reported as unavailable sections.
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// The city key did not resolve to a configured data source.
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    /// A mode was requested over zero values.
    #[error("cannot compute the most frequent value of an empty dataset")]
    EmptyDataset,

    /// The month/day filter selected no trips.
    #[error("no trips match month '{month}' and day '{day}'")]
    NoMatchingRecords { month: String, day: String },

    /// A cell could not be parsed. `row` is the 1-based data row.
    #[error("row {row}: cannot parse {column} from '{value}'")]
    MalformedRecord {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A required column is missing from the header row.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A month or day selection that is neither `all` nor a calendar name.
    #[error("invalid {kind} filter '{value}'")]
    InvalidFilter { kind: &'static str, value: String },

    /// A configured data file could not be opened.
    #[error("cannot open trip data '{}'", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("invalid city configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
