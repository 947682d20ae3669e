//! Error handling for instrument file ingestion.
//!
//! Structural problems in a logfile or manifest abort the whole operation
//! with the offending line or row position. Expected gaps (a manifest row
//! with no logfile entry) are not errors and surface as missing values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KoolstofError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Logfile line {line}: bottle name not found in {path}")]
    BottleNotFound { path: PathBuf, line: usize },

    #[error("Logfile line {line}: could not read run start time - {reason}")]
    InvalidRunTimestamp { line: usize, reason: String },

    #[error(
        "More than one (or no) name/date matches found between dbs and logfile @ dbs row {row} (bottle '{bottle}', {matches} matches)"
    )]
    AmbiguousMatch {
        row: usize,
        bottle: String,
        matches: usize,
    },

    #[error("No logfile matches in dbs: run match_dbs_to_logfile() first")]
    MatchesMissing,

    #[error("dbs row {row} points at logfile run {iloc}, but only {runs} runs were parsed")]
    MatchOutOfRange { row: usize, iloc: usize, runs: usize },

    #[error("Blank cutoff must be positive, got {usefrom} minutes")]
    InvalidCutoff { usefrom: f64 },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Date/time parsing failed for '{value}': {reason}")]
    DateTimeParsing { value: String, reason: String },

    #[error("Cannot infer sampling rate: {reason}")]
    SamplingRate { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, KoolstofError>;
