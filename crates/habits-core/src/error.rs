use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the habit analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date cell did not match the expected `%Y-%m-%d` format.
    #[error("Invalid date: {0}")]
    DateParse(String),

    /// A non-empty numeric cell could not be parsed.
    #[error("Invalid value {value:?} in column {column}")]
    ValueParse { column: String, value: String },

    /// A required column is absent from an input file.
    #[error("Missing column {column:?} in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A report month outside 1-12 was requested.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
