//! Ingest Error Types

use thiserror::Error;

/// Errors while reading an uploaded history file
#[derive(Debug, Error)]
pub enum IngestError {
    /// File extension is neither JSON nor CSV
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Upload is not UTF-8 text
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Malformed JSON content
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File has no header row
    #[error("CSV is empty")]
    EmptyCsv,

    /// Required column missing from the CSV header
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A CSV cell could not be converted
    #[error("Line {line}: invalid {field}: {reason}")]
    InvalidField {
        line: usize,
        field: &'static str,
        reason: String,
    },

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
