//! Upload Format Detection

use crate::IngestError;
use std::path::Path;

/// Supported history file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Json,
    Csv,
}

impl HistoryFormat {
    /// Pick the format from a file name's extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Result<Self, IngestError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(HistoryFormat::Json),
            Some("csv") => Ok(HistoryFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(name.to_string())),
        }
    }
}
