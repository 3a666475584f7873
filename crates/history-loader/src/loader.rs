//! Upload Loader

use crate::csv::parse_csv;
use crate::{HistoryFormat, IngestError};
use data_validator::{ValidationConfig, Validator};
use reading_model::ReadingBatch;
use std::path::Path;
use tracing::{info, warn};

/// Parses uploads, dropping readings with non-finite values
pub struct HistoryLoader {
    validator: Validator,
}

impl HistoryLoader {
    /// Create a loader with the given validation ranges
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Parse an upload named `file_name` whose content is `data`
    pub fn parse(&self, file_name: &str, data: &[u8]) -> Result<ReadingBatch, IngestError> {
        let format = HistoryFormat::from_file_name(file_name)?;
        let text = std::str::from_utf8(data)?;

        let parsed = match format {
            HistoryFormat::Json => serde_json::from_str::<ReadingBatch>(text)?,
            HistoryFormat::Csv => parse_csv(text)?,
        };

        let parsed_len = parsed.len();
        let batch = self.validator.screen(parsed);
        info!(
            "Loaded {} of {} readings from {} ({:?})",
            batch.len(),
            parsed_len,
            file_name,
            format
        );
        Ok(batch)
    }

    /// Read and parse a file on disk
    pub fn load_file(&self, path: &Path) -> Result<ReadingBatch, IngestError> {
        let data = std::fs::read(path)?;
        self.parse(&path.to_string_lossy(), &data)
    }
}

impl Default for HistoryLoader {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Parse an upload with default validation ranges
pub fn parse_history(file_name: &str, data: &[u8]) -> Result<ReadingBatch, IngestError> {
    HistoryLoader::default().parse(file_name, data)
}

/// Load a history file; any failure contributes an empty batch
pub fn load_history_file(path: &Path) -> ReadingBatch {
    match HistoryLoader::default().load_file(path) {
        Ok(batch) => batch,
        Err(e) => {
            warn!("Ignoring history file {}: {}", path.display(), e);
            ReadingBatch::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_model::{Region, RepairStatus};

    const JSON: &str = r#"[
        {"Timestamp":"2024-07-01 12:00:00","Region":"Nave","CrackSensitivity":1.3,
         "StressScore":0.2,"LoadPathRisk":0.4,"RepairStatus":"OK"},
        {"Timestamp":"2024-07-01 11:50:00","Region":"Apse","CrackSensitivity":0.9,
         "StressScore":0.85,"LoadPathRisk":0.1,"RepairStatus":"Critical"}
    ]"#;

    #[test]
    fn test_parse_json_upload() {
        let batch = parse_history("history.json", JSON.as_bytes()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.as_slice()[1].region, Region::Apse);
        assert_eq!(batch.as_slice()[1].repair_status, RepairStatus::Critical);
    }

    #[test]
    fn test_parse_csv_upload() {
        let csv = "Timestamp,Region,CrackSensitivity,StressScore,LoadPathRisk,RepairStatus\n\
                   2024-07-01 12:00:00,Transept,1.0,0.5,0.5,OK\n";
        let batch = parse_history("history.csv", csv.as_bytes()).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            parse_history("history.txt", JSON.as_bytes()),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_history("history.json", b"[{\"Timestamp\":"),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            parse_history("history.csv", &[0xff, 0xfe, 0x00]),
            Err(IngestError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_out_of_range_rows_kept() {
        let csv = "Timestamp,Region,CrackSensitivity,StressScore,LoadPathRisk,RepairStatus\n\
                   2024-07-01 12:00:00,Nave,1.8,0.5,0.5,Critical\n\
                   2024-07-01 12:10:00,Apse,1.0,0.5,0.5,OK\n";
        let batch = parse_history("h.csv", csv.as_bytes()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.as_slice()[0].crack_sensitivity, 1.8);
        assert_eq!(batch.as_slice()[0].repair_status, RepairStatus::Critical);
    }

    #[test]
    fn test_non_finite_rows_dropped() {
        let csv = "Timestamp,Region,CrackSensitivity,StressScore,LoadPathRisk,RepairStatus\n\
                   2024-07-01 12:00:00,Nave,1.0,NaN,0.5,OK\n\
                   2024-07-01 12:10:00,Apse,1.0,0.5,0.5,OK\n";
        let batch = parse_history("h.csv", csv.as_bytes()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.as_slice()[0].region, Region::Apse);
    }

    #[test]
    fn test_zoned_json_timestamps_accepted() {
        let json = r#"[
            {"Timestamp":"2024-07-01T12:00:00Z","Region":"Nave","CrackSensitivity":1.3,
             "StressScore":0.2,"LoadPathRisk":0.4,"RepairStatus":"OK"},
            {"Timestamp":"2024-07-01T14:00:00+02:00","Region":"Apse","CrackSensitivity":0.9,
             "StressScore":0.85,"LoadPathRisk":0.1,"RepairStatus":"Critical"}
        ]"#;
        let batch = parse_history("h.json", json.as_bytes()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.as_slice()[0].timestamp, batch.as_slice()[1].timestamp);
    }

    #[test]
    fn test_missing_file_contributes_nothing() {
        let batch = load_history_file(Path::new("/definitely/not/here.json"));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_load_file_from_disk() {
        let path = std::env::temp_dir().join(format!("history-loader-{}.json", std::process::id()));
        std::fs::write(&path, JSON).unwrap();

        let batch = load_history_file(&path);
        assert_eq!(batch.len(), 2);

        std::fs::remove_file(&path).unwrap();
    }
}
