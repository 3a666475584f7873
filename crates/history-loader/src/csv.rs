//! CSV Reading and Writing
//!
//! First line is the header; columns may appear in any order and unknown
//! columns are ignored. Double-quoted fields with `""` escapes are supported.

use crate::IngestError;
use reading_model::timestamp::{format_timestamp, parse_timestamp};
use reading_model::{ModelError, Reading, ReadingBatch, Region, RepairStatus, FIELD_NAMES};

struct Columns {
    timestamp: usize,
    region: usize,
    crack: usize,
    stress: usize,
    load: usize,
    status: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, IngestError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(IngestError::MissingColumn(name))
        };

        Ok(Self {
            timestamp: find("Timestamp")?,
            region: find("Region")?,
            crack: find("CrackSensitivity")?,
            stress: find("StressScore")?,
            load: find("LoadPathRisk")?,
            status: find("RepairStatus")?,
        })
    }
}

fn cell<'a>(values: &'a [String], idx: usize) -> &'a str {
    values.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn number(values: &[String], idx: usize, line: usize, field: &'static str) -> Result<f64, IngestError> {
    let raw = cell(values, idx);
    raw.parse::<f64>().map_err(|e| IngestError::InvalidField {
        line,
        field,
        reason: format!("{:?}: {}", raw, e),
    })
}

/// Split CSV text into records, each paired with the line it starts on.
///
/// Line breaks inside quoted fields belong to the field.
fn split_records(text: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;

    for ch in text.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '\n' if !in_quotes => {
                if current.ends_with('\r') {
                    current.pop();
                }
                records.push((start, std::mem::take(&mut current)));
                line += 1;
                start = line;
            }
            '\n' => {
                line += 1;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        records.push((start, current));
    }
    records
}

/// Parse CSV text into a batch
pub fn parse_csv(text: &str) -> Result<ReadingBatch, IngestError> {
    let mut records = split_records(text).into_iter();

    let (_, header_line) = records.next().ok_or(IngestError::EmptyCsv)?;
    let headers = parse_record(header_line.trim_start_matches('\u{feff}'));
    let cols = Columns::locate(&headers)?;

    let mut batch = ReadingBatch::new();
    for (line_no, record) in records {
        if record.trim().is_empty() {
            continue;
        }
        let values = parse_record(&record);

        let timestamp = parse_timestamp(cell(&values, cols.timestamp)).map_err(|e| {
            IngestError::InvalidField {
                line: line_no,
                field: "Timestamp",
                reason: e.to_string(),
            }
        })?;
        let region = cell(&values, cols.region)
            .parse::<Region>()
            .map_err(|e: ModelError| IngestError::InvalidField {
                line: line_no,
                field: "Region",
                reason: e.to_string(),
            })?;
        let repair_status = cell(&values, cols.status)
            .parse::<RepairStatus>()
            .map_err(|e: ModelError| IngestError::InvalidField {
                line: line_no,
                field: "RepairStatus",
                reason: e.to_string(),
            })?;

        batch.push(Reading {
            timestamp,
            region,
            crack_sensitivity: number(&values, cols.crack, line_no, "CrackSensitivity")?,
            stress_score: number(&values, cols.stress, line_no, "StressScore")?,
            load_path_risk: number(&values, cols.load, line_no, "LoadPathRisk")?,
            repair_status,
        });
    }

    Ok(batch)
}

/// Parse a single CSV record, handling quoted fields.
fn parse_record(record: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}

fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a batch as CSV with the standard header, insertion order
pub fn to_csv(batch: &ReadingBatch) -> String {
    let mut lines = Vec::with_capacity(batch.len() + 1);
    lines.push(FIELD_NAMES.join(","));

    for r in batch {
        let row = [
            format_timestamp(&r.timestamp),
            r.region.to_string(),
            r.crack_sensitivity.to_string(),
            r.stress_score.to_string(),
            r.load_path_risk.to_string(),
            r.repair_status.to_string(),
        ];
        let row: Vec<String> = row.iter().map(|v| escape(v)).collect();
        lines.push(row.join(","));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
