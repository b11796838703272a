//! File-backed record source for the CLI.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::IncidentRecord;

pub const DEFAULT_TIMESTAMP_FIELD: &str = "published";

pub fn load_records(path: &Path, field: &str) -> anyhow::Result<Vec<IncidentRecord>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("csv") => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_csv(file, field)?
        }
        Some("json") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            read_json(&text, field)?
        }
        _ => bail!(
            "unsupported input {}: expected a .csv or .json file",
            path.display()
        ),
    };

    info!(path = %path.display(), records = records.len(), "loaded incident records");
    Ok(records)
}

pub fn read_csv<R: std::io::Read>(input: R, field: &str) -> anyhow::Result<Vec<IncidentRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read CSV header row")?
        .clone();
    let position = headers
        .iter()
        .position(|header| header.trim() == field)
        .with_context(|| format!("CSV header has no `{field}` column"))?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_values = match result {
            Ok(values) => values,
            Err(err) => {
                warn!(row = row + 1, error = %err, "skipping unreadable CSV row");
                continue;
            }
        };

        let mut timestamp = None;
        let mut attributes = BTreeMap::new();
        for (index, (header, value)) in headers.iter().zip(row_values.iter()).enumerate() {
            if index == position {
                timestamp = Some(value.to_string());
            } else {
                attributes.insert(header.to_string(), value.to_string());
            }
        }

        records.push(IncidentRecord {
            timestamp,
            attributes,
        });
    }

    Ok(records)
}

pub fn read_json(text: &str, field: &str) -> anyhow::Result<Vec<IncidentRecord>> {
    let entries: Vec<Value> =
        serde_json::from_str(text).context("JSON input must be an array of objects")?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let Value::Object(object) = entry else {
            warn!(index, "skipping non-object JSON entry");
            continue;
        };

        let mut timestamp = None;
        let mut attributes = BTreeMap::new();
        for (key, value) in object {
            if key == field {
                timestamp = scalar_text(value);
            } else if let Some(text) = scalar_text(value) {
                attributes.insert(key, text);
            }
        }

        records.push(IncidentRecord {
            timestamp,
            attributes,
        });
    }

    Ok(records)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_split_timestamp_from_attributes() {
        let input = "victim,published,country\nAcme,2024-02-15 10:00:00,SG\nGlobex,,MY\n";
        let records = read_csv(input.as_bytes(), DEFAULT_TIMESTAMP_FIELD).expect("csv");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-02-15 10:00:00"));
        assert_eq!(records[0].attributes.get("victim").map(String::as_str), Some("Acme"));
        assert_eq!(records[0].attributes.get("country").map(String::as_str), Some("SG"));
        assert!(!records[0].attributes.contains_key("published"));
        assert_eq!(records[1].timestamp.as_deref(), Some(""));
    }

    #[test]
    fn csv_without_timestamp_column_is_rejected() {
        let input = "victim,date\nAcme,2024-02-15\n";
        assert!(read_csv(input.as_bytes(), DEFAULT_TIMESTAMP_FIELD).is_err());
    }

    #[test]
    fn csv_ragged_rows_are_skipped() {
        let input = "victim,published\nAcme,2024-02-15\nBroken\nGlobex,2024-03-01\n";
        let records = read_csv(input.as_bytes(), DEFAULT_TIMESTAMP_FIELD).expect("csv");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].timestamp.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn json_entries_map_to_records() {
        let input = r#"[
            {"victim": "Acme", "published": "2024-02-15T10:00:00", "severity": 3},
            {"victim": "Globex", "published": null},
            "stray",
            {"victim": "Initech", "seen": "2024-05-01"}
        ]"#;
        let records = read_json(input, DEFAULT_TIMESTAMP_FIELD).expect("json");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-02-15T10:00:00"));
        assert_eq!(records[0].attributes.get("severity").map(String::as_str), Some("3"));
        assert_eq!(records[1].timestamp, None);
        assert_eq!(records[2].timestamp, None);

        let records = read_json(input, "seen").expect("json");
        assert_eq!(records[2].timestamp.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(read_json(r#"{"published": "2024-01-01"}"#, DEFAULT_TIMESTAMP_FIELD).is_err());
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let err = load_records(Path::new("incidents.xml"), DEFAULT_TIMESTAMP_FIELD)
            .expect_err("xml is unsupported");
        assert!(err.to_string().contains("unsupported input"));
    }
}
