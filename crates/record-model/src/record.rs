//! Telemetry records and series.
//!
//! A record is a schema-free map of field names to JSON values with one
//! distinguished field, the millisecond timestamp. Raw dumps arrive either
//! as a JSON array of objects or as JSONL (one object per line).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use telegrid_common::clock::TimestampMs;

/// Name of the timestamp field in serialized records.
pub const TIMESTAMP_FIELD: &str = "last_remote_timestamp";

/// Ordered-by-timestamp sequence of records for one participant.
pub type Series = Vec<Record>;

/// A single telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Milliseconds since the reference point of this record's series.
    #[serde(rename = "last_remote_timestamp", serialize_with = "serialize_ms")]
    pub timestamp_ms: TimestampMs,

    /// Every other field, numeric or not.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with no fields besides the timestamp.
    pub fn new(timestamp_ms: TimestampMs) -> Self {
        Self {
            timestamp_ms,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field. Setting the timestamp field to a number updates the
    /// timestamp; a non-numeric timestamp value is ignored.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if name == TIMESTAMP_FIELD {
            if let Some(ms) = value.as_f64() {
                self.timestamp_ms = ms;
            }
            return;
        }
        self.fields.insert(name, value);
    }

    /// Raw value of a non-timestamp field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Numeric value of a field, including the timestamp field.
    pub fn number(&self, name: &str) -> Option<f64> {
        if name == TIMESTAMP_FIELD {
            return Some(self.timestamp_ms);
        }
        self.fields.get(name).and_then(Value::as_f64)
    }

    /// All field names, timestamp first.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(TIMESTAMP_FIELD).chain(self.fields.keys().map(String::as_str))
    }

    /// Number of fields, including the timestamp.
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Records always carry a timestamp, so they are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Convert a float into a JSON number, writing integral values as integers.
///
/// Non-finite values become `null`.
pub fn number_value(value: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn serialize_ms<S: Serializer>(value: &TimestampMs, serializer: S) -> Result<S::Ok, S::Error> {
    number_value(*value).serialize(serializer)
}

/// Parse records from a JSON array or from JSONL content.
///
/// JSONL lines that are blank or start with `#` are skipped.
pub fn parse_records(input: &str) -> Result<Vec<Record>, serde_json::Error> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input);
    }

    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Load records from a file on disk.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, RecordError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RecordError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_records(&content).map_err(|e| RecordError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Strip the surrounding double quotes some launchers leave on path arguments.
pub fn normalize_path_arg(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('"', ""))
}

/// Errors that can occur when loading records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
