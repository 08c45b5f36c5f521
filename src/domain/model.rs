use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One data row exactly as read from the input table: header name → raw
/// cell text. A column missing from a short row simply has no entry.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub fields: HashMap<String, String>,
}

impl RawRow {
    /// Raw value for a column, or `""` when the column is absent.
    /// The empty string never satisfies any field contract, so missing
    /// keys fall out as ordinary validation failures.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A fully validated record, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    #[serde(rename = "timeSpent")]
    pub time_spent: i64,
}

/// A rejected row: its 1-based position among the data rows, the raw
/// fields as read, and every contract violation in field order.
#[derive(Debug, Clone)]
pub struct InvalidRow {
    pub row: usize,
    pub fields: HashMap<String, String>,
    pub errors: Vec<String>,
}

/// Result of validating one row.
#[derive(Debug, Clone)]
pub enum Outcome {
    Valid(LogRecord),
    Invalid(InvalidRow),
}

/// Output of the transform phase: both partitions in input order.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub valid: Vec<LogRecord>,
    pub invalid: Vec<InvalidRow>,
}

impl TransformResult {
    pub fn total_rows(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}
