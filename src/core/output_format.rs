//! Output format configuration for records
//!
//! Provides the line encodings a stream sink can write:
//! - Json: one JSON object per line (default)
//! - Logfmt: key=value pairs compatible with log aggregation tools
//!
//! Both start with `level=<severity>` followed by the record fields in order.

use super::error::{LoggerError, Result};
use super::record::Record;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Key under which the record severity is written
pub const LEVEL_KEY: &str = "level";

/// Output format for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for machine processing
    ///
    /// Example: `{"level":"info","ts":"2025-01-08T10:30:45.123Z","caller":"main.rs:12","msg":"started"}`
    #[default]
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `level=info ts=2025-01-08T10:30:45.123Z caller=main.rs:12 msg=started`
    Logfmt,
}

impl OutputFormat {
    /// Encode a record as a single line, without the trailing newline
    pub fn encode(&self, record: &Record) -> Result<String> {
        match self {
            OutputFormat::Json => self.encode_json(record),
            OutputFormat::Logfmt => Ok(self.encode_logfmt(record)),
        }
    }

    /// Encode as JSON
    ///
    /// Repeated keys keep the position of their first occurrence and the value
    /// of their last.
    fn encode_json(&self, record: &Record) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(record.severity.to_str().to_string()),
        );

        for (key, value) in record.fields.iter() {
            json_obj.insert(key.to_string(), value.to_json_value());
        }

        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }

    /// Encode as logfmt
    fn encode_logfmt(&self, record: &Record) -> String {
        let mut parts = Vec::with_capacity(record.fields.len() + 1);

        parts.push(format!("{}={}", LEVEL_KEY, record.severity.to_str()));

        for (key, value) in record.fields.iter() {
            let formatted_value = if value.is_textual() {
                self.escape_logfmt_value(&value.to_string())
            } else {
                value.to_string()
            };
            parts.push(format!("{}={}", self.escape_logfmt_key(key), formatted_value));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect()
    }

    /// Escape a logfmt value (quote if it contains spaces, quotes, `=` or control chars)
    fn escape_logfmt_value(&self, value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value
                .chars()
                .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());
        if needs_quotes {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    /// Quote a logfmt value
    fn quote_logfmt_value(&self, value: &str) -> String {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        format!("\"{}\"", escaped)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Logfmt => "logfmt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::Logfmt),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown format '{}'", other),
            )),
        }
    }
}
