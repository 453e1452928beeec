//! Values carried by structured log fields

use super::timestamp::rfc3339_nano;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Rendering of a key that was given without a value
pub const MISSING_VALUE: &str = "(MISSING)";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// An error already formatted with its source chain
    Error(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Arbitrary structured data
    Json(serde_json::Value),
    Null,
    /// Placeholder for a trailing key that had no value
    Missing,
}

impl Value {
    /// Build an `Error` value from an error and its chain of sources
    pub fn from_error(err: &(dyn std::error::Error + '_)) -> Self {
        Value::Error(format_error(err))
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::String(s) | Value::Error(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Json(v) => v.clone(),
            Value::Null => serde_json::Value::Null,
            Value::Duration(_) | Value::Time(_) | Value::Missing => {
                serde_json::Value::String(self.to_string())
            }
        }
    }

    /// Whether the value renders as text (and so may need quoting in logfmt)
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Value::String(_) | Value::Error(_) | Value::Json(_) | Value::Missing
        )
    }
}

/// Format an error followed by every `source()` in its chain, separated by `": "`.
pub fn format_error(err: &(dyn std::error::Error + '_)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) | Value::Error(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Time(t) => f.write_str(&rfc3339_nano(t)),
            Value::Json(v) => write!(f, "{}", v),
            Value::Null => f.write_str("null"),
            Value::Missing => f.write_str(MISSING_VALUE),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
