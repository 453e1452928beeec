//! Permanent context fields
//!
//! This module provides:
//! - `Valuer`: a field value computed per record (timestamp, caller, ...)
//! - `ContextField`: a permanent field, static or computed
//! - `ContextSink`: a sink decorator prepending permanent fields to every record

use super::{
    error::Result,
    record::{KeyValues, Record},
    sink::Sink,
    timestamp::TimestampFormat,
    value::Value,
};
use chrono::Utc;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Custom valuer callback
pub type ValuerFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Field value computed when a record passes through the context
#[derive(Clone)]
pub enum Valuer {
    /// Current wall-clock time in UTC
    Timestamp(TimestampFormat),
    /// `<file name>:<line>` of the public logging call
    Caller,
    /// User-supplied computation
    Custom(ValuerFn),
}

impl Valuer {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        Valuer::Custom(Arc::new(f))
    }

    pub fn resolve(&self, record: &Record) -> Value {
        match self {
            Valuer::Timestamp(format) => format.to_value(&Utc::now()),
            Valuer::Caller => Value::String(caller_string(record.location)),
            Valuer::Custom(f) => f(record),
        }
    }
}

impl fmt::Debug for Valuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valuer::Timestamp(format) => f.debug_tuple("Timestamp").field(format).finish(),
            Valuer::Caller => f.write_str("Caller"),
            Valuer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// `file:line` with the directory part of the file stripped
pub fn caller_string(location: &Location<'_>) -> String {
    let file = location.file();
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    format!("{}:{}", base, location.line())
}

/// Source of a permanent field's value
#[derive(Debug, Clone)]
pub enum FieldSource {
    Static(Value),
    Dynamic(Valuer),
}

/// A field attached to every record passing through a [`ContextSink`]
#[derive(Debug, Clone)]
pub struct ContextField {
    pub key: String,
    pub source: FieldSource,
}

impl ContextField {
    pub fn fixed(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            source: FieldSource::Static(value.into()),
        }
    }

    pub fn dynamic(key: impl Into<String>, valuer: Valuer) -> Self {
        Self {
            key: key.into(),
            source: FieldSource::Dynamic(valuer),
        }
    }

    fn resolve(&self, record: &Record) -> Value {
        match &self.source {
            FieldSource::Static(value) => value.clone(),
            FieldSource::Dynamic(valuer) => valuer.resolve(record),
        }
    }
}

/// Sink decorator prepending permanent fields to every record
///
/// Immutable once built. [`ContextSink::extend`] derives a new context that
/// shares the same inner sink and carries the parent's fields followed by the
/// new ones, so chains never nest more than one level deep.
pub struct ContextSink {
    inner: Arc<dyn Sink>,
    fields: Arc<[ContextField]>,
}

impl ContextSink {
    pub fn new(inner: Arc<dyn Sink>, fields: Vec<ContextField>) -> Self {
        Self {
            inner,
            fields: fields.into(),
        }
    }

    /// Derive a context carrying `extra` after this context's fields
    #[must_use]
    pub fn extend(&self, extra: KeyValues) -> ContextSink {
        let mut fields = Vec::with_capacity(self.fields.len() + extra.len());
        fields.extend(self.fields.iter().cloned());
        fields.extend(extra.into_iter().map(|(k, v)| ContextField::fixed(k, v)));
        ContextSink {
            inner: Arc::clone(&self.inner),
            fields: fields.into(),
        }
    }

    pub fn fields(&self) -> &[ContextField] {
        &self.fields
    }
}

impl Sink for ContextSink {
    fn log(&self, record: &Record) -> Result<()> {
        let mut fields = KeyValues::with_capacity(self.fields.len() + record.fields.len());
        for field in self.fields.iter() {
            fields.push(field.key.clone(), field.resolve(record));
        }
        fields.extend(record.fields.clone());

        self.inner
            .log(&Record::at(record.severity, fields, record.location))
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "context"
    }
}
