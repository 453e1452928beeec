//! Sink trait for record output destinations

use super::{error::Result, record::Record};

/// Destination for records
///
/// Sinks are shared between every logger derived from the same root, so they
/// take `&self` and do their own synchronization.
pub trait Sink: Send + Sync {
    fn log(&self, record: &Record) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

impl Sink for NopSink {
    fn log(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "nop"
    }
}
