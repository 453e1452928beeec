//! Line-oriented stream sink
//!
//! Encodes each record as one line and writes it to a shared writer. Standard
//! output is the default destination; files and arbitrary writers are
//! supported for tests and embedding.

use crate::core::{LoggerError, OutputFormat, Record, Result, Sink};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

type SharedWriter = Arc<SyncWriter<Box<dyn Write + Send>>>;

/// The one writer behind every standard output sink in the process
static STDOUT: OnceLock<SharedWriter> = OnceLock::new();

/// Writer serializing whole lines
///
/// Each call to [`SyncWriter::write_line`] hands the line and its newline to
/// the writer in a single `write_all` and flushes, all under one lock, so
/// concurrent records never interleave.
pub struct SyncWriter<W: Write> {
    inner: Mutex<W>,
}

impl<W: Write> SyncWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut writer = self.inner.lock();
        writer.write_all(&buf)?;
        writer.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

/// Sink writing one encoded record per line
pub struct StreamSink {
    writer: SharedWriter,
    format: OutputFormat,
}

impl StreamSink {
    pub fn new<W: Write + Send + 'static>(writer: W, format: OutputFormat) -> Self {
        Self {
            writer: Arc::new(SyncWriter::new(Box::new(writer))),
            format,
        }
    }

    /// Sink on standard output
    ///
    /// All standard output sinks share one [`SyncWriter`], so independent
    /// root loggers still write whole lines.
    pub fn stdout(format: OutputFormat) -> Self {
        let writer = STDOUT.get_or_init(|| Arc::new(SyncWriter::new(Box::new(io::stdout()))));
        Self {
            writer: Arc::clone(writer),
            format,
        }
    }

    /// Sink appending to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io_operation(format!("opening {}", path.display()), e))?;
        Ok(Self::new(file, format))
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Sink for StreamSink {
    fn log(&self, record: &Record) -> Result<()> {
        let line = self.format.encode(record)?;
        self.writer
            .write_line(&line)
            .map_err(|e| LoggerError::io_operation("writing record", e))
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing stream", e))
    }

    fn name(&self) -> &str {
        "stream"
    }
}
