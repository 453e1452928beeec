//! Main logger implementation

use super::{
    config::LoggerConfig,
    context::{ContextField, ContextSink, Valuer},
    error::{LoggerError, Result},
    exit::{ProcessExit, Terminator, FATAL_EXIT_CODE},
    filter::{FilterPolicy, LevelFilter},
    level::{Level, Severity},
    output_format::OutputFormat,
    record::{KeyValues, Record},
    sink::Sink,
    timestamp::TimestampFormat,
    value::Value,
};
use crate::sinks::StreamSink;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Key of the permanent timestamp field
pub const TIMESTAMP_KEY: &str = "ts";
/// Key of the permanent call-site field
pub const CALLER_KEY: &str = "caller";
/// Key of the message appended by the message-form methods
pub const MESSAGE_KEY: &str = "msg";
/// Key of the formatted error appended by the error methods
pub const ERROR_KEY: &str = "err";
/// Key marking records written by [`Logger::fatal_error`]
pub const FATAL_KEY: &str = "fatal";

/// What a logger does when its sink fails to write a record
///
/// Applied the same way at every severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Panic with the sink error
    #[default]
    Panic,
    /// Print the sink error to stderr and carry on
    Report,
}

/// Leveled structured logger
///
/// A `Logger` is an immutable handle: cloning is cheap and every clone shares
/// the same sink. [`Logger::with`] derives a new logger carrying extra fields
/// and leaves the original untouched.
///
/// No logging method returns an error. A `None` error makes the error methods
/// do nothing at all.
///
/// # Example
///
/// ```no_run
/// use logz::{kv, Level, Logger};
///
/// let logger = Logger::new(Level::Info);
/// let requests = logger.with(kv!["component", "http"]);
///
/// requests.info("request served", kv!["path", "/health", "status", 200]);
/// requests.debug("not written at info", kv![]);
/// ```
#[derive(Clone)]
pub struct Logger {
    endpoint: Option<Arc<ContextSink>>,
    policy: FilterPolicy,
    failure_policy: FailurePolicy,
    terminator: Arc<dyn Terminator>,
}

impl Logger {
    /// JSON lines on standard output, filtered at `level`, with `ts` and
    /// `caller` on every record.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self::builder().level(level).build()
    }

    /// Logger that discards every record and never exits the process
    #[must_use]
    pub fn null() -> Self {
        Self {
            endpoint: None,
            policy: FilterPolicy::allow_error(),
            failure_policy: FailurePolicy::Report,
            terminator: Arc::new(ProcessExit),
        }
    }

    /// Build a logger from configuration, writing to standard output
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::builder()
            .level(config.level)
            .format(config.format)
            .timestamp_format(config.timestamp_format)
            .failure_policy(config.failure_policy)
            .build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logz::{Level, Logger, OutputFormat};
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .format(OutputFormat::Logfmt)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that prepends `kvs` to every future record
    ///
    /// On the null logger this returns an equivalent null logger.
    #[must_use]
    pub fn with(&self, kvs: impl Into<KeyValues>) -> Logger {
        match &self.endpoint {
            Some(context) => Logger {
                endpoint: Some(Arc::new(context.extend(kvs.into()))),
                policy: self.policy,
                failure_policy: self.failure_policy,
                terminator: Arc::clone(&self.terminator),
            },
            None => self.clone(),
        }
    }

    /// Whether a record of `severity` would be written
    pub fn enabled(&self, severity: Severity) -> bool {
        self.endpoint.is_some() && self.policy.allows(severity)
    }

    /// Whether this is the null logger, which discards everything
    pub fn is_null(&self) -> bool {
        self.endpoint.is_none()
    }

    /// Flush the underlying sink
    pub fn flush(&self) {
        if let Some(endpoint) = &self.endpoint {
            if let Err(e) = endpoint.flush() {
                self.handle_failure(e);
            }
        }
    }

    #[track_caller]
    pub fn debug_with_data(&self, kvs: impl Into<KeyValues>) {
        self.emit(Severity::Debug, kvs.into());
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, kvs: impl Into<KeyValues>) {
        self.emit_message(Severity::Debug, msg, kvs.into());
    }

    #[track_caller]
    pub fn info_with_data(&self, kvs: impl Into<KeyValues>) {
        self.emit(Severity::Info, kvs.into());
    }

    #[track_caller]
    pub fn info(&self, msg: &str, kvs: impl Into<KeyValues>) {
        self.emit_message(Severity::Info, msg, kvs.into());
    }

    #[track_caller]
    pub fn warn_with_data(&self, kvs: impl Into<KeyValues>) {
        self.emit(Severity::Warn, kvs.into());
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, kvs: impl Into<KeyValues>) {
        self.emit_message(Severity::Warn, msg, kvs.into());
    }

    /// Write `err` under `err` at Error severity. Does nothing for `None`.
    #[track_caller]
    pub fn error_with_data(&self, err: Option<&dyn Error>, kvs: impl Into<KeyValues>) {
        let Some(err) = err else { return };

        let mut fields = kvs.into();
        fields.push(ERROR_KEY, Value::from_error(err));
        self.emit(Severity::Error, fields);
    }

    /// Write `err` and `msg` at Error severity. Does nothing for `None`.
    #[track_caller]
    pub fn error(&self, err: Option<&dyn Error>, msg: &str, kvs: impl Into<KeyValues>) {
        let Some(err) = err else { return };

        let mut fields = kvs.into();
        fields.push(ERROR_KEY, Value::from_error(err));
        fields.push(MESSAGE_KEY, msg);
        self.emit(Severity::Error, fields);
    }

    /// Write `err` with `fatal=true` at Error severity, then end the process
    /// with status 1.
    ///
    /// Does nothing for `None`. The record is written and the sink flushed
    /// before the terminator runs. The null logger never terminates.
    #[track_caller]
    pub fn fatal_error(&self, err: Option<&dyn Error>, kvs: impl Into<KeyValues>) {
        let Some(err) = err else { return };
        if self.is_null() {
            return;
        }

        let mut fields = kvs.into();
        fields.push(ERROR_KEY, Value::from_error(err));
        fields.push(FATAL_KEY, true);
        self.emit(Severity::Error, fields);
        self.flush();

        self.terminator.terminate(FATAL_EXIT_CODE);
    }

    #[track_caller]
    fn emit_message(&self, severity: Severity, msg: &str, mut fields: KeyValues) {
        if !self.enabled(severity) {
            return;
        }
        fields.push(MESSAGE_KEY, msg);
        self.emit(severity, fields);
    }

    #[track_caller]
    fn emit(&self, severity: Severity, fields: KeyValues) {
        if !self.enabled(severity) {
            return;
        }
        let Some(endpoint) = &self.endpoint else {
            return;
        };

        let record = Record::new(severity, fields);
        if let Err(e) = endpoint.log(&record) {
            self.handle_failure(e);
        }
    }

    fn handle_failure(&self, error: LoggerError) {
        match self.failure_policy {
            FailurePolicy::Panic => panic!("[LOGGER ERROR] sink write failed: {}", error),
            FailurePolicy::Report => eprintln!("[LOGGER ERROR] sink write failed: {}", error),
        }
    }
}

/// Free-function form of [`Logger::new`]
#[must_use]
pub fn new_logger(level: Level) -> Logger {
    Logger::new(level)
}

/// Free-function form of [`Logger::null`]
#[must_use]
pub fn new_null_logger() -> Logger {
    Logger::null()
}

/// Free-function form of [`Logger::with`]
#[must_use]
pub fn with(logger: &Logger, kvs: impl Into<KeyValues>) -> Logger {
    logger.with(kvs)
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("null", &self.is_null())
            .field("min_severity", &self.policy.min_severity())
            .field("failure_policy", &self.failure_policy)
            .field(
                "fields",
                &self
                    .endpoint
                    .as_ref()
                    .map(|c| c.fields().iter().map(|f| f.key.as_str()).collect::<Vec<_>>()),
            )
            .finish()
    }
}

enum Destination {
    Stdout,
    Writer(Box<dyn Write + Send>),
    Sink(Arc<dyn Sink>),
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logz::{FailurePolicy, Level, Logger, RecordingExit};
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(Level::Warn)
///     .writer(Vec::new())
///     .failure_policy(FailurePolicy::Report)
///     .terminator(Arc::new(RecordingExit::new()))
///     .build();
/// ```
pub struct LoggerBuilder {
    level: Level,
    format: OutputFormat,
    timestamp_format: TimestampFormat,
    failure_policy: FailurePolicy,
    terminator: Arc<dyn Terminator>,
    destination: Destination,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            format: OutputFormat::Json,
            timestamp_format: TimestampFormat::default(),
            failure_policy: FailurePolicy::default(),
            terminator: Arc::new(ProcessExit),
            destination: Destination::Stdout,
        }
    }

    /// Set minimum level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the line encoding (ignored when a custom sink is used)
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the format of the `ts` field
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Choose what happens when the sink fails to write
    #[must_use = "builder methods return a new value"]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Replace how [`Logger::fatal_error`] ends the process
    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Write lines to `writer` instead of standard output
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.destination = Destination::Writer(Box::new(writer));
        self
    }

    /// Append lines to the file at `path`, encoded with the format set so far
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let sink = StreamSink::file(path, self.format)?;
        self.destination = Destination::Sink(Arc::new(sink));
        Ok(self)
    }

    /// Send records to a custom sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.destination = Destination::Sink(sink);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let base: Arc<dyn Sink> = match self.destination {
            Destination::Stdout => Arc::new(StreamSink::stdout(self.format)),
            Destination::Writer(writer) => Arc::new(StreamSink::new(writer, self.format)),
            Destination::Sink(sink) => sink,
        };

        let policy = self.level.filter();
        let filtered: Arc<dyn Sink> = Arc::new(LevelFilter::new(base, policy));
        let context = ContextSink::new(
            filtered,
            vec![
                ContextField::dynamic(TIMESTAMP_KEY, Valuer::Timestamp(self.timestamp_format)),
                ContextField::dynamic(CALLER_KEY, Valuer::Caller),
            ],
        );

        Logger {
            endpoint: Some(Arc::new(context)),
            policy,
            failure_policy: self.failure_policy,
            terminator: self.terminator,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
