//! # logz
//!
//! A leveled, structured key/value logging facade.
//!
//! ## Features
//!
//! - **Leveled**: Debug, Info, Warn and Error records filtered against a
//!   configured minimum [`Level`]
//! - **Structured**: every record is a flat list of key/value fields written as
//!   one JSON (or logfmt) line
//! - **Immutable context**: [`Logger::with`] derives loggers that carry extra
//!   fields without touching the original
//! - **Error aware**: error methods skip `None` errors and render error chains
//! - **Thread Safe**: loggers are cheap to clone and share across threads
//!
//! ```no_run
//! use logz::{kv, Level, Logger};
//!
//! let logger = Logger::new(Level::parse("warn"));
//! logger.debug("dropped", kv![]);
//! logger.warn("cache miss rate high", kv!["rate", 0.42]);
//!
//! if let Err(e) = std::fs::read("/etc/app.toml") {
//!     logger.fatal_error(Some(&e), kv!["path", "/etc/app.toml"]);
//! }
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FailurePolicy, KeyValues, Level, Logger, LoggerBuilder, LoggerConfig, OutputFormat,
        Severity, TimestampFormat, Value,
    };
    pub use crate::kv;
}

pub use crate::core::{
    format_error, new_logger, new_null_logger, parse_level, with, ContextField, ContextSink,
    FailurePolicy, FieldSource, FilterPolicy, KeyValues, Level, LevelFilter, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, NopSink, OutputFormat, ProcessExit, Record,
    RecordingExit, Result, Severity, Sink, Terminator, TimestampFormat, Value, Valuer,
    FATAL_EXIT_CODE, MISSING_VALUE,
};
pub use sinks::{StreamSink, SyncWriter};
