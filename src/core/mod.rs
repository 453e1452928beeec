//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod exit;
pub mod filter;
pub mod level;
pub mod logger;
pub mod output_format;
pub mod record;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use config::LoggerConfig;
pub use context::{ContextField, ContextSink, FieldSource, Valuer};
pub use error::{LoggerError, Result};
pub use exit::{ProcessExit, RecordingExit, Terminator, FATAL_EXIT_CODE};
pub use filter::{FilterPolicy, LevelFilter};
pub use level::{parse_level, Level, Severity};
pub use logger::{new_logger, new_null_logger, with, FailurePolicy, Logger, LoggerBuilder};
pub use output_format::OutputFormat;
pub use record::{KeyValues, Record};
pub use sink::{NopSink, Sink};
pub use timestamp::TimestampFormat;
pub use value::{format_error, Value, MISSING_VALUE};
