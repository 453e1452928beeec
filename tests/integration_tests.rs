//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Level filtering end to end
//! - Message, data and error call shapes
//! - Fatal exit through an injected terminator and through the real process exit
//! - Context chaining and the null logger
//! - Output format and file output
//! - Thread safety

mod common;

use common::{capturing_logger, Capture};
use logz::{kv, KeyValues, Level, Logger, OutputFormat, TimestampFormat};
use std::fmt;
use std::fs;
use std::env;
use std::io;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug)]
struct QueryError {
    source: io::Error,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("query failed")
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn test_warn_logger_end_to_end() {
    let (logger, capture, exit) = capturing_logger(Level::Warn);

    logger.debug("x", kv![]);
    assert!(capture.records().is_empty(), "debug must be filtered at warn");

    logger.warn("y", kv![]);
    let records = capture.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "y");
    assert_eq!(records[0]["level"], "warn");
    assert!(records[0].get("err").is_none());

    let boom = io::Error::new(io::ErrorKind::Other, "boom");
    logger.fatal_error(Some(&boom), kv![]);

    let records = capture.records();
    assert_eq!(records.len(), 2);
    assert!(records[1]["err"].as_str().unwrap().contains("boom"));
    assert_eq!(records[1]["fatal"], true);
    assert_eq!(records[1]["level"], "error");
    assert_eq!(exit.codes(), vec![1]);
}

#[test]
fn test_log_levels() {
    let (logger, capture, _) = capturing_logger(Level::Info);
    let err = io::Error::new(io::ErrorKind::Other, "e");

    logger.debug("Debug message", kv![]);
    logger.info("Info message", kv![]);
    logger.warn("Warn message", kv![]);
    logger.error(Some(&err), "Error message", kv![]);

    let text = capture.text();
    assert!(!text.contains("Debug message"));
    assert!(text.contains("Info message"));
    assert!(text.contains("Warn message"));
    assert!(text.contains("Error message"));
}

#[test]
fn test_all_level_writes_everything() {
    let (logger, capture, _) = capturing_logger(Level::parse("ALL"));

    logger.debug_with_data(kv!["n", 1]);
    logger.info_with_data(kv!["n", 2]);
    logger.warn_with_data(kv!["n", 3]);

    let levels: Vec<_> = capture
        .records()
        .iter()
        .map(|r| r["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, vec!["debug", "info", "warn"]);
}

#[test]
fn test_error_level_only_writes_errors() {
    let (logger, capture, _) = capturing_logger(Level::Error);
    let err = io::Error::new(io::ErrorKind::Other, "e");

    logger.warn("quiet", kv![]);
    logger.error_with_data(Some(&err), kv!["attempt", 3]);

    let records = capture.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["attempt"], 3);
    assert!(records[0].get("msg").is_none());
}

#[test]
fn test_nil_errors_produce_nothing() {
    let (logger, capture, exit) = capturing_logger(Level::All);

    logger.error(None, "ignored", kv!["k", 1]);
    logger.error_with_data(None, kv!["k", 1]);
    logger.fatal_error(None, kv!["k", 1]);

    assert!(capture.text().is_empty());
    assert!(exit.codes().is_empty());
}

#[test]
fn test_error_chain_is_formatted() {
    let (logger, capture, _) = capturing_logger(Level::Info);
    let err = QueryError {
        source: io::Error::new(io::ErrorKind::TimedOut, "connection timed out"),
    };

    logger.error(Some(&err), "loading users", kv!["table", "users"]);

    let records = capture.records();
    assert_eq!(records[0]["err"], "query failed: connection timed out");
    assert_eq!(records[0]["msg"], "loading users");
    assert_eq!(records[0]["table"], "users");
}

#[test]
fn test_field_order() {
    let (logger, capture, _) = capturing_logger(Level::Info);
    let err = io::Error::new(io::ErrorKind::Other, "e");

    logger
        .with(kv!["svc", "api"])
        .with(kv!["req", 7])
        .error(Some(&err), "failed", kv!["user", "ada"]);

    let record = &capture.records()[0];
    let keys: Vec<&str> = record
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["level", "ts", "caller", "svc", "req", "user", "err", "msg"]
    );
}

#[test]
fn test_with_chaining() {
    let (logger, capture, _) = capturing_logger(Level::Debug);

    let child = logger.with(kv!["a", 1]);
    child.debug_with_data(kv!["b", "two"]);
    logger.debug_with_data(kv!["c", 3]);

    let records = capture.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["a"], 1);
    assert_eq!(records[0]["b"], "two");
    assert!(records[1].get("a").is_none());
    assert_eq!(records[1]["c"], 3);
}

#[test]
fn test_with_free_function_and_siblings() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    let left = logz::with(&logger, kv!["side", "left"]);
    let right = logz::with(&logger, kv!["side", "right"]);
    left.info("l", kv![]);
    right.info("r", kv![]);

    let records = capture.records();
    assert_eq!(records[0]["side"], "left");
    assert_eq!(records[1]["side"], "right");
}

#[test]
fn test_null_logger() {
    let logger = logz::new_null_logger();
    let derived = logger.with(kv!["a", 1]);
    let err = io::Error::new(io::ErrorKind::Other, "boom");

    assert!(derived.is_null());
    derived.debug("x", kv![]);
    derived.info_with_data(kv!["k", "v"]);
    derived.warn("x", kv![]);
    derived.error(Some(&err), "x", kv![]);
    derived.error_with_data(Some(&err), kv![]);
    derived.fatal_error(Some(&err), kv![]);
}

#[test]
fn test_odd_key_values_are_padded() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    logger.info("odd", kv!["complete", 1, "dangling"]);

    let records = capture.records();
    assert_eq!(records[0]["complete"], 1);
    assert_eq!(records[0]["dangling"], "(MISSING)");
}

#[test]
fn test_caller_and_timestamp_fields() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    let line = line!() + 1;
    logger.with(kv!["x", 1]).info("here", kv![]);

    let record = &capture.records()[0];
    assert_eq!(record["caller"], format!("integration_tests.rs:{}", line));
    let ts = record["ts"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[test]
fn test_unix_millis_timestamp_is_numeric() {
    let capture = Capture::default();
    let logger = Logger::builder()
        .writer(capture.clone())
        .timestamp_format(TimestampFormat::UnixMillis)
        .build();

    logger.info("t", kv![]);

    assert!(capture.records()[0]["ts"].is_i64());
}

#[test]
fn test_logfmt_output() {
    let capture = Capture::default();
    let logger = Logger::builder()
        .format(OutputFormat::Logfmt)
        .writer(capture.clone())
        .build();

    logger.warn("disk almost full", kv!["pct", 93]);

    let text = capture.text();
    assert!(text.starts_with("level=warn ts="));
    assert!(text.contains("msg=\"disk almost full\""));
    assert!(text.contains("pct=93"));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_special_characters_stay_on_one_line() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    logger.info("User login\nERROR fake entry\tinjected\r", kv![]);

    let text = capture.text();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(
        capture.records()[0]["msg"],
        "User login\nERROR fake entry\tinjected\r"
    );
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.jsonl");

    let logger = Logger::builder()
        .level(Level::Debug)
        .file(&log_file)
        .expect("Failed to open log file")
        .build();

    for i in 0..5 {
        logger.debug("iteration", kv!["i", i]);
    }
    logger.flush();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["i"], i);
        assert_eq!(parsed["msg"], "iteration");
    }
}

#[test]
fn test_concurrent_logging() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger = logger.with(kv!["thread", thread_id]);
        handles.push(std::thread::spawn(move || {
            for i in 0..50 {
                logger.info("message", kv!["i", i, "payload", "x".repeat(64)]);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let records = capture.records();
    assert_eq!(records.len(), 400, "every line must be a whole JSON record");
    for thread_id in 0..8 {
        let count = records.iter().filter(|r| r["thread"] == thread_id).count();
        assert_eq!(count, 50);
    }
}

#[test]
fn test_independent_loggers_on_one_writer_keep_lines_whole() {
    let capture = Capture::default();
    let first = Logger::builder().writer(capture.clone()).build();
    let second = Logger::builder().writer(capture.clone()).build();

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger = if thread_id % 2 == 0 {
            first.clone()
        } else {
            second.clone()
        };
        handles.push(std::thread::spawn(move || {
            for i in 0..500 {
                logger.info("m", kv!["thread", thread_id, "i", i]);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let records = capture.records();
    assert_eq!(records.len(), 4000);
    for thread_id in 0..8 {
        let count = records.iter().filter(|r| r["thread"] == thread_id).count();
        assert_eq!(count, 500);
    }
}

/// Set in the child process spawned by `test_fatal_error_exits_process`
const FATAL_CHILD_ENV: &str = "LOGZ_FATAL_CHILD";

#[test]
#[ignore = "runs only as a child of test_fatal_error_exits_process"]
fn fatal_error_child() {
    if env::var_os(FATAL_CHILD_ENV).is_none() {
        return;
    }

    let first = Logger::new(Level::Warn);
    let second = Logger::new(Level::Warn).with(kv!["svc", "child"]);
    second.info("dropped", kv![]);

    let err = io::Error::new(io::ErrorKind::Other, "boom");
    first.fatal_error(Some(&err), kv!["phase", "shutdown"]);

    unreachable!("fatal_error must end the process");
}

#[test]
fn test_fatal_error_exits_process() {
    let exe = env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .args(["--ignored", "--exact", "fatal_error_child", "--test-threads=1"])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .expect("Failed to run child test");

    assert_eq!(output.status.code(), Some(1));

    // The test harness prints its own text around the record
    let stdout = String::from_utf8_lossy(&output.stdout);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .filter_map(|line| line.find("{\"level\"").map(|start| &line[start..]))
        .map(|json| serde_json::from_str(json).expect("record is one whole JSON line"))
        .collect();

    assert_eq!(records.len(), 1, "stdout was: {}", stdout);
    let record = &records[0];
    assert_eq!(record["level"], "error");
    assert_eq!(record["fatal"], true);
    assert_eq!(record["phase"], "shutdown");
    assert!(record["err"].as_str().unwrap().contains("boom"));
}

#[test]
fn test_shared_logger_across_threads() {
    let (logger, capture, _) = capturing_logger(Level::Info);
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || logger.info_with_data(kv!["k", "v"]))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(capture.records().len(), 4);
}

#[test]
fn test_from_config() {
    let config: logz::LoggerConfig =
        serde_json::from_str(r#"{"level":"error","format":"logfmt"}"#).unwrap();
    let logger = Logger::from_config(&config);

    assert!(!logger.enabled(logz::Severity::Warn));
    assert!(logger.enabled(logz::Severity::Error));
}

#[test]
fn test_empty_key_values_conversions() {
    let (logger, capture, _) = capturing_logger(Level::Info);

    logger.info("unit", ());
    logger.info("empty", KeyValues::new());
    logger.info_with_data(vec!["flat".into(), 1.into()]);

    let records = capture.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["flat"], 1);
}
