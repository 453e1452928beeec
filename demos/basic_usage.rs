//! Basic logger usage example
//!
//! Demonstrates leveled logging on standard output, the data and message call
//! shapes, and error logging.
//!
//! Run with: LOGZ_LEVEL=debug cargo run --example basic_usage

use logz::prelude::*;
use std::io;

fn main() -> logz::Result<()> {
    let config = LoggerConfig::from_env()?;
    let logger = Logger::from_config(&config);

    logger.debug("debug message", kv!["visible_at", "debug"]);
    logger.info("service starting", kv!["version", env!("CARGO_PKG_VERSION")]);
    logger.info_with_data(kv!["workers", 4, "queue", "jobs"]);
    logger.warn("config file missing, using defaults", kv![]);

    let err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    logger.error(Some(&err), "database unreachable", kv!["host", "db:5432"]);

    // Nothing is written for a None error
    logger.error(None, "never written", kv![]);

    Ok(())
}
