//! Context chaining example
//!
//! Derives per-request loggers with `with` and ends with a fatal error.
//!
//! Run with: cargo run --example context_chaining; echo "exit status: $?"

use logz::prelude::*;
use std::io;

fn handle(logger: &Logger, request_id: u32) {
    let logger = logger.with(kv!["request_id", request_id]);
    logger.info("request received", kv!["path", "/orders"]);
    logger.debug_with_data(kv!["rows", 12]);
}

fn main() {
    let logger = Logger::new(Level::Debug).with(kv!["service", "orders"]);

    for id in 1..=3 {
        handle(&logger, id);
    }

    logger.info("root logger has no request_id", kv![]);

    let err = io::Error::new(io::ErrorKind::NotFound, "orders.db not found");
    logger.fatal_error(Some(&err), kv!["phase", "shutdown"]);
}
