//! Shared helpers for integration tests

#![allow(dead_code)]

use logz::{Level, Logger, RecordingExit};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// In-memory writer shared between a logger and the test
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("log output is UTF-8")
    }

    /// Every written line parsed as JSON
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.text()
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is a JSON object"))
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// JSON logger writing into a [`Capture`], with a recording terminator
pub fn capturing_logger(level: Level) -> (Logger, Capture, Arc<RecordingExit>) {
    let capture = Capture::default();
    let exit = Arc::new(RecordingExit::new());
    let logger = Logger::builder()
        .level(level)
        .writer(capture.clone())
        .terminator(exit.clone())
        .build();
    (logger, capture, exit)
}
