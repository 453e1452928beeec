//! Sink implementations

pub mod stream;

pub use stream::{StreamSink, SyncWriter};

pub use crate::core::{NopSink, Sink};
