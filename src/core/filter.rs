//! Level filtering
//!
//! [`FilterPolicy`] decides whether a record of a given severity reaches the
//! sink. [`LevelFilter`] applies a policy in front of another sink.

use super::{error::Result, level::Severity, record::Record, sink::Sink};
use std::sync::Arc;

/// Predicate over record severities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    min: Severity,
}

impl FilterPolicy {
    /// Allow every severity
    pub const fn allow_all() -> Self {
        Self::allow_debug()
    }

    /// Allow Debug and louder
    pub const fn allow_debug() -> Self {
        Self {
            min: Severity::Debug,
        }
    }

    /// Allow Info and louder
    pub const fn allow_info() -> Self {
        Self { min: Severity::Info }
    }

    /// Allow Warn and louder
    pub const fn allow_warn() -> Self {
        Self { min: Severity::Warn }
    }

    /// Allow only Error
    pub const fn allow_error() -> Self {
        Self {
            min: Severity::Error,
        }
    }

    /// Quietest severity this policy lets through
    pub fn min_severity(&self) -> Severity {
        self.min
    }

    #[inline]
    pub fn allows(&self, severity: Severity) -> bool {
        severity >= self.min
    }
}

/// Sink decorator dropping records the policy does not allow
pub struct LevelFilter {
    inner: Arc<dyn Sink>,
    policy: FilterPolicy,
}

impl LevelFilter {
    pub fn new(inner: Arc<dyn Sink>, policy: FilterPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }
}

impl Sink for LevelFilter {
    fn log(&self, record: &Record) -> Result<()> {
        if !self.policy.allows(record.severity) {
            return Ok(());
        }
        self.inner.log(record)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "level_filter"
    }
}
