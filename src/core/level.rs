//! Level and severity definitions

use super::filter::FilterPolicy;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity of a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Minimum level a logger is configured with
///
/// `All` filters exactly like `Debug` but stays a distinct value so that
/// configuration round-trips and callers matching on the level see what was
/// configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    All,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parse a level from free-form text.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything other than `error`, `warn`, `debug` or `all` yields `Info`.
    ///
    /// ```
    /// use logz::Level;
    ///
    /// assert_eq!(Level::parse(" WARN "), Level::Warn);
    /// assert_eq!(Level::parse("verbose"), Level::Info);
    /// ```
    pub fn parse(text: &str) -> Level {
        match text.trim().to_lowercase().as_str() {
            "error" => Level::Error,
            "warn" => Level::Warn,
            "debug" => Level::Debug,
            "all" => Level::All,
            _ => Level::Info,
        }
    }

    /// Filter policy for this minimum level
    pub fn filter(&self) -> FilterPolicy {
        match self {
            Level::All => FilterPolicy::allow_all(),
            Level::Debug => FilterPolicy::allow_debug(),
            Level::Info => FilterPolicy::allow_info(),
            Level::Warn => FilterPolicy::allow_warn(),
            Level::Error => FilterPolicy::allow_error(),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::All => "all",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// Free-function form of [`Level::parse`].
pub fn parse_level(text: &str) -> Level {
    Level::parse(text)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::parse(s))
    }
}
