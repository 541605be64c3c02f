//! Severity levels and the threshold rule that gates which messages reach the outputs.
//!
//! The numeric encoding is inverted compared to most loggers: `Error` carries the
//! *lowest* value and `Info` the highest. A message is dropped when its value is
//! greater than the configured threshold's value, so `Error` always passes and
//! `Info` only passes at the least restrictive threshold.

use std::fmt;
use std::str::FromStr;

/// The four named severities. Ordering is by `value()`, not by declaration order,
/// so comparisons never depend on incidental discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Failures that prevent an operation from completing.
    Error,
    /// Non-fatal anomalies that may need attention.
    Warning,
    /// Notable events worth surfacing above plain informational output.
    Notice,
    /// Normal operational output.
    #[default]
    Info,
}

impl Level {
    /// Named-constant table in value order, mirroring what callers configure thresholds against.
    pub const LOG_LEVELS: [(&'static str, u8); 4] =
        [("ERROR", 0), ("WARNING", 1), ("NOTICE", 2), ("INFO", 3)];

    /// Explicit value table; the threshold comparison is defined on these numbers.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Notice => 2,
            Self::Info => 3,
        }
    }

    /// Inverse of [`Level::value`].
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Error),
            1 => Some(Self::Warning),
            2 => Some(Self::Notice),
            3 => Some(Self::Info),
            _ => None,
        }
    }

    /// Whether a message at `self` survives the given threshold.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self.value() <= threshold.value()
    }

    /// Lowercase because config files use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
        }
    }

    /// All levels from most to least severe.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Error, Self::Warning, Self::Notice, Self::Info]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "notice" => Ok(Self::Notice),
            "info" => Ok(Self::Info),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// What a forwarded message is tagged with: a named level, or the debug channel
/// that bypasses the threshold and is gated by each sink instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Level(Level),
    Debug,
}

impl Severity {
    /// `None` for debug messages.
    #[must_use]
    pub const fn level(self) -> Option<Level> {
        match self {
            Self::Level(level) => Some(level),
            Self::Debug => None,
        }
    }

    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level(level) => level.as_str(),
            Self::Debug => "debug",
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
