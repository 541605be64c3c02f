//! JSON output has its own concerns (JSONL path, debug gate) that don't belong on the main `LoggerBuilder`.

use super::LoggerBuilder;
use crate::output::JsonOutput;
use std::path::PathBuf;

/// Sub-builder pattern keeps JSON-specific options off the main `LoggerBuilder`.
pub struct JsonBuilder {
    pub(super) parent: LoggerBuilder,
    pub(super) output: JsonOutput,
}

impl JsonBuilder {
    /// Default XDG path doesn't work for every deployment (containers, custom setups).
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = self.output.path(path);
        self
    }

    /// Debug lines are noise in a queryable log unless explicitly wanted.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.output = self.output.debug(enabled);
        self
    }

    /// Returns the parent so more outputs can be chained.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.outputs.push(Box::new(self.output));
        self.parent
    }
}
