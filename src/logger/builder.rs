//! Direct Logger construction would require knowing every output's internals;
//! the builder hides that behind a stepwise API.

use super::Logger;
use super::json_builder::JsonBuilder;
use crate::fmt::Color;
use crate::level::{Level, Severity};
use crate::output::{ActionsOutput, JsonOutput, Output, TerminalOutput};
use std::io::Write;

/// Collects the threshold and outputs; outputs receive events in the order they were added.
#[derive(Default)]
pub struct LoggerBuilder {
    pub(super) threshold: Level,
    pub(super) outputs: Vec<Box<dyn Output>>,
}

impl LoggerBuilder {
    /// Info lets every named level through; tighten it with [`LoggerBuilder::level`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: Level::Info,
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// Workflow-command output for CI runners.
    #[must_use]
    pub fn actions(self) -> ActionsBuilder {
        ActionsBuilder {
            parent: self,
            output: ActionsOutput::new(),
        }
    }

    /// Coloured terminal output has its own concerns needing a dedicated sub-builder.
    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        TerminalBuilder {
            parent: self,
            output: TerminalOutput::new(),
        }
    }

    /// JSONL output has its own concerns (file path, debug gate) needing a dedicated sub-builder.
    #[must_use]
    pub fn json(self) -> JsonBuilder {
        JsonBuilder {
            parent: self,
            output: JsonOutput::new(),
        }
    }

    /// The built-in backends can't cover every use case.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger::new(self.threshold, self.outputs)
    }
}

/// Workflow-command specific options.
pub struct ActionsBuilder {
    parent: LoggerBuilder,
    output: ActionsOutput,
}

impl ActionsBuilder {
    /// Runners without collapsible sections (or nested tooling) read better with groups as prefixes.
    #[must_use]
    pub fn grouping(mut self, enabled: bool) -> Self {
        self.output = self.output.grouping(enabled);
        self
    }

    /// Overrides the `RUNNER_DEBUG` detection.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.output = self.output.debug(enabled);
        self
    }

    #[must_use]
    pub fn writer(mut self, target: impl Write + Send + 'static) -> Self {
        self.output = self.output.writer(target);
        self
    }

    /// Sub-builder consumes self, so there must be a way back to chain more outputs.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.outputs.push(Box::new(self.output));
        self.parent
    }
}

/// Terminal output has its own set of concerns (colors, grouping style) separate from CI output.
pub struct TerminalBuilder {
    parent: LoggerBuilder,
    output: TerminalOutput,
}

impl TerminalBuilder {
    /// Piped output and color-incapable terminals break on ANSI escape codes.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.output = self.output.colors(enabled);
        self
    }

    #[must_use]
    pub fn grouping(mut self, enabled: bool) -> Self {
        self.output = self.output.grouping(enabled);
        self
    }

    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.output = self.output.debug(enabled);
        self
    }

    /// Default level colors may clash with the user's terminal theme.
    #[must_use]
    pub fn level_color(mut self, severity: impl Into<Severity>, color: Color) -> Self {
        self.output = self.output.level_color(severity, color);
        self
    }

    #[must_use]
    pub fn writer(mut self, target: impl Write + Send + 'static) -> Self {
        self.output = self.output.writer(target);
        self
    }

    /// Sub-builder consumes self, so there must be a way back to chain more outputs.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.outputs.push(Box::new(self.output));
        self.parent
    }
}
