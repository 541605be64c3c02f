//! CI runners parse specially formatted stdout lines ("workflow commands") into
//! annotations and collapsible log sections. This output speaks that channel.

use super::writer::{LineWriter, Stream};
use super::{AnnotationProperties, MessageEvent, Output, UpdateEvent, UpdateKind};
use crate::level::{Level, Severity};
use std::io::Write;

/// Runners set this to `1` when step debug logging is switched on.
const RUNNER_DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Workflow-command output.
///
/// With grouping enabled, groups become `::group::`/`::endgroup::` sections and the
/// group label is left out of message prefixes. Without it, groups are prefixed like
/// any other context.
#[derive(Debug)]
pub struct ActionsOutput {
    grouping: bool,
    debug_enabled: bool,
    writer: LineWriter,
}

impl Default for ActionsOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionsOutput {
    /// Grouping on, debug gate read from `RUNNER_DEBUG`, lines to stdout.
    #[must_use]
    pub fn new() -> Self {
        let debug_enabled = std::env::var(RUNNER_DEBUG_VAR).is_ok_and(|v| v == "1");

        Self {
            grouping: true,
            debug_enabled,
            writer: LineWriter::default(),
        }
    }

    #[must_use]
    pub const fn grouping(mut self, enabled: bool) -> Self {
        self.grouping = enabled;
        self
    }

    /// Debug messages always reach this output; this decides whether they are written.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    #[must_use]
    pub fn writer(mut self, target: impl Write + Send + 'static) -> Self {
        self.writer = LineWriter::custom(target);
        self
    }

    #[must_use]
    pub const fn is_grouping(&self) -> bool {
        self.grouping
    }

    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug_enabled
    }

    fn emit(&self, line: &str) -> Result<(), crate::Error> {
        self.writer.write_line(Stream::Stdout, line)?;
        Ok(())
    }
}

impl Output for ActionsOutput {
    fn message(&self, event: &MessageEvent<'_>) -> Result<(), crate::Error> {
        let text = event.render(self.grouping);

        let line = match event.severity {
            Severity::Debug if !self.debug_enabled => return Ok(()),
            Severity::Debug => command("debug", None, &text),
            Severity::Level(Level::Info) => text,
            Severity::Level(Level::Notice) => command("notice", None, &text),
            Severity::Level(Level::Warning) => command("warning", event.properties, &text),
            Severity::Level(Level::Error) => command("error", event.properties, &text),
        };

        self.emit(&line)
    }

    fn update(&self, event: &UpdateEvent<'_>) -> Result<(), crate::Error> {
        if !self.grouping {
            return Ok(());
        }

        match event.kind {
            UpdateKind::GroupStart => self.emit(&command("group", None, &event.group_title())),
            UpdateKind::GroupEnd => self.emit(&command("endgroup", None, "")),
            UpdateKind::ContextStart | UpdateKind::ContextEnd => Ok(()),
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer.flush()?;
        Ok(())
    }
}

/// `::name key=value,key=value::message`
#[must_use]
pub fn command(name: &str, properties: Option<&AnnotationProperties>, message: &str) -> String {
    let mut line = format!("::{name}");

    let pairs = properties.map(property_pairs).unwrap_or_default();
    if !pairs.is_empty() {
        line.push(' ');
        let joined: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", escape_property(value)))
            .collect();
        line.push_str(&joined.join(","));
    }

    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

fn property_pairs(props: &AnnotationProperties) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(title) = &props.title {
        pairs.push(("title", title.clone()));
    }
    if let Some(file) = &props.file {
        pairs.push(("file", file.clone()));
    }
    if let Some(line) = props.start_line {
        pairs.push(("line", line.to_string()));
    }
    if let Some(line) = props.end_line {
        pairs.push(("endLine", line.to_string()));
    }
    if let Some(column) = props.start_column {
        pairs.push(("col", column.to_string()));
    }
    if let Some(column) = props.end_column {
        pairs.push(("endColumn", column.to_string()));
    }
    pairs
}

/// `%` first, otherwise the escapes themselves would be re-escaped.
#[must_use]
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[must_use]
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
