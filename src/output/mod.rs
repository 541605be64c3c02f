//! The engine never renders anything itself. It hands structured events to every
//! registered `Output`, which decides how (and whether) to show them.

mod actions;
mod json;
mod terminal;
mod writer;

pub use actions::{ActionsOutput, command, escape_data, escape_property};
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::fmt;
use crate::level::Severity;
use crate::scope::ScopeEntry;
use serde::Serialize;

/// What a message carries: plain text, or an error value rendered through its `Display`.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Text(&'a str),
    Error(&'a dyn std::error::Error),
}

impl std::fmt::Display for Payload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Error(err) => write!(f, "{err}"),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a dyn std::error::Error> for Payload<'a> {
    fn from(err: &'a dyn std::error::Error) -> Self {
        Self::Error(err)
    }
}

/// Source location and title attached to error and warning annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
}

impl AnnotationProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub const fn start_line(mut self, line: u32) -> Self {
        self.start_line = Some(line);
        self
    }

    #[must_use]
    pub const fn end_line(mut self, line: u32) -> Self {
        self.end_line = Some(line);
        self
    }

    #[must_use]
    pub const fn start_column(mut self, column: u32) -> Self {
        self.start_column = Some(column);
        self
    }

    #[must_use]
    pub const fn end_column(mut self, column: u32) -> Self {
        self.end_column = Some(column);
        self
    }

    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.file.is_none()
            && self.start_line.is_none()
            && self.end_line.is_none()
            && self.start_column.is_none()
            && self.end_column.is_none()
    }
}

/// One log line, with a snapshot of the scopes that were open when it was emitted.
#[derive(Debug, Clone, Copy)]
pub struct MessageEvent<'a> {
    pub scopes: &'a [ScopeEntry],
    pub active_group: Option<usize>,
    pub severity: Severity,
    pub payload: Payload<'a>,
    pub properties: Option<&'a AnnotationProperties>,
}

impl MessageEvent<'_> {
    /// The `[label] ` prefix for this message; see [`fmt::prefix`].
    #[must_use]
    pub fn prefix(&self, grouping: bool) -> String {
        fmt::prefix(self.scopes, self.active_group, grouping)
    }

    /// Prefix and payload joined into the final line text.
    #[must_use]
    pub fn render(&self, grouping: bool) -> String {
        fmt::line(&self.prefix(grouping), self.payload)
    }
}

/// Which scope change an [`UpdateEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    ContextStart,
    GroupStart,
    ContextEnd,
    GroupEnd,
}

impl UpdateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContextStart => "context-start",
            Self::GroupStart => "group-start",
            Self::ContextEnd => "context-end",
            Self::GroupEnd => "group-end",
        }
    }
}

/// A scope change. `scopes` is the stack *after* the change; `label` is set on start events.
#[derive(Debug, Clone, Copy)]
pub struct UpdateEvent<'a> {
    pub scopes: &'a [ScopeEntry],
    pub active_group: Option<usize>,
    pub kind: UpdateKind,
    pub label: Option<&'a str>,
}

impl UpdateEvent<'_> {
    /// Title a grouping sink shows on its group-begin marker; see [`fmt::group_title`].
    #[must_use]
    pub fn group_title(&self) -> String {
        fmt::group_title(self.scopes, self.label.unwrap_or_default())
    }
}

/// A rendering backend. Implementations receive every event in dispatch order.
///
/// `Send + Sync` so sinks can be shared with other parts of an application, even though
/// a single `Logger` is driven from one logical call stack.
pub trait Output: Send + Sync {
    /// Renders one log line.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn message(&self, event: &MessageEvent<'_>) -> Result<(), crate::Error>;

    /// Reacts to a scope change. Sinks that derive prefixes from `MessageEvent::scopes`
    /// can ignore context events entirely.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn update(&self, event: &UpdateEvent<'_>) -> Result<(), crate::Error>;

    /// Buffered backends may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
