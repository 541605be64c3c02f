//! Terminal is the most common output for local runs: immediate coloured feedback on
//! stdout/stderr without any CI runner parsing the lines.

use super::writer::{LineWriter, Stream};
use super::{MessageEvent, Output, UpdateEvent, UpdateKind};
use crate::fmt::{Color, colorize};
use crate::level::{Level, Severity};
use std::collections::HashMap;
use std::io::Write;

/// Width of the severity tag column, sized for `WARNING`.
const TAG_WIDTH: usize = 7;

/// Human-oriented output.
///
/// With grouping enabled a group opens with a `▸ title` header and the lines inside it
/// are indented; without it, groups are prefixed like contexts.
#[derive(Debug)]
pub struct TerminalOutput {
    colors_enabled: bool,
    grouping: bool,
    debug_enabled: bool,
    /// Overrides for the default palette.
    level_colors: HashMap<Severity, Color>,
    writer: LineWriter,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors_enabled: true,
            grouping: true,
            debug_enabled: false,
            level_colors: HashMap::new(),
            writer: LineWriter::default(),
        }
    }

    /// Piped output and color-incapable terminals break on ANSI escape codes.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn grouping(mut self, enabled: bool) -> Self {
        self.grouping = enabled;
        self
    }

    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Default level colors may clash with the user's terminal theme.
    #[must_use]
    pub fn level_color(mut self, severity: impl Into<Severity>, color: Color) -> Self {
        self.level_colors.insert(severity.into(), color);
        self
    }

    /// Sends every line to `target` instead of splitting between stdout and stderr.
    #[must_use]
    pub fn writer(mut self, target: impl Write + Send + 'static) -> Self {
        self.writer = LineWriter::custom(target);
        self
    }

    fn color_for(&self, severity: Severity) -> Color {
        self.level_colors
            .get(&severity)
            .copied()
            .unwrap_or_else(|| Color::for_severity(severity))
    }

    fn format_message(&self, event: &MessageEvent<'_>) -> String {
        let tag = format!(
            "{:<width$}",
            event.severity.as_str().to_uppercase(),
            width = TAG_WIDTH
        );
        let tag = if self.colors_enabled {
            colorize(&tag, self.color_for(event.severity))
        } else {
            tag
        };

        let indent = if self.grouping && event.active_group.is_some() {
            "  "
        } else {
            ""
        };

        format!("{indent}{tag} {}", event.render(self.grouping))
    }

    fn format_group_header(&self, title: &str) -> String {
        if self.colors_enabled {
            format!("{}▸ {title}{}", Color::BOLD, Color::RESET)
        } else {
            format!("▸ {title}")
        }
    }
}

impl Output for TerminalOutput {
    fn message(&self, event: &MessageEvent<'_>) -> Result<(), crate::Error> {
        if event.severity.is_debug() && !self.debug_enabled {
            return Ok(());
        }

        let line = self.format_message(event);

        // Warning and Error go to stderr, others to stdout
        let stream = match event.severity {
            Severity::Level(Level::Error | Level::Warning) => Stream::Stderr,
            _ => Stream::Stdout,
        };
        self.writer.write_line(stream, &line)?;
        Ok(())
    }

    fn update(&self, event: &UpdateEvent<'_>) -> Result<(), crate::Error> {
        if self.grouping && event.kind == UpdateKind::GroupStart {
            let header = self.format_group_header(&event.group_title());
            self.writer.write_line(Stream::Stdout, &header)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer.flush()?;
        Ok(())
    }
}
