//! Plain log lines can't be queried after the fact. JSONL keeps every message and group
//! boundary as one structured object per line, with the scope labels as an array.

use super::{AnnotationProperties, MessageEvent, Output, UpdateEvent, UpdateKind};
use crate::internal;
use crate::scope::ScopeEntry;

use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use ulid::Ulid;

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    /// Time-sortable and unique across writers.
    id: String,
    ts: String,
    /// `message`, `group-start` or `group-end`.
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'static str>,
    scopes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a AnnotationProperties>,
}

impl<'a> JsonEntry<'a> {
    fn new(kind: &'static str, scopes: &'a [ScopeEntry], active_group: Option<usize>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            ts: Local::now().to_rfc3339(),
            kind,
            level: None,
            scopes: scopes.iter().map(|entry| entry.label.as_str()).collect(),
            group: active_group
                .and_then(|index| scopes.get(index))
                .map(|entry| entry.label.as_str()),
            msg: None,
            properties: None,
        }
    }
}

/// Append-only JSONL file.
#[derive(Debug, Clone)]
pub struct JsonOutput {
    file_path: PathBuf,
    debug_enabled: bool,
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonOutput {
    /// Defaults to the XDG state directory.
    #[must_use]
    pub fn new() -> Self {
        let file_path = directories::ProjectDirs::from("", "", "grouplog").map_or_else(
            || PathBuf::from("grouplog.jsonl"),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("grouplog.jsonl")
            },
        );

        Self {
            file_path,
            debug_enabled: false,
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Debug messages are skipped unless enabled.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Config values may use `~`; the OS needs an absolute path.
    fn resolve_path(&self) -> PathBuf {
        let path_str = self.file_path.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.as_ref())
    }

    fn append(&self, entry: &JsonEntry<'_>) -> Result<(), crate::Error> {
        let path = self.resolve_path();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
            internal::debug("JSON", &format!("Created directory: {}", parent.display()));
        }

        let json = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{json}")?;

        Ok(())
    }
}

impl Output for JsonOutput {
    fn message(&self, event: &MessageEvent<'_>) -> Result<(), crate::Error> {
        if event.severity.is_debug() && !self.debug_enabled {
            return Ok(());
        }

        let mut entry = JsonEntry::new("message", event.scopes, event.active_group);
        entry.level = Some(event.severity.as_str());
        entry.msg = Some(event.payload.to_string());
        entry.properties = event.properties;

        self.append(&entry)
    }

    fn update(&self, event: &UpdateEvent<'_>) -> Result<(), crate::Error> {
        // Context changes are already visible in each message's `scopes`
        let mut entry = match event.kind {
            UpdateKind::GroupStart | UpdateKind::GroupEnd => {
                JsonEntry::new(event.kind.as_str(), event.scopes, event.active_group)
            }
            UpdateKind::ContextStart | UpdateKind::ContextEnd => return Ok(()),
        };
        entry.msg = event.label.map(ToString::to_string);

        self.append(&entry)
    }
}
