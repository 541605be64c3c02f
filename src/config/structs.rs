//! Configuration struct definitions.

use serde::Deserialize;
use std::collections::HashMap;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Severity threshold (error, warning, notice, info).
    pub level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Workflow-command output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Enable workflow-command output.
    pub enabled: bool,
    /// Render groups as collapsible sections.
    pub grouping: bool,
    /// Force debug lines on; `RUNNER_DEBUG=1` enables them as well.
    pub debug: bool,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grouping: true,
            debug: false,
        }
    }
}

/// Terminal output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Enable terminal output.
    pub enabled: bool,
    /// Enable colors.
    pub colors: bool,
    /// Render groups as headers with indented bodies.
    pub grouping: bool,
    /// Show debug lines.
    pub debug: bool,
    /// Per-severity `#RRGGBB` overrides, keyed by level name or `debug`.
    pub level_colors: HashMap<String, String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colors: true,
            grouping: true,
            debug: false,
            level_colors: HashMap::new(),
        }
    }
}

/// JSONL output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Enable JSONL output.
    pub enabled: bool,
    /// Path of the JSONL file; `~` is expanded.
    pub path: String,
    /// Record debug lines.
    pub debug: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("", "", "grouplog").map_or_else(
            || "grouplog.jsonl".to_string(),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("grouplog.jsonl")
                    .to_string_lossy()
                    .into_owned()
            },
        );

        Self {
            enabled: false,
            path,
            debug: false,
        }
    }
}
