//! TOML configuration loading.
//!
//! Separated from struct definitions so that the loading logic (file I/O, path
//! discovery, string-to-enum parsing) stays independent of the serde schema.

mod structs;

pub use structs::{ActionsConfig, GeneralConfig, JsonConfig, TerminalConfig};

use crate::fmt::Color;
use crate::internal;
use crate::level::{Level, Severity};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A completely empty config file must still produce a working logger; `#[serde(default)]`
/// on every field ensures zero-config works out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// The threshold applies to all outputs, so it lives above any specific backend.
    pub general: GeneralConfig,
    pub actions: ActionsConfig,
    pub terminal: TerminalConfig,
    pub json: JsonConfig,
}

impl Config {
    /// Loads the user's config from the default location, or defaults when it doesn't exist.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_from(&config_path)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Loads configuration from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns error on TOML syntax or type errors.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// XDG-compliant path: `~/.config/grouplog/grouplog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("grouplog").join("grouplog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Strict conversion of `general.level`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLevel`] for unknown level names.
    pub fn level(&self) -> Result<Level, crate::Error> {
        self.general
            .level
            .parse()
            .map_err(|_| crate::Error::InvalidLevel(self.general.level.clone()))
    }

    /// Lenient conversion of `general.level`; unknown names fall back to Info.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.level().unwrap_or_else(|e| {
            internal::warning("CONFIG", &format!("{e}, using info"));
            Level::Info
        })
    }

    /// Terminal colour overrides with unknown keys skipped.
    #[must_use]
    pub fn terminal_level_colors(&self) -> Vec<(Severity, Color)> {
        self.terminal
            .level_colors
            .iter()
            .filter_map(|(name, hex)| {
                let severity = if name.eq_ignore_ascii_case("debug") {
                    Severity::Debug
                } else {
                    Severity::Level(name.parse().ok()?)
                };
                Some((severity, Color::from_hex(hex)))
            })
            .collect()
    }
}
