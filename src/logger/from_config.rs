//! Logger construction from grouplog config files.

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::internal;

impl Logger {
    /// Creates a logger from the default config file (`~/.config/grouplog/grouplog.toml`),
    /// falling back to defaults when it is missing or unreadable.
    #[must_use]
    pub fn from_default_config() -> Self {
        internal::debug("LOGGER", "Building logger from config");
        let config = Config::load().unwrap_or_else(|e| {
            internal::warning("CONFIG", &format!("Error loading config: {e}"));
            Config::default()
        });
        Self::from_config(&config)
    }

    /// Creates a logger with the outputs enabled in `config`, in the order
    /// actions, terminal, json.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let level = config.parse_level();
        internal::debug("LOGGER", &format!("Log level: {level}"));

        let mut builder = LoggerBuilder::new().level(level);
        let mut outputs: Vec<&str> = Vec::new();

        if config.actions.enabled {
            builder = Self::configure_actions(builder, config);
            outputs.push("actions");
        }

        if config.terminal.enabled {
            builder = Self::configure_terminal(builder, config);
            outputs.push("terminal");
        }

        if config.json.enabled {
            builder = Self::configure_json(builder, config);
            outputs.push("json");
        }

        if outputs.is_empty() {
            internal::warning("LOGGER", "No outputs enabled");
        } else {
            internal::debug(
                "LOGGER",
                &format!("Outputs enabled: [{}]", outputs.join(", ")),
            );
        }

        builder.build()
    }

    fn configure_actions(builder: LoggerBuilder, config: &Config) -> LoggerBuilder {
        internal::debug(
            "ACTIONS",
            &format!("Grouping: {}", enabled_str(config.actions.grouping)),
        );

        let actions = builder.actions().grouping(config.actions.grouping);

        // Without an explicit opt-in the output keeps its RUNNER_DEBUG detection
        if config.actions.debug {
            actions.debug(true).done()
        } else {
            actions.done()
        }
    }

    fn configure_terminal(builder: LoggerBuilder, config: &Config) -> LoggerBuilder {
        internal::debug(
            "TERMINAL",
            &format!("Colors: {}", enabled_str(config.terminal.colors)),
        );

        let mut terminal = builder
            .terminal()
            .colors(config.terminal.colors)
            .grouping(config.terminal.grouping)
            .debug(config.terminal.debug);

        for (severity, color) in config.terminal_level_colors() {
            terminal = terminal.level_color(severity, color);
        }

        terminal.done()
    }

    fn configure_json(builder: LoggerBuilder, config: &Config) -> LoggerBuilder {
        internal::debug("JSON", &format!("Path: {}", config.json.path));

        builder
            .json()
            .path(&config.json.path)
            .debug(config.json.debug)
            .done()
    }
}

const fn enabled_str(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
