//! grouplog's own diagnostic logger, bootstrapped early so config errors and sink
//! failures are reported through the same engine the crate provides.
//!
//! A `Logger` is single-flow by design, so the diagnostic logger is per thread. Only the
//! first `init` call on a thread takes effect, and calls made before it are dropped.

use crate::config::Config;
use crate::level::Level;
use crate::logger::Logger;
use std::cell::{Cell, OnceCell};

thread_local! {
    static INTERNAL_LOGGER: OnceCell<Logger> = const { OnceCell::new() };
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Fallback initializer that loads config itself, for callers without one.
pub fn init() {
    if is_initialized() {
        return;
    }
    let config = Config::load().unwrap_or_default();
    init_with_config(&config);
}

/// Initializes from an already-loaded config.
pub fn init_with_config(config: &Config) {
    let fresh = INTERNAL_LOGGER.with(|cell| {
        let fresh = cell.get().is_none();
        cell.get_or_init(|| build_internal_logger(config));
        fresh
    });

    if fresh {
        debug("INTERNAL", &format!("Log level: {}", config.general.level));
        if config.json.enabled {
            debug("INTERNAL", &format!("JSON: path={}", config.json.path));
        }
        debug("INTERNAL", "Internal logger ready");
    }
}

#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL_LOGGER.with(|cell| cell.get().is_some())
}

/// Only the outputs the config enables. Terminal diagnostics go to stderr so they never
/// mix with workflow commands on stdout.
fn build_internal_logger(config: &Config) -> Logger {
    let mut builder = Logger::builder().level(config.parse_level());

    if config.terminal.enabled {
        builder = builder
            .terminal()
            .colors(config.terminal.colors)
            .grouping(false)
            .debug(config.terminal.debug)
            .writer(std::io::stderr())
            .done();
    }

    if config.json.enabled {
        builder = builder
            .json()
            .path(&config.json.path)
            .debug(config.json.debug)
            .done();
    }

    builder.build()
}

/// Set while the internal logger is dispatching, so a failure inside one of its own
/// outputs is dropped instead of re-entering it.
struct Dispatching;

impl Dispatching {
    fn enter() -> Option<Self> {
        DISPATCHING.with(|flag| (!flag.replace(true)).then_some(Self))
    }
}

impl Drop for Dispatching {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(false));
    }
}

fn with_logger(f: impl FnOnce(&Logger)) {
    let Some(_dispatching) = Dispatching::enter() else {
        return;
    };
    INTERNAL_LOGGER.with(|cell| {
        if let Some(logger) = cell.get() {
            f(logger);
        }
    });
}

/// The scope is opened as a context, so lines read `[SCOPE] message`.
fn log(level: Level, scope: &str, msg: &str) {
    with_logger(|logger| {
        logger.with_context_sync(scope, || logger.log(level, msg, None));
    });
}

/// Startup and teardown details; kept only by outputs with debug enabled.
pub fn debug(scope: &str, msg: &str) {
    with_logger(|logger| {
        logger.with_context_sync(scope, || logger.debug(msg));
    });
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies such as unknown level names.
pub fn warning(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

/// I/O failures inside sinks.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
