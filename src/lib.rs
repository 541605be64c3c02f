//! `grouplog` - nested-scope logging with contexts, collapsible groups and scoped locking.
//!
//! Callers open named *contexts* (which prefix every line as `[label] `) and *groups*
//! (collapsible sections, one at a time), log at one of four severities, and close
//! scopes explicitly or by running work inside a locked scope that cleans up after
//! itself. Events are handed to pluggable outputs:
//! - workflow commands for CI runners (`::group::`, `::error file=..::`)
//! - coloured terminal output
//! - JSONL files
//!
//! # Example
//!
//! ```
//! use grouplog::{Level, Logger};
//!
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .actions()
//!         .grouping(true)
//!         .done()
//!     .build();
//!
//! logger.info("starting");
//! logger.with_group_sync("build", || {
//!     logger.with_context_sync("compile", || {
//!         logger.info("compiling sources");
//!         logger.warning("unused import");
//!     });
//! });
//! logger.notice("done");
//! ```

pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod lock;
pub mod logger;
pub mod output;
pub mod scope;

pub use config::Config;
pub use error::Error;
pub use fmt::Color;
pub use level::{Level, Severity};
pub use lock::{LockId, LockTracker};
pub use logger::{ContextGuard, GroupGuard, Logger, LoggerBuilder};
pub use output::{
    ActionsOutput, AnnotationProperties, JsonOutput, MessageEvent, Output, Payload,
    TerminalOutput, UpdateEvent, UpdateKind,
};
pub use scope::{ScopeEntry, ScopeStack};
