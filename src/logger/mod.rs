//! The engine: owns the scope stack and lock tracker, filters by severity, and fans
//! every event out to all configured outputs in registration order.

mod builder;
mod from_config;
mod guard;
mod json_builder;

pub use builder::{ActionsBuilder, LoggerBuilder, TerminalBuilder};
pub use guard::{ContextGuard, GroupGuard};
pub use json_builder::JsonBuilder;

use crate::internal;
use crate::level::{Level, Severity};
use crate::lock::{LockId, LockTracker};
use crate::output::{
    AnnotationProperties, MessageEvent, Output, Payload, UpdateEvent, UpdateKind,
};
use crate::scope::{ScopeEntry, ScopeStack};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;

#[derive(Debug, Default)]
struct State {
    scopes: ScopeStack,
    locks: LockTracker,
}

/// Nested-scope logger.
///
/// Scope state lives in a `RefCell`: a logger is driven by one logical call stack at a
/// time and is deliberately not `Sync`. Closing calls that don't apply (nothing open,
/// a group on top, a locked boundary) are silent no-ops.
pub struct Logger {
    threshold: Level,
    outputs: Vec<Box<dyn Output>>,
    state: RefCell<State>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info, Vec::new())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("outputs", &self.outputs.len())
            .field("state", &self.state)
            .finish()
    }
}

impl Logger {
    #[must_use]
    pub fn new(threshold: Level, outputs: Vec<Box<dyn Output>>) -> Self {
        Self {
            threshold,
            outputs,
            state: RefCell::new(State::default()),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ---- scopes ----

    pub fn start_context(&self, label: &str) {
        self.state.borrow_mut().scopes.push_context(label);
        self.notify(UpdateKind::ContextStart, Some(label));
    }

    /// Opens a group, replacing any group that is already open (and everything opened
    /// after it). Ignored while a scoped group is running.
    pub fn start_group(&self, label: &str) {
        {
            let mut state = self.state.borrow_mut();
            if state.locks.group_locked() {
                return;
            }
            if let Some(index) = state.scopes.active_group() {
                state.locks.discard_from(index);
            }
            state.scopes.push_group(label);
        }
        self.notify(UpdateKind::GroupStart, Some(label));
    }

    /// Closes the newest context. Never closes a group and never crosses a locked depth.
    pub fn end_context(&self) {
        {
            let mut state = self.state.borrow_mut();
            let Some(top) = state.scopes.top_index() else {
                return;
            };
            if !state.locks.permits_pop(top) {
                return;
            }
            if state.scopes.pop_context().is_none() {
                return;
            }
        }
        self.notify(UpdateKind::ContextEnd, None);
    }

    /// Closes the open group along with everything opened inside it.
    pub fn end_group(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.locks.group_locked() {
                return;
            }
            if let Some(index) = state.scopes.active_group() {
                state.locks.discard_from(index);
            }
            if !state.scopes.pop_group() {
                return;
            }
        }
        self.notify(UpdateKind::GroupEnd, None);
    }

    // ---- scoped execution ----

    /// Opens a context that stays open until the returned guard drops. Anything opened
    /// after it and still open at that point is discarded with it, except scopes held
    /// by other guards.
    pub fn lock_context(&self, label: &str) -> ContextGuard<'_> {
        self.start_context(label);
        let id = {
            let mut state = self.state.borrow_mut();
            let depth = state.scopes.len().saturating_sub(1);
            state.locks.lock(depth)
        };
        ContextGuard::new(self, id)
    }

    /// Opens a group that stays open until the returned guard drops. If a scoped group is
    /// already running, no group is opened and the guard does nothing.
    pub fn lock_group(&self, label: &str) -> GroupGuard<'_> {
        if self.state.borrow().locks.group_locked() {
            return GroupGuard::inert();
        }

        self.start_group(label);
        match self.state.borrow_mut().locks.lock_group() {
            Some(id) => GroupGuard::new(self, id),
            None => GroupGuard::inert(),
        }
    }

    /// Runs `work` inside a locked context. The result is returned unchanged; cleanup
    /// also runs if `work` panics.
    pub fn with_context_sync<T>(&self, label: &str, work: impl FnOnce() -> T) -> T {
        let _guard = self.lock_context(label);
        work()
    }

    /// Async form of [`Logger::with_context_sync`]. Cleanup runs once the future settles,
    /// or when it is dropped before completion.
    #[allow(clippy::future_not_send)]
    pub async fn with_context<F, Fut, T>(&self, label: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _guard = self.lock_context(label);
        work().await
    }

    /// Runs `work` inside a locked group. Nested calls run their work without opening
    /// a group of their own.
    pub fn with_group_sync<T>(&self, label: &str, work: impl FnOnce() -> T) -> T {
        let _guard = self.lock_group(label);
        work()
    }

    /// Async form of [`Logger::with_group_sync`].
    #[allow(clippy::future_not_send)]
    pub async fn with_group<F, Fut, T>(&self, label: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _guard = self.lock_group(label);
        work().await
    }

    /// Guard teardown for [`ContextGuard`].
    ///
    /// Removes the guard's own entry and the unclosed entries above it, stopping
    /// below the next entry pinned by another guard. Nothing happens if the entry
    /// was already discarded by a group truncation.
    fn release_context(&self, id: LockId) {
        let group_cut = {
            let mut state = self.state.borrow_mut();
            let State { scopes, locks } = &mut *state;
            let Some(depth) = locks.release(id) else {
                return;
            };
            let end = locks.next_above(depth).unwrap_or_else(|| scopes.len());

            let group_cut = scopes.remove_range(depth, end);
            locks.shift_down(depth, end - depth);
            // Only one group is ever open, so a held group lock belonged to it
            if group_cut {
                locks.clear_group();
            }
            group_cut
        };

        if group_cut {
            self.notify(UpdateKind::GroupEnd, None);
        }
        self.notify(UpdateKind::ContextEnd, None);
    }

    /// Guard teardown for [`GroupGuard`]. A lock cleared by a context release no
    /// longer owns the open group, so it closes nothing.
    fn release_group(&self, id: LockId) {
        let owned = self.state.borrow_mut().locks.unlock_group(id);
        if owned {
            self.end_group();
        }
    }

    // ---- messages ----

    /// Core dispatch: drops messages less severe than the threshold, forwards the rest
    /// to every output.
    pub fn log<'a>(
        &self,
        level: Level,
        message: impl Into<Payload<'a>>,
        properties: Option<&AnnotationProperties>,
    ) {
        if !level.passes(self.threshold) {
            return;
        }
        self.dispatch(Severity::Level(level), message.into(), properties);
    }

    pub fn error<'a>(&self, message: impl Into<Payload<'a>>) {
        self.log(Level::Error, message, None);
    }

    /// Error with an annotation (title, file, line range).
    pub fn error_with<'a>(
        &self,
        message: impl Into<Payload<'a>>,
        properties: &AnnotationProperties,
    ) {
        self.log(Level::Error, message, Some(properties));
    }

    pub fn warning<'a>(&self, message: impl Into<Payload<'a>>) {
        self.log(Level::Warning, message, None);
    }

    pub fn warning_with<'a>(
        &self,
        message: impl Into<Payload<'a>>,
        properties: &AnnotationProperties,
    ) {
        self.log(Level::Warning, message, Some(properties));
    }

    pub fn notice(&self, message: &str) {
        self.log(Level::Notice, message, None);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, None);
    }

    /// Always forwarded regardless of threshold; each output applies its own debug gate.
    pub fn debug(&self, message: &str) {
        self.dispatch(Severity::Debug, Payload::Text(message), None);
    }

    fn dispatch(
        &self,
        severity: Severity,
        payload: Payload<'_>,
        properties: Option<&AnnotationProperties>,
    ) {
        let state = self.state.borrow();
        let event = MessageEvent {
            scopes: state.scopes.entries(),
            active_group: state.scopes.active_group(),
            severity,
            payload,
            properties,
        };

        for output in &self.outputs {
            if let Err(e) = output.message(&event) {
                internal::error("OUTPUT", &format!("Failed to write message: {e}"));
            }
        }
    }

    fn notify(&self, kind: UpdateKind, label: Option<&str>) {
        let state = self.state.borrow();
        let event = UpdateEvent {
            scopes: state.scopes.entries(),
            active_group: state.scopes.active_group(),
            kind,
            label,
        };

        for output in &self.outputs {
            if let Err(e) = output.update(&event) {
                internal::error("OUTPUT", &format!("Failed to write {}: {e}", kind.as_str()));
            }
        }
    }

    // ---- introspection ----

    /// Flushes every output.
    ///
    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn threshold(&self) -> Level {
        self.threshold
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Copy of the currently open scopes, oldest first.
    #[must_use]
    pub fn scopes(&self) -> Vec<ScopeEntry> {
        self.state.borrow().scopes.entries().to_vec()
    }

    #[must_use]
    pub fn active_group(&self) -> Option<usize> {
        self.state.borrow().scopes.active_group()
    }

    #[must_use]
    pub fn is_group_locked(&self) -> bool {
        self.state.borrow().locks.group_locked()
    }

    /// Number of scoped contexts currently running.
    #[must_use]
    pub fn locked_depths(&self) -> usize {
        self.state.borrow().locks.depth_count()
    }
}
