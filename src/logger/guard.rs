//! Drop guards behind the scoped helpers. Cleanup lives in `Drop` so it runs on normal
//! return, early `?` returns, panics, and futures dropped mid-flight alike.

use super::Logger;
use crate::lock::LockId;

/// Keeps a locked context open. Dropping it discards the unclosed scopes opened
/// after the context (up to the next context still locked by another guard) and
/// then closes the context itself. Guards may be dropped in any order.
#[must_use = "the context closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ContextGuard<'a> {
    logger: &'a Logger,
    id: LockId,
}

impl<'a> ContextGuard<'a> {
    pub(super) const fn new(logger: &'a Logger, id: LockId) -> Self {
        Self { logger, id }
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.logger.release_context(self.id);
    }
}

/// Keeps a locked group open. Inert when it was created inside another locked group.
#[must_use = "the group closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GroupGuard<'a> {
    owner: Option<(&'a Logger, LockId)>,
}

impl<'a> GroupGuard<'a> {
    pub(super) const fn new(logger: &'a Logger, id: LockId) -> Self {
        Self {
            owner: Some((logger, id)),
        }
    }

    pub(super) const fn inert() -> Self {
        Self { owner: None }
    }

    /// Whether this guard opened a group (false for nested calls).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.owner.is_some()
    }
}

impl Drop for GroupGuard<'_> {
    fn drop(&mut self) {
        if let Some((logger, id)) = self.owner {
            logger.release_group(id);
        }
    }
}
