//! The ordered list of open contexts and groups.
//!
//! Entries are pushed and popped at the tail, with one exception: opening or
//! closing a group truncates the stack at the group's position, discarding
//! everything opened after it.

/// One open scope. Contexts only prefix messages; groups also mark a collapsible section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub label: String,
    pub is_group: bool,
}

impl ScopeEntry {
    #[must_use]
    pub fn context(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_group: false,
        }
    }

    #[must_use]
    pub fn group(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_group: true,
        }
    }
}

/// Scope entries plus the position of the single active group.
///
/// Invariant: `active_group`, when set, indexes a group entry inside `entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStack {
    entries: Vec<ScopeEntry>,
    active_group: Option<usize>,
}

impl ScopeStack {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            active_group: None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn active_group(&self) -> Option<usize> {
        self.active_group
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the newest entry.
    #[must_use]
    pub fn top_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    #[must_use]
    pub fn top(&self) -> Option<&ScopeEntry> {
        self.entries.last()
    }

    pub fn push_context(&mut self, label: impl Into<String>) {
        self.entries.push(ScopeEntry::context(label));
    }

    /// Installs a new group, first discarding the previous group and everything after it.
    /// Returns the new group's index.
    pub fn push_group(&mut self, label: impl Into<String>) -> usize {
        if let Some(index) = self.active_group {
            self.entries.truncate(index);
        }

        self.entries.push(ScopeEntry::group(label));
        let index = self.entries.len() - 1;
        self.active_group = Some(index);
        index
    }

    /// Removes the top entry unless the stack is empty or the top is a group.
    pub fn pop_context(&mut self) -> Option<ScopeEntry> {
        if self.top()?.is_group {
            return None;
        }
        self.entries.pop()
    }

    /// Truncates at the active group. Returns `false` when no group is open.
    pub fn pop_group(&mut self) -> bool {
        let Some(index) = self.active_group.take() else {
            return false;
        };
        self.entries.truncate(index);
        true
    }

    /// Shortens the stack to `len` entries. Returns `true` if the active group was cut off.
    pub fn truncate(&mut self, len: usize) -> bool {
        self.remove_range(len, self.entries.len())
    }

    /// Removes the entries in `start..end`, shifting the active group down if it sat
    /// above them. Returns `true` if the active group itself was removed.
    pub fn remove_range(&mut self, start: usize, end: usize) -> bool {
        let end = end.min(self.entries.len());
        if start >= end {
            return false;
        }
        self.entries.drain(start..end);

        match self.active_group {
            Some(index) if (start..end).contains(&index) => {
                self.active_group = None;
                true
            }
            Some(index) if index >= end => {
                self.active_group = Some(index - (end - start));
                false
            }
            _ => false,
        }
    }
}
