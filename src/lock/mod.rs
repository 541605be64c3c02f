//! Stack depths pinned by in-progress scoped operations.
//!
//! A scoped context records the index of its own entry when it starts. Until it
//! finishes, unscoped `end_context` calls may not pop that entry or anything
//! below it. Groups have a single lock since only one group is ever open.
//!
//! Every lock is identified by a [`LockId`] so that only its owner can release it,
//! whatever order the owners finish in.

/// Handle to one lock, returned when it is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pin {
    id: LockId,
    depth: usize,
}

/// Live pins are kept in ascending depth order: a new pin is always taken on the
/// top entry, and removals never reorder the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockTracker {
    pins: Vec<Pin>,
    group: Option<LockId>,
    next_id: u64,
}

impl LockTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            group: None,
            next_id: 0,
        }
    }

    fn fresh_id(&mut self) -> LockId {
        let id = LockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Pins the entry at `depth`.
    pub fn lock(&mut self, depth: usize) -> LockId {
        let id = self.fresh_id();
        self.pins.push(Pin { id, depth });
        id
    }

    /// Releases the pin taken under `id` and returns the depth it currently guards.
    /// `None` when the pin is gone, either released already or discarded together
    /// with its entry.
    pub fn release(&mut self, id: LockId) -> Option<usize> {
        let index = self.pins.iter().position(|pin| pin.id == id)?;
        Some(self.pins.remove(index).depth)
    }

    /// The most recent pin, which is the one that bounds `end_context`.
    #[must_use]
    pub fn innermost(&self) -> Option<usize> {
        self.pins.last().map(|pin| pin.depth)
    }

    /// The lowest pinned depth strictly above `depth`.
    #[must_use]
    pub fn next_above(&self, depth: usize) -> Option<usize> {
        self.pins
            .iter()
            .map(|pin| pin.depth)
            .find(|&pinned| pinned > depth)
    }

    /// Moves pins above `depth` down by `count` after entries below them were removed.
    pub fn shift_down(&mut self, depth: usize, count: usize) {
        for pin in &mut self.pins {
            if pin.depth > depth {
                pin.depth -= count;
            }
        }
    }

    /// Drops every pin at or above `len`; their entries were truncated away.
    pub fn discard_from(&mut self, len: usize) {
        self.pins.retain(|pin| pin.depth < len);
    }

    /// Number of scoped contexts currently running.
    #[must_use]
    pub fn depth_count(&self) -> usize {
        self.pins.len()
    }

    /// Whether the entry at `top_index` lies strictly above the innermost pin.
    #[must_use]
    pub fn permits_pop(&self, top_index: usize) -> bool {
        self.innermost().is_none_or(|locked| top_index > locked)
    }

    #[must_use]
    pub const fn group_locked(&self) -> bool {
        self.group.is_some()
    }

    /// Takes the group lock. `None` if it is already held.
    pub fn lock_group(&mut self) -> Option<LockId> {
        if self.group.is_some() {
            return None;
        }
        let id = self.fresh_id();
        self.group = Some(id);
        Some(id)
    }

    /// Releases the group lock if `id` still holds it.
    pub fn unlock_group(&mut self, id: LockId) -> bool {
        if self.group == Some(id) {
            self.group = None;
            return true;
        }
        false
    }

    /// Forgets the group lock; its group was discarded from the stack.
    pub fn clear_group(&mut self) {
        self.group = None;
    }
}
