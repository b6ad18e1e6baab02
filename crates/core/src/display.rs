//! Bounded display lists owned by the interpreter.

use crate::command::DrawCommand;

/// Insertion-ordered list that evicts its oldest entry once an append would
/// exceed `capacity`.
#[derive(Clone, Debug)]
pub struct BoundedList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedList<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Appends `item`, returning the entry evicted to stay within capacity.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push(item);
        if self.items.len() > self.capacity {
            Some(self.items.remove(0))
        } else {
            None
        }
    }

    /// Index the next pushed entry will occupy once eviction has run.
    pub fn next_slot(&self) -> usize {
        if self.items.len() >= self.capacity {
            self.capacity.saturating_sub(1)
        } else {
            self.items.len()
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

/// Draw layers keyed by index, kept sorted ascending for back-to-front
/// rendering. At most one entry per index.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    entries: Vec<DrawCommand>,
}

impl DrawList {
    /// Inserts `draw`, returning the entry it replaced on the same index.
    pub fn insert(&mut self, draw: DrawCommand) -> Option<DrawCommand> {
        let index = draw.index();
        let replaced = self
            .entries
            .iter()
            .position(|entry| entry.index() == index)
            .map(|pos| self.entries.remove(pos));
        self.entries.push(draw);
        if self.entries.len() >= 2 {
            self.entries.sort_by_key(DrawCommand::index);
        }
        replaced
    }

    pub fn get(&self, index: i32) -> Option<&DrawCommand> {
        self.entries.iter().find(|entry| entry.index() == index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.entries.iter()
    }
}
