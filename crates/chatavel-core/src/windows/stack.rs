//! Immutable window stack snapshots.

use super::types::{WindowRecord, WindowSpec};

/// An ordered, immutable snapshot of every logical window.
///
/// Order is insertion order: re-opening an existing id keeps its slot, new
/// ids are appended. The `with_*` transitions never touch `self`; they build
/// the next snapshot, or return `None` when the operation would be a no-op.
#[derive(Debug, PartialEq)]
pub struct WindowStack<C> {
    records: Vec<WindowRecord<C>>,
}

impl<C> Clone for WindowStack<C> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<C> Default for WindowStack<C> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<C> WindowStack<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &WindowRecord<C>> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord<C>> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Windows currently shown on the surface, in stacking order.
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &WindowRecord<C>> {
        self.records.iter().filter(|r| !r.is_minimized())
    }

    /// Windows parked on the taskbar, in stacking order.
    pub fn minimized(&self) -> impl DoubleEndedIterator<Item = &WindowRecord<C>> {
        self.records.iter().filter(|r| r.is_minimized())
    }

    pub fn has_visible(&self) -> bool {
        self.visible().next().is_some()
    }

    /// Upsert `spec`.
    ///
    /// An existing id has all of its fields replaced and is un-minimized in
    /// place. An unknown id is appended. Returns the next snapshot and
    /// whether the window was newly created.
    pub fn with_opened(&self, spec: WindowSpec<C>) -> (Self, bool) {
        let mut records = self.records.clone();
        let record = WindowRecord::from_spec(spec);
        match self.position(record.id().as_str()) {
            Some(index) => {
                records[index] = record;
                (Self { records }, false)
            }
            None => {
                records.push(record);
                (Self { records }, true)
            }
        }
    }

    /// Remove the window with `id`.
    pub fn with_closed(&self, id: &str) -> Option<Self> {
        self.position(id)?;
        let records = self
            .records
            .iter()
            .filter(|r| r.id() != id)
            .cloned()
            .collect();
        Some(Self { records })
    }

    /// Mark `id` as minimized. `None` if absent or already minimized.
    pub fn with_minimized(&self, id: &str) -> Option<Self> {
        self.with_flag(id, true)
    }

    /// Mark `id` as visible again. `None` if absent or already visible.
    pub fn with_restored(&self, id: &str) -> Option<Self> {
        self.with_flag(id, false)
    }

    /// Empty snapshot. `None` if already empty.
    pub fn with_cleared(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(Self::default())
        }
    }

    fn with_flag(&self, id: &str, is_minimized: bool) -> Option<Self> {
        let index = self.position(id)?;
        if self.records[index].is_minimized() == is_minimized {
            return None;
        }
        let mut records = self.records.clone();
        records[index] = records[index].with_minimized(is_minimized);
        Some(Self { records })
    }
}
