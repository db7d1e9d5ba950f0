//! Row selection that survives page, sort and filter changes.

use std::collections::HashMap;

use crate::model::RowId;

/// Flags driving the page's "select all" checkbox and group actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    /// Every row on the page is selected (and the page is non-empty).
    pub all_visible_selected: bool,
    /// Some, but not all, rows on the page are selected.
    pub indeterminate: bool,
    /// Selected rows across the whole collection.
    pub selected_count: usize,
}

/// Identifier → selected flag for every row of the loaded collection.
///
/// Ids not present at the last [`reseed`](Self::reseed) are ignored by every
/// operation.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    order: Vec<RowId>,
    flags: HashMap<RowId, bool>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the map with one unselected entry per id.
    pub fn reseed<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        self.order.clear();
        self.flags.clear();
        for id in ids {
            if self.flags.insert(id.clone(), false).is_none() {
                self.order.push(id.clone());
            }
        }
    }

    /// Sets one entry.
    pub fn toggle(&mut self, id: &RowId, selected: bool) {
        if let Some(flag) = self.flags.get_mut(id) {
            *flag = selected;
        }
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Selects every listed id, leaving the rest untouched.
    pub fn select_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a RowId>) {
        for id in visible {
            self.toggle(id, true);
        }
    }

    /// Deselects the listed ids only.
    pub fn clear_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a RowId>) {
        for id in visible {
            self.toggle(id, false);
        }
    }

    /// Deselects everything.
    pub fn clear_all(&mut self) {
        for flag in self.flags.values_mut() {
            *flag = false;
        }
    }

    /// Counts selected rows across the whole collection.
    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|selected| **selected).count()
    }

    /// Selected ids in collection order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.order
            .iter()
            .filter(|id| self.is_selected(id))
            .cloned()
            .collect()
    }

    pub fn is_all_visible_selected(&self, visible: &[RowId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.is_selected(id))
    }

    pub fn is_indeterminate(&self, visible: &[RowId]) -> bool {
        visible.iter().any(|id| self.is_selected(id)) && !self.is_all_visible_selected(visible)
    }

    pub fn flags(&self, visible: &[RowId]) -> SelectionFlags {
        SelectionFlags {
            all_visible_selected: self.is_all_visible_selected(visible),
            indeterminate: self.is_indeterminate(visible),
            selected_count: self.selected_count(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
