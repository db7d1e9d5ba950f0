//! Column visibility

use std::collections::HashMap;

use crate::model::ID_FIELD;
use crate::model::Row;

/// Field name → visible flag for every non-identifier column.
///
/// The identifier column is always shown and cannot be toggled. Visibility is
/// cosmetic: it never changes what the filter, sort or pagination stages see.
#[derive(Debug, Clone, Default)]
pub struct ColumnVisibilityTracker {
    order: Vec<String>,
    visible: HashMap<String, bool>,
}

impl ColumnVisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the map with one visible entry per field.
    pub fn reseed<S: AsRef<str>>(&mut self, fields: impl IntoIterator<Item = S>) {
        self.order.clear();
        self.visible.clear();
        for field in fields {
            let field = field.as_ref();
            if field == ID_FIELD || self.visible.contains_key(field) {
                continue;
            }
            self.visible.insert(field.to_string(), true);
            self.order.push(field.to_string());
        }
    }

    /// Reseeds from the union of the rows' field names, in first-seen order.
    pub fn reseed_from_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        let fields: Vec<&str> = rows.into_iter().flat_map(|row| row.field_names()).collect();
        self.reseed(fields);
    }

    /// Sets one column. Unknown fields and the identifier are ignored.
    pub fn toggle(&mut self, field: &str, visible: bool) {
        if let Some(flag) = self.visible.get_mut(field) {
            *flag = visible;
        }
    }

    pub fn is_visible(&self, field: &str) -> bool {
        field == ID_FIELD || self.visible.get(field).copied().unwrap_or(false)
    }

    pub fn show_all(&mut self) {
        for flag in self.visible.values_mut() {
            *flag = true;
        }
    }

    pub fn hide_all_except_identifier(&mut self) {
        for flag in self.visible.values_mut() {
            *flag = false;
        }
    }

    /// Columns to render: the identifier first, then visible fields in order.
    pub fn visible_fields(&self) -> Vec<&str> {
        std::iter::once(ID_FIELD)
            .chain(
                self.order
                    .iter()
                    .map(String::as_str)
                    .filter(|field| self.is_visible(field)),
            )
            .collect()
    }

    /// Every toggleable field, visible or not.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ColumnVisibilityTracker {
        let mut tracker = ColumnVisibilityTracker::new();
        tracker.reseed(["id", "name", "capacity", "name", "depot"]);
        tracker
    }

    #[test]
    fn test_reseed_shows_everything() {
        let tracker = tracker();
        assert_eq!(tracker.fields().collect::<Vec<_>>(), ["name", "capacity", "depot"]);
        assert_eq!(tracker.visible_fields(), ["id", "name", "capacity", "depot"]);
    }

    #[test]
    fn test_toggle_and_hide() {
        let mut tracker = tracker();
        tracker.toggle("capacity", false);
        assert!(!tracker.is_visible("capacity"));
        assert_eq!(tracker.visible_fields(), ["id", "name", "depot"]);

        tracker.hide_all_except_identifier();
        assert_eq!(tracker.visible_fields(), ["id"]);

        tracker.show_all();
        assert_eq!(tracker.visible_fields().len(), 4);
    }

    #[test]
    fn test_identifier_cannot_be_hidden() {
        let mut tracker = tracker();
        tracker.toggle("id", false);
        assert!(tracker.is_visible("id"));
        tracker.toggle("nope", true);
        assert!(!tracker.is_visible("nope"));
    }

    #[test]
    fn test_reseed_drops_stale_fields() {
        let mut tracker = ColumnVisibilityTracker::new();
        tracker.reseed(["a", "b"]);
        tracker.toggle("a", false);

        tracker.reseed(["b", "c"]);
        assert_eq!(tracker.fields().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(tracker.visible_fields(), ["id", "b", "c"]);
        assert!(!tracker.is_visible("a"));
    }

    #[test]
    fn test_reseed_from_rows_unions_fields() {
        let rows = vec![
            Row::new(1).set("name", "Truck"),
            Row::new(2).set("capacity", 10).set("name", "Van"),
        ];
        let mut tracker = ColumnVisibilityTracker::new();
        tracker.reseed_from_rows(&rows);
        assert_eq!(tracker.visible_fields(), ["id", "name", "capacity"]);
    }
}
