//! Table configuration

use super::page::DEFAULT_PAGE_SIZES;
use super::sort::SortState;

/// Initial state and behaviour switches for a [`TableController`](super::TableController).
///
/// # Example
///
/// ```
/// use dispatch_lib::table::{SortState, TableConfig};
///
/// let config = TableConfig::default()
///     .with_per_page(10)
///     .with_sort(SortState::desc("createdAt"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    /// Page size on first load.
    ///
    /// Default: 5
    pub per_page: usize,

    /// Page sizes offered to the user. An empty list allows any size.
    ///
    /// Default: `[5, 10, 15, 20]`
    pub page_sizes: Vec<usize>,

    /// Sort applied on first load.
    ///
    /// Default: none (fetch order)
    pub sort: Option<SortState>,

    /// Deselect every row whenever a filter is applied or reset.
    ///
    /// Default: `false` (selection persists until cleared)
    pub clear_selection_on_filter: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PAGE_SIZES[0],
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            sort: None,
            clear_selection_on_filter: false,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_sizes(mut self, page_sizes: impl Into<Vec<usize>>) -> Self {
        self.page_sizes = page_sizes.into();
        self
    }

    /// Whether `per_page` is one of the offered page sizes.
    pub fn allows_per_page(&self, per_page: usize) -> bool {
        per_page > 0 && (self.page_sizes.is_empty() || self.page_sizes.contains(&per_page))
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets whether applying a filter clears the selection.
    pub fn with_clear_selection_on_filter(mut self, clear: bool) -> Self {
        self.clear_selection_on_filter = clear;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_per_page() {
        let config = TableConfig::default();
        assert!(config.allows_per_page(10));
        assert!(!config.allows_per_page(7));
        assert!(!config.allows_per_page(0));

        let any = TableConfig::default().with_page_sizes(Vec::new());
        assert!(any.allows_per_page(7));
        assert!(!any.allows_per_page(0));
    }
}
