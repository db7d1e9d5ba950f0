//! Table controller
//!
//! Owns the loaded rows together with every piece of view state, and derives
//! the visible page by running filter → sort → paginate from scratch on each
//! call to [`TableController::view`].

use log::debug;
use log::trace;

use super::columns::ColumnVisibilityTracker;
use super::config::TableConfig;
use super::filter::FilterCriteria;
use super::filter::FilterValue;
use super::filter::filter;
use super::page::PaginationState;
use super::page::paginate;
use super::page::total_pages;
use super::selection::SelectionFlags;
use super::selection::SelectionTracker;
use super::sort::SortState;
use super::sort::sort;
use crate::model::Row;
use crate::model::RowId;

// =============================================================================
// TableView
// =============================================================================

/// Everything needed to render one page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a Row>,
    pub first_page: usize,
    pub last_page: usize,
    pub total_pages: usize,
    /// Page actually shown.
    pub current_page: usize,
    pub per_page: usize,
    /// Rows left after filtering, across all pages.
    pub total_records: usize,
    /// Select-all checkbox state for this page.
    pub selection: SelectionFlags,
    /// Columns to render, identifier first.
    pub columns: Vec<&'a str>,
    /// Page sizes the user may switch to.
    pub page_sizes: &'a [usize],
}

impl TableView<'_> {
    pub fn has_previous(&self) -> bool {
        self.current_page > self.first_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Identifiers of the rows on this page.
    pub fn visible_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id().clone()).collect()
    }
}

// =============================================================================
// TableController
// =============================================================================

/// Client-side table engine for one resource collection.
///
/// Selection and column visibility are only rebuilt by [`reseed`](Self::reseed)
/// (or [`load`](Self::load), which calls it). Sorting, filtering and paging
/// leave them alone.
///
/// Filter input is two-phase: [`set_draft`](Self::set_draft) edits the form,
/// [`apply_filter`](Self::apply_filter) commits it to the rows.
///
/// # Example
///
/// ```
/// use dispatch_lib::model::Row;
/// use dispatch_lib::table::{FilterValue, TableController};
///
/// let mut table = TableController::default();
/// table.load(vec![
///     Row::new(1).set("demand", 5),
///     Row::new(2).set("demand", 3),
///     Row::new(3).set("demand", 8),
/// ]);
///
/// table.toggle_sort("demand");
/// table.set_draft("demand", Some(FilterValue::any_of([3, 5])));
/// table.apply_filter();
///
/// let view = table.view();
/// assert_eq!(view.total_records, 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableController {
    config: TableConfig,
    rows: Vec<Row>,
    sort: Option<SortState>,
    draft: FilterCriteria,
    applied: FilterCriteria,
    pagination: PaginationState,
    selection: SelectionTracker,
    columns: ColumnVisibilityTracker,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl TableController {
    /// Creates an empty controller.
    pub fn new(config: TableConfig) -> Self {
        Self {
            sort: config.sort.clone(),
            pagination: PaginationState::new(config.per_page),
            config,
            rows: Vec::new(),
            draft: FilterCriteria::new(),
            applied: FilterCriteria::new(),
            selection: SelectionTracker::new(),
            columns: ColumnVisibilityTracker::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Replaces the rows after a fetch and reseeds selection and columns.
    pub fn load(&mut self, rows: Vec<Row>) {
        self.replace_rows(rows);
        self.reseed();
    }

    /// Replaces the rows without touching selection or columns.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        debug!("Loaded {} rows", rows.len());
        self.rows = rows;
    }

    /// Rebuilds selection and column visibility from the current rows.
    ///
    /// Also adds an inactive filter entry for every field not yet known to
    /// the filter form. Active entries are kept.
    pub fn reseed(&mut self) {
        self.selection.reseed(self.rows.iter().map(Row::id));
        self.columns.reseed_from_rows(&self.rows);

        let fields: Vec<String> = self.columns.fields().map(str::to_string).collect();
        self.draft.seed(fields.iter().cloned());
        self.applied.seed(fields);

        debug!(
            "Reseeded {} selection entries and {} columns",
            self.selection.len(),
            self.columns.fields().count()
        );
    }

    /// All loaded rows, in fetch order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Filtered and sorted rows, before pagination.
    pub fn ordered_rows(&self) -> Vec<&Row> {
        let filtered = filter(&self.rows, &self.applied);
        match &self.sort {
            Some(state) => sort(filtered, &state.field, state.direction),
            None => filtered,
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Sets or clears the sort.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Handles a click on a column header.
    ///
    /// The first click sorts ascending; later clicks flip the direction,
    /// including when they move to a different column.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = Some(match &self.sort {
            Some(state) => state.toggled(field),
            None => SortState::asc(field),
        });
        trace!("Sort is now {:?}", self.sort);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Criteria being edited in the filter form.
    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    /// Criteria currently narrowing the rows.
    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    /// Edits one draft entry. Has no effect on the rows until applied.
    pub fn set_draft(&mut self, field: impl Into<String>, value: Option<FilterValue>) {
        self.draft.set(field, value);
    }

    /// Commits the draft criteria and returns to page 1.
    pub fn apply_filter(&mut self) {
        self.applied = self.draft.clone();
        self.after_filter_change();
        debug!("Applied {} filter entries", self.applied.active().count());
    }

    /// Deactivates every draft and applied entry and returns to page 1.
    pub fn reset_filter(&mut self) {
        self.draft.reset();
        self.applied.reset();
        self.after_filter_change();
        debug!("Filter reset");
    }

    fn after_filter_change(&mut self) {
        self.pagination = self.pagination.with_page(1, 1);
        if self.config.clear_selection_on_filter {
            self.selection.clear_all();
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Page count for the current filter and page size.
    pub fn total_pages(&self) -> usize {
        let filtered = filter(&self.rows, &self.applied).len();
        total_pages(filtered, self.pagination.per_page())
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.pagination = self.pagination.with_page(page, total);
    }

    /// Changes the page size and returns to page 1. Zero is ignored.
    ///
    /// Any positive size is accepted; [`TableConfig::page_sizes`] only lists
    /// what a front end offers.
    pub fn set_per_page(&mut self, per_page: usize) {
        if per_page == 0 {
            return;
        }
        self.pagination = self.pagination.with_per_page(per_page);
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn previous_page(&mut self) {
        let current = self.view_page();
        self.set_page(current.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        let current = self.view_page();
        self.set_page(current + 1);
    }

    pub fn last_page(&mut self) {
        let total = self.total_pages();
        self.set_page(total);
    }

    fn view_page(&self) -> usize {
        self.view().current_page
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Selects or deselects one row.
    pub fn toggle_row(&mut self, id: &RowId, selected: bool) {
        self.selection.toggle(id, selected);
    }

    /// Handles the page's select-all checkbox.
    ///
    /// Checking selects the rows on the current page only; unchecking clears
    /// the whole selection.
    pub fn toggle_all_visible(&mut self, selected: bool) {
        if selected {
            let visible = self.view().visible_ids();
            self.selection.select_visible(&visible);
        } else {
            self.selection.clear_all();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_all();
    }

    /// Selected ids in fetch order, for group actions.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection.selected_ids()
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn columns(&self) -> &ColumnVisibilityTracker {
        &self.columns
    }

    pub fn toggle_column(&mut self, field: &str, visible: bool) {
        self.columns.toggle(field, visible);
    }

    pub fn show_all_columns(&mut self) {
        self.columns.show_all();
    }

    pub fn hide_all_columns(&mut self) {
        self.columns.hide_all_except_identifier();
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Derives the current page.
    pub fn view(&self) -> TableView<'_> {
        let ordered = self.ordered_rows();
        let per_page = self.pagination.per_page();
        let page = paginate(ordered.as_slice(), self.pagination.current_page(), per_page);
        let rows = page.rows.to_vec();
        let visible: Vec<RowId> = rows.iter().map(|row| row.id().clone()).collect();

        trace!(
            "Page {}/{} with {} of {} rows",
            page.current_page,
            page.total_pages,
            rows.len(),
            ordered.len()
        );

        TableView {
            first_page: page.first_page,
            last_page: page.last_page,
            total_pages: page.total_pages,
            current_page: page.current_page,
            per_page,
            total_records: ordered.len(),
            selection: self.selection.flags(&visible),
            columns: self.columns.visible_fields(),
            page_sizes: &self.config.page_sizes,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Direction;

    fn vehicles(count: i64) -> Vec<Row> {
        (1..=count)
            .map(|id| {
                Row::new(id)
                    .set("capacity", (id * 7) % 10)
                    .set("name", format!("Truck {}", id))
            })
            .collect()
    }

    fn ids(view: &TableView<'_>) -> Vec<i64> {
        view.rows
            .iter()
            .filter_map(|row| match row.id() {
                RowId::Int(id) => Some(*id),
                RowId::Str(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_default_view() {
        let mut table = TableController::default();
        table.load(vehicles(12));

        let view = table.view();
        assert_eq!(ids(&view), [1, 2, 3, 4, 5]);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.total_records, 12);
        assert_eq!(view.per_page, 5);
        assert_eq!(view.columns, ["id", "capacity", "name"]);
        assert!(view.has_next());
    }

    #[test]
    fn test_toggle_sort() {
        let mut table = TableController::default();
        table.load(vehicles(3));

        table.toggle_sort("capacity");
        assert_eq!(table.sort_state(), Some(&SortState::asc("capacity")));
        // capacities: 7, 4, 1
        assert_eq!(ids(&table.view()), [3, 2, 1]);

        table.toggle_sort("capacity");
        assert_eq!(table.sort_state().map(|s| s.direction), Some(Direction::Desc));
        assert_eq!(ids(&table.view()), [1, 2, 3]);

        table.toggle_sort("name");
        assert_eq!(table.sort_state(), Some(&SortState::asc("name")));
    }

    #[test]
    fn test_draft_is_not_applied_until_committed() {
        let mut table = TableController::default();
        table.load(vehicles(6));

        table.set_draft("name", Some(FilterValue::scalar("Truck 2")));
        assert_eq!(table.view().total_records, 6);

        table.apply_filter();
        assert_eq!(ids(&table.view()), [2]);

        table.reset_filter();
        assert_eq!(table.view().total_records, 6);
        assert!(!table.draft().is_active());
    }

    #[test]
    fn test_filter_returns_to_first_page() {
        let mut table = TableController::default();
        table.load(vehicles(12));
        table.set_page(3);
        assert_eq!(table.pagination().current_page(), 3);

        table.set_draft("capacity", Some(FilterValue::any_of([1, 4, 7, 0])));
        table.apply_filter();
        assert_eq!(table.pagination().current_page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut table = TableController::default();
        table.load(vehicles(12));

        table.set_page(99);
        assert_eq!(table.pagination().current_page(), 3);
        assert_eq!(ids(&table.view()), [11, 12]);

        table.set_page(0);
        assert_eq!(table.pagination().current_page(), 1);
    }

    #[test]
    fn test_navigation_handlers() {
        let mut table = TableController::default();
        table.load(vehicles(12));

        table.next_page();
        assert_eq!(table.view().current_page, 2);
        table.last_page();
        assert_eq!(table.view().current_page, 3);
        table.next_page();
        assert_eq!(table.view().current_page, 3);
        table.previous_page();
        assert_eq!(table.view().current_page, 2);
        table.first_page();
        assert_eq!(table.view().current_page, 1);
        table.previous_page();
        assert_eq!(table.view().current_page, 1);
    }

    #[test]
    fn test_set_per_page_resets_page() {
        let mut table = TableController::default();
        table.load(vehicles(12));
        table.set_page(2);

        table.set_per_page(10);
        assert_eq!(table.pagination().current_page(), 1);
        assert_eq!(table.view().total_pages, 2);

        table.set_per_page(0);
        assert_eq!(table.pagination().per_page(), 10);
    }

    #[test]
    fn test_view_lists_offered_page_sizes() {
        let mut table = TableController::new(TableConfig::default().with_page_sizes(vec![5, 10]));
        table.load(vehicles(12));
        assert_eq!(table.view().page_sizes, [5, 10]);
        assert!(!table.config().allows_per_page(7));

        // offered sizes do not restrict the engine itself
        table.set_per_page(7);
        assert_eq!(table.view().per_page, 7);
        assert_eq!(table.view().total_pages, 2);
    }

    #[test]
    fn test_shrunken_collection_shows_everything() {
        let mut table = TableController::default();
        table.load(vehicles(12));
        table.last_page();

        table.load(vehicles(7));
        let view = table.view();
        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn test_select_all_is_scoped_to_page() {
        let mut table = TableController::default();
        table.load(vehicles(12));

        table.toggle_all_visible(true);
        let view = table.view();
        assert!(view.selection.all_visible_selected);
        assert_eq!(view.selection.selected_count, 5);

        table.next_page();
        let view = table.view();
        assert!(!view.selection.all_visible_selected);
        assert!(!view.selection.indeterminate);
        assert_eq!(view.selection.selected_count, 5);

        table.toggle_row(&RowId::Int(6), true);
        assert!(table.view().selection.indeterminate);

        table.toggle_all_visible(false);
        assert_eq!(table.selection().selected_count(), 0);
    }

    #[test]
    fn test_selection_survives_sort_and_filter() {
        let mut table = TableController::default();
        table.load(vehicles(6));
        table.toggle_row(&RowId::Int(4), true);

        table.toggle_sort("capacity");
        table.set_draft("name", Some(FilterValue::scalar("Truck 1")));
        table.apply_filter();

        assert_eq!(table.selected_ids(), [RowId::Int(4)]);
    }

    #[test]
    fn test_clear_selection_on_filter() {
        let config = TableConfig::default().with_clear_selection_on_filter(true);
        let mut table = TableController::new(config);
        table.load(vehicles(6));
        table.toggle_row(&RowId::Int(4), true);

        table.apply_filter();
        assert!(table.selected_ids().is_empty());
    }

    #[test]
    fn test_replace_rows_keeps_selection_until_reseed() {
        let mut table = TableController::default();
        table.load(vehicles(3));
        table.toggle_row(&RowId::Int(1), true);

        table.replace_rows(vehicles(2));
        assert_eq!(table.selection().selected_count(), 1);

        table.reseed();
        assert_eq!(table.selection().selected_count(), 0);
        assert_eq!(table.selection().len(), 2);
    }

    #[test]
    fn test_reseed_seeds_filter_form() {
        let mut table = TableController::default();
        table.set_draft("capacity", Some(FilterValue::scalar(4)));
        table.apply_filter();
        table.load(vehicles(3));

        assert_eq!(table.draft().fields().collect::<Vec<_>>(), ["capacity", "name"]);
        assert_eq!(table.applied().get("capacity"), Some(&FilterValue::scalar(4)));
        assert_eq!(ids(&table.view()), [2]);
    }

    #[test]
    fn test_column_handlers_do_not_touch_rows() {
        let mut table = TableController::default();
        table.load(vehicles(3));
        table.toggle_sort("capacity");

        table.hide_all_columns();
        let view = table.view();
        assert_eq!(view.columns, ["id"]);
        assert_eq!(ids(&view), [3, 2, 1]);

        table.show_all_columns();
        table.toggle_column("name", false);
        assert_eq!(table.view().columns, ["id", "capacity"]);
    }

    #[test]
    fn test_initial_sort_from_config() {
        let config = TableConfig::default()
            .with_per_page(2)
            .with_sort(SortState::desc("capacity"));
        let mut table = TableController::new(config);
        table.load(vehicles(3));

        let view = table.view();
        assert_eq!(ids(&view), [1, 2]);
        assert_eq!(view.total_pages, 2);
    }
}
