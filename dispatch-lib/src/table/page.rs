//! Page slicing

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [5, 10, 15, 20];

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    current_page: usize,
    per_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: DEFAULT_PAGE_SIZES[0],
        }
    }
}

impl PaginationState {
    /// Creates a state on page 1. A zero page size is raised to 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Requested page, which may lie past the end of a shrunken collection.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Changes the page size and returns to page 1.
    pub fn with_per_page(self, per_page: usize) -> Self {
        Self::new(per_page)
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn with_page(self, page: usize, total_pages: usize) -> Self {
        Self {
            current_page: page.clamp(1, total_pages.max(1)),
            ..self
        }
    }
}

/// One page of a collection plus the navigation metadata around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    /// Rows on this page.
    pub rows: &'a [T],
    /// Always 1.
    pub first_page: usize,
    /// Equal to `total_pages`.
    pub last_page: usize,
    /// Never 0, even for an empty collection.
    pub total_pages: usize,
    /// Page actually shown (1 when the whole collection is shown).
    pub current_page: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > self.first_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Number of pages needed for `len` rows, at least 1.
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Slices out page `current_page` (1-based) of `rows`.
///
/// When the collection is smaller than one page, or `current_page` lies past
/// the last page, the whole collection comes back as a single page. A view
/// whose data shrank under it (after a bulk delete, say) therefore shows
/// everything rather than an empty page.
///
/// # Example
///
/// ```
/// use dispatch_lib::table::paginate;
///
/// let rows = [1, 2, 3];
/// assert_eq!(paginate(&rows, 2, 2).rows, &[3]);
/// assert_eq!(paginate(&rows, 9, 2).rows, &[1, 2, 3]);
/// ```
pub fn paginate<T>(rows: &[T], current_page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total = total_pages(rows.len(), per_page);

    if rows.len() < per_page || current_page > total {
        return Page {
            rows,
            first_page: 1,
            last_page: 1,
            total_pages: 1,
            current_page: 1,
        };
    }

    let current_page = current_page.max(1);
    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(rows.len());
    Page {
        rows: &rows[start..end],
        first_page: 1,
        last_page: total,
        total_pages: total,
        current_page,
    }
}
