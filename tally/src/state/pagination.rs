/// Records shown per page in the expense and income tables.
pub const PAGE_SIZE: usize = 10;

const SIBLING_COUNT: u32 = 1;
const MAX_BUTTONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// 1-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Pagination over `total_items` local records.
    pub fn for_items(page: u32, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(PAGE_SIZE) as u32;
        Self { page, total_pages }.clamped()
    }

    fn clamped(mut self) -> Self {
        self.page = self.page.clamp(1, self.total_pages.max(1));
        self
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Advance one page; false when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Index range of the current page within a local list.
    pub fn slice_bounds(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.page.saturating_sub(1) as usize * PAGE_SIZE).min(len);
        let end = (start + PAGE_SIZE).min(len);
        start..end
    }

    pub fn items(&self) -> Vec<PageItem> {
        page_range(self.total_pages, self.page)
    }
}

/// Page buttons for `total_pages` with `current` highlighted.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always shown together with a one-page window around `current`, and
/// collapsed runs become an ellipsis. Near an edge the first (or last) four
/// pages are shown instead of the window.
pub fn page_range(total_pages: u32, current: u32) -> Vec<PageItem> {
    if total_pages <= MAX_BUTTONS {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let left_sibling = current.saturating_sub(SIBLING_COUNT).max(1);
    let right_sibling = (current + SIBLING_COUNT).min(total_pages);

    let show_left_dots = left_sibling > 2;
    let show_right_dots = right_sibling < total_pages - 1;
    let edge_run = MAX_BUTTONS - 1;

    let mut items = Vec::new();
    match (show_left_dots, show_right_dots) {
        (false, true) => {
            items.extend((1..=edge_run).map(PageItem::Page));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_pages));
        }
        (true, false) => {
            items.push(PageItem::Page(1));
            items.push(PageItem::Ellipsis);
            items.extend((total_pages - edge_run + 1..=total_pages).map(PageItem::Page));
        }
        (true, true) => {
            items.push(PageItem::Page(1));
            items.push(PageItem::Ellipsis);
            items.extend((left_sibling..=right_sibling).map(PageItem::Page));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_pages));
        }
        (false, false) => items.extend((1..=total_pages).map(PageItem::Page)),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_small_totals_list_every_page() {
        assert_eq!(page_range(3, 2), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_range(5, 1).len(), 5);
        assert!(page_range(0, 1).is_empty());
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            page_range(20, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_touching_edges() {
        assert_eq!(
            page_range(20, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_range(20, 19),
            vec![Page(1), Ellipsis, Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut pagination = Pagination::for_items(1, 21);
        assert_eq!(pagination.total_pages, 3);
        assert!(!pagination.previous());
        assert!(pagination.next());
        assert!(pagination.next());
        assert!(!pagination.next());
        assert_eq!(pagination.slice_bounds(21), 20..21);
    }

    #[test]
    fn test_for_items_clamps_page() {
        assert_eq!(Pagination::for_items(7, 15).page, 2);
        assert_eq!(Pagination::for_items(3, 0).page, 1);
    }
}
