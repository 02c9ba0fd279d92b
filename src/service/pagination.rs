use crate::config::LayoutConfig;

/// Rows per page for a viewport of `viewport_height` px.
///
/// Usable height is floored at `min_usable` before dividing, so tiny or
/// negative heights still land inside `[min_rows, max_rows]`.
pub fn page_size_for(viewport_height: i64, layout: &LayoutConfig) -> usize {
    let usable = viewport_height
        .saturating_sub(layout.reserved_chrome)
        .max(layout.min_usable);
    let rows = usable / layout.row_height.max(1);
    let rows = usize::try_from(rows).unwrap_or(layout.min_rows);
    rows.clamp(layout.min_rows, layout.max_rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Rows of the current page, `[(page-1)*size, page*size)` cut to `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.page < self.total_pages(len)
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        if !self.can_next(len) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Jumps to `page`, clamped to `[1, total_pages(len)]`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.total_pages(len));
    }

    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.clamp(1, self.total_pages(len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_follows_viewport() {
        let layout = LayoutConfig::default();
        assert_eq!(page_size_for(900, &layout), 10);
        assert_eq!(page_size_for(300 + 56 * 12, &layout), 12);
        assert_eq!(page_size_for(2000, &layout), 15);
    }

    #[test]
    fn test_page_size_floor_for_small_viewports() {
        let layout = LayoutConfig::default();
        assert_eq!(page_size_for(0, &layout), 10);
        assert_eq!(page_size_for(-500, &layout), 10);
        assert_eq!(page_size_for(i64::MIN, &layout), 10);
    }

    #[test]
    fn test_twenty_three_rows() {
        let rows: Vec<u32> = (0..23).collect();
        let mut pager = Paginator::new(10);
        assert_eq!(pager.total_pages(rows.len()), 3);

        assert!(pager.next(rows.len()));
        assert!(pager.next(rows.len()));
        assert!(!pager.next(rows.len()));
        assert_eq!(pager.page(), 3);
        assert_eq!(pager.window(&rows), &[20, 21, 22]);
    }

    #[test]
    fn test_empty_set_has_one_page() {
        let mut pager = Paginator::new(10);
        let rows: Vec<u32> = Vec::new();
        assert_eq!(pager.total_pages(0), 1);
        assert!(pager.window(&rows).is_empty());
        assert!(!pager.can_prev());
        assert!(!pager.can_next(0));
        assert!(!pager.prev());
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut pager = Paginator::new(10);
        pager.go_to(5, 50);
        assert_eq!(pager.page(), 5);
        pager.clamp(12);
        assert_eq!(pager.page(), 2);

        pager.set_page_size(15);
        assert_eq!(pager.page(), 1);
    }
}
