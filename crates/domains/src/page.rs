//! Fixed-size pagination shared by every list view.

use serde::{Deserialize, Serialize};

/// Rows per page for all paginated collections.
pub const PAGE_SIZE: u32 = 20;

/// One page of a collection plus the bookkeeping the client renders
/// a pager from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number as requested (clamped to at least 1).
    pub page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// `total_pages == ceil(total / PAGE_SIZE)`; an empty collection still
    /// reports one (empty) page so pagers always have something to render.
    pub fn new(items: Vec<T>, page: u32, total: u64) -> Self {
        let total_pages = (total.div_ceil(PAGE_SIZE as u64)).max(1) as u32;
        Self {
            items,
            page: page.max(1),
            total,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// SQL offset for a 1-based page number.
pub fn offset(page: u32) -> i64 {
    (page.max(1) as i64 - 1) * PAGE_SIZE as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(Page::<u8>::new(vec![], 1, 0).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 1, 1).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 1, 20).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 1, 21).total_pages, 2);
        assert_eq!(Page::<u8>::new(vec![], 1, 40).total_pages, 2);
        assert_eq!(Page::<u8>::new(vec![], 1, 41).total_pages, 3);
    }

    #[test]
    fn last_page_size_bounds() {
        // 45 rows, page size 20: last page holds 45 - 20*2 = 5 rows.
        let total: u64 = 45;
        let pages = total.div_ceil(PAGE_SIZE as u64);
        let last = total - PAGE_SIZE as u64 * (pages - 1);
        assert!(last >= 1 && last <= PAGE_SIZE as u64);
        assert_eq!(last, 5);
    }

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(offset(0), 0); // clamped
        assert_eq!(offset(1), 0);
        assert_eq!(offset(2), 20);
        assert_eq!(offset(5), 80);
    }
}
