//! Pagination utilities for service layer
//!
//! Pages are 1-based. A zero page size or page number selects nothing, and a
//! page past the end is empty rather than an error.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Index of the first item on this page, `None` when the page selects nothing.
    pub fn offset(self) -> Option<usize> {
        if self.page == 0 || self.per_page == 0 {
            return None;
        }
        (self.page as usize - 1).checked_mul(self.per_page as usize)
    }

    /// Cut this page out of an already ordered result set.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        match self.offset() {
            Some(offset) => items.into_iter().skip(offset).take(self.per_page as usize).collect(),
            None => Vec::new(),
        }
    }

    /// Number of non-empty pages for `total` items.
    pub fn page_count(self, total: usize) -> usize {
        if self.per_page == 0 { 0 } else { total.div_ceil(self.per_page as usize) }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn zero_size_or_page_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(Pagination::new(1, 0).slice(items.clone()).is_empty());
        assert!(Pagination::new(0, 3).slice(items).is_empty());
    }

    #[test]
    fn past_the_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(Pagination::new(2, 3).slice(items.clone()), vec![4, 5]);
        assert!(Pagination::new(3, 3).slice(items.clone()).is_empty());
        assert!(Pagination::new(u32::MAX, u32::MAX).slice(items).is_empty());
    }

    #[test]
    fn pages_partition_the_input() {
        let items: Vec<u32> = (1..=17).collect();
        for per_page in 1..=20u32 {
            let p = Pagination::new(1, per_page);
            let mut rebuilt = Vec::new();
            for page in 1..=p.page_count(items.len()) as u32 {
                let chunk = Pagination::new(page, per_page).slice(items.clone());
                assert!(!chunk.is_empty());
                rebuilt.extend(chunk);
            }
            assert_eq!(rebuilt, items, "per_page={per_page}");
        }
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
        assert_eq!(d.offset(), Some(0));
    }
}
