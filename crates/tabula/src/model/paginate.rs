//! Page arithmetic.

use crate::error::ModelError;

/// A validated page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpec {
    page_size: usize,
    page_number: usize,
}

impl PageSpec {
    /// Create a page spec. Both values must be at least 1.
    pub fn new(page_size: usize, page_number: usize) -> Result<Self, ModelError> {
        if page_size == 0 {
            return Err(ModelError::InvalidPageSize);
        }
        if page_number == 0 {
            return Err(ModelError::InvalidPageNumber(page_number));
        }
        Ok(Self {
            page_size,
            page_number,
        })
    }

    /// The first page for `page_size`.
    pub fn first(page_size: usize) -> Result<Self, ModelError> {
        Self::new(page_size, 1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// The same page size on another page. Zero is rejected.
    pub fn with_page(self, page_number: usize) -> Result<Self, ModelError> {
        Self::new(self.page_size, page_number)
    }

    /// Number of pages for `total` items.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Index range of this page within `total` items, clamped to bounds.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page_number - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size is rejected.
pub fn page_count(total: usize, page_size: usize) -> Result<usize, ModelError> {
    Ok(PageSpec::first(page_size)?.page_count(total))
}

/// The items on `page`. Empty when the page is past the end.
pub fn paginate<T>(items: &[T], page: PageSpec) -> &[T] {
    &items[page.range(items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(PageSpec::new(0, 1), Err(ModelError::InvalidPageSize));
        assert_eq!(PageSpec::new(5, 0), Err(ModelError::InvalidPageNumber(0)));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 5), Ok(1));
        assert_eq!(page_count(5, 5), Ok(1));
        assert_eq!(page_count(6, 5), Ok(2));
        assert_eq!(page_count(8, 5), Ok(2));
        assert_eq!(page_count(11, 5), Ok(3));
        assert_eq!(page_count(3, 0), Err(ModelError::InvalidPageSize));
    }

    #[test]
    fn test_page_sizes() {
        let items: Vec<u32> = (0..8).collect();
        let n = items.len();
        let p = 5;
        for k in 1..=page_count(n, p).unwrap() {
            let page = paginate(&items, PageSpec::new(p, k).unwrap());
            assert_eq!(page.len(), p.min(n - (k - 1) * p));
        }
        assert_eq!(paginate(&items, PageSpec::new(5, 2).unwrap()), &[5, 6, 7]);
    }

    #[test]
    fn test_past_last_page_is_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, PageSpec::new(2, 3).unwrap()).is_empty());
        assert!(paginate(&items, PageSpec::new(2, usize::MAX).unwrap()).is_empty());
    }
}
