//! List controller over an in-memory collection.
//!
//! Every mutation runs filter → sort → paginate synchronously and then
//! emits [`view_changed`](LocalListController::view_changed). Search and
//! field filter changes return to the first page; sort changes keep the
//! current page (clamped if the result set shrank).

use tabula_core::{PerfSpan, Signal};

use super::collation::Collation;
use super::filter::{FilterCriteria, filter_rows};
use super::paginate::PageSpec;
use super::record::Record;
use super::sort::{SortSpec, sort_rows};
use crate::error::ModelError;

/// Snapshot of the pagination state after a recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSummary {
    /// Rows passing the current criteria.
    pub total_matching: usize,
    /// `max(1, ceil(total_matching / page_size))`.
    pub page_count: usize,
    /// Current page, 1-based.
    pub current_page: usize,
    /// Rows on the current page.
    pub visible: usize,
}

/// Filter, sort, and paginate a fixed set of records.
pub struct LocalListController<R: Record> {
    items: Vec<R>,
    criteria: FilterCriteria,
    sort: SortSpec,
    default_sort: SortSpec,
    page: PageSpec,
    collation: Collation,
    matching: Vec<usize>,
    view_changed: Signal<ViewSummary>,
}

impl<R: Record + 'static> LocalListController<R> {
    /// Create a controller showing `items` sorted by `default_sort`.
    ///
    /// Fails fast on a zero `page_size`.
    pub fn new(
        items: Vec<R>,
        page_size: usize,
        default_sort: SortSpec,
        collation: Collation,
    ) -> Result<Self, ModelError> {
        let page = PageSpec::first(page_size)?;
        let mut controller = Self {
            items,
            criteria: FilterCriteria::default(),
            sort: default_sort.clone(),
            default_sort,
            page,
            collation,
            matching: Vec::new(),
            view_changed: Signal::new(),
        };
        controller.refresh();
        Ok(controller)
    }

    /// Emitted after every recompute.
    pub fn view_changed(&self) -> &Signal<ViewSummary> {
        &self.view_changed
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    pub fn current_page(&self) -> usize {
        self.page.page_number()
    }

    /// Rows passing the current criteria, across all pages.
    pub fn total_matching(&self) -> usize {
        self.matching.len()
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count(self.matching.len())
    }

    /// Whether nothing matches. Callers show an empty-state message.
    pub fn is_empty(&self) -> bool {
        self.matching.is_empty()
    }

    /// All matching records in sorted order.
    pub fn matching(&self) -> impl Iterator<Item = &R> {
        self.matching.iter().map(|&row| &self.items[row])
    }

    /// The records on the current page.
    pub fn visible(&self) -> Vec<&R> {
        self.matching[self.page.range(self.matching.len())]
            .iter()
            .map(|&row| &self.items[row])
            .collect()
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            total_matching: self.total_matching(),
            page_count: self.page_count(),
            current_page: self.current_page(),
            visible: self.page.range(self.matching.len()).len(),
        }
    }

    /// Set the free-text query and return to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.reset_page();
        self.recompute();
    }

    /// Require `field` to equal `value` and return to page 1.
    ///
    /// An empty `value` removes the constraint.
    pub fn set_field_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.criteria.field_filters.insert(field.into(), value.into());
        self.reset_page();
        self.recompute();
    }

    /// Remove the filter on `field` and return to page 1.
    pub fn clear_field_filter(&mut self, field: &str) {
        self.criteria.field_filters.remove(field);
        self.reset_page();
        self.recompute();
    }

    /// Header click on `key`. Keeps the current page.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = self.sort.toggled(key);
        self.recompute();
    }

    /// Replace the sort. Keeps the current page.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = spec;
        self.recompute();
    }

    /// Jump to page `n`. Out-of-range requests are ignored and return `false`.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.page_count() {
            tracing::debug!(
                target: "tabula::model",
                page = n,
                page_count = self.page_count(),
                "ignoring out-of-range page request"
            );
            return false;
        }
        if n != self.current_page()
            && let Ok(page) = self.page.with_page(n)
        {
            self.page = page;
            self.view_changed.emit(self.summary());
        }
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.current_page() > 1 && self.go_to_page(self.current_page() - 1)
    }

    /// Restore default criteria, sort, and page.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
        self.sort = self.default_sort.clone();
        self.reset_page();
        self.recompute();
    }

    /// Recompute the visible rows from the current inputs and notify.
    pub fn recompute(&mut self) {
        self.refresh();
        self.view_changed.emit(self.summary());
    }

    #[tracing::instrument(skip(self), target = "tabula::model", level = "trace")]
    fn refresh(&mut self) {
        let _span = PerfSpan::new(tabula_core::logging::span_names::RECOMPUTE);

        let filtered = filter_rows(&self.items, &self.criteria);
        self.matching = sort_rows(&self.items, &filtered, &self.sort, &self.collation);

        let page_count = self.page_count();
        if self.current_page() > page_count
            && let Ok(page) = self.page.with_page(page_count)
        {
            self.page = page;
        }

        tracing::trace!(
            target: "tabula::model",
            matching = self.matching.len(),
            page = self.current_page(),
            page_count,
            "recomputed"
        );
    }

    fn reset_page(&mut self) {
        if let Ok(page) = self.page.with_page(1) {
            self.page = page;
        }
    }
}

impl<R: Record> std::fmt::Debug for LocalListController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalListController")
            .field("items", &self.items.len())
            .field("criteria", &self.criteria)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("matching", &self.matching.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::model::record::FieldValue;

    struct Word(&'static str);

    impl Record for Word {
        type Id = &'static str;
        const SEARCH_FIELDS: &'static [&'static str] = &["text"];

        fn id(&self) -> Self::Id {
            self.0
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "text" => FieldValue::text(self.0),
                _ => FieldValue::Null,
            }
        }
    }

    fn controller(page_size: usize) -> LocalListController<Word> {
        let words = ["delta", "alpha", "echo", "charlie", "bravo", "foxtrot", "golf"]
            .into_iter()
            .map(Word)
            .collect();
        LocalListController::new(
            words,
            page_size,
            SortSpec::ascending("text"),
            Collation::korean().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_page_size_fails_fast() {
        let result = LocalListController::new(
            vec![Word("a")],
            0,
            SortSpec::ascending("text"),
            Collation::korean().unwrap(),
        );
        assert!(matches!(result, Err(ModelError::InvalidPageSize)));
    }

    #[test]
    fn test_pages_and_out_of_range() {
        let mut list = controller(3);
        assert_eq!(list.page_count(), 3);
        let first: Vec<_> = list.visible().iter().map(|w| w.0).collect();
        assert_eq!(first, vec!["alpha", "bravo", "charlie"]);

        assert!(!list.go_to_page(0));
        assert!(!list.go_to_page(4));
        assert_eq!(list.current_page(), 1);

        assert!(list.go_to_page(3));
        let last: Vec<_> = list.visible().iter().map(|w| w.0).collect();
        assert_eq!(last, vec!["golf"]);
        assert!(!list.next_page());
        assert!(list.previous_page());
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn test_search_resets_page_but_sort_keeps_it() {
        let mut list = controller(3);
        list.go_to_page(2);

        list.toggle_sort("text");
        assert_eq!(list.current_page(), 2);

        list.set_search("o");
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.total_matching(), 4);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut list = controller(3);
        list.set_search("zzz");
        assert!(list.is_empty());
        assert_eq!(list.page_count(), 1);
        assert!(list.visible().is_empty());
    }

    #[test]
    fn test_view_changed_fires_per_mutation() {
        let mut list = controller(3);
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        list.view_changed().connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        list.set_search("a");
        list.toggle_sort("text");
        list.reset();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
