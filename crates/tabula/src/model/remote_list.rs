//! API-backed user list.
//!
//! The server does the filtering and paging; this controller only tracks
//! what to ask for and what came back. The raw search text changes on every
//! keystroke while a [`Debouncer`] decides when it is sent.
//!
//! Each load is tagged with a [`LoadTicket`] carrying a sequence number.
//! A response is applied only if its ticket is the latest one issued, so a
//! slow reply for an old search term can never overwrite a newer one.
//!
//! ```ignore
//! let mut list = RemoteUserList::new(UsersClient::connect(url)?, 10, Duration::from_millis(500))?;
//! list.mount().await;
//!
//! list.set_search("kim", Instant::now());
//! // ... later, from the event loop:
//! list.tick(Instant::now()).await;
//! ```

use std::time::{Duration, Instant};

use tabula_core::logging::{perf_span, span_names};
use tabula_core::{Debouncer, Signal};
use tracing::Instrument;
use tabula_net::{ListQuery, NetworkError, PaginatedResponse, User, UserApi, UserId};

use crate::error::ModelError;
use crate::notice::{Notice, messages};

/// Identifies one issued listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    query: ListQuery,
}

impl LoadTicket {
    /// Sequence number; later requests have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The parameters to send.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Result of [`RemoteUserList::delete`].
#[derive(Clone, Debug)]
pub enum DeleteOutcome {
    /// The user declined the confirmation. No request was sent.
    Cancelled,
    /// The user was deleted and the current page reloaded.
    Deleted,
    /// The delete request failed. The list is unchanged.
    Failed(NetworkError),
}

/// Controller for the paginated, searchable user list.
pub struct RemoteUserList<A: UserApi> {
    api: A,
    page_size: u32,
    search_text: String,
    search: Debouncer<String>,
    items: Vec<User>,
    current_page: u32,
    total_pages: u32,
    total: u64,
    is_loading: bool,
    error: Option<String>,
    last_seq: u64,
    notified: Signal<Notice>,
    changed: Signal<()>,
}

impl<A: UserApi> RemoteUserList<A> {
    /// Create a controller. A zero `page_size` is rejected.
    pub fn new(api: A, page_size: u32, debounce: Duration) -> Result<Self, ModelError> {
        if page_size == 0 {
            return Err(ModelError::InvalidPageSize);
        }
        Ok(Self {
            api,
            page_size,
            search_text: String::new(),
            search: Debouncer::new(String::new(), debounce),
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total: 0,
            is_loading: false,
            error: None,
            last_seq: 0,
            notified: Signal::new(),
            changed: Signal::new(),
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Emitted for every success or error message meant for the user.
    pub fn notified(&self) -> &Signal<Notice> {
        &self.notified
    }

    /// Emitted whenever displayed state changes.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    pub fn items(&self) -> &[User] {
        &self.items
    }

    /// The search box contents, updated on every keystroke.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The search term actually sent to the server.
    pub fn debounced_search(&self) -> &str {
        self.search.committed()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed fetch, cleared when a new fetch starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the view should replace the table with a retry button.
    pub fn shows_retry(&self) -> bool {
        self.error.is_some() && self.items.is_empty()
    }

    /// Whether the view should render pagination controls.
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// Whether a loaded, error-free list has no rows.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.items.is_empty()
    }

    /// When [`tick`](Self::tick) next has work to do, if ever.
    pub fn deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Initial load: page 1 with the committed search term.
    pub async fn mount(&mut self) {
        if self.search.is_torn_down() {
            self.search = Debouncer::new(String::new(), self.search.delay());
        }
        self.load(1).await;
    }

    /// Record a keystroke. The request follows once typing pauses.
    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_text.clone_from(&text);
        self.search.push(text, now);
    }

    /// Advance the debounce clock. When the committed search term changes,
    /// page 1 is fetched for it and `true` is returned.
    pub async fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => {
                tracing::debug!(target: "tabula::remote_list", search = %term, "search committed");
                self.load(1).await;
                true
            }
            None => false,
        }
    }

    /// Fetch `page` with the committed search term.
    pub async fn load(&mut self, page: u32) {
        let ticket = self.begin_load(page);
        let result = self
            .api
            .list_users(ticket.query())
            .instrument(perf_span(span_names::FETCH))
            .await;
        self.finish_load(&ticket, result);
    }

    /// Manual retry after a failed fetch. Reloads page 1.
    pub async fn retry(&mut self) {
        self.load(1).await;
    }

    /// Fetch page `n`. Pages outside `1..=total_pages` are ignored.
    pub async fn go_to_page(&mut self, n: u32) -> bool {
        if n < 1 || n > self.total_pages {
            tracing::debug!(
                target: "tabula::remote_list",
                page = n,
                total_pages = self.total_pages,
                "ignoring out-of-range page request"
            );
            return false;
        }
        self.load(n).await;
        true
    }

    pub async fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1).await
    }

    pub async fn previous_page(&mut self) -> bool {
        self.current_page > 1 && self.go_to_page(self.current_page - 1).await
    }

    /// Delete `id` after `confirm` approves it.
    ///
    /// On success the current page is reloaded with the committed search
    /// term. On failure an error notice is emitted and the list is kept.
    pub async fn delete<F>(&mut self, id: UserId, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(messages::CONFIRM_DELETE) {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_user(id).await {
            Ok(()) => {
                tracing::info!(target: "tabula::remote_list", id, "user deleted");
                self.notified.emit(Notice::success(messages::USER_DELETED));
                self.load(self.current_page).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(target: "tabula::remote_list", id, error = %e, "delete failed");
                self.notified
                    .emit(Notice::from_error(&e, messages::USER_DELETE_FAILED));
                DeleteOutcome::Failed(e)
            }
        }
    }

    /// Issue a ticket for `page` and mark the list as loading.
    ///
    /// Pair with [`finish_load`](Self::finish_load) when driving requests
    /// concurrently instead of through [`load`](Self::load).
    pub fn begin_load(&mut self, page: u32) -> LoadTicket {
        self.last_seq += 1;
        self.is_loading = true;
        self.error = None;
        self.changed.emit(());

        LoadTicket {
            seq: self.last_seq,
            query: ListQuery::new(page, self.page_size).with_search(self.search.committed().clone()),
        }
    }

    /// Apply a listing result. Returns `false` if the ticket was superseded
    /// and the result discarded.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: tabula_net::Result<PaginatedResponse<User>>,
    ) -> bool {
        if ticket.seq != self.last_seq || self.search.is_torn_down() {
            tracing::debug!(
                target: "tabula::remote_list",
                seq = ticket.seq,
                latest = self.last_seq,
                "discarding stale response"
            );
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(
                    target: "tabula::remote_list",
                    seq = ticket.seq,
                    items = page.items.len(),
                    page = page.page,
                    total_pages = page.total_pages,
                    "page loaded"
                );
                self.items = page.items;
                self.current_page = page.page.max(1);
                // An empty listing still has one (empty) page.
                self.total_pages = page.total_pages.max(1);
                self.total = page.total;
            }
            Err(e) => {
                tracing::warn!(target: "tabula::remote_list", seq = ticket.seq, error = %e, "fetch failed");
                let notice = Notice::from_error(&e, messages::LIST_LOAD_FAILED);
                self.error = Some(notice.message.clone());
                self.notified.emit(notice);
            }
        }
        self.changed.emit(());
        true
    }

    /// Stop all pending work and restore defaults.
    ///
    /// The pending search emission is cancelled and in-flight responses are
    /// discarded. [`mount`](Self::mount) starts over.
    pub fn teardown(&mut self) {
        self.search.cancel();
        self.search_text.clear();
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 1;
        self.total = 0;
        self.is_loading = false;
        self.error = None;
        tracing::debug!(target: "tabula::remote_list", "torn down");
    }
}

impl<A: UserApi> std::fmt::Debug for RemoteUserList<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteUserList")
            .field("search_text", &self.search_text)
            .field("debounced_search", self.search.committed())
            .field("items", &self.items.len())
            .field("current_page", &self.current_page)
            .field("total_pages", &self.total_pages)
            .field("is_loading", &self.is_loading)
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tabula_net::{UserCreateInput, UserUpdateInput};

    use super::*;

    #[derive(Default)]
    struct FakeApi {
        pages: Mutex<VecDeque<tabula_net::Result<PaginatedResponse<User>>>>,
        queries: Mutex<Vec<ListQuery>>,
        deleted: Mutex<Vec<UserId>>,
        fail_delete: bool,
    }

    impl FakeApi {
        fn respond(&self, result: tabula_net::Result<PaginatedResponse<User>>) {
            self.pages.lock().push_back(result);
        }
    }

    impl UserApi for FakeApi {
        async fn list_users(&self, query: &ListQuery) -> tabula_net::Result<PaginatedResponse<User>> {
            self.queries.lock().push(query.clone());
            self.pages
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(PaginatedResponse::empty(query.page_size)))
        }

        async fn get_user(&self, id: UserId) -> tabula_net::Result<User> {
            Err(NetworkError::api(404, Some(format!("no user {id}"))))
        }

        async fn create_user(&self, _input: &UserCreateInput) -> tabula_net::Result<User> {
            Err(NetworkError::api(500, None))
        }

        async fn update_user(
            &self,
            _id: UserId,
            _input: &UserUpdateInput,
        ) -> tabula_net::Result<User> {
            Err(NetworkError::api(500, None))
        }

        async fn delete_user(&self, id: UserId) -> tabula_net::Result<()> {
            if self.fail_delete {
                return Err(NetworkError::api(500, Some("삭제 실패".to_string())));
            }
            self.deleted.lock().push(id);
            Ok(())
        }
    }

    fn user(id: UserId, name: &str) -> User {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            age: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn page(items: Vec<User>, page: u32, total_pages: u32) -> PaginatedResponse<User> {
        PaginatedResponse {
            total: items.len() as u64,
            items,
            page,
            page_size: 10,
            total_pages,
        }
    }

    fn list(api: FakeApi) -> RemoteUserList<FakeApi> {
        RemoteUserList::new(api, 10, Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = RemoteUserList::new(FakeApi::default(), 0, Duration::from_millis(500));
        assert!(matches!(result, Err(ModelError::InvalidPageSize)));
    }

    #[tokio::test]
    async fn test_search_is_debounced() {
        let api = FakeApi::default();
        api.respond(Ok(page(vec![user(1, "Kim")], 1, 1)));
        let mut list = list(api);

        let t0 = Instant::now();
        list.set_search("k", t0);
        list.set_search("ki", t0 + Duration::from_millis(100));
        list.set_search("kim", t0 + Duration::from_millis(200));

        assert!(!list.tick(t0 + Duration::from_millis(600)).await);
        assert_eq!(list.search_text(), "kim");
        assert_eq!(list.debounced_search(), "");

        assert!(list.tick(t0 + Duration::from_millis(700)).await);
        assert_eq!(list.debounced_search(), "kim");
        assert_eq!(list.items().len(), 1);
        assert!(!list.show_pagination());

        let queries = list.api().queries.lock().clone();
        assert_eq!(queries, vec![ListQuery::new(1, 10).with_search("kim")]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut list = list(FakeApi::default());

        let older = list.begin_load(1);
        let newer = list.begin_load(2);
        assert!(newer.seq() > older.seq());

        assert!(list.finish_load(&newer, Ok(page(vec![user(2, "Lee")], 2, 3))));
        assert!(!list.finish_load(&older, Ok(page(vec![user(1, "Kim")], 1, 3))));

        assert_eq!(list.items()[0].name, "Lee");
        assert_eq!(list.current_page(), 2);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_empty_listing_keeps_one_page() {
        let api = FakeApi::default();
        api.respond(Ok(PaginatedResponse::empty(10)));
        let mut list = list(api);

        list.mount().await;
        assert_eq!(list.total_pages(), 1);
        assert!(list.is_empty());
        assert!(!list.show_pagination());

        assert!(list.go_to_page(1).await);
        assert!(!list.go_to_page(2).await);
        assert_eq!(list.api().queries.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_items() {
        let api = FakeApi::default();
        api.respond(Ok(page(vec![user(1, "Kim")], 1, 2)));
        api.respond(Err(NetworkError::Timeout));
        let mut list = list(api);

        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink = notices.clone();
        list.notified().connect(move |n| sink.lock().push(n.clone()));

        list.mount().await;
        list.go_to_page(2).await;

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.error(), Some(tabula_net::NETWORK_ERROR_MESSAGE));
        assert!(!list.shows_retry());
        assert!(notices.lock()[0].is_error());
    }

    #[tokio::test]
    async fn test_retry_shown_only_without_items() {
        let api = FakeApi::default();
        api.respond(Err(NetworkError::api(500, None)));
        api.respond(Ok(page(vec![user(1, "Kim")], 1, 1)));
        let mut list = list(api);

        list.mount().await;
        assert!(list.shows_retry());
        assert!(!list.is_empty());

        list.retry().await;
        assert!(!list.shows_retry());
        assert_eq!(list.error(), None);
    }

    #[tokio::test]
    async fn test_go_to_page_bounds() {
        let api = FakeApi::default();
        api.respond(Ok(page(vec![user(1, "Kim")], 1, 2)));
        let mut list = list(api);
        list.mount().await;

        assert!(!list.go_to_page(0).await);
        assert!(!list.go_to_page(3).await);
        assert!(list.go_to_page(2).await);
        assert_eq!(list.api().queries.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let mut list = list(FakeApi::default());
        list.mount().await;

        let outcome = list.delete(5, |_| false).await;
        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        assert!(list.api().deleted.lock().is_empty());
        assert_eq!(list.api().queries.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let api = FakeApi {
            fail_delete: true,
            ..Default::default()
        };
        api.respond(Ok(page(vec![user(5, "Park")], 1, 1)));
        let mut list = list(api);
        list.mount().await;

        let outcome = list.delete(5, |_| true).await;
        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.api().queries.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_search() {
        let mut list = list(FakeApi::default());
        list.mount().await;

        let t0 = Instant::now();
        list.set_search("lee", t0);
        list.teardown();

        assert!(!list.tick(t0 + Duration::from_secs(5)).await);
        assert_eq!(list.search_text(), "");
        assert_eq!(list.api().queries.lock().len(), 1);

        let ticket = list.begin_load(1);
        assert!(!list.finish_load(&ticket, Ok(page(vec![user(1, "Kim")], 1, 1))));

        list.mount().await;
        assert_eq!(list.api().queries.lock().len(), 2);
        assert!(!list.is_loading());
    }
}
