use std::{future::Future, pin::Pin, rc::Rc};

use leptos::*;

use crate::api::{ApiError, ListResponse};

use super::{
    filters::FilterSet,
    load_state::{FetchGeneration, LoadState, PageQuery},
    window::{PageWindow, Reconciler, Reconciliation, Row, ShortfallRequest},
};

pub type PageFuture<T> = Pin<Box<dyn Future<Output = Result<ListResponse<T>, ApiError>>>>;
pub type PageFetcher<T> = Rc<dyn Fn(PageQuery) -> PageFuture<T>>;

/// Reactive paged list: the page window, its filters and load state, plus the
/// fetcher used for refetches and shortfall fills.
pub struct PagedList<T: 'static> {
    pub window: RwSignal<PageWindow<T>>,
    pub filters: RwSignal<FilterSet>,
    pub state: RwSignal<LoadState>,
    generation: StoredValue<FetchGeneration>,
    last_query: StoredValue<Option<PageQuery>>,
    fetcher: StoredValue<PageFetcher<T>>,
    reconciler: StoredValue<Reconciler<T>>,
}

impl<T: 'static> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for PagedList<T> {}

impl<T: Row + 'static> PagedList<T> {
    pub fn new<F, Fut>(
        page_size: usize,
        filters: FilterSet,
        reconciler: Reconciler<T>,
        fetch: F,
    ) -> Self
    where
        F: Fn(PageQuery) -> Fut + 'static,
        Fut: Future<Output = Result<ListResponse<T>, ApiError>> + 'static,
    {
        let fetcher: PageFetcher<T> = Rc::new(move |query| Box::pin(fetch(query)));
        Self {
            window: create_rw_signal(PageWindow::empty(page_size)),
            filters: create_rw_signal(filters),
            state: create_rw_signal(LoadState::Idle),
            generation: store_value(FetchGeneration::default()),
            last_query: store_value(None),
            fetcher: store_value(fetcher),
            reconciler: store_value(reconciler),
        }
    }

    pub fn query_for(&self, page_index: usize) -> PageQuery {
        PageQuery::new(
            page_index,
            self.window.with_untracked(|w| w.page_size),
            self.filters.get_untracked(),
        )
    }

    /// Starts a fetch of `page_index` with the current filters. Only the most
    /// recently started fetch may write its result.
    pub fn fetch(&self, page_index: usize) {
        self.issue(self.query_for(page_index));
    }

    fn issue(&self, query: PageQuery) {
        self.last_query.set_value(Some(query.clone()));
        let ticket = self.begin_fetch();
        let future = self.fetcher.with_value(|fetch| fetch(query));
        let list = *self;
        spawn_local(async move {
            let result = future.await;
            list.complete_fetch(ticket, result);
        });
    }

    pub(crate) fn begin_fetch(&self) -> u64 {
        let mut ticket = 0;
        self.generation.update_value(|generation| ticket = generation.next());
        self.state.update(LoadState::begin);
        ticket
    }

    /// Applies a fetch result if `ticket` is still the latest. Returns whether
    /// the result was applied.
    pub(crate) fn complete_fetch(
        &self,
        ticket: u64,
        result: Result<ListResponse<T>, ApiError>,
    ) -> bool {
        if !self.generation.with_value(|generation| generation.is_current(ticket)) {
            log::warn!("Discarding stale page response (ticket {})", ticket);
            return false;
        }
        self.state.update(|state| state.finish(&result));
        match result {
            Ok(response) => {
                let reconciler = self.reconciler.get_value();
                self.window
                    .update(|window| reconciler.replace(window, response));
            }
            Err(err) => {
                log::error!("Failed to load page: {}", err);
                self.window.update(|window| {
                    window.items.clear();
                    window.total_count = 0;
                    window.page_index = 1;
                });
            }
        }
        true
    }

    /// Refetches the current page. After a failed load the failed query is
    /// re-issued as is.
    pub fn reload(&self) {
        let failed = self.state.with_untracked(|state| state.error().is_some());
        match self.last_query.get_value() {
            Some(query) if failed => self.issue(query),
            _ => self.fetch(self.window.with_untracked(|w| w.page_index)),
        }
    }

    pub fn go_to(&self, page_index: usize) {
        let last = self.window.with_untracked(|w| w.last_page());
        self.fetch(page_index.clamp(1, last));
    }

    pub fn next_page(&self) {
        self.go_to(self.window.with_untracked(|w| w.page_index) + 1);
    }

    pub fn previous_page(&self) {
        self.go_to(self.window.with_untracked(|w| w.page_index).saturating_sub(1));
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.window.update(|window| {
            window.page_size = page_size.max(1);
            window.page_index = 1;
            window.items.truncate(window.page_size);
        });
        self.fetch(1);
    }

    /// Edits the filters and restarts from the first page.
    pub fn update_filters(&self, edit: impl FnOnce(&mut FilterSet)) {
        self.filters.update(edit);
        self.fetch(1);
    }

    pub fn clear_filters(&self) {
        self.update_filters(FilterSet::clear);
    }

    pub fn last_page(&self) -> Signal<usize> {
        let window = self.window;
        Signal::derive(move || window.with(|w| w.last_page()))
    }

    pub fn apply_create(&self, row: T) {
        let reconciler = self.reconciler.get_value();
        let filters = self.filters.get_untracked();
        let mut outcome = Reconciliation::Settled;
        self.window
            .update(|window| outcome = reconciler.apply_create(window, &filters, row));
        self.follow_up(outcome);
    }

    pub fn apply_update(&self, row: T) {
        let reconciler = self.reconciler.get_value();
        let filters = self.filters.get_untracked();
        let mut outcome = Reconciliation::Settled;
        self.window
            .update(|window| outcome = reconciler.apply_update(window, &filters, row));
        self.follow_up(outcome);
    }

    pub fn apply_delete(&self, id: &str) {
        let reconciler = self.reconciler.get_value();
        let mut outcome = Reconciliation::Settled;
        self.window
            .update(|window| outcome = reconciler.apply_delete(window, id));
        self.follow_up(outcome);
    }

    pub fn apply_bulk_delete(&self, ids: &[String]) {
        let reconciler = self.reconciler.get_value();
        let mut outcome = Reconciliation::Settled;
        self.window
            .update(|window| outcome = reconciler.apply_bulk_delete(window, ids));
        self.follow_up(outcome);
    }

    pub fn follow_up(&self, outcome: Reconciliation) {
        log::debug!("Reconciliation outcome: {:?}", outcome);
        match outcome {
            Reconciliation::Settled => {}
            Reconciliation::Refetch { page_index } => self.fetch(page_index),
            Reconciliation::FetchShortfall(request) => self.fetch_shortfall(request),
        }
    }

    fn fetch_shortfall(&self, request: ShortfallRequest) {
        let query = PageQuery::new(
            request.page_index,
            request.page_size,
            self.filters.get_untracked(),
        );
        let ticket = self.generation.with_value(FetchGeneration::current);
        let future = self.fetcher.with_value(|fetch| fetch(query));
        let list = *self;
        spawn_local(async move {
            let result = future.await;
            list.complete_shortfall(ticket, &request, result);
        });
    }

    /// A shortfall fill never overrides a newer page fetch, and a failed one
    /// keeps the under-filled page.
    pub(crate) fn complete_shortfall(
        &self,
        ticket: u64,
        request: &ShortfallRequest,
        result: Result<ListResponse<T>, ApiError>,
    ) -> usize {
        if !self.generation.with_value(|generation| generation.is_current(ticket)) {
            log::warn!("Discarding shortfall rows for a superseded page");
            return 0;
        }
        match result {
            Ok(response) => {
                let reconciler = self.reconciler.get_value();
                let mut added = 0;
                self.window.update(|window| {
                    added = reconciler.fill_shortfall(window, request, response.items)
                });
                added
            }
            Err(err) => {
                log::warn!("Shortfall fetch failed, keeping short page: {}", err);
                0
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        rank: u32,
    }

    impl Row for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(rank: u32) -> Item {
        Item {
            id: format!("i{}", rank),
            rank,
        }
    }

    fn response(page: i64, per_page: i64, total: i64, ranks: &[u32]) -> ListResponse<Item> {
        ListResponse {
            page,
            per_page,
            total,
            items: ranks.iter().copied().map(item).collect(),
        }
    }

    fn list() -> PagedList<Item> {
        PagedList::new(
            3,
            FilterSet::new(),
            Reconciler::new(|_: &Item, _: &FilterSet| true, |a: &Item, b: &Item| {
                a.rank.cmp(&b.rank)
            }),
            |_query| async { Err(ApiError::request_failed("offline")) },
        )
    }

    /// A list whose fetcher fails and records every requested page index.
    fn recording_list() -> (PagedList<Item>, Rc<RefCell<Vec<usize>>>) {
        let issued = Rc::new(RefCell::new(Vec::new()));
        let log = issued.clone();
        let list = PagedList::new(
            3,
            FilterSet::new(),
            Reconciler::new(|_: &Item, _: &FilterSet| true, |a: &Item, b: &Item| {
                a.rank.cmp(&b.rank)
            }),
            move |query: PageQuery| {
                log.borrow_mut().push(query.page_index);
                async { Err(ApiError::request_failed("offline")) }
            },
        );
        (list, issued)
    }

    fn seed(list: &PagedList<Item>, page: i64, ranks: &[u32]) {
        list.window.set(PageWindow::from(response(page, 3, 30, ranks)));
    }

    #[test]
    fn retry_after_failure_reissues_failed_page() {
        with_local_runtime_async(|| async {
            let (list, issued) = recording_list();
            seed(&list, 3, &[7, 8, 9]);
            list.next_page();
            assert!(wait_until(|| list.state.get_untracked().error().is_some()).await);
            assert_eq!(list.window.get_untracked().page_index, 1);

            list.reload();
            assert_eq!(*issued.borrow(), vec![4, 4]);
        });
    }

    #[test]
    fn reload_without_failure_refetches_current_page() {
        with_local_runtime_async(|| async {
            let (list, issued) = recording_list();
            seed(&list, 2, &[4, 5, 6]);
            list.reload();
            assert_eq!(*issued.borrow(), vec![2]);
        });
    }

    #[test]
    fn filter_and_page_size_changes_restart_at_first_page() {
        with_local_runtime_async(|| async {
            let (list, issued) = recording_list();
            seed(&list, 3, &[7, 8, 9]);
            list.update_filters(|filters| filters.set_scalar("search", "山田"));
            assert_eq!(list.query_for(1).filters.to_query().len(), 1);

            seed(&list, 3, &[7, 8, 9]);
            list.clear_filters();
            assert!(list.filters.get_untracked().to_query().is_empty());

            seed(&list, 3, &[7, 8, 9]);
            list.set_page_size(2);
            assert_eq!(*issued.borrow(), vec![1, 1, 1]);
        });
    }

    #[test]
    fn shrinking_page_size_keeps_items_within_page() {
        with_local_runtime_async(|| async {
            let (list, _issued) = recording_list();
            list.window.set(PageWindow::from(response(1, 5, 5, &[1, 2, 3, 4, 5])));
            list.set_page_size(2);
            let window = list.window.get_untracked();
            assert_eq!(window.page_size, 2);
            assert!(window.items.len() <= window.page_size);
        });
    }

    #[test]
    fn go_to_clamps_to_valid_pages() {
        with_local_runtime_async(|| async {
            let (list, issued) = recording_list();
            seed(&list, 2, &[4, 5, 6]);
            list.go_to(99);
            list.go_to(0);
            assert_eq!(*issued.borrow(), vec![10, 1]);
        });
    }

    #[test]
    fn stale_fetch_result_is_discarded() {
        with_runtime(|| {
            let list = list();
            let first = list.begin_fetch();
            let second = list.begin_fetch();

            assert!(list.complete_fetch(second, Ok(response(2, 3, 9, &[4, 5, 6]))));
            assert!(!list.complete_fetch(first, Ok(response(1, 3, 9, &[1, 2, 3]))));

            let window = list.window.get_untracked();
            assert_eq!(window.page_index, 2);
            assert_eq!(window.items[0].rank, 4);
            assert_eq!(list.state.get_untracked(), LoadState::Idle);
        });
    }

    #[test]
    fn failed_fetch_enters_error_state_with_empty_window() {
        with_runtime(|| {
            let list = list();
            let ticket = list.begin_fetch();
            assert!(list.state.get_untracked().is_loading());
            list.complete_fetch(ticket, Err(ApiError::request_failed("down")));

            assert!(list.state.get_untracked().error().is_some());
            assert!(list.window.get_untracked().items.is_empty());
        });
    }

    #[test]
    fn shortfall_fill_appends_shifted_row() {
        with_runtime(|| {
            let list = list();
            let ticket = list.begin_fetch();
            list.complete_fetch(ticket, Ok(response(1, 3, 5, &[1, 2, 3])));

            let reconciler = list.reconciler.get_value();
            let mut outcome = Reconciliation::Settled;
            list.window
                .update(|w| outcome = reconciler.apply_delete(w, "i2"));
            let Reconciliation::FetchShortfall(request) = outcome else {
                panic!("expected shortfall, got {:?}", outcome);
            };

            let added = list.complete_shortfall(
                ticket,
                &request,
                Ok(response(1, 3, 4, &[1, 3, 4])),
            );
            assert_eq!(added, 1);
            let ranks: Vec<u32> = list
                .window
                .get_untracked()
                .items
                .iter()
                .map(|i| i.rank)
                .collect();
            assert_eq!(ranks, vec![1, 3, 4]);
        });
    }

    #[test]
    fn shortfall_failure_keeps_short_page() {
        with_runtime(|| {
            let list = list();
            let ticket = list.begin_fetch();
            list.complete_fetch(ticket, Ok(response(1, 3, 2, &[1, 3])));
            let request = ShortfallRequest {
                page_index: 1,
                page_size: 3,
                skip: 2,
                take: 1,
            };
            let added =
                list.complete_shortfall(ticket, &request, Err(ApiError::request_failed("x")));
            assert_eq!(added, 0);
            assert_eq!(list.window.get_untracked().items.len(), 2);
            assert_eq!(list.state.get_untracked(), LoadState::Idle);
        });
    }

    #[test]
    fn shortfall_after_newer_fetch_is_ignored() {
        with_runtime(|| {
            let list = list();
            let old = list.begin_fetch();
            list.complete_fetch(old, Ok(response(1, 3, 5, &[1, 3])));
            let newer = list.begin_fetch();
            list.complete_fetch(newer, Ok(response(2, 3, 5, &[4, 5])));

            let request = ShortfallRequest {
                page_index: 1,
                page_size: 3,
                skip: 2,
                take: 1,
            };
            let added = list.complete_shortfall(old, &request, Ok(response(1, 3, 5, &[1, 3, 4])));
            assert_eq!(added, 0);
            assert_eq!(list.window.get_untracked().page_index, 2);
        });
    }
}
