use std::cmp::Ordering;
use std::collections::HashSet;
use std::rc::Rc;

use crate::api::ListResponse;

use super::filters::FilterSet;

/// Bulk deletes larger than this refetch instead of patching.
pub const DEFAULT_BULK_REFETCH_THRESHOLD: usize = 10;

/// A record identified by an opaque id; every other field is opaque to the
/// reconciler.
pub trait Row: Clone {
    fn id(&self) -> &str;
}

/// The slice of a paginated resource currently held in memory.
///
/// Invariants: `items.len() <= page_size` and
/// `1 <= page_index <= last_page()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
}

pub fn last_page(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

impl<T> PageWindow<T> {
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_index: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    pub fn last_page(&self) -> usize {
        last_page(self.total_count, self.page_size)
    }

    /// Number of rows on the pages before this one.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_sub(1) * self.page_size
    }

    pub fn has_more_beyond(&self) -> bool {
        self.total_count > self.offset() + self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.last_page()
    }

    /// 1-based position range of the visible rows, for "21-40 / 95" labels.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            let start = self.offset() + 1;
            Some((start, start + self.items.len() - 1))
        }
    }
}

impl<T> From<ListResponse<T>> for PageWindow<T> {
    fn from(response: ListResponse<T>) -> Self {
        let page_size = usize::try_from(response.per_page).unwrap_or(0).max(1);
        let mut items = response.items;
        items.truncate(page_size);
        let total_count = usize::try_from(response.total)
            .unwrap_or(0)
            .max(items.len());
        Self {
            items,
            page_index: usize::try_from(response.page).unwrap_or(1).max(1),
            page_size,
            total_count,
        }
    }
}

/// Follow-up the caller must perform after a mutation was applied locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Settled,
    FetchShortfall(ShortfallRequest),
    Refetch { page_index: usize },
}

/// Re-request `page_index` (whose rows shifted left after a delete) and keep
/// the `take` rows found from position `skip` onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortfallRequest {
    pub page_index: usize,
    pub page_size: usize,
    pub skip: usize,
    pub take: usize,
}

pub type RowPredicate<T> = Rc<dyn Fn(&T, &FilterSet) -> bool>;
pub type RowOrder<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

pub struct Reconciler<T> {
    matches: RowPredicate<T>,
    order: RowOrder<T>,
    bulk_threshold: usize,
}

impl<T> Clone for Reconciler<T> {
    fn clone(&self) -> Self {
        Self {
            matches: self.matches.clone(),
            order: self.order.clone(),
            bulk_threshold: self.bulk_threshold,
        }
    }
}

impl<T: Row> Reconciler<T> {
    pub fn new<M, O>(matches: M, order: O) -> Self
    where
        M: Fn(&T, &FilterSet) -> bool + 'static,
        O: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            matches: Rc::new(matches),
            order: Rc::new(order),
            bulk_threshold: DEFAULT_BULK_REFETCH_THRESHOLD,
        }
    }

    pub fn with_bulk_threshold(mut self, threshold: usize) -> Self {
        self.bulk_threshold = threshold;
        self
    }

    pub fn matches(&self, row: &T, filters: &FilterSet) -> bool {
        (self.matches)(row, filters)
    }

    pub fn apply_create(
        &self,
        window: &mut PageWindow<T>,
        filters: &FilterSet,
        row: T,
    ) -> Reconciliation {
        if position_of(window, row.id()).is_some() {
            return self.apply_update(window, filters, row);
        }
        window.total_count += 1;
        if self.matches(&row, filters)
            && window.items.len() < window.page_size
            && self.belongs_on_page(window, &row)
        {
            let at = window
                .items
                .partition_point(|existing| (self.order)(existing, &row) != Ordering::Greater);
            window.items.insert(at, row);
        }
        Reconciliation::Settled
    }

    /// Past the first page, a row sorting before the first visible row lives
    /// on an earlier page.
    fn belongs_on_page(&self, window: &PageWindow<T>, row: &T) -> bool {
        if window.page_index <= 1 {
            return true;
        }
        window
            .items
            .first()
            .is_some_and(|first| (self.order)(first, row) != Ordering::Greater)
    }

    /// The server still holds the row, so `total_count` never changes here.
    pub fn apply_update(
        &self,
        window: &mut PageWindow<T>,
        filters: &FilterSet,
        row: T,
    ) -> Reconciliation {
        if let Some(pos) = position_of(window, row.id()) {
            if self.matches(&row, filters) {
                window.items[pos] = row;
            } else {
                window.items.remove(pos);
            }
        }
        Reconciliation::Settled
    }

    pub fn apply_delete(&self, window: &mut PageWindow<T>, id: &str) -> Reconciliation {
        let removed = match position_of(window, id) {
            Some(pos) => {
                window.items.remove(pos);
                1
            }
            None => 0,
        };
        window.total_count = window.total_count.saturating_sub(1);
        self.settle_after_removal(window, removed)
    }

    pub fn apply_bulk_delete(&self, window: &mut PageWindow<T>, ids: &[String]) -> Reconciliation {
        let distinct: HashSet<&str> = ids.iter().map(String::as_str).collect();
        if distinct.is_empty() {
            return Reconciliation::Settled;
        }
        let before = window.items.len();
        window.items.retain(|row| !distinct.contains(row.id()));
        let removed = before - window.items.len();
        window.total_count = window.total_count.saturating_sub(distinct.len());

        let emptied = before > 0 && window.items.is_empty();
        if distinct.len() > self.bulk_threshold || emptied {
            let mut target = window.page_index;
            if emptied {
                target = target.saturating_sub(1);
            }
            let target = target.clamp(1, window.last_page());
            window.page_index = target;
            return Reconciliation::Refetch { page_index: target };
        }
        self.settle_after_removal(window, removed)
    }

    fn settle_after_removal(&self, window: &mut PageWindow<T>, removed: usize) -> Reconciliation {
        let last = window.last_page();
        if window.page_index > last {
            window.page_index = last;
            return Reconciliation::Refetch { page_index: last };
        }
        if removed > 0 && !window.is_full() && window.has_more_beyond() {
            return Reconciliation::FetchShortfall(ShortfallRequest {
                page_index: window.page_index,
                page_size: window.page_size,
                skip: window.items.len(),
                take: window.page_size - window.items.len(),
            });
        }
        Reconciliation::Settled
    }

    pub fn replace(&self, window: &mut PageWindow<T>, response: ListResponse<T>) {
        *window = PageWindow::from(response);
    }

    /// Appends the rows a shortfall fetch returned. Returns how many were
    /// added; a window that moved to another page is left untouched.
    pub fn fill_shortfall(
        &self,
        window: &mut PageWindow<T>,
        request: &ShortfallRequest,
        fetched: Vec<T>,
    ) -> usize {
        if window.page_index != request.page_index || window.page_size != request.page_size {
            return 0;
        }
        let room = window
            .page_size
            .saturating_sub(window.items.len())
            .min(request.take);
        let present: HashSet<String> = window.items.iter().map(|r| r.id().to_string()).collect();
        let additions: Vec<T> = fetched
            .into_iter()
            .skip(request.skip)
            .filter(|row| !present.contains(row.id()))
            .take(room)
            .collect();
        let added = additions.len();
        window.items.extend(additions);
        added
    }
}

fn position_of<T: Row>(window: &PageWindow<T>, id: &str) -> Option<usize> {
    window.items.iter().position(|row| row.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        rank: u32,
        group: &'static str,
    }

    impl Row for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, rank: u32) -> Item {
        Item {
            id: id.to_string(),
            rank,
            group: "a",
        }
    }

    fn reconciler() -> Reconciler<Item> {
        Reconciler::new(
            |row: &Item, filters: &FilterSet| filters.admits("group", row.group),
            |a: &Item, b: &Item| a.rank.cmp(&b.rank),
        )
        .with_bulk_threshold(3)
    }

    fn window(page_index: usize, page_size: usize, total: usize, ranks: &[u32]) -> PageWindow<Item> {
        PageWindow {
            items: ranks.iter().map(|r| item(&format!("r{}", r), *r)).collect(),
            page_index,
            page_size,
            total_count: total,
        }
    }

    fn ids(window: &PageWindow<Item>) -> Vec<&str> {
        window.items.iter().map(|r| r.id()).collect()
    }

    fn assert_page_in_range(window: &PageWindow<Item>) {
        assert!(window.page_index >= 1);
        assert!(window.page_index <= window.last_page());
        assert!(window.items.len() <= window.page_size);
    }

    #[test]
    fn last_page_is_at_least_one() {
        assert_eq!(last_page(0, 20), 1);
        assert_eq!(last_page(20, 20), 1);
        assert_eq!(last_page(21, 20), 2);
        assert_eq!(last_page(5, 0), 5);
    }

    #[test]
    fn from_list_response_truncates_and_clamps() {
        let response = ListResponse {
            page: 0,
            per_page: 2,
            total: 1,
            items: vec![item("a", 1), item("b", 2), item("c", 3)],
        };
        let window = PageWindow::from(response);
        assert_eq!(window.page_index, 1);
        assert_eq!(window.items.len(), 2);
        assert_eq!(window.total_count, 2);
    }

    #[test]
    fn create_inserts_in_sort_order_when_page_has_room() {
        let mut w = window(1, 5, 3, &[1, 3, 5]);
        let outcome = reconciler().apply_create(&mut w, &FilterSet::new(), item("new", 4));
        assert_eq!(outcome, Reconciliation::Settled);
        assert_eq!(ids(&w), vec!["r1", "r3", "new", "r5"]);
        assert_eq!(w.total_count, 4);
        assert!(w.items.windows(2).all(|p| p[0].rank <= p[1].rank));
    }

    #[test]
    fn create_places_equal_rank_after_existing_rows() {
        let mut w = window(1, 5, 2, &[1, 3]);
        reconciler().apply_create(&mut w, &FilterSet::new(), item("dup", 3));
        assert_eq!(ids(&w), vec!["r1", "r3", "dup"]);
    }

    #[test]
    fn create_on_full_page_only_counts() {
        let mut w = window(1, 2, 2, &[1, 2]);
        reconciler().apply_create(&mut w, &FilterSet::new(), item("new", 0));
        assert_eq!(ids(&w), vec!["r1", "r2"]);
        assert_eq!(w.total_count, 3);
    }

    #[test]
    fn create_sorting_before_a_later_page_only_counts() {
        let mut w = window(2, 5, 8, &[6, 7, 8]);
        reconciler().apply_create(&mut w, &FilterSet::new(), item("early", 2));
        assert_eq!(ids(&w), vec!["r6", "r7", "r8"]);
        assert_eq!(w.total_count, 9);

        reconciler().apply_create(&mut w, &FilterSet::new(), item("late", 7));
        assert_eq!(ids(&w), vec!["r6", "r7", "late", "r8"]);
        assert_eq!(w.total_count, 10);
    }

    #[test]
    fn create_outside_filters_only_counts() {
        let mut w = window(1, 5, 1, &[1]);
        let filters = FilterSet::new().with_scalar("group", "a");
        let mut row = item("other", 2);
        row.group = "b";
        reconciler().apply_create(&mut w, &filters, row);
        assert_eq!(ids(&w), vec!["r1"]);
        assert_eq!(w.total_count, 2);
    }

    #[test]
    fn create_of_known_id_behaves_as_update() {
        let mut w = window(1, 5, 2, &[1, 2]);
        let mut row = item("r2", 2);
        row.group = "a";
        reconciler().apply_create(&mut w, &FilterSet::new(), row);
        assert_eq!(w.total_count, 2);
        assert_eq!(w.items.len(), 2);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut w = window(1, 5, 3, &[1, 2, 3]);
        let mut row = item("r2", 99);
        row.group = "a";
        reconciler().apply_update(&mut w, &FilterSet::new(), row);
        assert_eq!(ids(&w), vec!["r1", "r2", "r3"]);
        assert_eq!(w.items[1].rank, 99);
    }

    #[test]
    fn update_that_leaves_filters_removes_row_but_keeps_count() {
        let mut w = window(1, 5, 3, &[1, 2, 3]);
        let filters = FilterSet::new().with_scalar("group", "a");
        let mut row = item("r2", 2);
        row.group = "b";
        reconciler().apply_update(&mut w, &filters, row);
        assert_eq!(ids(&w), vec!["r1", "r3"]);
        assert_eq!(w.total_count, 3);
    }

    #[test]
    fn update_of_unknown_row_is_ignored() {
        let mut w = window(1, 5, 3, &[1, 2, 3]);
        reconciler().apply_update(&mut w, &FilterSet::new(), item("zz", 0));
        assert_eq!(ids(&w), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn delete_removes_row_and_decrements_total() {
        let mut w = window(1, 5, 3, &[1, 2, 3]);
        let outcome = reconciler().apply_delete(&mut w, "r2");
        assert_eq!(outcome, Reconciliation::Settled);
        assert!(!ids(&w).contains(&"r2"));
        assert_eq!(w.total_count, 2);
    }

    #[test]
    fn delete_requests_exact_shortfall_when_more_rows_exist() {
        let mut w = window(1, 3, 7, &[1, 2, 3]);
        let outcome = reconciler().apply_delete(&mut w, "r1");
        assert_eq!(
            outcome,
            Reconciliation::FetchShortfall(ShortfallRequest {
                page_index: 1,
                page_size: 3,
                skip: 2,
                take: 1,
            })
        );
        assert_eq!(w.total_count, 6);
    }

    #[test]
    fn delete_on_later_page_uses_offset_to_detect_more_rows() {
        // page 2 of 3-row pages holds rows 4..=5 out of 5; nothing lies beyond.
        let mut w = window(2, 3, 5, &[4, 5]);
        let outcome = reconciler().apply_delete(&mut w, "r4");
        assert_eq!(outcome, Reconciliation::Settled);
        assert_eq!(w.total_count, 4);
    }

    #[test]
    fn delete_of_last_row_on_trailing_page_moves_back() {
        let mut w = window(3, 2, 5, &[5]);
        let outcome = reconciler().apply_delete(&mut w, "r5");
        assert_eq!(outcome, Reconciliation::Refetch { page_index: 2 });
        assert_page_in_range(&w);
    }

    #[test]
    fn delete_of_row_not_on_page_still_counts() {
        let mut w = window(1, 3, 4, &[1, 2, 3]);
        let outcome = reconciler().apply_delete(&mut w, "elsewhere");
        assert_eq!(outcome, Reconciliation::Settled);
        assert_eq!(w.total_count, 3);
        assert_eq!(w.items.len(), 3);
    }

    #[test]
    fn fill_shortfall_appends_new_rows_only() {
        let r = reconciler();
        let mut w = window(1, 3, 7, &[1, 2, 3]);
        let outcome = r.apply_delete(&mut w, "r2");
        let Reconciliation::FetchShortfall(request) = outcome else {
            panic!("expected shortfall, got {:?}", outcome);
        };
        let server_page = vec![item("r1", 1), item("r3", 3), item("r4", 4)];
        let added = r.fill_shortfall(&mut w, &request, server_page);
        assert_eq!(added, 1);
        assert_eq!(ids(&w), vec!["r1", "r3", "r4"]);
    }

    #[test]
    fn fill_shortfall_never_duplicates_or_overfills() {
        let r = reconciler();
        let mut w = window(1, 3, 7, &[1, 3]);
        let request = ShortfallRequest {
            page_index: 1,
            page_size: 3,
            skip: 0,
            take: 3,
        };
        let added = r.fill_shortfall(
            &mut w,
            &request,
            vec![item("r1", 1), item("r3", 3), item("r4", 4), item("r5", 5)],
        );
        assert_eq!(added, 1);
        assert_eq!(ids(&w), vec!["r1", "r3", "r4"]);
    }

    #[test]
    fn fill_shortfall_ignores_stale_page() {
        let r = reconciler();
        let mut w = window(2, 3, 9, &[4, 5]);
        let request = ShortfallRequest {
            page_index: 1,
            page_size: 3,
            skip: 2,
            take: 1,
        };
        assert_eq!(r.fill_shortfall(&mut w, &request, vec![item("x", 9)]), 0);
        assert_eq!(w.items.len(), 2);
    }

    #[test]
    fn bulk_delete_within_threshold_patches() {
        let mut w = window(1, 5, 9, &[1, 2, 3, 4, 5]);
        let outcome = reconciler().apply_bulk_delete(&mut w, &["r2".into(), "r4".into()]);
        assert_eq!(ids(&w), vec!["r1", "r3", "r5"]);
        assert_eq!(w.total_count, 7);
        assert_eq!(
            outcome,
            Reconciliation::FetchShortfall(ShortfallRequest {
                page_index: 1,
                page_size: 5,
                skip: 3,
                take: 2,
            })
        );
    }

    #[test]
    fn bulk_delete_deduplicates_ids() {
        let mut w = window(1, 5, 3, &[1, 2, 3]);
        reconciler().apply_bulk_delete(&mut w, &["r1".into(), "r1".into()]);
        assert_eq!(w.total_count, 2);
    }

    #[test]
    fn bulk_delete_over_threshold_refetches_current_page() {
        let mut w = window(2, 5, 20, &[6, 7, 8, 9, 10]);
        let ids: Vec<String> = ["r6", "r7", "r8", "r9"].iter().map(|s| s.to_string()).collect();
        let outcome = reconciler().apply_bulk_delete(&mut w, &ids);
        assert_eq!(outcome, Reconciliation::Refetch { page_index: 2 });
        assert_eq!(w.total_count, 16);
        assert_page_in_range(&w);
    }

    #[test]
    fn bulk_delete_emptying_page_moves_to_previous() {
        let mut w = window(3, 2, 6, &[5, 6]);
        let outcome = reconciler().apply_bulk_delete(&mut w, &["r5".into(), "r6".into()]);
        assert_eq!(outcome, Reconciliation::Refetch { page_index: 2 });
        assert_page_in_range(&w);
    }

    #[test]
    fn bulk_delete_emptying_first_page_stays_on_first() {
        let mut w = window(1, 2, 2, &[1, 2]);
        let outcome = reconciler().apply_bulk_delete(&mut w, &["r1".into(), "r2".into()]);
        assert_eq!(outcome, Reconciliation::Refetch { page_index: 1 });
        assert_eq!(w.total_count, 0);
        assert_page_in_range(&w);
    }

    #[test]
    fn bulk_delete_clamps_to_last_valid_page() {
        // ids from other pages shrink the total so page 4 no longer exists.
        let mut w = window(4, 2, 8, &[7, 8]);
        let ids: Vec<String> = ["r1", "r2", "r3", "r4", "r7"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let outcome = reconciler().apply_bulk_delete(&mut w, &ids);
        assert_eq!(outcome, Reconciliation::Refetch { page_index: 2 });
        assert_page_in_range(&w);
    }

    #[test]
    fn bulk_delete_never_leaves_page_out_of_range() {
        let r = reconciler();
        for total in 0..12usize {
            for page in 1..=last_page(total, 3) {
                let start = (page - 1) * 3 + 1;
                let end = total.min(page * 3);
                let ranks: Vec<u32> = (start..=end).map(|v| v as u32).collect();
                for cut in 0..=ranks.len() {
                    let mut w = window(page, 3, total, &ranks);
                    let ids: Vec<String> =
                        ranks[..cut].iter().map(|r| format!("r{}", r)).collect();
                    r.apply_bulk_delete(&mut w, &ids);
                    assert_page_in_range(&w);
                }
            }
        }
    }
}
