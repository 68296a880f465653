//! Client-side filter and pagination over the request list
//!
//! [`RequestView`] owns the master list. The filtered list is kept as indices
//! into it and the paged list as a range over those indices, so both are pure
//! functions of (master list, selected status, current page) and switching
//! filters or pages never loses records.

use ridedesk_core::utils::page_count;
use ridedesk_core::{RequestRecord, StatusFilter};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// One status tab with its badge count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTab {
    /// Filter the tab applies
    pub filter: StatusFilter,
    /// Tab label
    pub label: &'static str,
    /// Matching records in the master list
    pub count: usize,
    /// Whether this is the active filter
    pub active: bool,
}

/// Master list plus its derived filtered and paged views
#[derive(Debug, Clone)]
pub struct RequestView {
    records: Vec<RequestRecord>,
    selected: StatusFilter,
    filtered: Vec<usize>,
    page_size: NonZeroUsize,
    current_page: usize,
    total_pages: usize,
    page_range: Range<usize>,
}

impl Default for RequestView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl RequestView {
    /// Empty view showing all statuses
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: Vec::new(),
            selected: StatusFilter::All,
            filtered: Vec::new(),
            page_size,
            current_page: 1,
            total_pages: 1,
            page_range: 0..0,
        }
    }

    /// View over `records` showing all statuses
    #[must_use]
    pub fn with_records(records: Vec<RequestRecord>, page_size: NonZeroUsize) -> Self {
        let mut view = Self::new(page_size);
        view.replace_all(records);
        view
    }

    /// Replace the master list and re-apply the selected filter
    pub fn replace_all(&mut self, records: Vec<RequestRecord>) {
        self.records = records;
        self.apply_filter(self.selected);
    }

    /// Select a status, go back to page 1 and recompute both views
    pub fn apply_filter(&mut self, filter: StatusFilter) {
        self.selected = filter;
        self.current_page = 1;

        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record.status))
            .map(|(index, _)| index)
            .collect();

        self.apply_pagination();
    }

    /// [`RequestView::apply_filter`] by key; unrecognized keys select nothing
    pub fn apply_filter_key(&mut self, key: &str) {
        self.apply_filter(StatusFilter::from_key(key));
    }

    /// Recompute page count and the current page slice
    pub fn apply_pagination(&mut self) {
        let size = self.page_size.get();
        self.total_pages = page_count(self.filtered.len(), size);
        self.current_page = self.current_page.clamp(1, self.total_pages);

        let start = ((self.current_page - 1) * size).min(self.filtered.len());
        let end = (start + size).min(self.filtered.len());
        self.page_range = start..end;
    }

    /// Advance one page; `false` when already on the last page
    pub fn next_page(&mut self) -> bool {
        if self.current_page >= self.total_pages {
            return false;
        }
        self.current_page += 1;
        self.apply_pagination();
        true
    }

    /// Go back one page; `false` when already on the first page
    pub fn prev_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        self.apply_pagination();
        true
    }

    /// Jump to `page`, clamped to the valid range; `false` if nothing changed
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages);
        if target == self.current_page {
            return false;
        }
        self.current_page = target;
        self.apply_pagination();
        true
    }

    /// Records in the master list matching `filter`, regardless of the active filter
    #[must_use]
    pub fn count(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.records.len(),
            _ => self
                .records
                .iter()
                .filter(|record| filter.matches(record.status))
                .count(),
        }
    }

    /// The five status tabs with counts from the master list
    #[must_use]
    pub fn status_tabs(&self) -> Vec<StatusTab> {
        StatusFilter::TABS
            .iter()
            .map(|&filter| StatusTab {
                filter,
                label: filter.label(),
                count: self.count(filter),
                active: filter == self.selected,
            })
            .collect()
    }

    /// Apply `update` to the record with `request_id`; `false` if it is not loaded
    ///
    /// Derived views are left as they were; call [`RequestView::refresh`] afterwards.
    pub fn patch<F>(&mut self, request_id: &str, update: F) -> bool
    where
        F: FnOnce(&mut RequestRecord),
    {
        match self.records.iter_mut().find(|r| r.request_id == request_id) {
            Some(record) => {
                update(record);
                true
            }
            None => false,
        }
    }

    /// Re-apply the selected filter (page resets to 1)
    pub fn refresh(&mut self) {
        self.apply_filter(self.selected);
    }

    /// Look up a loaded record
    #[must_use]
    pub fn find(&self, request_id: &str) -> Option<&RequestRecord> {
        self.records.iter().find(|r| r.request_id == request_id)
    }

    /// The master list
    #[must_use]
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    /// Records passing the selected filter, in master-list order
    pub fn filtered(&self) -> impl Iterator<Item = &RequestRecord> {
        self.filtered.iter().filter_map(|&i| self.records.get(i))
    }

    /// Records on the current page
    pub fn paged(&self) -> impl Iterator<Item = &RequestRecord> {
        self.filtered
            .get(self.page_range.clone())
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.records.get(i))
    }

    /// Number of records passing the selected filter
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Number of records on the current page
    #[must_use]
    pub fn paged_len(&self) -> usize {
        self.page_range.len()
    }

    /// Active status filter
    #[must_use]
    pub const fn selected_status(&self) -> StatusFilter {
        self.selected
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Total pages, at least 1
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use ridedesk_core::RequestStatus;

    fn record(id: &str, status: RequestStatus) -> RequestRecord {
        RequestRecord {
            request_id: id.to_string(),
            user_name: format!("user-{id}"),
            status,
            ..RequestRecord::default()
        }
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// 12 records: 5 pending, 4 approved, 3 rejected, interleaved
    fn dozen() -> Vec<RequestRecord> {
        use RequestStatus::{Approved, Pending, Rejected};
        [
            Pending, Approved, Rejected, Pending, Approved, Pending, Rejected, Approved, Pending,
            Rejected, Approved, Pending,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, status)| record(&format!("R{}", i + 1), status))
        .collect()
    }

    fn ids<'a>(records: impl Iterator<Item = &'a RequestRecord>) -> Vec<String> {
        records.map(|r| r.request_id.clone()).collect()
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let view = RequestView::default();
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.paged_len(), 0);
        assert_eq!(view.count(StatusFilter::All), 0);
    }

    #[test]
    fn test_pending_filter_on_a_dozen() {
        let mut view = RequestView::with_records(dozen(), size(10));
        view.apply_filter(StatusFilter::Only(RequestStatus::Pending));

        assert_eq!(view.filtered_len(), 5);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.paged_len(), 5);
        assert_eq!(ids(view.paged()), vec!["R1", "R4", "R6", "R9", "R12"]);
        assert_eq!(view.count(StatusFilter::All), 12);
        assert_eq!(view.count(StatusFilter::Only(RequestStatus::Approved)), 4);
    }

    #[test]
    fn test_all_filter_paginates() {
        let mut view = RequestView::with_records(dozen(), size(10));

        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.paged_len(), 10);
        assert!(view.next_page());
        assert_eq!(ids(view.paged()), vec!["R11", "R12"]);
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 2);
        assert!(view.prev_page());
        assert!(!view.prev_page());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut view = RequestView::with_records(dozen(), size(5));
        assert!(view.next_page());
        assert_eq!(view.current_page(), 2);

        view.apply_filter_key("REJECTED");
        assert_eq!(view.current_page(), 1);
        assert_eq!(ids(view.filtered()), vec!["R3", "R7", "R10"]);
    }

    #[test]
    fn test_unrecognized_key_yields_empty_list() {
        let mut view = RequestView::with_records(dozen(), size(10));
        view.apply_filter_key("ON_HOLD");

        assert_eq!(view.selected_status(), StatusFilter::Unrecognized);
        assert_eq!(view.filtered_len(), 0);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.count(StatusFilter::All), 12);
    }

    #[test]
    fn test_replace_all_keeps_filter() {
        let mut view = RequestView::with_records(dozen(), size(10));
        view.apply_filter(StatusFilter::Only(RequestStatus::Approved));

        view.replace_all(vec![
            record("N1", RequestStatus::Approved),
            record("N2", RequestStatus::Pending),
        ]);

        assert_eq!(view.selected_status(), StatusFilter::Only(RequestStatus::Approved));
        assert_eq!(ids(view.filtered()), vec!["N1"]);
    }

    #[test]
    fn test_patch_then_refresh_drops_record_from_filter() {
        let mut view = RequestView::with_records(dozen(), size(10));
        view.apply_filter(StatusFilter::Only(RequestStatus::Pending));

        assert!(view.patch("R1", |r| {
            r.status = RequestStatus::Rejected;
            r.comments = Some("bad fare".to_string());
        }));
        view.refresh();

        assert_eq!(view.filtered_len(), 4);
        assert!(!ids(view.filtered()).contains(&"R1".to_string()));
        assert_eq!(view.find("R1").unwrap().comments.as_deref(), Some("bad fare"));
        assert!(!view.patch("missing", |r| r.status = RequestStatus::Approved));
    }

    #[test]
    fn test_status_tabs() {
        let mut view = RequestView::with_records(dozen(), size(10));
        view.apply_filter(StatusFilter::Only(RequestStatus::Rejected));

        let tabs = view.status_tabs();
        let summary: Vec<_> = tabs.iter().map(|t| (t.label, t.count, t.active)).collect();
        assert_eq!(
            summary,
            vec![
                ("All", 12, false),
                ("Pending", 5, false),
                ("Approved", 4, false),
                ("Rejected", 3, true),
                ("Cancelled", 0, false),
            ]
        );
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut view = RequestView::with_records(dozen(), size(3));
        assert!(view.go_to_page(99));
        assert_eq!(view.current_page(), 4);
        assert!(!view.go_to_page(4));
        assert!(view.go_to_page(0));
        assert_eq!(view.current_page(), 1);
    }

    fn arb_status() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::Pending),
            Just(RequestStatus::Approved),
            Just(RequestStatus::Rejected),
            Just(RequestStatus::Cancelled),
            Just(RequestStatus::Unknown),
        ]
    }

    fn arb_filter() -> impl Strategy<Value = StatusFilter> {
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Only(RequestStatus::Pending)),
            Just(StatusFilter::Only(RequestStatus::Approved)),
            Just(StatusFilter::Only(RequestStatus::Rejected)),
            Just(StatusFilter::Only(RequestStatus::Cancelled)),
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<RequestRecord>> {
        prop::collection::vec(arb_status(), 0..60).prop_map(|statuses| {
            statuses
                .into_iter()
                .enumerate()
                .map(|(i, status)| record(&format!("R{i}"), status))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn filter_is_stable_and_exact(records in arb_records(), filter in arb_filter()) {
            let mut view = RequestView::with_records(records.clone(), size(10));
            view.apply_filter(filter);

            let expected: Vec<String> = records
                .iter()
                .filter(|r| filter == StatusFilter::All || StatusFilter::Only(r.status) == filter)
                .map(|r| r.request_id.clone())
                .collect();
            prop_assert_eq!(ids(view.filtered()), expected);
        }

        #[test]
        fn total_pages_formula(records in arb_records(), filter in arb_filter(), page_size in 1usize..15) {
            let mut view = RequestView::with_records(records, size(page_size));
            view.apply_filter(filter);

            let len = view.filtered_len();
            prop_assert_eq!(view.total_pages(), std::cmp::max(1, len.div_ceil(page_size)));
        }

        #[test]
        fn pages_reconstruct_filtered_list(records in arb_records(), filter in arb_filter(), page_size in 1usize..15) {
            let mut view = RequestView::with_records(records, size(page_size));
            view.apply_filter(filter);

            let mut concatenated = Vec::new();
            loop {
                prop_assert!(view.paged_len() <= page_size);
                prop_assert!(view.current_page() >= 1 && view.current_page() <= view.total_pages());
                concatenated.extend(ids(view.paged()));
                if !view.next_page() {
                    break;
                }
            }
            prop_assert_eq!(concatenated, ids(view.filtered()));
        }

        #[test]
        fn boundary_moves_are_no_ops(records in arb_records(), page_size in 1usize..15) {
            let mut view = RequestView::with_records(records, size(page_size));

            let before = ids(view.paged());
            prop_assert!(!view.prev_page());
            prop_assert_eq!(view.current_page(), 1);
            prop_assert_eq!(ids(view.paged()), before);

            while view.next_page() {}
            let last = ids(view.paged());
            prop_assert!(!view.next_page());
            prop_assert_eq!(view.current_page(), view.total_pages());
            prop_assert_eq!(ids(view.paged()), last);
        }

        #[test]
        fn counts_ignore_active_filter(
            records in arb_records(),
            active in arb_filter(),
            counted in arb_filter(),
            moves in 0usize..5,
        ) {
            let mut view = RequestView::with_records(records, size(4));
            let before = view.count(counted);

            view.apply_filter(active);
            for _ in 0..moves {
                view.next_page();
            }
            prop_assert_eq!(view.count(counted), before);
        }
    }
}
