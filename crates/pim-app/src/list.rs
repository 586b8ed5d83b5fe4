//! # List Controller
//!
//! Paginated view over the record store, five rows per page.
//!
//! ```text
//! page_count = ceil(total / 5)
//! displayed  = records[(page - 1) * 5 .. min(page * 5, total)]
//! ```
//!
//! The current page is clamped to `[1, page_count]` (page 1 when empty).
//! Any operation that changes the collection, including selection changes,
//! sends the view back to page 1. Requesting an edit does not, since it only
//! touches the edit target.

use pim_core::{PersonRecord, RecordId};
use pim_state::RecordStore;

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

/// Placeholder shown for an unset optional column.
const NOT_AVAILABLE: &str = "N/A";

/// One table row, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub selected: bool,
    /// `"{first} {last}"`.
    pub name: String,
    /// Gender or `N/A`.
    pub gender: String,
    /// Calling code immediately followed by the number.
    pub mobile_phone: String,
    /// Nationality or `N/A`.
    pub nationality: String,
}

impl From<&PersonRecord> for RowView {
    fn from(record: &PersonRecord) -> Self {
        Self {
            id: record.id,
            selected: record.selected,
            name: record.full_name(),
            gender: if record.gender.is_set() {
                record.gender.to_string()
            } else {
                NOT_AVAILABLE.to_string()
            },
            mobile_phone: record.mobile_phone_number.to_string(),
            nationality: record
                .nationality
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// One entry of the page navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

/// Number of pages needed for `total` records.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListController {
    page: usize,
}

impl Default for ListController {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl ListController {
    /// A view on page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Pages needed for the store's records.
    pub fn page_count(&self, store: &RecordStore) -> usize {
        page_count(store.total())
    }

    /// Records on the current page.
    pub fn displayed<'a>(&self, store: &'a RecordStore) -> &'a [PersonRecord] {
        let records = store.records();
        let start = ((self.page - 1) * PAGE_SIZE).min(records.len());
        let end = (self.page * PAGE_SIZE).min(records.len());
        &records[start..end]
    }

    /// Rendered rows for the current page.
    pub fn rows(&self, store: &RecordStore) -> Vec<RowView> {
        self.displayed(store).iter().map(RowView::from).collect()
    }

    /// Navigation entries `1..=page_count`.
    pub fn page_links(&self, store: &RecordStore) -> Vec<PageLink> {
        (1..=self.page_count(store))
            .map(|number| PageLink {
                number,
                active: number == self.page,
            })
            .collect()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Jump to `page`, clamped into range. Returns the page landed on.
    pub fn go_to(&mut self, page: usize, store: &RecordStore) -> usize {
        let last = self.page_count(store).max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    /// Whether PREV is enabled.
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether NEXT is enabled.
    pub fn can_next(&self, store: &RecordStore) -> bool {
        self.page < self.page_count(store)
    }

    /// Go back one page if possible.
    pub fn prev(&mut self, store: &RecordStore) -> usize {
        self.go_to(self.page.saturating_sub(1), store)
    }

    /// Go forward one page if possible.
    pub fn next(&mut self, store: &RecordStore) -> usize {
        self.go_to(self.page + 1, store)
    }

    /// The collection changed: back to page 1.
    pub fn on_collection_changed(&mut self) {
        self.page = 1;
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Toggle one row's checkbox.
    pub fn select_one(&mut self, store: &mut RecordStore, id: RecordId) {
        store.toggle_selected(id);
        self.on_collection_changed();
    }

    /// Check or uncheck every record.
    pub fn select_all(&mut self, store: &mut RecordStore, flag: bool) {
        store.set_all_selected(flag);
        self.on_collection_changed();
    }

    /// Delete one record.
    pub fn delete_one(&mut self, store: &mut RecordStore, id: RecordId) {
        store.remove(id);
        self.on_collection_changed();
    }

    /// Whether bulk delete is enabled: some displayed record is selected.
    pub fn can_delete_selected(&self, store: &RecordStore) -> bool {
        self.displayed(store).iter().any(|r| r.selected)
    }

    /// Delete every selected record, if enabled. Returns whether it ran.
    pub fn delete_selected(&mut self, store: &mut RecordStore) -> bool {
        if !self.can_delete_selected(store) {
            return false;
        }
        store.remove_selected();
        self.on_collection_changed();
        true
    }

    /// Load the full record with `id` into the edit target.
    ///
    /// Returns `false` when no such record exists.
    pub fn request_edit(&self, store: &mut RecordStore, id: RecordId) -> bool {
        match store.get(id).cloned() {
            Some(record) => {
                store.set_edit_target(record);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pim_core::{
        CallingCode, CitizenId, Gender, MobilePhoneNumber, Nationality, PersonDraft, Salary,
        Title,
    };

    fn record(id: u64) -> PersonRecord {
        PersonDraft {
            title: Title::Mr,
            first_name: format!("P{}", "x".repeat(id as usize)),
            last_name: "Row".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1999, 9, 9).unwrap(),
            nationality: None,
            citizen_id: CitizenId::default(),
            gender: Gender::Unset,
            mobile_phone_number: MobilePhoneNumber::new(CallingCode::Thailand, "0811111111")
                .unwrap(),
            passport_number: None,
            salary: Salary::new("1").unwrap(),
        }
        .into_record(RecordId::new(id))
    }

    fn store_of(n: u64) -> RecordStore {
        let mut store = RecordStore::new();
        for id in 1..=n {
            store.create(record(id));
        }
        store
    }

    fn displayed_ids(list: &ListController, store: &RecordStore) -> Vec<u64> {
        list.displayed(store).iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn twelve_records_make_three_pages() {
        let store = store_of(12);
        let mut list = ListController::new();
        assert_eq!(list.page_count(&store), 3);
        assert_eq!(displayed_ids(&list, &store), vec![1, 2, 3, 4, 5]);
        list.go_to(3, &store);
        assert_eq!(displayed_ids(&list, &store), vec![11, 12]);
    }

    #[test]
    fn navigation_clamps_and_disables() {
        let store = store_of(12);
        let mut list = ListController::new();
        assert!(!list.can_prev());
        assert!(list.can_next(&store));
        assert_eq!(list.prev(&store), 1);
        assert_eq!(list.go_to(99, &store), 3);
        assert!(!list.can_next(&store));
        assert_eq!(list.next(&store), 3);
        assert_eq!(list.go_to(0, &store), 1);
    }

    #[test]
    fn empty_store_has_no_pages() {
        let store = RecordStore::new();
        let mut list = ListController::new();
        assert_eq!(list.page_count(&store), 0);
        assert!(list.displayed(&store).is_empty());
        assert!(!list.can_next(&store));
        assert!(!list.can_prev());
        assert_eq!(list.go_to(2, &store), 1);
        assert!(list.page_links(&store).is_empty());
    }

    #[test]
    fn page_links_mark_active() {
        let store = store_of(7);
        let mut list = ListController::new();
        list.next(&store);
        assert_eq!(
            list.page_links(&store),
            vec![
                PageLink { number: 1, active: false },
                PageLink { number: 2, active: true }
            ]
        );
    }

    #[test]
    fn collection_changes_return_to_first_page() {
        let mut store = store_of(12);
        let mut list = ListController::new();
        list.go_to(3, &store);
        list.select_one(&mut store, RecordId::new(11));
        assert_eq!(list.page(), 1);

        list.go_to(2, &store);
        list.delete_one(&mut store, RecordId::new(6));
        assert_eq!(list.page(), 1);
        assert_eq!(store.total(), 11);
    }

    #[test]
    fn request_edit_keeps_page() {
        let mut store = store_of(12);
        let mut list = ListController::new();
        list.go_to(2, &store);
        assert!(list.request_edit(&mut store, RecordId::new(7)));
        assert_eq!(list.page(), 2);
        assert_eq!(
            store.edit_target().record().map(|r| r.id),
            Some(RecordId::new(7))
        );
        assert!(!list.request_edit(&mut store, RecordId::new(70)));
    }

    #[test]
    fn delete_selected_requires_displayed_selection() {
        let mut store = store_of(12);
        let mut list = ListController::new();
        // Selected record lives on page 3; view is back on page 1.
        list.select_one(&mut store, RecordId::new(12));
        assert!(!list.can_delete_selected(&store));
        assert!(!list.delete_selected(&mut store));
        assert_eq!(store.total(), 12);

        list.select_one(&mut store, RecordId::new(2));
        assert!(list.can_delete_selected(&store));
        assert!(list.delete_selected(&mut store));
        let remaining: Vec<u64> = store.records().iter().map(|r| r.id.get()).collect();
        assert_eq!(remaining, vec![1, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn select_all_then_delete_everything() {
        let mut store = store_of(6);
        let mut list = ListController::new();
        list.select_all(&mut store, true);
        assert!(list.delete_selected(&mut store));
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn row_view_columns() {
        let mut r = record(1);
        let row = RowView::from(&r);
        assert_eq!(row.name, "Px Row");
        assert_eq!(row.gender, "N/A");
        assert_eq!(row.nationality, "N/A");
        assert_eq!(row.mobile_phone, "+660811111111");

        r.gender = Gender::Male;
        r.nationality = Some(Nationality::American);
        let row = RowView::from(&r);
        assert_eq!(row.gender, "Male");
        assert_eq!(row.nationality, "American");
    }
}
