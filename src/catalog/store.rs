//! Authoritative in-memory record list and its filtered view.

use crate::catalog::session::FilterSession;
use crate::domain::error::{CatalogError, Result};
use crate::domain::record::{Record, RecordDraft};

/// The record list and the currently filtered, sorted view of it.
///
/// The store is the single owner of record data inside the core. Writes go
/// through [`add`](Self::add), [`update`](Self::update), and
/// [`delete`](Self::delete); the filtered view is recomputed explicitly via
/// [`refilter`](Self::refilter) after any change to records or filters.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Record>,
    filtered: Vec<Record>,
}

impl CatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole dataset, e.g. after a load completes.
    ///
    /// The filtered view starts as the full list until the next
    /// [`refilter`](Self::refilter).
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.filtered = records.clone();
        self.records = records;
    }

    /// All records, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The current filtered, sorted view.
    #[must_use]
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    /// Whether the filtered view is narrower than the full dataset.
    ///
    /// This is the export-scope test: equal sizes mean "export all".
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filtered.len() < self.records.len()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Whether any record other than `exclude_id` already uses this API value.
    ///
    /// Empty API values never conflict. Comparison is exact; API paths are
    /// case-sensitive identifiers, unlike module names.
    #[must_use]
    pub fn api_exists(&self, api: &str, exclude_id: Option<u64>) -> bool {
        if api.is_empty() {
            return false;
        }
        self.records
            .iter()
            .any(|record| record.api == api && Some(record.id) != exclude_id)
    }

    fn next_id(&self) -> u64 {
        self.records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Appends a new record built from the draft, assigning a fresh id.
    ///
    /// The id is `max(existing ids) + 1`, or `1` for an empty dataset, so ids
    /// of deleted records are never reused while the session runs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateApi`] when the draft's API value is
    /// already taken by another record.
    pub fn add(&mut self, draft: RecordDraft) -> Result<&Record> {
        if self.api_exists(&draft.api, None) {
            return Err(CatalogError::DuplicateApi { api: draft.api });
        }
        let record = draft.into_record(self.next_id());
        tracing::debug!(id = record.id, module = %record.module, "added record");
        self.records.push(record);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Replaces the fields of an existing record, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no record has `id`, or
    /// [`CatalogError::DuplicateApi`] when the draft's API value collides
    /// with a *different* record.
    pub fn update(&mut self, id: u64, draft: RecordDraft) -> Result<&Record> {
        if self.api_exists(&draft.api, Some(id)) {
            return Err(CatalogError::DuplicateApi { api: draft.api });
        }
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(CatalogError::NotFound { id })?;
        self.records[position] = draft.into_record(id);
        tracing::debug!(id, "updated record");
        Ok(&self.records[position])
    }

    /// Removes a record by id, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no record has `id`; the
    /// dataset is left untouched in that case.
    pub fn delete(&mut self, id: u64) -> Result<Record> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(CatalogError::NotFound { id })?;
        let removed = self.records.remove(position);
        tracing::debug!(id, "deleted record");
        Ok(removed)
    }

    /// Recomputes the filtered view from the session's applied constraints.
    ///
    /// Filtering and sorting always run together so the view never shows a
    /// stale ordering after a facet change.
    pub fn refilter(&mut self, session: &FilterSession) {
        self.filtered = self
            .records
            .iter()
            .filter(|record| session.matches(record))
            .cloned()
            .collect();
        session.sort_records(&mut self.filtered);
        tracing::debug!(
            total = self.records.len(),
            visible = self.filtered.len(),
            "recomputed filtered view"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::columns::Column;

    fn draft(module: &str, sub_module: &str, api: &str) -> RecordDraft {
        RecordDraft {
            module: module.to_string(),
            sub_module: sub_module.to_string(),
            api: api.to_string(),
            ..RecordDraft::default()
        }
    }

    fn seeded() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.set_records(vec![
            draft("DIGITAL", "CAD", "/a").into_record(1),
            draft("OPERATION", "VDR", "/b").into_record(5),
        ]);
        store
    }

    #[test]
    fn add_assigns_one_on_empty_then_max_plus_one() {
        let mut store = CatalogStore::new();
        let first = store.add(draft("DIGITAL", "CAD", "/a")).unwrap().id;
        assert_eq!(first, 1);

        let mut store = seeded();
        let next = store.add(draft("DIGITAL", "CAD", "/c")).unwrap().id;
        assert_eq!(next, 6);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = seeded();
        store.delete(5).unwrap();
        // max is now 1, but the next id still must not collide with what the
        // session handed out before; max+1 over the remaining set gives 2,
        // which was never assigned.
        let next = store.add(draft("QUALITY", "NCR", "/c")).unwrap().id;
        assert_eq!(next, 2);
    }

    #[test]
    fn add_rejects_duplicate_api() {
        let mut store = seeded();
        match store.add(draft("QUALITY", "NCR", "/a")) {
            Err(CatalogError::DuplicateApi { api }) => assert_eq!(api, "/a"),
            other => panic!("expected duplicate api, got {other:?}"),
        }
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn empty_api_never_conflicts() {
        let mut store = seeded();
        store.add(draft("QUALITY", "NCR", "")).unwrap();
        store.add(draft("QUALITY", "NCR", "")).unwrap();
        assert_eq!(store.records().len(), 4);
    }

    #[test]
    fn update_keeps_id_and_allows_own_api() {
        let mut store = seeded();
        let updated = store.update(1, draft("DIGITAL", "SUPPORT TICKET", "/a")).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.sub_module, "SUPPORT TICKET");
    }

    #[test]
    fn update_rejects_api_of_other_record() {
        let mut store = seeded();
        match store.update(1, draft("DIGITAL", "CAD", "/b")) {
            Err(CatalogError::DuplicateApi { api }) => assert_eq!(api, "/b"),
            other => panic!("expected duplicate api, got {other:?}"),
        }
    }

    #[test]
    fn delete_missing_id_is_not_found_and_leaves_data() {
        let mut store = seeded();
        match store.delete(99) {
            Err(CatalogError::NotFound { id }) => assert_eq!(id, 99),
            other => panic!("expected not found, got {other:?}"),
        }
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn refilter_applies_session_and_sort() {
        let mut store = seeded();
        let mut session = FilterSession::new();
        session.open(Column::Module);
        session.toggle_pending("DIGITAL");
        session.apply();

        store.refilter(&session);
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].module, "DIGITAL");
        assert!(store.is_filtered());
    }

    #[test]
    fn unfiltered_view_matches_dataset_size() {
        let mut store = seeded();
        store.refilter(&FilterSession::new());
        assert!(!store.is_filtered());
        assert_eq!(store.filtered().len(), store.records().len());
    }
}
