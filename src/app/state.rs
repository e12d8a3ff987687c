//! Dashboard state: the record store, filters, overlays, and notices.
//!
//! [`DashboardState`] is the single aggregate the event handler mutates. It
//! owns no I/O; everything effectful leaves as an
//! [`Action`](crate::app::Action) and comes back as an event.

use crate::auth::Role;
use crate::catalog::columns::Column;
use crate::catalog::facets::FacetIndex;
use crate::catalog::session::FilterSession;
use crate::catalog::stats::CatalogStats;
use crate::catalog::store::CatalogStore;
use crate::domain::dictionary::ModuleDictionary;
use crate::domain::normalizer::normalize;
use crate::domain::record::{Record, RecordDraft};
use crate::notify::NoticeBoard;
use crate::overlay::channel::{Outcome, OutcomeReceiver};
use crate::overlay::manager::{OverlayConfig, OverlayHandle, OverlayManager};

/// Width hint used for record form and summary overlays.
const OVERLAY_WIDTH: u16 = 600;

/// Views the overlay manager can host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView {
    /// The add/edit form. `target` is the id being edited, `None` on add.
    RecordForm {
        /// Id of the record being edited, or `None` for a new record.
        target: Option<u64>,
        /// Current form contents.
        draft: RecordDraft,
    },

    /// A read-only record summary.
    RecordSummary {
        /// The record being shown.
        record: Record,
    },

    /// Deletion confirmation prompt.
    ///
    /// The deletion happens only when this overlay is confirmed; dismissing
    /// it leaves the record alone.
    ConfirmDelete {
        /// The record that would be deleted.
        record: Record,
    },
}

/// The whole mutable state of one dashboard session.
pub struct DashboardState {
    /// Records and the filtered view.
    pub store: CatalogStore,

    /// Available options per filterable column.
    pub facets: FacetIndex,

    /// Applied/pending selections, quick-picks, free text, sort.
    pub session: FilterSession,

    /// Aggregate counts over the dataset.
    pub stats: CatalogStats,

    /// Whether the stats panel is collapsed.
    pub stats_collapsed: bool,

    /// Canonical module dictionary.
    pub dictionary: ModuleDictionary,

    /// Open modal presentations.
    pub overlays: OverlayManager<OverlayView, RecordDraft>,

    /// The transient notice slot.
    pub notices: NoticeBoard,

    /// Role of the current user, fixed for the session.
    pub role: Role,

    /// Whether the dictionary load has resolved, successfully or not.
    pub dictionary_loaded: bool,

    /// Whether the backend actually had a dictionary stored.
    pub dictionary_stored: bool,

    /// Whether the record load has resolved, successfully or not.
    pub records_loaded: bool,

    /// Outcome receivers of presentations opened by the handler.
    ///
    /// Drained after every close so finished channels do not accumulate.
    receivers: Vec<OutcomeReceiver<RecordDraft>>,
}

impl DashboardState {
    /// Creates an empty dashboard for the given role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            store: CatalogStore::new(),
            facets: FacetIndex::default(),
            session: FilterSession::new(),
            stats: CatalogStats::default(),
            stats_collapsed: false,
            dictionary: ModuleDictionary::new(),
            overlays: OverlayManager::new(),
            notices: NoticeBoard::new(),
            role,
            dictionary_loaded: false,
            dictionary_stored: false,
            records_loaded: false,
            receivers: Vec::new(),
        }
    }

    /// Recomputes everything derived from records, dictionary, and filters.
    ///
    /// Facet options and stats come from the dataset and the dictionary, the
    /// sub-module cascade follows the module quick-pick, and the filtered
    /// view is recomputed last so it reflects all of it.
    pub fn refresh_derived(&mut self) {
        self.facets = FacetIndex::derive(self.store.records(), &self.dictionary);
        self.facets
            .cascade_sub_modules(self.session.module_pick(), &self.dictionary);
        self.stats = CatalogStats::derive(self.store.records());
        self.store.refilter(&self.session);
    }

    /// Re-normalizes every record against the current dictionary.
    ///
    /// Runs when the dictionary arrives after the records did; the two loads
    /// are not sequenced, so whichever lands second triggers this.
    pub fn renormalize_records(&mut self) {
        let normalized: Vec<Record> = self
            .store
            .records()
            .iter()
            .cloned()
            .map(|record| normalize(record, &self.dictionary))
            .collect();
        self.store.set_records(normalized);
    }

    /// Normalizes a draft's module and sub-module against the dictionary.
    #[must_use]
    pub fn normalize_draft(&self, draft: RecordDraft) -> RecordDraft {
        // The normalizer works on records; the id is irrelevant to it.
        RecordDraft::from(normalize(draft.into_record(0), &self.dictionary))
    }

    /// Presents a view, keeping the outcome receiver for later draining.
    pub fn present_overlay(&mut self, view: OverlayView) -> OverlayHandle {
        let (handle, receiver) = self
            .overlays
            .present(view, OverlayConfig::with_width(OVERLAY_WIDTH));
        self.receivers.push(receiver);
        handle
    }

    /// Takes all delivered overlay outcomes and drops their channels.
    pub fn drain_overlay_outcomes(&mut self) -> Vec<Outcome<RecordDraft>> {
        let mut outcomes = Vec::new();
        self.receivers.retain(|receiver| match receiver.try_take() {
            Some(outcome) => {
                outcomes.push(outcome);
                false
            }
            None => true,
        });
        outcomes
    }

    /// Sets one field of the top overlay's form draft.
    ///
    /// Returns `false` when the top overlay is not a record form.
    pub fn set_form_field(&mut self, column: Column, value: String) -> bool {
        let Some(handle) = self.overlays.top() else {
            return false;
        };
        match self.overlays.view_mut(handle) {
            Some(OverlayView::RecordForm { draft, .. }) => {
                match column {
                    Column::Module => draft.module = value,
                    Column::SubModule => draft.sub_module = value,
                    Column::Functionality => draft.functionality = value,
                    Column::DependencyModule => draft.dependency_module = value,
                    Column::DependantFunctionality => draft.dependant_functionality = value,
                    Column::Api => draft.api = value,
                }
                true
            }
            _ => false,
        }
    }

    /// The top overlay's form contents and edit target, if a form is on top.
    #[must_use]
    pub fn top_form(&self) -> Option<(OverlayHandle, Option<u64>, RecordDraft)> {
        let handle = self.overlays.top()?;
        match self.overlays.view(handle) {
            Some(OverlayView::RecordForm { target, draft }) => {
                Some((handle, *target, draft.clone()))
            }
            _ => None,
        }
    }

    /// The pending deletion target, if a confirmation prompt is on top.
    #[must_use]
    pub fn top_confirm(&self) -> Option<(OverlayHandle, u64)> {
        let handle = self.overlays.top()?;
        match self.overlays.view(handle) {
            Some(OverlayView::ConfirmDelete { record }) => Some((handle, record.id)),
            _ => None,
        }
    }
}
