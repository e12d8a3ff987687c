//! Filter session: staged facet selections, quick-picks, search, and sort.
//!
//! The session distinguishes *applied* selections (what the visible view is
//! filtered by) from *pending* selections (what the user is editing inside an
//! open facet menu). Pending state feeds applied state only on an explicit
//! apply; cancel discards it. At most one facet menu is open at a time, and
//! opening a second implicitly cancels the first.
//!
//! All facets live in one map keyed by [`Column`], so every column shares the
//! same staging, search, and clearing code path.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::catalog::columns::Column;
use crate::catalog::facets::FacetIndex;
use crate::domain::record::Record;

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending, the direction a fresh sort column starts in.
    #[default]
    Ascending,
    /// Descending, reached by re-selecting the active column.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Column the view is ordered by.
    pub column: Column,
    /// Current direction.
    pub direction: SortDirection,
}

/// Applied and pending selections for one column.
///
/// The invariant outside an open menu is `pending == applied`; an open menu
/// mutates `pending` freely and the two reconverge on apply or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetState {
    applied: BTreeSet<String>,
    pending: BTreeSet<String>,
}

impl FacetState {
    /// Selections the view is currently filtered by.
    #[must_use]
    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }

    /// Selections staged in the open menu.
    #[must_use]
    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }
}

/// The per-column filter state machine plus free text, quick-picks, and sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSession {
    facets: BTreeMap<Column, FacetState>,
    open: Option<Column>,
    search: String,
    free_text: String,
    module_pick: Option<String>,
    sub_module_pick: Option<String>,
    sort: Option<SortSpec>,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSession {
    /// Creates a session with no constraints and no open menu.
    #[must_use]
    pub fn new() -> Self {
        let facets = Column::ALL
            .iter()
            .map(|column| (*column, FacetState::default()))
            .collect();
        Self {
            facets,
            open: None,
            search: String::new(),
            free_text: String::new(),
            module_pick: None,
            sub_module_pick: None,
            sort: None,
        }
    }

    fn facet(&self, column: Column) -> &FacetState {
        // `new` seeds every column, so the entry always exists.
        &self.facets[&column]
    }

    fn facet_mut(&mut self, column: Column) -> &mut FacetState {
        self.facets.entry(column).or_default()
    }

    /// Returns the facet state for a column.
    #[must_use]
    pub fn facet_state(&self, column: Column) -> &FacetState {
        self.facet(column)
    }

    /// Returns which menu is open, if any.
    #[must_use]
    pub fn open_menu(&self) -> Option<Column> {
        self.open
    }

    /// The per-facet search term of the open menu.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The free-text term matched across all columns.
    #[must_use]
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// The single-value module quick-pick, if set.
    #[must_use]
    pub fn module_pick(&self) -> Option<&str> {
        self.module_pick.as_deref()
    }

    /// The single-value sub-module quick-pick, if set.
    #[must_use]
    pub fn sub_module_pick(&self) -> Option<&str> {
        self.sub_module_pick.as_deref()
    }

    /// The active sort column and direction, if any.
    #[must_use]
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Opens a column's facet menu.
    ///
    /// Pending selections are seeded from the applied ones and the search term
    /// resets, so the menu always opens showing the current filter truthfully.
    /// If another menu was open its staged edits are discarded, exactly as if
    /// it had been cancelled.
    pub fn open(&mut self, column: Column) {
        if let Some(previous) = self.open.take() {
            if previous != column {
                tracing::debug!(cancelled = previous.key(), "implicit cancel on menu switch");
            }
            let facet = self.facet_mut(previous);
            facet.pending = facet.applied.clone();
        }
        let facet = self.facet_mut(column);
        facet.pending = facet.applied.clone();
        self.search.clear();
        self.open = Some(column);
    }

    /// Closes the open menu, discarding its pending edits.
    pub fn cancel(&mut self) {
        if let Some(column) = self.open.take() {
            let facet = self.facet_mut(column);
            facet.pending = facet.applied.clone();
            self.search.clear();
        }
    }

    /// Commits the open menu's pending selections and closes it.
    ///
    /// Returns the column that was applied, or `None` when no menu was open.
    /// Applying a module or sub-module facet reconciles the matching
    /// quick-pick: it survives only if the applied set is exactly its
    /// singleton, keeping the quick-pick/facet equivalence honest.
    pub fn apply(&mut self) -> Option<Column> {
        let column = self.open.take()?;
        let facet = self.facet_mut(column);
        facet.applied = facet.pending.clone();
        self.search.clear();

        match column {
            Column::Module => {
                let applied = self.facet(Column::Module).applied.clone();
                if self
                    .module_pick
                    .as_ref()
                    .is_some_and(|pick| applied.len() != 1 || !applied.contains(pick))
                {
                    self.module_pick = None;
                }
            }
            Column::SubModule => {
                let applied = self.facet(Column::SubModule).applied.clone();
                if self
                    .sub_module_pick
                    .as_ref()
                    .is_some_and(|pick| applied.len() != 1 || !applied.contains(pick))
                {
                    self.sub_module_pick = None;
                }
            }
            _ => {}
        }

        tracing::debug!(column = column.key(), "applied facet selections");
        Some(column)
    }

    /// Toggles a value in the open menu's pending set.
    ///
    /// Returns `false` when no menu is open.
    pub fn toggle_pending(&mut self, value: &str) -> bool {
        let Some(column) = self.open else {
            return false;
        };
        let pending = &mut self.facet_mut(column).pending;
        if !pending.remove(value) {
            pending.insert(value.to_string());
        }
        true
    }

    /// Sets the open menu's search term.
    pub fn set_search(&mut self, term: &str) {
        if self.open.is_some() {
            self.search = term.to_string();
        }
    }

    /// Returns the open menu's options, narrowed by the search term.
    ///
    /// The search is a case-insensitive substring match against the column's
    /// *unfiltered* base list, so clearing the term restores the exact
    /// original list. No open menu means no options.
    #[must_use]
    pub fn visible_options<'a>(&self, index: &'a FacetIndex) -> Vec<&'a str> {
        let Some(column) = self.open else {
            return Vec::new();
        };
        let needle = self.search.to_lowercase();
        index
            .options(column)
            .iter()
            .filter(|option| needle.is_empty() || option.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Selects every option of the open menu's base list.
    ///
    /// Operates on the full list regardless of the current search narrowing.
    pub fn select_all(&mut self, index: &FacetIndex) {
        let Some(column) = self.open else {
            return;
        };
        let all: BTreeSet<String> = index.options(column).iter().cloned().collect();
        self.facet_mut(column).pending = all;
    }

    /// Clears the open menu's pending selections.
    pub fn deselect_all(&mut self) {
        if let Some(column) = self.open {
            self.facet_mut(column).pending.clear();
        }
    }

    /// Sets or clears the module quick-pick.
    ///
    /// Setting a pick makes the module facet exactly that singleton and clears
    /// the sub-module pick and facet; the caller must recompute the cascade
    /// afterwards. Clearing releases the module constraint entirely.
    pub fn set_module_pick(&mut self, pick: Option<String>) {
        match &pick {
            Some(module) => {
                let singleton: BTreeSet<String> = [module.clone()].into();
                let facet = self.facet_mut(Column::Module);
                facet.applied = singleton.clone();
                facet.pending = singleton;

                self.sub_module_pick = None;
                let sub = self.facet_mut(Column::SubModule);
                sub.applied.clear();
                sub.pending.clear();
            }
            None => {
                let facet = self.facet_mut(Column::Module);
                facet.applied.clear();
                facet.pending.clear();
            }
        }
        self.module_pick = pick;
    }

    /// Sets or clears the sub-module quick-pick.
    pub fn set_sub_module_pick(&mut self, pick: Option<String>) {
        let facet = self.facet_mut(Column::SubModule);
        match &pick {
            Some(sub_module) => {
                let singleton: BTreeSet<String> = [sub_module.clone()].into();
                facet.applied = singleton.clone();
                facet.pending = singleton;
            }
            None => {
                facet.applied.clear();
                facet.pending.clear();
            }
        }
        self.sub_module_pick = pick;
    }

    /// Sets the free-text term matched across every column.
    pub fn set_free_text(&mut self, term: &str) {
        self.free_text = term.to_string();
    }

    /// Drops one column's constraint immediately, applied and pending both.
    ///
    /// For the module and sub-module columns this also releases the matching
    /// quick-pick; a cleared module pick obliges the caller to recompute the
    /// sub-module cascade.
    pub fn clear_column(&mut self, column: Column) {
        let facet = self.facet_mut(column);
        facet.applied.clear();
        facet.pending.clear();
        match column {
            Column::Module => self.module_pick = None,
            Column::SubModule => self.sub_module_pick = None,
            _ => {}
        }
    }

    /// Empties every multi-select facet and the free-text term.
    ///
    /// Quick-picks stay active: their singleton constraints are re-derived so
    /// the quick-pick/facet equivalence holds after the sweep.
    pub fn clear_all(&mut self) {
        for facet in self.facets.values_mut() {
            facet.applied.clear();
            facet.pending.clear();
        }
        self.free_text.clear();

        if let Some(module) = self.module_pick.clone() {
            let singleton: BTreeSet<String> = [module].into();
            let facet = self.facet_mut(Column::Module);
            facet.applied = singleton.clone();
            facet.pending = singleton;
        }
        if let Some(sub_module) = self.sub_module_pick.clone() {
            let singleton: BTreeSet<String> = [sub_module].into();
            let facet = self.facet_mut(Column::SubModule);
            facet.applied = singleton.clone();
            facet.pending = singleton;
        }
    }

    /// Tests a record against the applied constraints.
    ///
    /// Column predicates AND: a record passes a column when the applied set is
    /// empty or contains the record's value. The free-text term, when set,
    /// additionally requires a case-insensitive substring match in at least
    /// one of the columns (OR across columns).
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        for column in Column::ALL {
            let applied = &self.facet(column).applied;
            if !applied.is_empty() && !applied.contains(column.value_of(record)) {
                return false;
            }
        }

        let needle = self.free_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        Column::ALL
            .iter()
            .any(|column| column.value_of(record).to_lowercase().contains(&needle))
    }

    /// Selects a sort column, or flips direction if it is already active.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.column == column => SortSpec {
                column,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec {
                column,
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Sorts records by the active sort spec, lowercased, stably.
    ///
    /// No-op when no sort column has been chosen yet.
    pub fn sort_records(&self, records: &mut [Record]) {
        let Some(spec) = self.sort else {
            return;
        };
        records.sort_by(|a, b| {
            let left = spec.column.value_of(a).to_lowercase();
            let right = spec.column.value_of(b).to_lowercase();
            match spec.direction {
                SortDirection::Ascending => left.cmp(&right),
                SortDirection::Descending => right.cmp(&left),
            }
        });
    }
}
