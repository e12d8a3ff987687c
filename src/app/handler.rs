//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and worker responses, translating them into state changes and action
//! sequences. It is the primary control flow coordinator of the dashboard.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host or the catalog worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `DashboardState` methods
//! 4. Actions are collected and returned for execution
//!
//! Failures never escape: validation, role, and transport errors all end as
//! transient notices while the session keeps running.

use crate::app::actions::Action;
use crate::app::state::{DashboardState, OverlayView};
use crate::auth::{AuthGate, StaticAuthGate};
use crate::catalog::columns::Column;
use crate::domain::dictionary::ModuleDictionary;
use crate::domain::error::Result;
use crate::domain::record::RecordDraft;
use crate::export::ExportScope;
use crate::worker::{RepoOperation, RepoRequest, RepoResponse};

/// Events triggered by user input or worker responses.
///
/// Each event is a discrete occurrence processed serially, so state
/// transitions are deterministic and never concurrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The dashboard just came up; kicks off the initial loads.
    Started,

    /// Opens a column's facet menu, implicitly cancelling any open one.
    FacetMenuOpened(Column),
    /// Toggles a value in the open menu's pending set.
    FacetValueToggled(String),
    /// Updates the open menu's search term.
    FacetSearchChanged(String),
    /// Stages every option of the open menu's base list.
    FacetSelectAll,
    /// Clears the open menu's pending set.
    FacetDeselectAll,
    /// Commits the open menu's pending selections.
    FacetApplied,
    /// Discards the open menu's pending selections.
    FacetCancelled,

    /// Sets or clears the single-value module quick-pick.
    ModulePicked(Option<String>),
    /// Sets or clears the single-value sub-module quick-pick.
    SubModulePicked(Option<String>),
    /// Updates the free-text term matched across all columns.
    FreeTextChanged(String),
    /// Drops one column's constraint immediately.
    ColumnCleared(Column),
    /// Empties every facet and the free-text term, keeping quick-picks.
    AllFiltersCleared,
    /// Selects a sort column, flipping direction if already active.
    SortToggled(Column),

    /// Opens the record form for a new record. Admin only.
    AddRequested,
    /// Opens the record form pre-filled with an existing record. Admin only.
    EditRequested {
        /// Id of the record to edit.
        id: u64,
    },
    /// Opens a read-only summary of a record.
    SummaryRequested {
        /// Id of the record to show.
        id: u64,
    },
    /// Edits one field of the open record form.
    FormFieldChanged {
        /// Which field changed.
        column: Column,
        /// New value.
        value: String,
    },
    /// Submits the open record form.
    FormSubmitted,
    /// Escape or an outside click; dismisses the top overlay.
    OverlayDismissed,

    /// Opens the deletion confirmation prompt for a record. Admin only.
    DeleteRequested {
        /// Id of the record to delete.
        id: u64,
    },
    /// Confirms the open deletion prompt; this is what actually deletes.
    DeleteConfirmed,
    /// Collapses or expands the stats panel.
    StatsToggled,
    /// Exports the catalog (all or filtered, decided here). Admin only.
    ExportRequested,
    /// Dismisses the current notice early.
    NoticeDismissed,

    /// Wraps a completion from the catalog worker.
    WorkerResponse(RepoResponse),
}

/// Processes an event, mutates the dashboard state, and returns actions.
///
/// Returns whether the host should re-render, plus the actions to execute in
/// sequence. Gated events are checked against the state's role before any
/// action is emitted.
///
/// # Errors
///
/// Reserved for host-level failures; every catalog-level error is recovered
/// into a notice and an `Ok` return.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut DashboardState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Started => Ok((
            false,
            vec![
                Action::PostToWorker(RepoRequest::LoadDictionary),
                Action::PostToWorker(RepoRequest::LoadRecords),
            ],
        )),

        Event::FacetMenuOpened(column) => {
            state.session.open(*column);
            Ok((true, vec![]))
        }
        Event::FacetValueToggled(value) => {
            let toggled = state.session.toggle_pending(value);
            Ok((toggled, vec![]))
        }
        Event::FacetSearchChanged(term) => {
            state.session.set_search(term);
            Ok((true, vec![]))
        }
        Event::FacetSelectAll => {
            state.session.select_all(&state.facets);
            Ok((true, vec![]))
        }
        Event::FacetDeselectAll => {
            state.session.deselect_all();
            Ok((true, vec![]))
        }
        Event::FacetApplied => {
            if state.session.apply().is_some() {
                // An applied module facet may have released the quick-pick,
                // so the cascade has to be recomputed before refiltering.
                state
                    .facets
                    .cascade_sub_modules(state.session.module_pick(), &state.dictionary);
                state.store.refilter(&state.session);
            }
            Ok((true, vec![]))
        }
        Event::FacetCancelled => {
            state.session.cancel();
            Ok((true, vec![]))
        }

        Event::ModulePicked(pick) => {
            state.session.set_module_pick(pick.clone());
            state
                .facets
                .cascade_sub_modules(state.session.module_pick(), &state.dictionary);
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }
        Event::SubModulePicked(pick) => {
            state.session.set_sub_module_pick(pick.clone());
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }
        Event::FreeTextChanged(term) => {
            state.session.set_free_text(term);
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }
        Event::ColumnCleared(column) => {
            state.session.clear_column(*column);
            state
                .facets
                .cascade_sub_modules(state.session.module_pick(), &state.dictionary);
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }
        Event::AllFiltersCleared => {
            state.session.clear_all();
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }
        Event::SortToggled(column) => {
            state.session.toggle_sort(*column);
            state.store.refilter(&state.session);
            Ok((true, vec![]))
        }

        Event::AddRequested => {
            if let Err(e) = gate(state).ensure_admin("add") {
                state.notices.error(e.to_string());
                return Ok((true, vec![]));
            }
            state.present_overlay(OverlayView::RecordForm {
                target: None,
                draft: RecordDraft::default(),
            });
            Ok((true, vec![]))
        }
        Event::EditRequested { id } => {
            if let Err(e) = gate(state).ensure_admin("edit") {
                state.notices.error(e.to_string());
                return Ok((true, vec![]));
            }
            let Some(record) = state.store.get(*id).cloned() else {
                state.notices.error(format!("record not found: {id}"));
                return Ok((true, vec![]));
            };
            state.present_overlay(OverlayView::RecordForm {
                target: Some(*id),
                draft: RecordDraft::from(record),
            });
            Ok((true, vec![]))
        }
        Event::SummaryRequested { id } => {
            let Some(record) = state.store.get(*id).cloned() else {
                state.notices.error(format!("record not found: {id}"));
                return Ok((true, vec![]));
            };
            state.present_overlay(OverlayView::RecordSummary { record });
            Ok((true, vec![]))
        }
        Event::FormFieldChanged { column, value } => {
            let changed = state.set_form_field(*column, value.clone());
            Ok((changed, vec![]))
        }
        Event::FormSubmitted => submit_form(state),
        Event::OverlayDismissed => {
            if state.overlays.dismiss_top() {
                for outcome in state.drain_overlay_outcomes() {
                    tracing::debug!(outcome = ?outcome, "overlay finished");
                }
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }

        Event::DeleteRequested { id } => {
            if let Err(e) = gate(state).ensure_admin("delete") {
                state.notices.error(e.to_string());
                return Ok((true, vec![]));
            }
            let Some(record) = state.store.get(*id).cloned() else {
                state.notices.error(format!("record not found: {id}"));
                return Ok((true, vec![]));
            };
            state.present_overlay(OverlayView::ConfirmDelete { record });
            Ok((true, vec![]))
        }
        Event::DeleteConfirmed => confirm_delete(state),
        Event::StatsToggled => {
            state.stats_collapsed = !state.stats_collapsed;
            Ok((true, vec![]))
        }
        Event::ExportRequested => {
            if let Err(e) = gate(state).ensure_admin("export") {
                state.notices.error(e.to_string());
                return Ok((true, vec![]));
            }
            let scope =
                ExportScope::choose(state.store.filtered().len(), state.store.records().len());
            let records = match scope {
                ExportScope::All => state.store.records().to_vec(),
                ExportScope::Filtered => state.store.filtered().to_vec(),
            };
            tracing::debug!(scope = ?scope, count = records.len(), "export requested");
            Ok((
                false,
                vec![Action::PostToWorker(RepoRequest::Export { records })],
            ))
        }
        Event::NoticeDismissed => {
            state.notices.dismiss();
            Ok((true, vec![]))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn gate(state: &DashboardState) -> StaticAuthGate {
    StaticAuthGate::new(state.role)
}

/// Validates, normalizes, and merges the open record form.
fn submit_form(state: &mut DashboardState) -> Result<(bool, Vec<Action>)> {
    let Some((handle, target, draft)) = state.top_form() else {
        tracing::debug!("submit without an open form");
        return Ok((false, vec![]));
    };

    if let Err(e) = draft.validate() {
        // The form stays open so the user can fix the field.
        state.notices.error(e.to_string());
        return Ok((true, vec![]));
    }
    let draft = state.normalize_draft(draft);

    let merged = match target {
        Some(id) => state.store.update(id, draft.clone()).map(Clone::clone),
        None => state.store.add(draft.clone()).map(Clone::clone),
    };

    match merged {
        Ok(record) => {
            state.overlays.close(handle, Some(draft));
            for outcome in state.drain_overlay_outcomes() {
                tracing::debug!(outcome = ?outcome, "overlay finished");
            }

            let mut actions = Vec::new();
            let unknown_module = state.dictionary.canonical_module(&record.module).is_none();
            let unknown_sub_module = !record.sub_module.is_empty()
                && state
                    .dictionary
                    .canonical_sub_module(&record.module, &record.sub_module)
                    .is_none();
            if unknown_module || unknown_sub_module {
                state.dictionary.absorb(state.store.records());
                actions.push(Action::PostToWorker(RepoRequest::SaveDictionary {
                    dictionary: state.dictionary.clone(),
                }));
            }

            state.refresh_derived();
            actions.push(Action::PostToWorker(RepoRequest::SaveRecords {
                records: state.store.records().to_vec(),
            }));
            state.notices.info(if target.is_some() {
                "Record updated"
            } else {
                "Record added"
            });
            Ok((true, actions))
        }
        Err(e) => {
            state.notices.error(e.to_string());
            Ok((true, vec![]))
        }
    }
}

/// Performs the deletion the open confirmation prompt is guarding.
fn confirm_delete(state: &mut DashboardState) -> Result<(bool, Vec<Action>)> {
    let Some((handle, id)) = state.top_confirm() else {
        tracing::debug!("confirm without an open prompt");
        return Ok((false, vec![]));
    };

    match state.store.delete(id) {
        Ok(removed) => {
            tracing::debug!(id = removed.id, module = %removed.module, "record removed");
            state.overlays.close(handle, Some(RecordDraft::from(removed)));
            for outcome in state.drain_overlay_outcomes() {
                tracing::debug!(outcome = ?outcome, "overlay finished");
            }
            state.refresh_derived();
            state.notices.info("Record deleted");
            Ok((
                true,
                vec![Action::PostToWorker(RepoRequest::SaveRecords {
                    records: state.store.records().to_vec(),
                })],
            ))
        }
        Err(e) => {
            state.overlays.close(handle, None);
            state.drain_overlay_outcomes();
            state.notices.error(e.to_string());
            Ok((true, vec![]))
        }
    }
}

/// Folds a worker completion back into the dashboard.
fn handle_worker_response(
    state: &mut DashboardState,
    response: &RepoResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        RepoResponse::DictionaryLoaded { dictionary } => {
            state.dictionary_loaded = true;
            if let Some(dictionary) = dictionary {
                state.dictionary = dictionary.clone();
                state.dictionary_stored = true;
                state.renormalize_records();
            }
            let actions = reconcile_loads(state);
            state.refresh_derived();
            Ok((true, actions))
        }
        RepoResponse::RecordsLoaded { records } => {
            state.records_loaded = true;
            state.store.set_records(records.clone());
            state.renormalize_records();
            let actions = reconcile_loads(state);
            state.refresh_derived();
            Ok((true, actions))
        }
        RepoResponse::RecordsSaved { count } => {
            tracing::debug!(count, "records persisted");
            Ok((false, vec![]))
        }
        RepoResponse::DictionarySaved { modules } => {
            tracing::debug!(modules, "dictionary persisted");
            Ok((false, vec![]))
        }
        RepoResponse::Exported { bytes, extension } => {
            state.notices.info("Export ready");
            Ok((
                true,
                vec![Action::DownloadFile {
                    name: format!("dependency-catalog.{extension}"),
                    bytes: bytes.clone(),
                }],
            ))
        }
        RepoResponse::Failed { operation, message } => {
            tracing::error!(operation = operation.as_str(), %message, "worker failure");
            state.notices.error(message.clone());
            let mut actions = Vec::new();
            match operation {
                RepoOperation::LoadDictionary => {
                    // Fall back to deriving from whatever records we have.
                    state.dictionary_loaded = true;
                    actions = reconcile_loads(state);
                    state.refresh_derived();
                }
                RepoOperation::LoadRecords => {
                    state.records_loaded = true;
                    state.store.set_records(Vec::new());
                    actions = reconcile_loads(state);
                    state.refresh_derived();
                }
                RepoOperation::SaveRecords
                | RepoOperation::SaveDictionary
                | RepoOperation::Export => {}
            }
            Ok((true, actions))
        }
    }
}

/// Runs once both startup loads have resolved, in whatever order.
///
/// When the backend stored no dictionary, one is derived from the dataset
/// and queued for persistence, so the next startup finds it authoritative.
fn reconcile_loads(state: &mut DashboardState) -> Vec<Action> {
    if !(state.dictionary_loaded && state.records_loaded) || state.dictionary_stored {
        return Vec::new();
    }
    state.dictionary = ModuleDictionary::derive_from(state.store.records());
    state.dictionary_stored = true;
    tracing::debug!(
        modules = state.dictionary.len(),
        "derived dictionary from dataset"
    );
    vec![Action::PostToWorker(RepoRequest::SaveDictionary {
        dictionary: state.dictionary.clone(),
    })]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::auth::Role;
    use crate::domain::dictionary::ModuleDictionary;
    use crate::domain::record::Record;

    fn record(id: u64, module: &str, sub_module: &str, api: &str) -> Record {
        Record {
            id,
            module: module.to_string(),
            sub_module: sub_module.to_string(),
            functionality: String::new(),
            dependency_module: String::new(),
            dependant_functionality: String::new(),
            api: api.to_string(),
        }
    }

    fn dictionary() -> ModuleDictionary {
        let mut entries = BTreeMap::new();
        entries.insert(
            "DIGITAL".to_string(),
            vec!["CAD".to_string(), "SUPPORT TICKET".to_string()],
        );
        ModuleDictionary::from_entries(entries)
    }

    fn dispatch(state: &mut DashboardState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn loaded_admin_state(records: Vec<Record>) -> DashboardState {
        let mut state = DashboardState::new(Role::Admin);
        dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::DictionaryLoaded {
                dictionary: Some(dictionary()),
            }),
        );
        dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::RecordsLoaded { records }),
        );
        state
    }

    #[test]
    fn startup_issues_both_loads() {
        let mut state = DashboardState::new(Role::Viewer);
        let (_, actions) = dispatch(&mut state, Event::Started);
        assert_eq!(
            actions,
            vec![
                Action::PostToWorker(RepoRequest::LoadDictionary),
                Action::PostToWorker(RepoRequest::LoadRecords),
            ]
        );
    }

    #[test]
    fn load_order_does_not_change_the_result() {
        let records = vec![record(1, "digital", "cad", "/x")];

        let dict_first = loaded_admin_state(records.clone());

        let mut records_first = DashboardState::new(Role::Admin);
        dispatch(
            &mut records_first,
            Event::WorkerResponse(RepoResponse::RecordsLoaded { records }),
        );
        dispatch(
            &mut records_first,
            Event::WorkerResponse(RepoResponse::DictionaryLoaded {
                dictionary: Some(dictionary()),
            }),
        );

        assert_eq!(dict_first.store.records(), records_first.store.records());
        assert_eq!(dict_first.store.records()[0].module, "DIGITAL");
        assert_eq!(dict_first.store.records()[0].sub_module, "CAD");
    }

    #[test]
    fn missing_dictionary_is_derived_and_persisted() {
        let mut state = DashboardState::new(Role::Admin);
        dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::DictionaryLoaded { dictionary: None }),
        );
        let (_, actions) = dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::RecordsLoaded {
                records: vec![record(1, "DIGITAL", "CAD", "/x")],
            }),
        );

        assert_eq!(state.dictionary.modules(), vec!["DIGITAL"]);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(RepoRequest::SaveDictionary {
                dictionary: state.dictionary.clone(),
            })]
        );
    }

    #[test]
    fn failed_record_load_falls_back_to_empty_with_notice() {
        let mut state = DashboardState::new(Role::Viewer);
        dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::DictionaryLoaded { dictionary: None }),
        );
        dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::Failed {
                operation: RepoOperation::LoadRecords,
                message: "disk gone".to_string(),
            }),
        );

        assert!(state.store.records().is_empty());
        let notice = state.notices.current(chrono::Utc::now()).cloned();
        assert_eq!(notice.map(|n| n.text), Some("disk gone".to_string()));
    }

    #[test]
    fn module_selection_filters_per_the_dictionary() {
        let mut state = loaded_admin_state(vec![record(1, "digital", "CAD", "/x")]);

        dispatch(&mut state, Event::FacetMenuOpened(Column::Module));
        dispatch(&mut state, Event::FacetValueToggled("DIGITAL".to_string()));
        dispatch(&mut state, Event::FacetApplied);
        assert_eq!(state.store.filtered().len(), 1);

        dispatch(&mut state, Event::FacetMenuOpened(Column::Module));
        dispatch(&mut state, Event::FacetDeselectAll);
        dispatch(&mut state, Event::FacetValueToggled("OPERATION".to_string()));
        dispatch(&mut state, Event::FacetApplied);
        assert!(state.store.filtered().is_empty());
    }

    #[test]
    fn module_pick_cascades_sub_module_options() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);

        dispatch(&mut state, Event::ModulePicked(Some("DIGITAL".to_string())));
        assert_eq!(
            state.facets.options(Column::SubModule),
            &["CAD".to_string(), "SUPPORT TICKET".to_string()]
        );

        dispatch(&mut state, Event::ModulePicked(None));
        assert_eq!(
            state.facets.options(Column::SubModule),
            &["CAD".to_string(), "SUPPORT TICKET".to_string()]
        );
    }

    #[test]
    fn submitted_form_normalizes_saves_and_closes() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);

        dispatch(&mut state, Event::AddRequested);
        dispatch(
            &mut state,
            Event::FormFieldChanged {
                column: Column::Module,
                value: "digital".to_string(),
            },
        );
        dispatch(
            &mut state,
            Event::FormFieldChanged {
                column: Column::SubModule,
                value: "support ticket".to_string(),
            },
        );
        let (_, actions) = dispatch(&mut state, Event::FormSubmitted);

        assert!(state.overlays.is_empty());
        assert_eq!(state.store.records().len(), 2);
        let added = &state.store.records()[1];
        assert_eq!(added.id, 2);
        assert_eq!(added.module, "DIGITAL");
        assert_eq!(added.sub_module, "SUPPORT TICKET");
        assert_eq!(
            actions,
            vec![Action::PostToWorker(RepoRequest::SaveRecords {
                records: state.store.records().to_vec(),
            })]
        );
    }

    #[test]
    fn new_module_grows_dictionary_and_persists_it() {
        let mut state = loaded_admin_state(vec![]);

        dispatch(&mut state, Event::AddRequested);
        dispatch(
            &mut state,
            Event::FormFieldChanged {
                column: Column::Module,
                value: "QUALITY".to_string(),
            },
        );
        dispatch(
            &mut state,
            Event::FormFieldChanged {
                column: Column::SubModule,
                value: "NCR".to_string(),
            },
        );
        let (_, actions) = dispatch(&mut state, Event::FormSubmitted);

        assert_eq!(state.dictionary.sub_modules("QUALITY"), Some(&["NCR".to_string()][..]));
        assert!(matches!(
            actions[0],
            Action::PostToWorker(RepoRequest::SaveDictionary { .. })
        ));
    }

    #[test]
    fn invalid_form_stays_open_with_notice() {
        let mut state = loaded_admin_state(vec![]);
        dispatch(&mut state, Event::AddRequested);
        let (_, actions) = dispatch(&mut state, Event::FormSubmitted);

        assert!(actions.is_empty());
        assert_eq!(state.overlays.len(), 1);
        let notice = state.notices.current(chrono::Utc::now()).cloned();
        assert!(notice.unwrap().text.contains("module"));
    }

    #[test]
    fn duplicate_api_blocks_merge_but_keeps_form() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);
        dispatch(&mut state, Event::AddRequested);
        for (column, value) in [
            (Column::Module, "DIGITAL"),
            (Column::SubModule, "CAD"),
            (Column::Api, "/x"),
        ] {
            dispatch(
                &mut state,
                Event::FormFieldChanged {
                    column,
                    value: value.to_string(),
                },
            );
        }
        let (_, actions) = dispatch(&mut state, Event::FormSubmitted);

        assert!(actions.is_empty());
        assert_eq!(state.store.records().len(), 1);
        assert_eq!(state.overlays.len(), 1);
    }

    #[test]
    fn viewer_is_gated_out_of_mutations() {
        let mut state = DashboardState::new(Role::Viewer);
        for event in [
            Event::AddRequested,
            Event::EditRequested { id: 1 },
            Event::DeleteRequested { id: 1 },
            Event::ExportRequested,
        ] {
            let (_, actions) = dispatch(&mut state, event);
            assert!(actions.is_empty());
        }
        assert!(state.overlays.is_empty());
    }

    #[test]
    fn delete_of_missing_record_leaves_dataset_alone() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);
        let (_, actions) = dispatch(&mut state, Event::DeleteRequested { id: 99 });

        assert!(actions.is_empty());
        assert!(state.overlays.is_empty());
        assert_eq!(state.store.records().len(), 1);
    }

    #[test]
    fn delete_waits_for_confirmation_then_removes_and_saves() {
        let mut state = loaded_admin_state(vec![
            record(1, "DIGITAL", "CAD", "/x"),
            record(2, "QUALITY", "NCR", "/y"),
        ]);

        let (_, actions) = dispatch(&mut state, Event::DeleteRequested { id: 1 });
        assert!(actions.is_empty(), "nothing deleted before confirmation");
        assert_eq!(state.overlays.len(), 1);
        assert_eq!(state.store.records().len(), 2);

        let (_, actions) = dispatch(&mut state, Event::DeleteConfirmed);
        assert!(state.overlays.is_empty());
        assert_eq!(state.store.records().len(), 1);
        assert_eq!(state.store.records()[0].id, 2);
        assert_eq!(state.stats.per_module.get("DIGITAL"), None);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(RepoRequest::SaveRecords {
                records: state.store.records().to_vec(),
            })]
        );
    }

    #[test]
    fn dismissed_confirmation_leaves_dataset_unchanged() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);

        dispatch(&mut state, Event::DeleteRequested { id: 1 });
        dispatch(&mut state, Event::OverlayDismissed);

        assert!(state.overlays.is_empty());
        assert_eq!(state.store.records().len(), 1);
        assert_eq!(state.overlays.live_mount_points(), 0);

        let (_, actions) = dispatch(&mut state, Event::DeleteConfirmed);
        assert!(actions.is_empty(), "stale confirm must not delete");
        assert_eq!(state.store.records().len(), 1);
    }

    #[test]
    fn stats_follow_the_loaded_dataset() {
        let mut state = loaded_admin_state(vec![
            record(1, "DIGITAL", "CAD", "/x"),
            record(2, "DIGITAL", "SUPPORT TICKET", "/y"),
        ]);

        assert_eq!(state.stats.total, 2);
        assert_eq!(state.stats.per_module.get("DIGITAL"), Some(&2));

        assert!(!state.stats_collapsed);
        dispatch(&mut state, Event::StatsToggled);
        assert!(state.stats_collapsed);
    }

    #[test]
    fn export_scopes_by_filter_state() {
        let mut state = loaded_admin_state(vec![
            record(1, "DIGITAL", "CAD", "/x"),
            record(2, "DIGITAL", "SUPPORT TICKET", "/y"),
        ]);

        let (_, actions) = dispatch(&mut state, Event::ExportRequested);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(RepoRequest::Export {
                records: state.store.records().to_vec(),
            })]
        );

        dispatch(
            &mut state,
            Event::SubModulePicked(Some("CAD".to_string())),
        );
        let (_, actions) = dispatch(&mut state, Event::ExportRequested);
        match &actions[0] {
            Action::PostToWorker(RepoRequest::Export { records }) => {
                assert_eq!(records.len(), 1);
            }
            other => panic!("expected export request, got {other:?}"),
        }
    }

    #[test]
    fn export_completion_hands_bytes_to_host() {
        let mut state = loaded_admin_state(vec![]);
        let (_, actions) = dispatch(
            &mut state,
            Event::WorkerResponse(RepoResponse::Exported {
                bytes: vec![1, 2, 3],
                extension: "csv".to_string(),
            }),
        );
        assert_eq!(
            actions,
            vec![Action::DownloadFile {
                name: "dependency-catalog.csv".to_string(),
                bytes: vec![1, 2, 3],
            }]
        );
    }

    #[test]
    fn dismissing_overlay_leaves_catalog_untouched() {
        let mut state = loaded_admin_state(vec![record(1, "DIGITAL", "CAD", "/x")]);
        dispatch(&mut state, Event::EditRequested { id: 1 });
        dispatch(
            &mut state,
            Event::FormFieldChanged {
                column: Column::Api,
                value: "/changed".to_string(),
            },
        );
        dispatch(&mut state, Event::OverlayDismissed);

        assert!(state.overlays.is_empty());
        assert_eq!(state.store.records()[0].api, "/x");
        assert_eq!(state.overlays.live_mount_points(), 0);
    }

    #[test]
    fn clear_all_filters_keeps_quick_pick_narrowing() {
        let mut state = loaded_admin_state(vec![
            record(1, "DIGITAL", "CAD", "/x"),
            record(2, "QUALITY", "NCR", "/y"),
        ]);

        dispatch(&mut state, Event::ModulePicked(Some("DIGITAL".to_string())));
        dispatch(&mut state, Event::FreeTextChanged("y".to_string()));
        dispatch(&mut state, Event::AllFiltersCleared);

        assert_eq!(state.store.filtered().len(), 1);
        assert_eq!(state.store.filtered()[0].module, "DIGITAL");
    }

    #[test]
    fn sort_toggle_orders_the_view() {
        let mut state = loaded_admin_state(vec![
            record(1, "QUALITY", "NCR", "/y"),
            record(2, "DIGITAL", "CAD", "/x"),
        ]);

        dispatch(&mut state, Event::SortToggled(Column::Module));
        assert_eq!(state.store.filtered()[0].module, "DIGITAL");

        dispatch(&mut state, Event::SortToggled(Column::Module));
        assert_eq!(state.store.filtered()[0].module, "QUALITY");
    }
}
