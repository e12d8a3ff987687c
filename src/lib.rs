//! depmatrix: a faceted dependency-catalog engine.
//!
//! The crate catalogs tabular dependency records (module, sub-module,
//! functionality, dependency chain, API) and provides:
//! - Faceted filtering with staged (pending vs. applied) selections,
//!   per-facet search, quick-picks, free text, and stable sorting
//! - Case normalization of module and sub-module names against a canonical
//!   dictionary, applied uniformly on load and on every write
//! - A generic modal overlay manager hosting record forms, summaries, and
//!   deletion confirmations
//! - Role-gated editing, aggregate statistics, and spreadsheet export
//! - Persistent state backed by JSON file storage with atomic writes
//! - Asynchronous loads, saves, and exports via a worker message protocol
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog Layer │   │ Overlay Layer │   │ Worker Layer  │
//! │ (catalog/)    │   │ (overlay/)    │   │ (worker/)     │
//! │ - Facets      │   │ - Stack       │   │ - Load/save   │
//! │ - Sessions    │   │ - Channels    │   │ - Export      │
//! │ - Store       │   │ - Teardown    │   │ - Responses   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Export Layers                    │
//! │  - Records and drafts (domain/record)               │
//! │  - Dictionary + normalizer (domain/)                │
//! │  - JSON repository (storage/), CSV export (export/) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Faceted filtering, staging, and the record store
//! - [`domain`]: Core domain types (records, dictionary, normalizer, errors)
//! - [`overlay`]: Generic modal presentation lifecycle
//! - [`storage`]: JSON file persistence behind a repository trait
//! - [`export`]: Spreadsheet generation behind an exporter trait
//! - [`worker`]: Asynchronous repository and export execution
//! - [`auth`]: Role gating for mutating actions
//! - [`notify`]: Transient auto-dismissing notices
//! - [`observability`]: Structured tracing to a rotating file
//!
//! # Examples
//!
//! ```
//! use depmatrix::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! // Startup emits the two independent load requests.
//! let (_, actions) = handle_event(&mut state, &Event::Started)?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), depmatrix::CatalogError>(())
//! ```

pub mod app;
pub mod auth;
pub mod catalog;
pub mod domain;
pub mod export;
pub mod notify;
pub mod observability;
pub mod overlay;
pub mod storage;
pub mod worker;

pub use app::{handle_event, Action, DashboardState, Event, OverlayView};
pub use auth::{AuthGate, Role, StaticAuthGate};
pub use catalog::{CatalogStats, CatalogStore, Column, FacetIndex, FilterSession};
pub use domain::{CatalogError, ModuleDictionary, Record, RecordDraft, Result};
pub use worker::{CatalogWorker, RepoRequest, RepoResponse};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Host configuration for the catalog.
///
/// Hosts can build one directly, parse it from a string map, or load it from
/// a TOML file.
///
/// # Example
///
/// ```toml
/// data_file = "/var/lib/depmatrix/catalog.json"
/// trace_file = "/var/log/depmatrix/trace.log"
/// trace_level = "debug"
/// role = "admin"
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON dataset file.
    pub data_file: PathBuf,

    /// Path of the trace log file. Defaults next to the working directory.
    pub trace_file: Option<PathBuf>,

    /// Tracing level for spans and events.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Role of the session's user. Anything but `"admin"` means viewer.
    pub role: Role,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("depmatrix-catalog.json"),
            trace_file: None,
            trace_level: None,
            role: Role::Viewer,
        }
    }
}

/// Serde shape of the TOML configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    trace_file: Option<PathBuf>,
    trace_level: Option<String>,
    role: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Unknown keys are ignored, missing keys fall back to defaults, so a
    /// host can pass through whatever key/value configuration surface it
    /// already has.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use depmatrix::{Config, Role};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_file".to_string(), "/tmp/catalog.json".to_string());
    /// map.insert("role".to_string(), "admin".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.role, Role::Admin);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            data_file: map
                .get("data_file")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            trace_file: map.get("trace_file").map(PathBuf::from),
            trace_level: map.get("trace_level").cloned(),
            role: parse_role(map.get("role").map(String::as_str)),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read {}: {e}", path.display())))?;
        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| CatalogError::Config(format!("failed to parse {}: {e}", path.display())))?;

        let defaults = Self::default();
        Ok(Self {
            data_file: file.data_file.unwrap_or(defaults.data_file),
            trace_file: file.trace_file,
            trace_level: file.trace_level,
            role: parse_role(file.role.as_deref()),
        })
    }
}

fn parse_role(value: Option<&str>) -> Role {
    match value {
        Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::Viewer,
    }
}

/// Creates a dashboard for the configured role.
///
/// The state starts empty; dispatching [`Event::Started`] emits the load
/// requests that populate it.
#[must_use]
pub fn initialize(config: &Config) -> DashboardState {
    tracing::debug!(role = ?config.role, "initializing dashboard");
    DashboardState::new(config.role)
}

/// Builds the catalog worker over the configured JSON data file.
///
/// # Errors
///
/// Returns an error when the repository backend cannot be opened.
pub fn build_worker(config: &Config) -> Result<CatalogWorker> {
    let repository = storage::JsonRepository::new(config.data_file.clone())?;
    Ok(CatalogWorker::new(
        Box::new(repository),
        Box::new(export::CsvExporter::new()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_parsing_falls_back_to_defaults() {
        let config = Config::from_map(&BTreeMap::new());
        assert_eq!(config.data_file, PathBuf::from("depmatrix-catalog.json"));
        assert_eq!(config.role, Role::Viewer);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn role_parsing_is_case_insensitive_and_defaults_to_viewer() {
        let mut map = BTreeMap::new();
        map.insert("role".to_string(), "Admin".to_string());
        assert_eq!(Config::from_map(&map).role, Role::Admin);

        map.insert("role".to_string(), "superuser".to_string());
        assert_eq!(Config::from_map(&map).role, Role::Viewer);
    }

    #[test]
    fn toml_file_round_trips_into_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depmatrix.toml");
        std::fs::write(
            &path,
            "data_file = \"/tmp/catalog.json\"\ntrace_level = \"debug\"\nrole = \"admin\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.trace_level, Some("debug".to_string()));
        assert_eq!(config.role, Role::Admin);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depmatrix.toml");
        std::fs::write(&path, "data_file = [").unwrap();

        match Config::from_file(&path) {
            Err(CatalogError::Config(message)) => assert!(message.contains("parse")),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
