//! Request/response protocol between the dashboard and the catalog worker.
//!
//! Load, save, and export never block the event loop: the dashboard emits a
//! [`RepoRequest`], keeps handling input, and folds the matching
//! [`RepoResponse`] back in as a later event. All types are serde-serializable
//! so a host can move them across whatever boundary it runs the worker behind.

use serde::{Deserialize, Serialize};

use crate::domain::dictionary::ModuleDictionary;
use crate::domain::record::Record;

/// The repository operations a request can name.
///
/// Carried inside [`RepoResponse::Failed`] so the dashboard knows which
/// fallback to take: a failed dictionary load derives one from the dataset,
/// a failed dataset load falls back to an empty list, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoOperation {
    /// Loading the canonical dictionary.
    LoadDictionary,
    /// Loading the record list.
    LoadRecords,
    /// Persisting the record list.
    SaveRecords,
    /// Persisting the dictionary.
    SaveDictionary,
    /// Producing spreadsheet bytes.
    Export,
}

impl RepoOperation {
    /// Short name for log fields and notices.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadDictionary => "load dictionary",
            Self::LoadRecords => "load records",
            Self::SaveRecords => "save records",
            Self::SaveDictionary => "save dictionary",
            Self::Export => "export",
        }
    }
}

/// Messages sent from the dashboard to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoRequest {
    /// Load the canonical module dictionary.
    LoadDictionary,

    /// Load all records.
    LoadRecords,

    /// Persist the full record list, replacing what is stored.
    SaveRecords {
        /// The records to store.
        records: Vec<Record>,
    },

    /// Persist the dictionary, e.g. after auto-generation.
    SaveDictionary {
        /// The dictionary to store.
        dictionary: ModuleDictionary,
    },

    /// Produce spreadsheet bytes for the given records.
    Export {
        /// The records to export, already scoped (all or filtered).
        records: Vec<Record>,
    },
}

/// Completions sent from the worker back to the dashboard.
///
/// Every request produces exactly one response, successful or failed. The
/// dashboard applies responses whenever they arrive, even if a newer request
/// has been issued in the meantime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoResponse {
    /// The dictionary load finished.
    DictionaryLoaded {
        /// Stored dictionary, or `None` when the backend has never saved one.
        dictionary: Option<ModuleDictionary>,
    },

    /// The record load finished.
    RecordsLoaded {
        /// All persisted records.
        records: Vec<Record>,
    },

    /// The record list was persisted.
    RecordsSaved {
        /// Number of records written.
        count: usize,
    },

    /// The dictionary was persisted.
    DictionarySaved {
        /// Number of modules written.
        modules: usize,
    },

    /// Spreadsheet bytes are ready.
    Exported {
        /// The downloadable bytes.
        bytes: Vec<u8>,
        /// File extension of the format, without the dot.
        extension: String,
    },

    /// An operation failed.
    Failed {
        /// Which operation failed.
        operation: RepoOperation,
        /// Human-readable error message.
        message: String,
    },
}
