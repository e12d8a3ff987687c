//! Repository abstraction over record persistence.
//!
//! This module defines the [`DatasetRepository`] trait the worker talks to.
//! The core never touches files or wires directly; it emits load/save
//! requests and folds the responses back in, so backends can be swapped
//! without changing the dashboard logic.
//!
//! Id durability beyond the in-session `max+1` convention, and any
//! multi-writer conflict detection, live behind this trait. The bundled
//! backend does neither: concurrent writers last-write-win.

use crate::domain::dictionary::ModuleDictionary;
use crate::domain::error::Result;
use crate::domain::record::Record;

/// Everything a load returns: the records plus, optionally, an authoritative
/// dictionary.
///
/// When `dictionary` is `None` the caller derives one from the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// All persisted records.
    pub records: Vec<Record>,
    /// Canonical module dictionary, if the backend stores one.
    pub dictionary: Option<ModuleDictionary>,
}

/// Abstraction over persistent dataset backends.
///
/// # Implementations
///
/// - [`JsonRepository`](crate::storage::JsonRepository): JSON file with
///   atomic writes (default)
///
/// # Examples
///
/// ```no_run
/// use depmatrix::storage::{DatasetRepository, JsonRepository};
/// use std::path::PathBuf;
///
/// let mut repository = JsonRepository::new(PathBuf::from("/tmp/catalog.json"))?;
/// let dataset = repository.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait DatasetRepository: Send {
    /// Loads the full dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or parsed.
    fn load(&mut self) -> Result<Dataset>;

    /// Persists the full record list, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previously stored data must
    /// survive a failed write.
    fn save(&mut self, records: &[Record]) -> Result<()>;

    /// Persists the dictionary, e.g. after auto-generation from the dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_dictionary(&mut self, dictionary: &ModuleDictionary) -> Result<()>;
}
