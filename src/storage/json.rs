//! JSON file-based dataset backend.
//!
//! This module provides a simple, human-readable persistence implementation
//! using JSON serialization. It uses atomic file writes (write-to-temp +
//! rename) to prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes entire dataset
//! - **Best for**: a few thousand records, infrequent writes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::dictionary::ModuleDictionary;
use crate::domain::error::{CatalogError, Result};
use crate::domain::record::Record;
use crate::storage::repository::{Dataset, DatasetRepository};

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Wraps records and the
/// dictionary in a single versioned object for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageEnvelope {
    /// Version of the storage format for future migrations.
    version: u32,

    /// All stored records.
    #[serde(default)]
    records: Vec<Record>,

    /// Canonical module dictionary, absent until first generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dictionary: Option<ModuleDictionary>,

    /// When the envelope was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

impl Default for StorageEnvelope {
    fn default() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
            dictionary: None,
            saved_at: None,
        }
    }
}

/// JSON file dataset backend.
///
/// Keeps the dataset in memory and persists it on modifications with an
/// atomic temp-write + rename, so the file on disk is never half-written.
///
/// # Usage
///
/// Designed to be owned by a single worker, matching the event-driven
/// application model; nothing synchronizes concurrent access to the file.
pub struct JsonRepository {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    envelope: StorageEnvelope,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonRepository {
    /// Creates or opens a JSON dataset backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts from an
    /// empty envelope. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use depmatrix::storage::JsonRepository;
    /// use std::path::PathBuf;
    ///
    /// let repository = JsonRepository::new(PathBuf::from("/tmp/catalog.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON repository");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let envelope = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty dataset");
            StorageEnvelope::default()
        };

        tracing::debug!(
            record_count = envelope.records.len(),
            has_dictionary = envelope.dictionary.is_some(),
            "repository initialized"
        );

        Ok(Self {
            file_path,
            envelope,
            dirty: false,
        })
    }

    /// Loads the envelope from a JSON file.
    fn load_from_file(path: &Path) -> Result<StorageEnvelope> {
        let contents = std::fs::read_to_string(path)?;
        let envelope: StorageEnvelope = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = envelope.version,
            records = envelope.records.len(),
            "loaded dataset"
        );

        Ok(envelope)
    }

    /// Saves the envelope to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the
    /// target path. This ensures the file is never left in a corrupt state,
    /// even if the process crashes mid-write.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving dataset");

        self.envelope.saved_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&self.envelope)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("dataset saved");
        Ok(())
    }
}

impl DatasetRepository for JsonRepository {
    fn load(&mut self) -> Result<Dataset> {
        let _span = tracing::debug_span!("json_load").entered();

        let dataset = Dataset {
            records: self.envelope.records.clone(),
            dictionary: self.envelope.dictionary.clone(),
        };

        tracing::debug!(count = dataset.records.len(), "retrieved dataset");
        Ok(dataset)
    }

    fn save(&mut self, records: &[Record]) -> Result<()> {
        let _span = tracing::debug_span!("json_save", count = records.len()).entered();

        self.envelope.records = records.to_vec();
        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!("records persisted");
        Ok(())
    }

    fn save_dictionary(&mut self, dictionary: &ModuleDictionary) -> Result<()> {
        let _span =
            tracing::debug_span!("json_save_dictionary", modules = dictionary.len()).entered();

        self.envelope.dictionary = Some(dictionary.clone());
        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!("dictionary persisted");
        Ok(())
    }
}

impl Drop for JsonRepository {
    /// Flushes unsaved changes on drop.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
