//! Dependency record domain model.
//!
//! This module defines the core [`Record`] type, one row of the dependency
//! catalog, and [`RecordDraft`], the id-less shape produced by the record form
//! before validation and normalization. All descriptive fields are plain
//! strings; an empty string means the field is absent. Only `module` and
//! `sub_module` are required on submit, everything else is lenient.

use serde::{Deserialize, Serialize};

use crate::domain::error::{CatalogError, Result};

/// One row of the dependency catalog.
///
/// Records describe which functionality of a module depends on which
/// functionality of another module, and through which API. The `id` is unique
/// and stable once assigned; it never changes across edits and is never reused
/// after a delete.
///
/// `module` and `sub_module` *should* match dictionary entries after
/// normalization, but unknown names are accepted rather than rejected: the
/// dictionary trails the dataset, not the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, stable record identifier.
    pub id: u64,

    /// Owning module name, canonically cased after normalization.
    pub module: String,

    /// Sub-module within the owning module, canonically cased after normalization.
    #[serde(rename = "subModule", default)]
    pub sub_module: String,

    /// Functionality provided by the sub-module. Optional.
    #[serde(default)]
    pub functionality: String,

    /// Module this functionality depends on. Optional.
    #[serde(rename = "dependencyModule", default)]
    pub dependency_module: String,

    /// Functionality of the dependency module being consumed. Optional.
    #[serde(rename = "dependantFunctionality", default)]
    pub dependant_functionality: String,

    /// API endpoint realizing the dependency. Optional but unique when set.
    #[serde(default)]
    pub api: String,
}

/// An id-less record as produced by the record form overlay.
///
/// Drafts carry user input prior to validation and normalization. A draft
/// becomes a [`Record`] either by receiving a fresh id on add or by adopting
/// the id of the record being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Owning module name as typed or picked in the form.
    pub module: String,

    /// Sub-module name as typed or picked in the form.
    #[serde(rename = "subModule", default)]
    pub sub_module: String,

    /// Functionality description. Optional.
    #[serde(default)]
    pub functionality: String,

    /// Dependency module name. Optional.
    #[serde(rename = "dependencyModule", default)]
    pub dependency_module: String,

    /// Dependant functionality description. Optional.
    #[serde(rename = "dependantFunctionality", default)]
    pub dependant_functionality: String,

    /// API endpoint. Optional.
    #[serde(default)]
    pub api: String,
}

impl RecordDraft {
    /// Checks that the required fields are present.
    ///
    /// Mirrors the record form's validators: `module` and `sub_module` are
    /// required, all other fields may be empty. The first missing field is
    /// reported; nothing is submitted until validation passes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] naming the first empty required field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("module", &self.module), ("subModule", &self.sub_module)] {
            if value.trim().is_empty() {
                return Err(CatalogError::Validation {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Converts the draft into a record with the given id.
    #[must_use]
    pub fn into_record(self, id: u64) -> Record {
        Record {
            id,
            module: self.module,
            sub_module: self.sub_module,
            functionality: self.functionality,
            dependency_module: self.dependency_module,
            dependant_functionality: self.dependant_functionality,
            api: self.api,
        }
    }
}

impl From<Record> for RecordDraft {
    /// Strips the id from a record, yielding the shape the edit form works on.
    fn from(record: Record) -> Self {
        Self {
            module: record.module,
            sub_module: record.sub_module,
            functionality: record.functionality,
            dependency_module: record.dependency_module,
            dependant_functionality: record.dependant_functionality,
            api: record.api,
        }
    }
}
