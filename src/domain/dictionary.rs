//! Module dictionary: the canonical module → sub-module mapping.
//!
//! The dictionary is the single source of truth for the exact casing of
//! module and sub-module names. It is authoritative when supplied by the
//! repository; when absent it is derived from the dataset by grouping records
//! per module, which is idempotent for an unchanged dataset.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::record::Record;

/// Ordered mapping from module name to its sub-module names, canonical casing.
///
/// Keys and the lists behind them are kept sorted so that repeated derivation
/// from the same dataset produces byte-identical output. The dictionary is
/// only ever grown or regenerated, never partially deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

impl ModuleDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from explicit entries, sorting each sub-module list.
    #[must_use]
    pub fn from_entries(entries: BTreeMap<String, Vec<String>>) -> Self {
        let mut dictionary = Self { entries };
        for sub_modules in dictionary.entries.values_mut() {
            sub_modules.sort();
            sub_modules.dedup();
        }
        dictionary
    }

    /// Derives a dictionary from the dataset.
    ///
    /// Groups records by module, collecting the distinct non-empty sub-module
    /// values per module, sorted ascending. Records without a module are
    /// skipped; a module whose records carry no sub-module still appears with
    /// an empty list, matching what the dataset actually shows.
    ///
    /// Derivation is idempotent: calling this twice on the same records
    /// yields equal dictionaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use depmatrix::domain::{ModuleDictionary, Record};
    ///
    /// let records = vec![Record {
    ///     id: 1,
    ///     module: "DIGITAL".to_string(),
    ///     sub_module: "CAD".to_string(),
    ///     functionality: String::new(),
    ///     dependency_module: String::new(),
    ///     dependant_functionality: String::new(),
    ///     api: String::new(),
    /// }];
    ///
    /// let dictionary = ModuleDictionary::derive_from(&records);
    /// assert_eq!(dictionary.sub_modules("DIGITAL"), Some(&["CAD".to_string()][..]));
    /// ```
    #[must_use]
    pub fn derive_from(records: &[Record]) -> Self {
        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for record in records {
            if record.module.is_empty() {
                continue;
            }
            let sub_modules = grouped.entry(record.module.clone()).or_default();
            if !record.sub_module.is_empty() {
                sub_modules.insert(record.sub_module.clone());
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(module, sub_modules)| (module, sub_modules.into_iter().collect()))
            .collect();

        tracing::debug!(record_count = records.len(), "derived module dictionary");

        Self { entries }
    }

    /// Grows the dictionary with names observed in the dataset.
    ///
    /// Derives entries from the records and unions them in. Existing modules
    /// and sub-modules are kept untouched; the dictionary only ever grows
    /// here, it is never pruned when records disappear.
    pub fn absorb(&mut self, records: &[Record]) {
        let derived = Self::derive_from(records);
        for (module, sub_modules) in derived.entries {
            let existing = self.entries.entry(module).or_default();
            for sub_module in sub_modules {
                if !existing.contains(&sub_module) {
                    existing.push(sub_module);
                }
            }
            existing.sort();
        }
    }

    /// Returns `true` when the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the sorted module names.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the sub-module list for a module, if the module is known.
    #[must_use]
    pub fn sub_modules(&self, module: &str) -> Option<&[String]> {
        self.entries.get(module).map(Vec::as_slice)
    }

    /// Returns the sorted union of every module's sub-modules.
    ///
    /// This is the sub-module option set when no module quick-pick is active.
    #[must_use]
    pub fn all_sub_modules(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.entries.values().flatten().collect();
        set.into_iter().cloned().collect()
    }

    /// Finds the canonically cased module name matching `module` case-insensitively.
    #[must_use]
    pub fn canonical_module(&self, module: &str) -> Option<&str> {
        let lowered = module.to_lowercase();
        self.entries
            .keys()
            .find(|key| key.to_lowercase() == lowered)
            .map(String::as_str)
    }

    /// Finds the canonically cased sub-module of `module` matching
    /// `sub_module` case-insensitively.
    ///
    /// The module name must already be exact; normalization resolves the
    /// module first and only then looks inside its list.
    #[must_use]
    pub fn canonical_sub_module(&self, module: &str, sub_module: &str) -> Option<&str> {
        let lowered = sub_module.to_lowercase();
        self.entries.get(module).and_then(|sub_modules| {
            sub_modules
                .iter()
                .find(|candidate| candidate.to_lowercase() == lowered)
                .map(String::as_str)
        })
    }
}
