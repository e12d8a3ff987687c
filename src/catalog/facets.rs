//! Facet option derivation.
//!
//! Builds the available option set for every filterable column. Options for
//! most columns are the distinct non-empty values observed in the dataset,
//! recomputed only on dataset (re)load. Module options come from the
//! dictionary, and sub-module options follow the cascade: they track the
//! active module quick-pick, not the dataset.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::catalog::columns::Column;
use crate::domain::dictionary::ModuleDictionary;
use crate::domain::record::Record;

/// Per-column available option lists.
///
/// Owned by the dashboard and rebuilt when the dataset or the dictionary
/// changes. The sub-module list is additionally recomputed whenever the module
/// quick-pick changes, via [`FacetIndex::cascade_sub_modules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    options: BTreeMap<Column, Vec<String>>,
}

impl FacetIndex {
    /// Derives option lists from the dataset and the dictionary.
    ///
    /// Dataset-derived columns get the distinct non-empty observed values,
    /// sorted ascending by ordinal comparison. The module list is the sorted
    /// dictionary keys; the sub-module list starts as the union of every
    /// module's sub-modules (no quick-pick active yet).
    #[must_use]
    pub fn derive(records: &[Record], dictionary: &ModuleDictionary) -> Self {
        let mut options = BTreeMap::new();

        for column in Column::DATASET_DERIVED {
            let distinct: BTreeSet<String> = records
                .iter()
                .map(|record| column.value_of(record))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect();
            options.insert(column, distinct.into_iter().collect());
        }

        options.insert(Column::Module, dictionary.modules());
        options.insert(Column::SubModule, dictionary.all_sub_modules());

        tracing::debug!(
            record_count = records.len(),
            module_count = dictionary.len(),
            "derived facet options"
        );

        Self { options }
    }

    /// Returns the base option list for a column.
    #[must_use]
    pub fn options(&self, column: Column) -> &[String] {
        self.options
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Recomputes the sub-module options for the given module quick-pick.
    ///
    /// With a pick, the list narrows to that module's dictionary entry (empty
    /// when the module is unknown); without one, it broadens back to the
    /// sorted union of all sub-modules.
    pub fn cascade_sub_modules(&mut self, module_pick: Option<&str>, dictionary: &ModuleDictionary) {
        let sub_modules = match module_pick {
            Some(module) => dictionary
                .sub_modules(module)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            None => dictionary.all_sub_modules(),
        };
        self.options.insert(Column::SubModule, sub_modules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
        entries.insert("QUALITY".to_string(), vec!["NCR".to_string()]);
        ModuleDictionary::from_entries(entries)
    }

    #[test]
    fn dataset_columns_collect_distinct_sorted_non_empty() {
        let records = vec![
            record(1, "DIGITAL", "CAD", "/api/b"),
            record(2, "DIGITAL", "CAD", "/api/a"),
            record(3, "QUALITY", "NCR", ""),
            record(4, "QUALITY", "NCR", "/api/a"),
        ];
        let index = FacetIndex::derive(&records, &dictionary());
        assert_eq!(
            index.options(Column::Api),
            &["/api/a".to_string(), "/api/b".to_string()]
        );
    }

    #[test]
    fn module_options_come_from_dictionary_keys() {
        let index = FacetIndex::derive(&[], &dictionary());
        assert_eq!(
            index.options(Column::Module),
            &["DIGITAL".to_string(), "QUALITY".to_string()]
        );
    }

    #[test]
    fn cascade_narrows_and_broadens_sub_modules() {
        let dictionary = dictionary();
        let mut index = FacetIndex::derive(&[], &dictionary);

        index.cascade_sub_modules(Some("DIGITAL"), &dictionary);
        assert_eq!(
            index.options(Column::SubModule),
            &["CAD".to_string(), "SUPPORT TICKET".to_string()]
        );

        index.cascade_sub_modules(None, &dictionary);
        assert_eq!(
            index.options(Column::SubModule),
            &["CAD".to_string(), "NCR".to_string(), "SUPPORT TICKET".to_string()]
        );
    }

    #[test]
    fn cascade_with_unknown_module_yields_no_options() {
        let dictionary = dictionary();
        let mut index = FacetIndex::derive(&[], &dictionary);
        index.cascade_sub_modules(Some("UNKNOWN"), &dictionary);
        assert!(index.options(Column::SubModule).is_empty());
    }
}
