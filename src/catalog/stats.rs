//! Catalog statistics.
//!
//! A pure fold over the dataset feeding the dashboard's collapsible stats
//! panel: total record count plus per-value breakdowns. Recomputed together
//! with the facet options whenever the dataset changes.

use std::collections::BTreeMap;

use crate::domain::record::Record;

/// Aggregate counts over the full dataset.
///
/// Breakdowns count records by the exact stored value, so they reflect the
/// dataset as-is: an empty sub-module shows up under the empty key rather
/// than being hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of records in the dataset.
    pub total: usize,

    /// Record count per module.
    pub per_module: BTreeMap<String, usize>,

    /// Record count per sub-module.
    pub per_sub_module: BTreeMap<String, usize>,

    /// Record count per dependant functionality.
    pub per_dependant_functionality: BTreeMap<String, usize>,
}

impl CatalogStats {
    /// Folds the dataset into aggregate counts.
    #[must_use]
    pub fn derive(records: &[Record]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            *stats.per_module.entry(record.module.clone()).or_default() += 1;
            *stats
                .per_sub_module
                .entry(record.sub_module.clone())
                .or_default() += 1;
            *stats
                .per_dependant_functionality
                .entry(record.dependant_functionality.clone())
                .or_default() += 1;
        }

        tracing::debug!(total = stats.total, "derived catalog stats");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordDraft;

    fn record(id: u64, module: &str, sub_module: &str, dependant: &str) -> Record {
        RecordDraft {
            module: module.to_string(),
            sub_module: sub_module.to_string(),
            dependant_functionality: dependant.to_string(),
            ..RecordDraft::default()
        }
        .into_record(id)
    }

    #[test]
    fn breakdowns_count_per_value() {
        let stats = CatalogStats::derive(&[
            record(1, "DIGITAL", "CAD", "audit"),
            record(2, "DIGITAL", "SUPPORT TICKET", "audit"),
            record(3, "QUALITY", "NCR", "review"),
        ]);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.per_module.get("DIGITAL"), Some(&2));
        assert_eq!(stats.per_module.get("QUALITY"), Some(&1));
        assert_eq!(stats.per_sub_module.get("CAD"), Some(&1));
        assert_eq!(stats.per_dependant_functionality.get("audit"), Some(&2));
    }

    #[test]
    fn empty_values_are_counted_as_observed() {
        let stats = CatalogStats::derive(&[record(1, "DIGITAL", "", "")]);
        assert_eq!(stats.per_sub_module.get(""), Some(&1));
        assert_eq!(stats.per_dependant_functionality.get(""), Some(&1));
    }

    #[test]
    fn empty_dataset_yields_empty_stats() {
        assert_eq!(CatalogStats::derive(&[]), CatalogStats::default());
    }
}
