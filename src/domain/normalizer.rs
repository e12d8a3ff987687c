//! Case normalization of module and sub-module names.
//!
//! Every path that writes a record — the form overlay on submit and the
//! repository-facing merge — goes through the single [`normalize`] function so
//! the two paths can never diverge. The function is pure, total, deterministic,
//! and idempotent: normalizing an already-normalized record is a no-op.

use crate::domain::dictionary::ModuleDictionary;
use crate::domain::record::Record;

/// Rewrites a record's module and sub-module to the dictionary's exact casing.
///
/// For `module`: a dictionary key whose lowercase form equals the record's
/// module lowercase form replaces the record's value. No match leaves the
/// value untouched — a new or unknown module is allowed, not an error.
///
/// For `sub_module`: attempted only when the (possibly just-normalized)
/// module is a dictionary key; the same case-insensitive lookup runs within
/// that module's sub-module list, and a miss again leaves the value as-is.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use depmatrix::domain::{normalize, ModuleDictionary, Record};
///
/// let mut entries = BTreeMap::new();
/// entries.insert("DIGITAL".to_string(), vec!["CAD".to_string()]);
/// let dictionary = ModuleDictionary::from_entries(entries);
///
/// let record = Record {
///     id: 1,
///     module: "digital".to_string(),
///     sub_module: "cad".to_string(),
///     functionality: String::new(),
///     dependency_module: String::new(),
///     dependant_functionality: String::new(),
///     api: String::new(),
/// };
///
/// let normalized = normalize(record, &dictionary);
/// assert_eq!(normalized.module, "DIGITAL");
/// assert_eq!(normalized.sub_module, "CAD");
/// ```
#[must_use]
pub fn normalize(mut record: Record, dictionary: &ModuleDictionary) -> Record {
    if record.module.is_empty() {
        return record;
    }

    if let Some(canonical) = dictionary.canonical_module(&record.module) {
        if record.module != canonical {
            tracing::debug!(
                from = %record.module,
                to = %canonical,
                "normalized module casing"
            );
            record.module = canonical.to_string();
        }
    }

    if record.sub_module.is_empty() {
        return record;
    }

    if let Some(canonical) = dictionary.canonical_sub_module(&record.module, &record.sub_module) {
        if record.sub_module != canonical {
            tracing::debug!(
                module = %record.module,
                from = %record.sub_module,
                to = %canonical,
                "normalized sub-module casing"
            );
            record.sub_module = canonical.to_string();
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn dictionary() -> ModuleDictionary {
        let mut entries = BTreeMap::new();
        entries.insert(
            "DIGITAL".to_string(),
            vec!["CAD".to_string(), "SUPPORT TICKET".to_string()],
        );
        entries.insert("OPERATION".to_string(), vec!["Do vs Buy".to_string()]);
        ModuleDictionary::from_entries(entries)
    }

    fn record(module: &str, sub_module: &str) -> Record {
        Record {
            id: 1,
            module: module.to_string(),
            sub_module: sub_module.to_string(),
            functionality: String::new(),
            dependency_module: String::new(),
            dependant_functionality: String::new(),
            api: "x".to_string(),
        }
    }

    #[test]
    fn substitutes_canonical_casing() {
        let normalized = normalize(record("digital", "cad"), &dictionary());
        assert_eq!(normalized.module, "DIGITAL");
        assert_eq!(normalized.sub_module, "CAD");
    }

    #[test]
    fn preserves_mixed_canonical_casing() {
        let normalized = normalize(record("operation", "do VS buy"), &dictionary());
        assert_eq!(normalized.module, "OPERATION");
        assert_eq!(normalized.sub_module, "Do vs Buy");
    }

    #[test]
    fn unknown_module_left_untouched() {
        let normalized = normalize(record("Brand New", "anything"), &dictionary());
        assert_eq!(normalized.module, "Brand New");
        assert_eq!(normalized.sub_module, "anything");
    }

    #[test]
    fn sub_module_untouched_when_not_in_module_list() {
        let normalized = normalize(record("DIGITAL", "unlisted"), &dictionary());
        assert_eq!(normalized.module, "DIGITAL");
        assert_eq!(normalized.sub_module, "unlisted");
    }

    #[test]
    fn empty_fields_pass_through() {
        let normalized = normalize(record("", ""), &dictionary());
        assert_eq!(normalized.module, "");
        assert_eq!(normalized.sub_module, "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(record("Digital", "Support Ticket"), &dictionary());
        let twice = normalize(once.clone(), &dictionary());
        assert_eq!(once, twice);
    }
}
