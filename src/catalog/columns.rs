//! Filterable column identifiers.
//!
//! Every facet, sort spec, and filter predicate is keyed by [`Column`] instead
//! of a per-column field, so adding a column means extending one enum rather
//! than touching six parallel arrays.

use crate::domain::record::Record;

/// A filterable column of the catalog table.
///
/// Used as the key for facet state, sort specs, and option derivation.
/// Ordering follows the table's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Owning module.
    Module,
    /// Sub-module within the module.
    SubModule,
    /// Provided functionality.
    Functionality,
    /// Module being depended on.
    DependencyModule,
    /// Consumed functionality of the dependency.
    DependantFunctionality,
    /// API endpoint realizing the dependency.
    Api,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Self; 6] = [
        Self::Module,
        Self::SubModule,
        Self::Functionality,
        Self::DependencyModule,
        Self::DependantFunctionality,
        Self::Api,
    ];

    /// Columns whose facet options are derived from the dataset.
    ///
    /// Module and sub-module options come from the dictionary and the cascade
    /// instead, so they are excluded here.
    pub const DATASET_DERIVED: [Self; 4] = [
        Self::Functionality,
        Self::DependencyModule,
        Self::DependantFunctionality,
        Self::Api,
    ];

    /// Stable string key for this column, matching the persisted field names.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::SubModule => "subModule",
            Self::Functionality => "functionality",
            Self::DependencyModule => "dependencyModule",
            Self::DependantFunctionality => "dependantFunctionality",
            Self::Api => "api",
        }
    }

    /// Human-readable column title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::SubModule => "Sub Module",
            Self::Functionality => "Functionality",
            Self::DependencyModule => "Dependency Module",
            Self::DependantFunctionality => "Dependant Functionality",
            Self::Api => "API",
        }
    }

    /// Returns the record's value for this column.
    #[must_use]
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Self::Module => &record.module,
            Self::SubModule => &record.sub_module,
            Self::Functionality => &record.functionality,
            Self::DependencyModule => &record.dependency_module,
            Self::DependantFunctionality => &record.dependant_functionality,
            Self::Api => &record.api,
        }
    }
}
