//! Spreadsheet export.
//!
//! The core decides *what* to export (all records vs. the filtered view) and
//! delegates *how* to a [`SpreadsheetExporter`]. The bundled backend is
//! [`CsvExporter`]; other formats plug in behind the same trait.

pub mod csv;

pub use self::csv::CsvExporter;

use crate::domain::error::Result;
use crate::domain::record::Record;

/// Which slice of the catalog an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// The full dataset.
    All,
    /// Only the currently filtered view.
    Filtered,
}

impl ExportScope {
    /// Picks the scope by comparing the filtered view to the full dataset.
    ///
    /// An unconstrained view exports everything; any narrowing exports just
    /// what the user is looking at.
    #[must_use]
    pub fn choose(filtered_len: usize, total_len: usize) -> Self {
        if filtered_len < total_len {
            Self::Filtered
        } else {
            Self::All
        }
    }
}

/// Turns a record list into downloadable spreadsheet bytes.
///
/// Implementations must emit the columns in the fixed export order: module,
/// sub-module, functionality, dependency module, dependant functionality,
/// API.
pub trait SpreadsheetExporter {
    /// Serializes the records.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails; the caller surfaces it as
    /// a notice and keeps running.
    fn export(&self, records: &[Record]) -> Result<Vec<u8>>;

    /// File extension for the produced format, without the dot.
    fn file_extension(&self) -> &'static str;
}
