//! CSV spreadsheet backend.

use csv::WriterBuilder;

use crate::catalog::columns::Column;
use crate::domain::error::{CatalogError, Result};
use crate::domain::record::Record;
use crate::export::SpreadsheetExporter;

/// Writes the export as CSV with a header row.
///
/// Columns follow the fixed export order, one record per row. The id is
/// deliberately not exported; it is a session-internal key, not catalog data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Creates the exporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetExporter for CsvExporter {
    fn export(&self, records: &[Record]) -> Result<Vec<u8>> {
        let _span = tracing::debug_span!("csv_export", count = records.len()).entered();

        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer
            .write_record(Column::ALL.iter().map(|column| column.key()))
            .map_err(|e| CatalogError::Transport(format!("failed to write header: {e}")))?;

        for record in records {
            writer
                .write_record(Column::ALL.iter().map(|column| column.value_of(record)))
                .map_err(|e| CatalogError::Transport(format!("failed to write row: {e}")))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CatalogError::Transport(format!("failed to flush export: {e}")))?;

        tracing::debug!(bytes = bytes.len(), "export produced");
        Ok(bytes)
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordDraft;

    fn record(id: u64, module: &str, api: &str) -> Record {
        RecordDraft {
            module: module.to_string(),
            sub_module: "CAD".to_string(),
            functionality: "drawing".to_string(),
            dependency_module: "QUALITY".to_string(),
            dependant_functionality: "audit".to_string(),
            api: api.to_string(),
        }
        .into_record(id)
    }

    #[test]
    fn header_follows_fixed_column_order() {
        let bytes = CsvExporter::new().export(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("module,subModule,functionality,dependencyModule,dependantFunctionality,api")
        );
    }

    #[test]
    fn rows_carry_record_values_without_id() {
        let bytes = CsvExporter::new()
            .export(&[record(7, "DIGITAL", "/api/cad")])
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "DIGITAL,CAD,drawing,QUALITY,audit,/api/cad");
        assert!(!row.contains('7'));
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let bytes = CsvExporter::new()
            .export(&[record(1, "DIGITAL, EXTENDED", "/x")])
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"DIGITAL, EXTENDED\""));
    }
}
