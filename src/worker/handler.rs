//! The catalog worker: executes repository and export requests.
//!
//! Runs outside the dashboard's event loop (whatever "outside" means to the
//! host: a thread, a task, or just a deferred call) and answers every
//! [`RepoRequest`] with exactly one [`RepoResponse`]. Errors never escape as
//! panics or propagated `Err`s; they become [`RepoResponse::Failed`] so the
//! dashboard can fall back and post a notice.

use crate::domain::dictionary::ModuleDictionary;
use crate::domain::error::Result;
use crate::domain::record::Record;
use crate::export::SpreadsheetExporter;
use crate::storage::repository::DatasetRepository;
use crate::worker::messages::{RepoOperation, RepoRequest, RepoResponse};

/// Worker state: the repository backend and the spreadsheet backend.
pub struct CatalogWorker {
    repository: Box<dyn DatasetRepository>,
    exporter: Box<dyn SpreadsheetExporter + Send>,
}

impl CatalogWorker {
    /// Creates a worker over the given backends.
    #[must_use]
    pub fn new(
        repository: Box<dyn DatasetRepository>,
        exporter: Box<dyn SpreadsheetExporter + Send>,
    ) -> Self {
        Self {
            repository,
            exporter,
        }
    }

    /// Standardizes error handling and logging across all operations.
    fn handle_repo_result<T, F>(operation: RepoOperation, result: Result<T>, on_success: F) -> RepoResponse
    where
        F: FnOnce(T) -> RepoResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation.as_str(), "repository operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation.as_str(), error = %e, "repository operation failed");
                RepoResponse::Failed {
                    operation,
                    message: format!("{}: {e}", operation.as_str()),
                }
            }
        }
    }

    fn handle_load_dictionary(&mut self) -> RepoResponse {
        Self::handle_repo_result(
            RepoOperation::LoadDictionary,
            self.repository.load(),
            |dataset| {
                tracing::debug!(
                    present = dataset.dictionary.is_some(),
                    "dictionary loaded"
                );
                RepoResponse::DictionaryLoaded {
                    dictionary: dataset.dictionary,
                }
            },
        )
    }

    fn handle_load_records(&mut self) -> RepoResponse {
        Self::handle_repo_result(
            RepoOperation::LoadRecords,
            self.repository.load(),
            |dataset| {
                tracing::debug!(record_count = dataset.records.len(), "records loaded");
                RepoResponse::RecordsLoaded {
                    records: dataset.records,
                }
            },
        )
    }

    fn handle_save_records(&mut self, records: &[Record]) -> RepoResponse {
        let count = records.len();
        Self::handle_repo_result(
            RepoOperation::SaveRecords,
            self.repository.save(records),
            |()| {
                tracing::debug!(record_count = count, "records saved");
                RepoResponse::RecordsSaved { count }
            },
        )
    }

    fn handle_save_dictionary(&mut self, dictionary: &ModuleDictionary) -> RepoResponse {
        let modules = dictionary.len();
        Self::handle_repo_result(
            RepoOperation::SaveDictionary,
            self.repository.save_dictionary(dictionary),
            |()| {
                tracing::debug!(module_count = modules, "dictionary saved");
                RepoResponse::DictionarySaved { modules }
            },
        )
    }

    fn handle_export(&mut self, records: &[Record]) -> RepoResponse {
        let extension = self.exporter.file_extension().to_string();
        Self::handle_repo_result(
            RepoOperation::Export,
            self.exporter.export(records),
            |bytes| {
                tracing::debug!(bytes = bytes.len(), "export ready");
                RepoResponse::Exported { bytes, extension }
            },
        )
    }

    /// Processes one request and returns its response.
    ///
    /// This is the worker's single entry point, dispatching to specific
    /// handlers based on the request variant.
    pub fn handle_request(&mut self, request: RepoRequest) -> RepoResponse {
        let span = tracing::debug_span!("worker_handle_request", request_type = ?request);
        let _guard = span.entered();

        match request {
            RepoRequest::LoadDictionary => self.handle_load_dictionary(),
            RepoRequest::LoadRecords => self.handle_load_records(),
            RepoRequest::SaveRecords { records } => self.handle_save_records(&records),
            RepoRequest::SaveDictionary { dictionary } => self.handle_save_dictionary(&dictionary),
            RepoRequest::Export { records } => self.handle_export(&records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CatalogError;
    use crate::domain::record::RecordDraft;
    use crate::export::CsvExporter;
    use crate::storage::repository::Dataset;
    use crate::storage::JsonRepository;

    struct BrokenRepository;

    impl DatasetRepository for BrokenRepository {
        fn load(&mut self) -> Result<Dataset> {
            Err(CatalogError::Storage("backend offline".to_string()))
        }

        fn save(&mut self, _records: &[crate::domain::record::Record]) -> Result<()> {
            Err(CatalogError::Storage("backend offline".to_string()))
        }

        fn save_dictionary(
            &mut self,
            _dictionary: &crate::domain::dictionary::ModuleDictionary,
        ) -> Result<()> {
            Err(CatalogError::Storage("backend offline".to_string()))
        }
    }

    fn json_worker(dir: &tempfile::TempDir) -> CatalogWorker {
        let repository = JsonRepository::new(dir.path().join("catalog.json")).unwrap();
        CatalogWorker::new(Box::new(repository), Box::new(CsvExporter::new()))
    }

    #[test]
    fn save_then_load_round_trips_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = json_worker(&dir);

        let records = vec![RecordDraft {
            module: "DIGITAL".to_string(),
            sub_module: "CAD".to_string(),
            ..RecordDraft::default()
        }
        .into_record(1)];

        let saved = worker.handle_request(RepoRequest::SaveRecords {
            records: records.clone(),
        });
        assert_eq!(saved, RepoResponse::RecordsSaved { count: 1 });

        let loaded = worker.handle_request(RepoRequest::LoadRecords);
        assert_eq!(loaded, RepoResponse::RecordsLoaded { records });
    }

    #[test]
    fn missing_dictionary_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = json_worker(&dir);
        let response = worker.handle_request(RepoRequest::LoadDictionary);
        assert_eq!(response, RepoResponse::DictionaryLoaded { dictionary: None });
    }

    #[test]
    fn export_produces_csv_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = json_worker(&dir);
        let response = worker.handle_request(RepoRequest::Export { records: vec![] });
        match response {
            RepoResponse::Exported { bytes, extension } => {
                assert_eq!(extension, "csv");
                assert!(String::from_utf8(bytes).unwrap().starts_with("module,"));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn backend_failure_becomes_failed_response() {
        let mut worker =
            CatalogWorker::new(Box::new(BrokenRepository), Box::new(CsvExporter::new()));
        let response = worker.handle_request(RepoRequest::LoadRecords);
        match response {
            RepoResponse::Failed { operation, message } => {
                assert_eq!(operation, RepoOperation::LoadRecords);
                assert!(message.contains("backend offline"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
