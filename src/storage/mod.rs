//! Dataset persistence.
//!
//! The [`DatasetRepository`](repository::DatasetRepository) trait abstracts
//! the backend; [`JsonRepository`](json::JsonRepository) is the bundled
//! JSON-file implementation with atomic writes.

pub mod json;
pub mod repository;

pub use json::JsonRepository;
pub use repository::{Dataset, DatasetRepository};
