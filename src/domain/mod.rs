//! Domain layer for the dependency catalog.
//!
//! This module contains the core domain types and business rules, independent
//! of storage, transport, or rendering concerns. It follows domain-driven
//! design principles by keeping the record model, the canonical-name
//! dictionary, and the normalization rule isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Record and draft models
//! - [`dictionary`]: Canonical module → sub-module mapping
//! - [`normalizer`]: Case-insensitive canonicalization of names
//!
//! # Examples
//!
//! ```
//! use depmatrix::domain::{ModuleDictionary, Record, RecordDraft, Result};
//!
//! fn build_record(draft: RecordDraft) -> Result<Record> {
//!     draft.validate()?;
//!     Ok(draft.into_record(1))
//! }
//! ```

pub mod dictionary;
pub mod error;
pub mod normalizer;
pub mod record;

pub use dictionary::ModuleDictionary;
pub use error::{CatalogError, Result};
pub use normalizer::normalize;
pub use record::{Record, RecordDraft};
