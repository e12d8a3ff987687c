//! Error types for the dependency catalog.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! No variant is fatal to a running session: the event handler recovers every
//! failure into a safe state plus a transient notice.

use thiserror::Error;

/// The main error type for catalog operations.
///
/// This enum consolidates all error conditions that can occur while operating on
/// the catalog, from local validation to storage and transport failures. Most
/// variants carry enough context to surface a field-level or record-level notice.
///
/// # Examples
///
/// ```
/// use depmatrix::domain::CatalogError;
///
/// fn require_module(value: &str) -> Result<(), CatalogError> {
///     if value.is_empty() {
///         return Err(CatalogError::Validation {
///             field: "module".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(require_module("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is missing or empty.
    ///
    /// Raised locally before any persistence request is emitted. Blocks the
    /// submit that produced it; unrelated fields and records are unaffected.
    #[error("required field missing: {field}")]
    Validation {
        /// Name of the offending field.
        field: String,
    },

    /// Another record already uses this API identifier.
    ///
    /// Reported by the write path when a draft's API value collides with an
    /// existing record. Non-fatal and field-level: the rest of the form stays
    /// valid and editable.
    #[error("api already exists: {api}")]
    DuplicateApi {
        /// The conflicting API value.
        api: String,
    },

    /// The edit or delete target does not exist.
    ///
    /// Surfaced as a notice; local state is left unmutated.
    #[error("record not found: {id}")]
    NotFound {
        /// Id of the missing record.
        id: u64,
    },

    /// A load, save, or export call failed in transit.
    ///
    /// Always recovered locally into a default or empty state plus a notice,
    /// never propagated as a crash.
    #[error("transport error: {0}")]
    Transport(String),

    /// A role-gated action was attempted without the required role.
    ///
    /// Rejected synchronously, before any request leaves the core.
    #[error("role violation: {action}")]
    RoleViolation {
        /// Human-readable name of the rejected action.
        action: String,
    },

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the repository backend fails.
    /// The string contains a description of what went wrong.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be read or parsed.
    /// The string describes the specific configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for catalog operations.
///
/// This is a type alias for `std::result::Result<T, CatalogError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, CatalogError>;
