//! Asynchronous repository and export execution.
//!
//! The dashboard never blocks on I/O: it sends a [`RepoRequest`], keeps
//! handling events, and later receives the matching [`RepoResponse`].

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{RepoOperation, RepoRequest, RepoResponse};
