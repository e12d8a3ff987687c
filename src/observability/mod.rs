//! Structured logging for the catalog.
//!
//! Spans and events are emitted throughout the crate via `tracing`; this
//! module wires them to a size-rotated trace file. Logging is optional: if
//! the file cannot be created the dashboard runs without it.

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, RotatingWriter};
