//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber pipeline: an `EnvFilter` built from the
//! configured level, a plain-text fmt layer, and the rotating file writer so
//! trace files never grow without bound.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::observability::file_writer::FileWriter;
use crate::Config;

/// Default trace file name when the configuration does not name one.
const DEFAULT_TRACE_FILE: &str = "depmatrix-trace.log";

/// `MakeWriter` adapter over the rotating [`FileWriter`].
///
/// The fmt layer writes one formatted event at a time; each is buffered and
/// handed to the rotating writer as a complete line on flush or drop.
#[derive(Debug, Clone)]
pub struct RotatingWriter {
    inner: Arc<FileWriter>,
}

impl RotatingWriter {
    /// Creates a writer targeting the given file.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            inner: Arc::new(FileWriter::new(file_path)),
        }
    }
}

impl<'a> MakeWriter<'a> for RotatingWriter {
    type Writer = LineBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        LineBuffer {
            inner: Arc::clone(&self.inner),
            buffer: Vec::new(),
        }
    }
}

/// Buffers one formatted event until it can be written as a line.
#[derive(Debug)]
pub struct LineBuffer {
    inner: Arc<FileWriter>,
    buffer: Vec<u8>,
}

impl Write for LineBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buffer);
        self.inner.write_line(text.trim_end_matches('\n'))?;
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Initializes the tracing subscriber with rotating file output.
///
/// # Trace Level Resolution
///
/// 1. `config.trace_level` if set
/// 2. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the trace file's parent directory if it doesn't exist
/// - Silently does nothing if directory creation fails (observability is
///   optional)
/// - Idempotent: safe to call multiple times, only the first call takes
///   effect
///
/// # Example
///
/// ```no_run
/// use depmatrix::observability::init_tracing;
/// use depmatrix::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let trace_file = config
        .trace_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACE_FILE));

    if let Some(parent) = trace_file.parent() {
        if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let writer = RotatingWriter::new(trace_file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer);

    let _ = subscriber.try_init();
}
