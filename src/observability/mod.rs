//! Observability: structured logging via `tracing`.
//!
//! Logging is opt-in. Without `--debug` no subscriber is installed and every
//! event is discarded.

mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global logging subscriber.
///
/// Does nothing when logging is disabled. Events go to stderr, or are
/// appended to the configured log file.
///
/// # Errors
///
/// Returns an error if logging has already been initialized or the log file
/// cannot be opened.
pub fn init(config: LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(init_failed("observability already initialized"));
    }

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(open_log_file(path)?), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };
    let registry = tracing_subscriber::registry().with(config.filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true),
            )
            .try_init(),
    };
    installed.map_err(|e| init_failed(&e.to_string()))?;

    OBSERVABILITY_INIT
        .set(())
        .map_err(|()| init_failed("failed to mark observability initialized"))
}

fn init_failed(cause: &str) -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: cause.to_string(),
    }
}

/// Opens the log file for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<Mutex<File>> {
    let failed = |operation: &str, e: io::Error| Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {e}", path.display()),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| failed("create_log_dir", e))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
        .map_err(|e| failed("open_log_file", e))
}
