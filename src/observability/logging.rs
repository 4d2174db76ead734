//! Structured logging configuration.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::LoggingSettings;

/// Log level names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Everything, including per-node taxonomy parsing.
    #[value(name = "TRACE")]
    Trace,
    /// Parsed configuration and counts.
    #[value(name = "DEBUG")]
    Debug,
    /// Subprocess invocations.
    #[default]
    #[value(name = "INFO")]
    Info,
    /// Warnings only.
    #[value(name = "WARNING")]
    Warning,
    /// Errors only.
    #[value(name = "ERROR")]
    Error,
    /// Fatal errors; `tracing` has no separate level, so this maps to error.
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    /// Maps the level onto a `tracing` filter.
    #[must_use]
    pub const fn as_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Whether any subscriber is installed.
    pub enabled: bool,
    /// Output format.
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
    /// Event filter.
    pub filter: EnvFilter,
}

impl LoggingConfig {
    /// Builds logging configuration from config settings and CLI flags.
    ///
    /// `RUST_LOG`, when set, replaces the level derived from `level`.
    #[must_use]
    pub fn from_settings(
        settings: Option<&LoggingSettings>,
        level: LogLevel,
        enabled: bool,
    ) -> Self {
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map_or_else(LogFormat::default, LogFormat::parse);
        let file = settings.and_then(|s| s.file.clone());
        let filter = EnvFilter::builder()
            .with_default_directive(level.as_filter().into())
            .from_env_lossy();

        Self {
            enabled,
            format,
            file,
            filter,
        }
    }
}
