//! # hedgedoc-history
//!
//! Organizes a HedgeDoc note history into a markdown reference document,
//! grouped by a user-defined tag taxonomy.
//!
//! The taxonomy is a nested YAML tree of tags. It is flattened into an ordered
//! list of [`StructureItem`]s, history entries are classified against those
//! items by tag intersection, every entry is kept only under its most specific
//! (latest) matching section, and the result is rendered as a markdown outline.
//!
//! ## Example
//!
//! ```rust
//! use hedgedoc_history::models::HistoryEntry;
//! use hedgedoc_history::services::generate_markdown;
//! use hedgedoc_history::taxonomy::parse_structure_str;
//!
//! let structure = parse_structure_str(
//!     "tags:\n  levels:\n    - work\n    - '#(x|y)':\n        - sub\n",
//! )?;
//! let history = vec![HistoryEntry::new(0, "abc", "Note1").with_tags(["x"])];
//!
//! let markdown = generate_markdown("https://md.example.org", &structure, &history);
//! assert!(markdown.contains("- [Note1](https://md.example.org/abc) (x)"));
//! # Ok::<(), hedgedoc_history::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod hedgedoc;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod taxonomy;

pub use config::{AppConfig, ServerConfig};
pub use hedgedoc::{HedgedocCli, NoteService};
pub use models::{HistoryEntry, StructureConfig, StructureItem};
pub use services::generate_markdown;

/// Error type for hedgedoc-history operations.
///
/// Every variant is terminal for an invocation; nothing is retried.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed taxonomy document or history payload |
/// | `InvalidTags` | An explicit taxonomy node carries a `tags` field that is neither a string nor a list |
/// | `InvalidConfig` | Profile output lacks the server or user, settings file is unusable, no reference id |
/// | `CommandFailed` | The `hedgedoc` binary exits with a non-zero status |
/// | `CommandTimeout` | The `hedgedoc` binary does not finish within the timeout |
/// | `OperationFailed` | File I/O errors |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A taxonomy node has an unusable `tags` field.
    #[error("invalid tags: {0}")]
    InvalidTags(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An external command exited unsuccessfully.
    #[error("command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        /// The command line, without secrets.
        command: String,
        /// Exit status, or `signal` when the process was killed.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// An external command did not finish in time.
    #[error("command '{command}' timed out after {timeout_secs}s")]
    CommandTimeout {
        /// The command line, without secrets.
        command: String,
        /// The timeout that was exceeded.
        timeout_secs: u64,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for hedgedoc-history operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::CommandTimeout {
            command: "hedgedoc history --json".to_string(),
            timeout_secs: 15,
        };
        assert_eq!(
            err.to_string(),
            "command 'hedgedoc history --json' timed out after 15s"
        );
    }
}
