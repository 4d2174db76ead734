//! Reference document generation and publishing.

use std::path::Path;
use tracing::instrument;

use super::{classify, deduplicate};
use crate::config::ServerConfig;
use crate::hedgedoc::NoteService;
use crate::models::{HistoryEntry, Section, StructureConfig};
use crate::rendering::{UNCATEGORIZED, render_markdown};
use crate::taxonomy::parse_structure_config;
use crate::{Error, Result};

/// Generates the reference document for a history.
///
/// Each entry appears under the last taxonomy item that claims it, or in a
/// trailing "Uncategorized" section when no item does. The output depends only
/// on the inputs.
#[must_use]
pub fn generate_markdown(
    server: &str,
    structure: &StructureConfig,
    history: &[HistoryEntry],
) -> String {
    let classification = classify(&structure.items, history);
    let mut sections = classification.sections;
    deduplicate(&mut sections);

    if !classification.uncategorized.is_empty() {
        sections.push(Section::new(UNCATEGORIZED, 0, classification.uncategorized));
    }

    render_markdown(server, &sections)
}

/// Keeps only pinned entries when `only_pinned` is set.
#[must_use]
pub fn filter_pinned(history: Vec<HistoryEntry>, only_pinned: bool) -> Vec<HistoryEntry> {
    if only_pinned {
        history.into_iter().filter(|entry| entry.pinned).collect()
    } else {
        history
    }
}

/// Writes a generated document to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_reference(path: &Path, markdown: &str) -> Result<()> {
    std::fs::write(path, markdown).map_err(|e| Error::OperationFailed {
        operation: "write_reference".to_string(),
        cause: format!("{}: {e}", path.display()),
    })
}

/// Service for building and publishing the reference document.
pub struct ReferenceService<S: NoteService> {
    /// Note service client.
    notes: S,
    /// Server and user the client is logged into.
    server: ServerConfig,
}

impl<S: NoteService> ReferenceService<S> {
    /// Creates a new reference service.
    #[must_use]
    pub const fn new(notes: S, server: ServerConfig) -> Self {
        Self { notes, server }
    }

    /// Returns the note service client.
    #[must_use]
    pub const fn notes(&self) -> &S {
        &self.notes
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Fetches the history, optionally restricted to pinned entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be fetched.
    #[instrument(skip(self), fields(operation = "reference.history"))]
    pub fn history(&self, only_pinned: bool) -> Result<Vec<HistoryEntry>> {
        let history = filter_pinned(self.notes.history()?, only_pinned);
        tracing::debug!(entries = history.len(), "Fetched history");
        Ok(history)
    }

    /// Parses the taxonomy at `structure` and generates the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the taxonomy cannot be read or parsed.
    #[instrument(
        skip(self, history),
        fields(operation = "reference.generate", entries = history.len())
    )]
    pub fn generate(&self, structure: &Path, history: &[HistoryEntry]) -> Result<String> {
        let structure = parse_structure_config(structure)?;
        Ok(generate_markdown(&self.server.server, &structure, history))
    }

    /// Replaces the published reference document with the file at `output`.
    ///
    /// The existing document is deleted first, then the file is imported
    /// under the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if either note service call fails.
    #[instrument(skip(self), fields(operation = "reference.upload"))]
    pub fn upload(&self, output: &Path, reference_id: &str) -> Result<()> {
        tracing::info!("Deleting existing reference");
        self.notes.delete(reference_id)?;

        tracing::info!("Importing reference");
        self.notes.import(output, reference_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::parse_structure_str;
    use std::cell::RefCell;

    const SERVER: &str = "https://md.example.org";

    #[derive(Default)]
    struct RecordingNotes {
        history: Vec<HistoryEntry>,
        calls: RefCell<Vec<String>>,
    }

    impl NoteService for RecordingNotes {
        fn login(&self, user: &str, _password: &secrecy::SecretString) -> Result<()> {
            self.calls.borrow_mut().push(format!("login {user}"));
            Ok(())
        }

        fn profile(&self) -> Result<String> {
            Ok(format!("HEDGEDOC_SERVER={SERVER}\nUSER_NAME=me\n"))
        }

        fn history(&self) -> Result<Vec<HistoryEntry>> {
            Ok(self.history.clone())
        }

        fn delete(&self, id: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("delete {id}"));
            Ok(())
        }

        fn import(&self, path: &Path, id: &str) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("import {} {id}", path.display()));
            Ok(())
        }
    }

    fn server() -> ServerConfig {
        ServerConfig::new(SERVER, "me").unwrap()
    }

    #[test]
    fn test_nested_match_renders_under_deeper_section() {
        let structure =
            parse_structure_str("tags:\n  levels:\n    - work\n    - '#(x|y)':\n        - sub\n")
                .unwrap();
        let history = vec![HistoryEntry::new(1, "abc", "Note1").with_tags(["x"])];

        let markdown = generate_markdown(SERVER, &structure, &history);

        assert_eq!(
            markdown,
            "# History Reference\n\n## work\n\n## x, y\n\n- [Note1](https://md.example.org/abc) (x)\n\n\n### sub\n"
        );
    }

    #[test]
    fn test_uncategorized_section_is_last() {
        let structure = parse_structure_str("tags:\n  levels: [work]\n").unwrap();
        let history = vec![
            HistoryEntry::new(3, "u1", "Loose"),
            HistoryEntry::new(2, "w", "Job").with_tags(["work"]),
            HistoryEntry::new(1, "u2", "Other").with_tags(["misc"]),
        ];

        let markdown = generate_markdown(SERVER, &structure, &history);

        let uncategorized = markdown.find("## Uncategorized").unwrap();
        assert!(markdown.find("## work").unwrap() < uncategorized);
        let tail = &markdown[uncategorized..];
        assert!(tail.find("u1").unwrap() < tail.find("u2").unwrap());
        assert!(!tail.contains("/w)"));
    }

    #[test]
    fn test_empty_history_omits_uncategorized() {
        let structure = parse_structure_str("tags:\n  levels: [a, {b: [c]}]\n").unwrap();

        let markdown = generate_markdown(SERVER, &structure, &[]);

        assert_eq!(markdown, "# History Reference\n\n## a\n\n## b\n\n### c\n");
    }

    #[test]
    fn test_filter_pinned() {
        let history = vec![
            HistoryEntry::new(1, "a", "A").with_pinned(true),
            HistoryEntry::new(2, "b", "B"),
            HistoryEntry::new(3, "c", "C").with_pinned(true),
        ];

        let pinned = filter_pinned(history.clone(), true);
        let ids: Vec<&str> = pinned.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert_eq!(filter_pinned(history, false).len(), 3);
    }

    #[test]
    fn test_service_history_filters_pinned() {
        let notes = RecordingNotes {
            history: vec![
                HistoryEntry::new(1, "a", "A").with_pinned(true),
                HistoryEntry::new(2, "b", "B"),
            ],
            ..RecordingNotes::default()
        };
        let service = ReferenceService::new(notes, server());

        assert_eq!(service.history(true).unwrap().len(), 1);
        assert_eq!(service.history(false).unwrap().len(), 2);
    }

    #[test]
    fn test_upload_deletes_before_import() {
        let service = ReferenceService::new(RecordingNotes::default(), server());

        service.upload(Path::new("out.md"), "ref-id").unwrap();

        assert_eq!(
            *service.notes.calls.borrow(),
            vec!["delete ref-id".to_string(), "import out.md ref-id".to_string()]
        );
    }

    #[test]
    fn test_generate_reads_structure_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hd.structure.yaml");
        std::fs::write(&path, "tags:\n  levels: [rust]\n").unwrap();
        let service = ReferenceService::new(RecordingNotes::default(), server());
        let history = vec![HistoryEntry::new(1, "abc", "Crate").with_tags(["rust"])];

        let markdown = service.generate(&path, &history).unwrap();

        assert!(markdown.contains("## rust\n\n- [Crate](https://md.example.org/abc) (rust)"));
    }

    #[test]
    fn test_write_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");

        write_reference(&path, "# History Reference\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# History Reference\n");
    }
}
