//! Transient document sections.

use super::HistoryEntry;

/// Entries grouped under one heading of the generated document.
///
/// Sections borrow their entries from the history and live only for the
/// duration of one markdown generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text.
    pub name: String,
    /// Depth in the taxonomy; the heading uses `level + 2` hashes.
    pub level: usize,
    /// Entries in history order.
    pub entries: Vec<&'a HistoryEntry>,
}

impl<'a> Section<'a> {
    /// Creates a section.
    #[must_use]
    pub fn new(name: impl Into<String>, level: usize, entries: Vec<&'a HistoryEntry>) -> Self {
        Self {
            name: name.into(),
            level,
            entries,
        }
    }

    /// Returns `true` if no entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
