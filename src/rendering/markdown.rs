//! Markdown outline renderer.
//!
//! The document is built as a list of lines joined by `\n`. Headings and the
//! trailing separator of each non-empty section carry their own `\n`, which
//! yields a blank line after every heading and after every entry list.

use crate::models::{HistoryEntry, Section};

/// First line of every generated document.
pub const DOCUMENT_TITLE: &str = "# History Reference";

/// Heading of the trailing section for unmatched entries.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Renders one entry as a markdown bullet linking to the note.
///
/// ```rust
/// use hedgedoc_history::models::HistoryEntry;
/// use hedgedoc_history::rendering::render_entry_line;
///
/// let entry = HistoryEntry::new(0, "abc", "Note1").with_tags(["x", "y"]);
/// assert_eq!(
///     render_entry_line("https://md.example.org", &entry),
///     "- [Note1](https://md.example.org/abc) (x, y)"
/// );
/// ```
#[must_use]
pub fn render_entry_line(server: &str, entry: &HistoryEntry) -> String {
    let mut line = format!("- [{}]({server}/{})", entry.text, entry.id);
    if !entry.tags.is_empty() {
        line.push_str(" (");
        line.push_str(&entry.tags.join(", "));
        line.push(')');
    }
    line
}

/// Renders sections into the reference document.
///
/// Every section gets a heading of `level + 2` hashes, including sections
/// left empty by deduplication.
#[must_use]
pub fn render_markdown(server: &str, sections: &[Section<'_>]) -> String {
    let mut lines = vec![format!("{DOCUMENT_TITLE}\n")];

    for section in sections {
        lines.push(format!("{} {}\n", "#".repeat(section.level + 2), section.name));
        if section.is_empty() {
            continue;
        }
        lines.extend(
            section
                .entries
                .iter()
                .map(|entry| render_entry_line(server, entry)),
        );
        lines.push("\n".to_string());
    }

    lines.join("\n")
}
