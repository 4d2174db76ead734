//! History command handler.

use hedgedoc_history::models::HistoryEntry;
use hedgedoc_history::services::ReferenceService;
use hedgedoc_history::{NoteService, Result};

/// History command.
pub fn cmd_history<S: NoteService>(
    service: &ReferenceService<S>,
    only_pinned: bool,
) -> Result<()> {
    let server = &service.server().server;
    for entry in service.history(only_pinned)? {
        println!("{}", history_line(server, &entry));
    }
    Ok(())
}

/// Formats one entry as `<server>/<id> - '<text>' ([tags])`.
fn history_line(server: &str, entry: &HistoryEntry) -> String {
    format!(
        "{server}/{} - '{}' ([{}])",
        entry.id,
        entry.text,
        entry.tags.join(", ")
    )
}
