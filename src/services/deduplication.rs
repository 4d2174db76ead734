//! Cross-section deduplication.
//!
//! An entry claimed by several taxonomy items is kept only in the last
//! section, in taxonomy pre-order, that holds it. Deeper items follow their
//! ancestors in pre-order, so the most specific classification wins.

use std::collections::HashSet;

use crate::models::{HistoryEntry, Section};

/// Removes every entry from all but the last section that contains it.
///
/// Entries are compared by id. Walking the sections back to front with a set
/// of ids already placed gives the same result as stripping each later
/// section's entries from every earlier one.
pub fn deduplicate<'a>(sections: &mut [Section<'a>]) {
    let mut placed: HashSet<&'a str> = HashSet::new();

    for section in sections.iter_mut().rev() {
        let before = section.entries.len();
        section
            .entries
            .retain(|entry| !placed.contains(entry.id.as_str()));

        let removed = before - section.entries.len();
        if removed > 0 {
            tracing::trace!(section = %section.name, removed, "Removed duplicate entries");
        }

        for entry in &section.entries {
            let entry: &'a HistoryEntry = *entry;
            placed.insert(entry.id.as_str());
        }
    }
}
