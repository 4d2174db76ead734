//! Tag-intersection classification of history entries.

use std::collections::HashMap;

use crate::models::{HistoryEntry, ItemId, Section, StructureItem};

/// History entries grouped per structure item, before deduplication.
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    /// One section per structure item, in taxonomy order.
    pub sections: Vec<Section<'a>>,
    /// Items that claimed each entry, keyed by entry id.
    pub claims: HashMap<&'a str, Vec<ItemId>>,
    /// Entries no item claimed, in history order.
    pub uncategorized: Vec<&'a HistoryEntry>,
}

impl Classification<'_> {
    /// Returns how many items claimed the entry with this id.
    #[must_use]
    pub fn claim_count(&self, id: &str) -> usize {
        self.claims.get(id).map_or(0, Vec::len)
    }
}

/// Assigns each entry to every item sharing at least one of its tags.
///
/// Entries keep their history order inside each section. An entry may land
/// in several sections; [`deduplicate`](super::deduplicate) resolves that.
#[must_use]
pub fn classify<'a>(items: &[StructureItem], history: &'a [HistoryEntry]) -> Classification<'a> {
    let mut claims: HashMap<&'a str, Vec<ItemId>> = HashMap::new();
    let mut sections = Vec::with_capacity(items.len());

    for item in items {
        let mut entries = Vec::new();
        for entry in history {
            if entry.tags.iter().any(|tag| item.claims(tag)) {
                entries.push(entry);
                claims
                    .entry(entry.id.as_str())
                    .or_default()
                    .push(item.id.clone());
            }
        }
        tracing::trace!(section = %item.name, entries = entries.len(), "Classified section");
        sections.push(Section::new(item.name.clone(), item.level, entries));
    }

    let uncategorized: Vec<&HistoryEntry> = history
        .iter()
        .filter(|entry| !claims.contains_key(entry.id.as_str()))
        .collect();

    Classification {
        sections,
        claims,
        uncategorized,
    }
}
