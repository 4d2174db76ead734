//! History entries as reported by the note service.

use crate::{Error, Result};
use serde::Deserialize;

/// One note in the user's history.
///
/// Identity is by `id`. Entries are never mutated once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    /// Last visit timestamp as reported by the server.
    pub time: i64,
    /// Note identifier, unique per server.
    pub id: String,
    /// Note title.
    #[serde(default)]
    pub text: String,
    /// Note tags, in the order the server reports them.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the note is pinned in the history.
    #[serde(default)]
    pub pinned: bool,
}

impl HistoryEntry {
    /// Creates an untagged, unpinned entry.
    #[must_use]
    pub fn new(time: i64, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            time,
            id: id.into(),
            text: text.into(),
            tags: Vec::new(),
            pinned: false,
        }
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the pinned flag.
    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }
}

/// The document printed by `hedgedoc history --json`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPayload {
    /// History entries, most recent first as the server orders them.
    pub history: Vec<HistoryEntry>,
}

impl HistoryPayload {
    /// Parses a history payload and returns its entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the payload is not valid JSON or
    /// lacks the `history` array.
    pub fn from_json(payload: &[u8]) -> Result<Vec<HistoryEntry>> {
        let payload: Self = serde_json::from_slice(payload)
            .map_err(|e| Error::InvalidInput(format!("malformed history payload: {e}")))?;
        Ok(payload.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_applies_defaults() {
        let payload = br#"{"history": [
            {"time": 1700000000000, "id": "abc", "text": "Note", "tags": ["rust"], "pinned": true},
            {"time": 1600000000000, "id": "def"}
        ]}"#;

        let history = HistoryPayload::from_json(payload).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0],
            HistoryEntry::new(1_700_000_000_000, "abc", "Note")
                .with_tags(["rust"])
                .with_pinned(true)
        );
        assert_eq!(history[1], HistoryEntry::new(1_600_000_000_000, "def", ""));
    }

    #[test]
    fn test_from_json_rejects_missing_history() {
        let err = HistoryPayload::from_json(br#"{"notes": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_json_rejects_missing_id() {
        let err = HistoryPayload::from_json(br#"{"history": [{"time": 1}]}"#).unwrap_err();
        assert!(err.to_string().contains("malformed history payload"));
    }
}
