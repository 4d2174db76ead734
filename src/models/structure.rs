//! Flattened taxonomy rules.

use std::fmt;
use uuid::Uuid;

/// Generated identifier of a structure item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of the flattened taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureItem {
    /// Heading name.
    pub name: String,
    /// Tags claimed by this item. Order only matters for the default name.
    pub tags: Vec<String>,
    /// Depth of the node in the taxonomy tree; root children are level 0.
    pub level: usize,
    /// Generated unique identifier.
    pub id: ItemId,
    /// Index of the enclosing item in the owning flat list.
    pub parent: Option<usize>,
}

impl StructureItem {
    /// Creates an item with a fresh id.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        tags: Vec<String>,
        level: usize,
        parent: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            tags,
            level,
            id: ItemId::generate(),
            parent,
        }
    }

    /// Returns `true` if `tag` is one of this item's tags.
    #[must_use]
    pub fn claims(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Parsed taxonomy file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureConfig {
    /// Accepted from the taxonomy file but not applied to rendering.
    pub capitalize: bool,
    /// Items in pre-order of the source tree.
    pub items: Vec<StructureItem>,
    /// Reserved for uncategorized overrides; always empty.
    pub misc: Vec<StructureItem>,
}
