//! Data models for hedgedoc-history.
//!
//! History entries come from the note service, structure items from the
//! taxonomy file, and sections exist only while a document is generated.

mod history;
mod section;
mod structure;

pub use history::{HistoryEntry, HistoryPayload};
pub use section::Section;
pub use structure::{ItemId, StructureConfig, StructureItem};
