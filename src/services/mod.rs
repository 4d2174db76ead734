//! Reference document services.
//!
//! The pipeline that turns a history into a document:
//!
//! ```text
//! taxonomy ──► classify ──► deduplicate ──► render
//!   (items)    (sections)    (sections)     (markdown)
//! ```
//!
//! [`ReferenceService`] wraps that pipeline together with the note service
//! calls needed to fetch history and publish the result.

mod classifier;
mod deduplication;
mod reference;

pub use classifier::{Classification, classify};
pub use deduplication::deduplicate;
pub use reference::{ReferenceService, filter_pinned, generate_markdown, write_reference};
