//! Document rendering.

mod markdown;

pub use markdown::{DOCUMENT_TITLE, UNCATEGORIZED, render_entry_line, render_markdown};
