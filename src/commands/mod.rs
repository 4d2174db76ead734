//! Command handlers.
//!
//! - `history.rs`: lists the note history
//! - `structure.rs`: prints the flattened taxonomy
//! - `reference.rs`: generates and uploads the reference document
//! - `completions.rs`: shell completion scripts

mod completions;
mod history;
mod reference;
mod structure;

use std::path::PathBuf;

use clap::Args;

pub use completions::cmd_completions;
pub use history::cmd_history;
pub use reference::{cmd_md, cmd_upload_reference};
pub use structure::cmd_structure;

/// Arguments shared by `md` and `upload-reference`.
#[derive(Args, Debug, Clone, Default)]
pub struct MarkdownArgs {
    /// Taxonomy file (default: hd.structure.yaml).
    #[arg(short, long)]
    pub structure: Option<PathBuf>,

    /// Only include pinned notes.
    #[arg(long)]
    pub only_pinned: bool,

    /// Markdown output file (default: out.md).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Echo the generated markdown to stdout.
    #[arg(long)]
    pub show: bool,
}
