//! Reference document command handlers.

use std::path::PathBuf;

use hedgedoc_history::services::{ReferenceService, write_reference};
use hedgedoc_history::{AppConfig, NoteService, Result};

use super::MarkdownArgs;

/// Markdown command. Returns the path the document was written to.
pub fn cmd_md<S: NoteService>(
    service: &ReferenceService<S>,
    config: &AppConfig,
    args: &MarkdownArgs,
) -> Result<PathBuf> {
    let structure = args
        .structure
        .clone()
        .unwrap_or_else(|| config.structure_path.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_path.clone());

    let history = service.history(args.only_pinned)?;
    println!("Found {} notes", history.len());

    println!("Generating markdown");
    let markdown = service.generate(&structure, &history)?;

    println!("Writing markdown to {}", output.display());
    write_reference(&output, &markdown)?;

    if args.show {
        println!("{}", show_block(&markdown));
    }

    println!("Done.");
    Ok(output)
}

/// Upload reference command.
///
/// The reference id is resolved before anything is fetched or written.
pub fn cmd_upload_reference<S: NoteService>(
    service: &ReferenceService<S>,
    config: &AppConfig,
    args: &MarkdownArgs,
    reference_id: Option<String>,
) -> Result<()> {
    let reference_id = config.reference_id_or(reference_id)?;
    let output = cmd_md(service, config, args)?;

    println!("Uploading to {}/{reference_id}", service.server().server);
    service.upload(&output, &reference_id)?;

    println!("Done.");
    Ok(())
}

/// Brackets a document between 70-column separator lines.
fn show_block(markdown: &str) -> String {
    format!("{:-^70}\n{markdown}\n{:-^70}", " start ", "  end  ")
}
