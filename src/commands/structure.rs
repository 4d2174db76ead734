//! Structure command handler.

use std::path::Path;

use hedgedoc_history::Result;
use hedgedoc_history::models::StructureItem;
use hedgedoc_history::taxonomy::parse_structure_config;

/// Structure command.
pub fn cmd_structure(path: &Path) -> Result<()> {
    let structure = parse_structure_config(path)?;
    for item in &structure.items {
        println!("{}", structure_line(item));
    }
    Ok(())
}

/// Formats one item, indented two spaces per level.
fn structure_line(item: &StructureItem) -> String {
    format!(
        "{}- {} ([{}])",
        "  ".repeat(item.level),
        item.name,
        item.tags.join(", ")
    )
}
