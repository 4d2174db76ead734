//! Tag taxonomy parsing.
//!
//! The taxonomy file is YAML with a top-level `tags` mapping:
//!
//! ```yaml
//! tags:
//!   capitalize: false
//!   levels:
//!     - work:
//!         - rust
//!         - '#(meeting|standup)'
//!     - name: Reading list
//!       tags: [book, paper]
//!       children:
//!         - fiction
//! ```
//!
//! [`parse_levels`] flattens the `levels` tree into [`StructureItem`]s in
//! pre-order, one per declaration.
//!
//! [`StructureItem`]: crate::models::StructureItem

mod parser;
mod tags;

pub use parser::{parse_levels, parse_structure_config, parse_structure_str};
pub use tags::{name_from_tags, tags_from_key};
