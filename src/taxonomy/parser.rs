//! Taxonomy tree flattening.

use serde_yaml_ng::{Mapping, Value};
use std::path::Path;
use tracing::instrument;

use super::tags::{name_from_tags, tags_from_key};
use crate::models::{StructureConfig, StructureItem};
use crate::{Error, Result};

/// Keys that mark a mapping node as an explicit item.
const EXPLICIT_KEYS: [&str; 2] = ["name", "tags"];

/// Reads and parses a taxonomy file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid
/// taxonomy.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn parse_structure_config(path: &Path) -> Result<StructureConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_structure_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    parse_structure_str(&contents)
}

/// Parses a taxonomy document.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the document is not YAML or lacks the
/// `tags.levels` tree, and [`Error::InvalidTags`] if an explicit node has an
/// unusable `tags` field.
pub fn parse_structure_str(contents: &str) -> Result<StructureConfig> {
    let document: Value = serde_yaml_ng::from_str(contents)
        .map_err(|e| Error::InvalidInput(format!("malformed taxonomy: {e}")))?;

    let tags = document
        .get("tags")
        .ok_or_else(|| Error::InvalidInput("taxonomy has no 'tags' section".to_string()))?;
    let capitalize = tags.get("capitalize").is_some_and(is_truthy);
    let levels = tags
        .get("levels")
        .ok_or_else(|| Error::InvalidInput("taxonomy has no 'tags.levels' tree".to_string()))?;

    let items = parse_levels(levels)?;
    tracing::debug!(items = items.len(), capitalize, "Parsed taxonomy");

    Ok(StructureConfig {
        capitalize,
        items,
        misc: Vec::new(),
    })
}

/// Flattens a taxonomy tree into items in pre-order.
///
/// Each call allocates its own accumulator.
///
/// # Errors
///
/// Returns an error if a node cannot be interpreted.
pub fn parse_levels(levels: &Value) -> Result<Vec<StructureItem>> {
    let mut items = Vec::new();
    walk(levels, 0, None, &mut items)?;
    Ok(items)
}

fn walk(
    node: &Value,
    level: usize,
    parent: Option<usize>,
    items: &mut Vec<StructureItem>,
) -> Result<()> {
    tracing::trace!(level, ?parent, node = ?node, "Parsing taxonomy node");

    match node {
        Value::Null => Ok(()),
        Value::Tagged(tagged) => walk(&tagged.value, level, parent, items),
        Value::Sequence(seq) => {
            for child in seq {
                walk(child, level, parent, items)?;
            }
            Ok(())
        },
        Value::Mapping(map) if is_explicit(map) => walk_explicit(map, level, parent, items),
        Value::Mapping(map) => walk_shorthand(map, level, parent, items),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            let key = scalar_to_string(node).unwrap_or_default();
            let tags = tags_from_key(&key);
            items.push(StructureItem::new(name_from_tags(&tags), tags, level, parent));
            Ok(())
        },
    }
}

/// A mapping is explicit as soon as it carries `name` or `tags`.
fn is_explicit(map: &Mapping) -> bool {
    EXPLICIT_KEYS.iter().any(|key| map.contains_key(*key))
}

fn walk_explicit(
    map: &Mapping,
    level: usize,
    parent: Option<usize>,
    items: &mut Vec<StructureItem>,
) -> Result<()> {
    let tags = match map.get("tags") {
        Some(Value::String(key)) => tags_from_key(key),
        Some(Value::Sequence(seq)) => seq
            .iter()
            .map(|tag| {
                scalar_to_string(tag).ok_or_else(|| {
                    Error::InvalidTags(format!(
                        "tag list entries must be scalars, found {}",
                        describe(tag)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(Error::InvalidTags(format!(
                "expected a string or a list, found {}",
                describe(other)
            )));
        },
        None => {
            return Err(Error::InvalidTags(
                "explicit taxonomy node has no 'tags' field".to_string(),
            ));
        },
    };

    let name = match map.get("name") {
        None | Some(Value::Null) => name_from_tags(&tags),
        Some(value) => scalar_to_string(value).ok_or_else(|| {
            Error::InvalidInput(format!(
                "taxonomy name must be a scalar, found {}",
                describe(value)
            ))
        })?,
    };

    items.push(StructureItem::new(name, tags, level, parent));
    let index = items.len() - 1;

    match map.get("children") {
        Some(children) => walk(children, level + 1, Some(index), items),
        None => Ok(()),
    }
}

fn walk_shorthand(
    map: &Mapping,
    level: usize,
    parent: Option<usize>,
    items: &mut Vec<StructureItem>,
) -> Result<()> {
    for (key, children) in map {
        let key = scalar_to_string(key).ok_or_else(|| {
            Error::InvalidInput(format!(
                "taxonomy keys must be scalars, found {}",
                describe(key)
            ))
        })?;
        let tags = tags_from_key(&key);
        items.push(StructureItem::new(name_from_tags(&tags), tags, level, parent));
        let index = items.len() - 1;

        if is_truthy(children) {
            walk(children, level + 1, Some(index), items)?;
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Vec<StructureItem> {
        let value: Value = serde_yaml_ng::from_str(yaml).unwrap();
        parse_levels(&value).unwrap()
    }

    fn summary(items: &[StructureItem]) -> Vec<(String, usize, Option<usize>)> {
        items
            .iter()
            .map(|item| (item.name.clone(), item.level, item.parent))
            .collect()
    }

    #[test]
    fn test_string_leaf() {
        let items = parse("work");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "work");
        assert_eq!(items[0].tags, vec!["work"]);
        assert_eq!(items[0].level, 0);
        assert_eq!(items[0].parent, None);
    }

    #[test]
    fn test_multi_tag_leaf_name() {
        let items = parse("'#(x|y)'");
        assert_eq!(items[0].name, "x, y");
        assert_eq!(items[0].tags, vec!["x", "y"]);
    }

    #[test]
    fn test_sequence_items_are_siblings() {
        let items = parse("[a, b, c]");
        assert_eq!(
            summary(&items),
            vec![
                ("a".to_string(), 0, None),
                ("b".to_string(), 0, None),
                ("c".to_string(), 0, None),
            ]
        );
    }

    #[test]
    fn test_shorthand_nesting_is_pre_order() {
        let items = parse(
            r"
- work:
    - rust:
        - async
    - meeting
- home
",
        );
        assert_eq!(
            summary(&items),
            vec![
                ("work".to_string(), 0, None),
                ("rust".to_string(), 1, Some(0)),
                ("async".to_string(), 2, Some(1)),
                ("meeting".to_string(), 1, Some(0)),
                ("home".to_string(), 0, None),
            ]
        );
    }

    #[test]
    fn test_shorthand_mapping_with_several_keys() {
        let items = parse(
            r"
a: [a1]
b:
c: [c1]
",
        );
        assert_eq!(
            summary(&items),
            vec![
                ("a".to_string(), 0, None),
                ("a1".to_string(), 1, Some(0)),
                ("b".to_string(), 0, None),
                ("c".to_string(), 0, None),
                ("c1".to_string(), 1, Some(3)),
            ]
        );
    }

    #[test]
    fn test_shorthand_falsy_values_make_leaves() {
        let items = parse("{a: [], b: '', c: false, d: 0}");
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.level == 0));
    }

    #[test]
    fn test_shorthand_scalar_value_is_child() {
        let items = parse("{work: rust}");
        assert_eq!(
            summary(&items),
            vec![("work".to_string(), 0, None), ("rust".to_string(), 1, Some(0))]
        );
    }

    #[test]
    fn test_explicit_node() {
        let items = parse(
            r"
- name: Reading
  tags: [book, paper]
  children:
    - fiction
    - '#(sf|fantasy)'
",
        );
        assert_eq!(items[0].name, "Reading");
        assert_eq!(items[0].tags, vec!["book", "paper"]);
        assert_eq!(
            summary(&items),
            vec![
                ("Reading".to_string(), 0, None),
                ("fiction".to_string(), 1, Some(0)),
                ("sf, fantasy".to_string(), 1, Some(0)),
            ]
        );
    }

    #[test]
    fn test_explicit_node_string_tags_are_normalized() {
        let items = parse("{tags: '#(a|b)'}");
        assert_eq!(items[0].tags, vec!["a", "b"]);
        assert_eq!(items[0].name, "a, b");
    }

    #[test]
    fn test_explicit_list_tags_are_used_as_is() {
        let items = parse("{tags: ['#(a|b)', c]}");
        assert_eq!(items[0].tags, vec!["#(a|b)", "c"]);
    }

    #[test]
    fn test_explicit_node_requires_tags() {
        let value: Value = serde_yaml_ng::from_str("{name: Lonely}").unwrap();
        let err = parse_levels(&value).unwrap_err();
        assert!(matches!(err, Error::InvalidTags(_)));
    }

    #[test]
    fn test_explicit_node_rejects_mapping_tags() {
        let value: Value = serde_yaml_ng::from_str("{tags: {a: b}}").unwrap();
        let err = parse_levels(&value).unwrap_err();
        assert!(matches!(err, Error::InvalidTags(_)));
        assert!(err.to_string().contains("found a mapping"));
    }

    #[test]
    fn test_numeric_keys_are_tags() {
        let items = parse("{2024: [q1]}");
        assert_eq!(items[0].tags, vec!["2024"]);
        assert_eq!(items[1].parent, Some(0));
    }

    #[test]
    fn test_null_nodes_are_skipped() {
        assert!(parse("~").is_empty());
        assert_eq!(parse("[a, ~, b]").len(), 2);
    }

    #[test]
    fn test_each_parse_starts_empty() {
        let value: Value = serde_yaml_ng::from_str("[a, b]").unwrap();
        let first = parse_levels(&value).unwrap();
        let second = parse_levels(&value).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_parse_structure_str() {
        let config = parse_structure_str(
            r"
tags:
  capitalize: true
  levels:
    - work
",
        )
        .unwrap();
        assert!(config.capitalize);
        assert_eq!(config.items.len(), 1);
        assert!(config.misc.is_empty());
    }

    #[test]
    fn test_parse_structure_str_defaults_capitalize() {
        let config = parse_structure_str("tags:\n  levels: [a]\n").unwrap();
        assert!(!config.capitalize);
    }

    #[test]
    fn test_parse_structure_str_requires_levels() {
        let err = parse_structure_str("tags:\n  capitalize: true\n").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = parse_structure_str("levels: [a]\n").unwrap_err();
        assert!(err.to_string().contains("'tags'"));
    }

    #[test]
    fn test_parse_structure_config_missing_file() {
        let err = parse_structure_config(Path::new("/nonexistent/hd.structure.yaml")).unwrap_err();
        assert!(matches!(err, Error::OperationFailed { .. }));
    }
}
