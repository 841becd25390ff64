//! Tree flattening for the category hierarchy
//!
//! The category tree is a nested structure of mappings (each with an `id`,
//! names and a `subcategories` list). [`collect_nodes`] walks any JSON tree
//! depth-first, pre-order, and [`lookup_table`] turns the matching nodes into
//! a flat `attribute -> id` table.

use crate::types::{JsonObject, JsonValue};
use std::collections::HashMap;

/// Collect every mapping in `root` for which `predicate` holds
///
/// Descends through both mappings and lists. The result is freshly allocated
/// per call.
pub fn collect_nodes<'a, P>(root: &'a JsonValue, predicate: P) -> Vec<&'a JsonObject>
where
    P: Fn(&JsonObject) -> bool,
{
    let mut out = Vec::new();
    walk(root, &predicate, &mut out);
    out
}

fn walk<'a, P>(value: &'a JsonValue, predicate: &P, out: &mut Vec<&'a JsonObject>)
where
    P: Fn(&JsonObject) -> bool,
{
    match value {
        JsonValue::Object(map) => {
            if predicate(map) {
                out.push(map);
            }
            for child in map.values() {
                walk(child, predicate, out);
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                walk(item, predicate, out);
            }
        }
        _ => {}
    }
}

/// Map `node[key_attr]` to `node["id"]` for every node carrying both as
/// strings
///
/// Duplicate keys resolve to the last node in walk order.
pub fn lookup_table(root: &JsonValue, key_attr: &str) -> HashMap<String, String> {
    collect_nodes(root, |node| {
        node.get(key_attr).is_some_and(JsonValue::is_string)
            && node.get("id").is_some_and(JsonValue::is_string)
    })
    .into_iter()
    .filter_map(|node| {
        let key = node.get(key_attr)?.as_str()?;
        let id = node.get("id")?.as_str()?;
        Some((key.to_string(), id.to_string()))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree() -> JsonValue {
        json!({
            "masterformat": "03 00 00 Concrete",
            "id": "X",
            "subcategories": [
                {"masterformat": "03 21 00 Rebar", "id": "Y"}
            ]
        })
    }

    #[test]
    fn test_masterformat_lookup() {
        let table = lookup_table(&tree(), "masterformat");
        let expected: HashMap<String, String> = [
            ("03 00 00 Concrete".to_string(), "X".to_string()),
            ("03 21 00 Rebar".to_string(), "Y".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_collect_is_preorder() {
        let tree = json!({
            "id": "root",
            "subcategories": [
                {"id": "a", "subcategories": [{"id": "a1"}]},
                {"id": "b"}
            ]
        });
        let ids: Vec<&str> = collect_nodes(&tree, |n| n.contains_key("id"))
            .into_iter()
            .map(|n| n["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let tree = json!({
            "display_name": "Steel",
            "id": "first",
            "subcategories": [{"display_name": "Steel", "id": "second"}]
        });
        let table = lookup_table(&tree, "display_name");
        assert_eq!(table["Steel"], "second");
    }

    #[test]
    fn test_nodes_without_key_or_id_skipped() {
        let tree = json!({
            "id": "root",
            "subcategories": [
                {"masterformat": null, "id": "n"},
                {"masterformat": "05 00 00 Metals"},
                {"masterformat": "09 00 00 Finishes", "id": "f"}
            ]
        });
        let table = lookup_table(&tree, "masterformat");
        assert_eq!(table.len(), 1);
        assert_eq!(table["09 00 00 Finishes"], "f");
    }

    #[test]
    fn test_repeated_calls_do_not_accumulate() {
        let tree = tree();
        let first = collect_nodes(&tree, |n| n.contains_key("id")).len();
        let second = collect_nodes(&tree, |n| n.contains_key("id")).len();
        assert_eq!(first, 2);
        assert_eq!(second, 2);
    }
}
