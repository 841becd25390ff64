//! Null removal for API responses
//!
//! EC3 returns every field of a record, most of them `null`. [`prune`] drops
//! keys bound to null:
//!
//! - in a mapping, null keys are removed and mapping-typed values are pruned
//!   recursively; lists inside a mapping are left as they are
//! - in a list, every mapping element is pruned on its own, order kept;
//!   other elements (nested lists included) are left as they are
//! - anything else is returned unchanged
//!
//! The output container kind always matches the input.

use crate::types::{JsonObject, JsonValue};

/// Remove null-valued keys, returning the pruned value
pub fn prune(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(prune_object(map)),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| match item {
                    JsonValue::Object(map) => JsonValue::Object(prune_object(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Prune a single mapping
pub fn prune_object(map: JsonObject) -> JsonObject {
    map.into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| match v {
            JsonValue::Object(inner) => (k, JsonValue::Object(prune_object(inner))),
            other => (k, other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_nested_nulls_removed() {
        let input = json!({"a": 1, "b": null, "c": {"d": null, "e": 2}});
        assert_eq!(prune(input), json!({"a": 1, "c": {"e": 2}}));
    }

    #[test]
    fn test_deeply_nested_mapping() {
        let input = json!({"l1": {"l2": {"l3": {"gone": null, "kept": "x"}}}});
        assert_eq!(prune(input), json!({"l1": {"l2": {"l3": {"kept": "x"}}}}));
    }

    #[test]
    fn test_list_of_mappings_is_elementwise() {
        let first = json!({"id": "1", "gwp": null});
        let second = json!({"id": "2", "plant": {"name": null, "country": "US"}});
        let input = json!([first.clone(), second.clone()]);

        assert_eq!(prune(input), json!([prune(first), prune(second)]));
    }

    #[test]
    fn test_list_order_preserved() {
        let input = json!([{"n": 3, "x": null}, {"n": 1}, {"n": 2, "y": null}]);
        assert_eq!(prune(input), json!([{"n": 3}, {"n": 1}, {"n": 2}]));
    }

    #[test]
    fn test_lists_inside_mappings_untouched() {
        let input = json!({"tags": [{"k": null}, null], "x": null});
        assert_eq!(prune(input), json!({"tags": [{"k": null}, null]}));
    }

    #[test]
    fn test_lists_of_lists_untouched() {
        let input = json!([[{"k": null}], {"k": null, "v": 1}, null]);
        assert_eq!(prune(input), json!([[{"k": null}], {"v": 1}, null]));
    }

    #[test]
    fn test_non_null_values_identical() {
        let input = json!({
            "s": "",
            "zero": 0,
            "f": false,
            "empty_obj": {},
            "empty_list": [],
            "float": 1.25
        });
        assert_eq!(prune(input.clone()), input);
    }

    #[test]
    fn test_mapping_emptied_by_pruning_is_kept() {
        assert_eq!(prune(json!({"a": {"b": null}})), json!({"a": {}}));
    }

    #[test_case(json!(null) ; "null")]
    #[test_case(json!(42) ; "number")]
    #[test_case(json!("text") ; "string")]
    #[test_case(json!([]) ; "empty list")]
    #[test_case(json!({}) ; "empty mapping")]
    fn test_shape_preserved(input: JsonValue) {
        assert_eq!(prune(input.clone()), input);
    }
}
