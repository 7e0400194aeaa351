//! Recursive removal of semantically empty data from a manifest tree.
//!
//! Editors leave behind unset fields, blank strings, rows that were added and never
//! filled in, and list keys used only for rendering. None of that belongs in a
//! manifest, so every generated tree goes through [`prune`] before it is emitted.

use serde_json::{Map, Value};

/// Key used by editors to keep list rows stable. Never part of a manifest.
const SYNTHETIC_ID_KEY: &str = "id";

/// Remove `null` and `""` values, `id` keys, and objects/arrays that end up empty.
///
/// Numbers and booleans are always kept, including `0` and `false`. Inside an array only
/// object elements are pruned; nested arrays are kept as they are.
///
/// Emptiness is only judged for values inside an object or an array: a top-level
/// empty object or array is returned as-is, so callers that assign the result must
/// check it themselves.
pub fn prune(value: Value) -> Value {
	match value {
		Value::Object(map) => Value::Object(prune_object(map)),
		Value::Array(items) => Value::Array(prune_array(items)),
		other => other,
	}
}

/// Prune an object, returning the (possibly empty) remaining map.
pub fn prune_object(map: Map<String, Value>) -> Map<String, Value> {
	map.into_iter()
		.filter(|(key, _)| key != SYNTHETIC_ID_KEY)
		.filter_map(|(key, value)| prune_field(value).map(|value| (key, value)))
		.collect()
}

fn prune_field(value: Value) -> Option<Value> {
	match value {
		Value::Null => None,
		Value::String(s) if s.is_empty() => None,
		Value::Object(map) => {
			let map = prune_object(map);
			(!map.is_empty()).then_some(Value::Object(map))
		}
		Value::Array(items) => {
			let items = prune_array(items);
			(!items.is_empty()).then_some(Value::Array(items))
		}
		other => Some(other),
	}
}

fn prune_array(items: Vec<Value>) -> Vec<Value> {
	items
		.into_iter()
		.filter_map(|item| match item {
			Value::Object(map) => {
				let map = prune_object(map);
				(!map.is_empty()).then_some(Value::Object(map))
			}
			Value::Null => None,
			Value::String(s) if s.is_empty() => None,
			// Only rows are pruned, nested lists are kept as written
			other => Some(other),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[test]
	fn test_drops_empty_values_and_ids() {
		let pruned = prune(json!({
			"id": "row-1",
			"name": "web",
			"image": "",
			"env": [],
			"resources": { "limits": {}, "requests": { "cpu": null } },
			"labels": { "app": "web", "id": 3 },
		}));
		assert_eq!(pruned, json!({ "name": "web", "labels": { "app": "web" } }));
	}

	#[test]
	fn test_keeps_zero_and_false() {
		let pruned = prune(json!({
			"priority": 0,
			"stdin": false,
			"weight": 0.0,
			"nested": { "hostNetwork": false },
		}));
		assert_eq!(
			pruned,
			json!({
				"priority": 0,
				"stdin": false,
				"weight": 0.0,
				"nested": { "hostNetwork": false },
			})
		);
	}

	#[test]
	fn test_array_elements() {
		let pruned = prune(json!({
			"tolerations": [
				{ "id": "a" },
				{ "id": "b", "key": "dedicated", "operator": "Exists", "value": "" },
				null,
			],
			"args": ["--verbose", "", 0, false, null],
		}));
		assert_eq!(
			pruned,
			json!({
				"tolerations": [{ "key": "dedicated", "operator": "Exists" }],
				"args": ["--verbose", 0, false],
			})
		);
	}

	#[test]
	fn test_arrays_of_empty_rows_disappear() {
		let pruned = prune(json!({
			"volumes": [{ "id": 1, "name": "" }],
			"spec": { "hostAliases": [{ "ip": null }] },
		}));
		assert_eq!(pruned, json!({}));
	}

	#[test]
	fn test_nested_arrays_are_kept_verbatim() {
		let pruned = prune(json!({
			"matrix": [[{ "id": 1 }], [], ["a", null]],
			"d": [0, [[]], null],
		}));
		assert_eq!(
			pruned,
			json!({
				"matrix": [[{ "id": 1 }], [], ["a", null]],
				"d": [0, [[]]],
			})
		);
	}

	#[rstest]
	#[case::empty_array(json!([]), json!([]))]
	#[case::array_of_empty(json!([{}, null, ""]), json!([]))]
	#[case::empty_object(json!({}), json!({}))]
	#[case::empty_string(json!(""), json!(""))]
	#[case::null(json!(null), json!(null))]
	#[case::number(json!(0), json!(0))]
	fn test_top_level_values_are_returned(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(prune(input), expected);
	}

	#[rstest]
	#[case::flat(json!({ "a": "", "b": 1, "id": "x" }))]
	#[case::nested(json!({ "a": { "b": { "c": [{ "id": 1 }, { "d": [] }] } }, "e": false }))]
	#[case::array(json!([{ "a": null }, [1, null, ""], "x", { "b": [{}] }]))]
	#[case::nested_arrays(json!({ "matrix": [[{ "id": 1 }], []] }))]
	fn test_idempotent(#[case] input: Value) {
		let once = prune(input);
		let twice = prune(once.clone());
		assert_eq!(once, twice);
	}
}
