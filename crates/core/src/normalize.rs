//! Variant normalization for GraphQL variables.
//!
//! Storefront clients build bundle inputs where every component carries an
//! `optionSelections` array, often empty. The Admin API rejects an explicit
//! empty (or null) `optionSelections` but accepts the field being absent, so
//! those entries are stripped before the variables are forwarded.

use serde_json::{Map, Value};

const OPTION_SELECTIONS: &str = "optionSelections";

/// Normalize GraphQL variables before forwarding them upstream.
///
/// If `variables.input.components` is an array, each object element whose
/// `optionSelections` is absent, `null`, or an empty array has that key
/// removed. Non-empty selections, non-object elements, and every other part
/// of `variables` are left untouched.
///
/// The function is pure: the same input always produces the same output.
#[must_use]
pub fn normalize_variables(mut variables: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Array(components)) = variables
        .get_mut("input")
        .and_then(|input| input.get_mut("components"))
    {
        for component in components.iter_mut() {
            if let Value::Object(fields) = component
                && !has_selections(fields)
            {
                fields.remove(OPTION_SELECTIONS);
            }
        }
    }

    variables
}

/// Whether a component carries option selections worth forwarding.
fn has_selections(fields: &Map<String, Value>) -> bool {
    match fields.get(OPTION_SELECTIONS) {
        None | Some(Value::Null) => false,
        Some(Value::Array(selections)) => !selections.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_strips_empty_and_absent_selections() {
        let variables = object(json!({
            "input": {
                "components": [
                    {"id": 1},
                    {"id": 2, "optionSelections": ["red"]},
                    {"id": 3, "optionSelections": []},
                    {"id": 4, "optionSelections": null}
                ]
            }
        }));

        let normalized = normalize_variables(variables);

        assert_eq!(
            Value::Object(normalized),
            json!({
                "input": {
                    "components": [
                        {"id": 1},
                        {"id": 2, "optionSelections": ["red"]},
                        {"id": 3},
                        {"id": 4}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_leaves_other_variables_untouched() {
        let variables = object(json!({
            "first": 10,
            "input": {"title": "Bundle", "optionSelections": []}
        }));

        let normalized = normalize_variables(variables.clone());
        assert_eq!(normalized, variables);
    }

    #[test]
    fn test_components_not_an_array() {
        let variables = object(json!({"input": {"components": {"id": 1, "optionSelections": []}}}));
        let normalized = normalize_variables(variables.clone());
        assert_eq!(normalized, variables);
    }

    #[test]
    fn test_non_object_components_pass_through() {
        let variables = object(json!({"input": {"components": ["gid://shopify/Product/1", 7, null]}}));
        let normalized = normalize_variables(variables.clone());
        assert_eq!(normalized, variables);
    }

    #[test]
    fn test_input_not_an_object() {
        let variables = object(json!({"input": "components"}));
        let normalized = normalize_variables(variables.clone());
        assert_eq!(normalized, variables);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let variables = object(json!({
            "input": {
                "components": [
                    {"id": 1, "quantity": 2},
                    {"id": 2, "optionSelections": [{"name": "Color", "value": "red"}]},
                    {"id": 3, "optionSelections": []}
                ]
            }
        }));

        let first = serde_json::to_vec(&normalize_variables(variables.clone())).unwrap();
        let second = serde_json::to_vec(&normalize_variables(variables)).unwrap();
        assert_eq!(first, second);
    }
}
