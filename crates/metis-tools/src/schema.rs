//! Schema - argument validation against a tool's declared parameter schema
//!
//! Model-produced arguments are free-form JSON; before a tool runs they are
//! checked against the declared schema so handlers never see inputs missing
//! required fields or carrying mistyped values. Only the subset of JSON
//! Schema the tool definitions actually use is enforced: required keys and
//! primitive `type` tags on properties.

use crate::error::{Error, Result};
use serde_json::Value;

/// Validate `args` against a declared parameter `schema`.
///
/// # Errors
/// Returns `Error::InvalidInput` when the arguments are not an object, a
/// required property is missing, or a property's JSON type does not match
/// the declared type.
pub fn validate_arguments(schema: &Value, args: &Value) -> Result<()> {
    if !args.is_object() {
        return Err(Error::InvalidInput(
            "arguments must be a JSON object".to_string(),
        ));
    }

    let Some(schema_obj) = schema.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema_obj.get("required").and_then(|r| r.as_array()) {
        for key in required.iter().filter_map(|k| k.as_str()) {
            if args.get(key).is_none() {
                return Err(Error::InvalidInput(format!(
                    "missing required argument '{key}'"
                )));
            }
        }
    }

    if let Some(properties) = schema_obj.get("properties").and_then(|p| p.as_object()) {
        for (key, prop_schema) in properties {
            let Some(value) = args.get(key) else {
                continue;
            };
            let Some(expected) = prop_schema.get("type").and_then(|t| t.as_str()) else {
                continue;
            };
            if !type_matches(expected, value) {
                return Err(Error::InvalidInput(format!(
                    "argument '{key}' should be of type {expected}"
                )));
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type tags are not enforced
        _ => true,
    }
}
