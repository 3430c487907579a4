//! # Structural Validation
//!
//! Recursive check of a parsed document against a [`SchemaNode`].
//!
//! ## First Error Wins
//!
//! Validation stops at the first mismatch and reports only that one.
//! Callers that expect every structural problem collected in a single pass
//! will not get it here: fix the reported field, re-run, repeat. Fields are
//! visited in schema declaration order, so the reported error is stable for
//! a given document.

use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::SchemaNode;

const ROOT_PATH: &str = "(root)";

/// Check `parsed` against `schema`.
///
/// Required fields must be present, present fields must have their declared
/// type, and keys the schema does not declare are ignored. `null` never
/// matches a declared type.
pub fn check_schema(parsed: &Value, schema: &SchemaNode) -> Result<(), SchemaError> {
    check_node(parsed, schema, ROOT_PATH)
}

fn check_node(value: &Value, node: &SchemaNode, path: &str) -> Result<(), SchemaError> {
    match (node, value) {
        (SchemaNode::Object(fields), Value::Object(map)) => {
            for field in fields {
                let child_path = join(path, field.name);
                match map.get(field.name) {
                    Some(child) => check_node(child, &field.node, &child_path)?,
                    None if field.required => {
                        return Err(SchemaError::MissingField { path: child_path })
                    }
                    None => {}
                }
            }
            Ok(())
        }
        (SchemaNode::Array(element), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_node(item, element, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        (SchemaNode::String, Value::String(_))
        | (SchemaNode::Boolean, Value::Bool(_))
        | (SchemaNode::Number, Value::Number(_)) => Ok(()),
        (expected, actual) => Err(SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: expected.type_name(),
            actual: value_type_name(actual),
        }),
    }
}

fn join(parent: &str, field: &str) -> String {
    if parent == ROOT_PATH {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Name of the JSON type of `value`, as used in schema error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
