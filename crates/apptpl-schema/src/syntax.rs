//! # Syntax Checker
//!
//! Parses raw template text into a [`serde_json::Value`] tree.
//!
//! YAML is parsed with `serde_yaml` and then converted into the JSON data
//! model, which is the tagged variant every later stage walks. Template
//! documents only use the JSON-compatible subset of YAML, so the conversion
//! drops tags and stringifies numeric or boolean mapping keys. Anything
//! with no JSON equivalent (non-scalar keys, NaN, infinities) is reported
//! as a syntax error rather than silently rewritten.

use serde_json::{Number, Value};

use crate::error::SyntaxError;

/// Parse `raw` as a single YAML document.
///
/// Never panics on malformed input. On success the document is returned
/// as parsed: no defaults are filled in and scalars keep YAML's native
/// typing.
pub fn check_syntax(raw: &str) -> Result<Value, SyntaxError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|e| {
        let location = e.location();
        SyntaxError {
            reason: e.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    })?;

    yaml_to_json_value(&yaml).map_err(SyntaxError::new)
}

/// Convert a `serde_yaml::Value` into the equivalent `serde_json::Value`.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("unsupported number {n}: no JSON representation"))
            } else {
                Err(format!("unsupported number {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(format!(
                            "unsupported mapping key {}: keys must be scalars",
                            describe(other)
                        ))
                    }
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

fn describe(yaml: &serde_yaml::Value) -> &'static str {
    match yaml {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
