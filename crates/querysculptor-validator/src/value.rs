use serde_json::Value;

use crate::coercion::{coerce_to_boolean, coerce_to_float, coerce_to_integer};
use crate::error::ValidatorError;

/// Checks `value` against a GraphQL type string, unwrapping `!` and `[...]`
/// wrapping first. Scalar checks use the same coercion rules the rest of
/// the validator uses (`coerce_to_integer` etc.); custom scalars, enums,
/// and input object types are accepted permissively since validating their
/// shape needs the full schema, not just a type string (see
/// `validate_required_arguments` for the schema-aware counterpart).
pub fn validate_value_against_type(value: &Value, type_string: &str, name: &str) -> Result<(), ValidatorError> {
    let (non_null, rest) = match type_string.strip_suffix('!') {
        Some(rest) => (true, rest),
        None => (false, type_string),
    };

    if value.is_null() {
        return if non_null {
            Err(ValidatorError::ValueShapeMismatch {
                name: name.to_string(),
                type_string: type_string.to_string(),
                reason: "null is not allowed for a non-null type".to_string(),
            })
        } else {
            Ok(())
        };
    }

    if let Some(inner) = rest.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let Value::Array(items) = value else {
            return Err(ValidatorError::ValueShapeMismatch {
                name: name.to_string(),
                type_string: type_string.to_string(),
                reason: "expected a list".to_string(),
            });
        };
        for (i, item) in items.iter().enumerate() {
            validate_value_against_type(item, inner, &format!("{name}[{i}]"))?;
        }
        return Ok(());
    }

    match rest {
        "String" => match value {
            Value::String(_) => Ok(()),
            _ => shape_mismatch(name, type_string, "expected a string"),
        },
        "ID" => match value {
            Value::String(_) | Value::Number(_) => Ok(()),
            _ => shape_mismatch(name, type_string, "expected a string or number"),
        },
        "Int" => {
            if coerce_to_integer(value).is_some() {
                Ok(())
            } else {
                shape_mismatch(name, type_string, "expected an integer")
            }
        }
        "Float" => {
            if coerce_to_float(value).is_some() {
                Ok(())
            } else {
                shape_mismatch(name, type_string, "expected a float")
            }
        }
        "Boolean" => {
            if coerce_to_boolean(value).is_some() {
                Ok(())
            } else {
                shape_mismatch(name, type_string, "expected a boolean")
            }
        }
        _ => Ok(()),
    }
}

fn shape_mismatch(name: &str, type_string: &str, reason: &str) -> Result<(), ValidatorError> {
    Err(ValidatorError::ValueShapeMismatch {
        name: name.to_string(),
        type_string: type_string.to_string(),
        reason: reason.to_string(),
    })
}

/// Prints a JSON value using GraphQL value-literal syntax. `$`-prefixed
/// strings print verbatim (a variable reference); everything else follows
/// the ordinary GraphQL literal rules.
pub fn serialize_graphql_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.starts_with('$') => s.clone(),
        Value::String(s) => quote_string(s),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => {
            let rendered = items.iter().map(serialize_graphql_value).collect::<Vec<_>>().join(", ");
            format!("[{rendered}]")
        }
        Value::Object(map) => {
            let rendered = map
                .iter()
                .map(|(k, v)| format!("{k}: {}", serialize_graphql_value(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{rendered}}}")
        }
    }
}

fn quote_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{escaped}\"")
}
