use serde_json::Value;

use crate::error::ValidatorError;
use crate::length::{validate_no_control_characters, validate_string_length};

const MAX_DEPTH: usize = 10;
const MAX_ELEMENT_COUNT: usize = 1000;

/// Walks an arbitrary JSON input value (an object argument or a variable
/// value) and rejects it if it nests more than 10 levels deep, contains
/// more than 1000 total array/object elements, or contains a string that
/// fails the ordinary string checks.
pub fn validate_input_shape(value: &Value, name: &str) -> Result<(), ValidatorError> {
    let mut element_count = 0usize;
    walk(value, name, 0, &mut element_count)
}

fn walk(value: &Value, name: &str, depth: usize, element_count: &mut usize) -> Result<(), ValidatorError> {
    if depth > MAX_DEPTH {
        return Err(ValidatorError::InputTooDeep {
            name: name.to_string(),
            depth,
        });
    }
    match value {
        Value::String(s) => {
            validate_string_length(s, name)?;
            validate_no_control_characters(s, name)
        }
        Value::Array(items) => {
            *element_count += items.len();
            if *element_count > MAX_ELEMENT_COUNT {
                return Err(ValidatorError::InputTooLarge {
                    name: name.to_string(),
                    count: *element_count,
                });
            }
            for item in items {
                walk(item, name, depth + 1, element_count)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            *element_count += map.len();
            if *element_count > MAX_ELEMENT_COUNT {
                return Err(ValidatorError::InputTooLarge {
                    name: name.to_string(),
                    count: *element_count,
                });
            }
            for (key, item) in map {
                validate_no_control_characters(key, name)?;
                walk(item, name, depth + 1, element_count)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_shallow_small_input() {
        assert!(validate_input_shape(&json!({"a": 1, "b": [1, 2, 3]}), "filter").is_ok());
    }

    #[test]
    fn rejects_input_nested_past_ten_levels() {
        let mut value = json!("leaf");
        for _ in 0..12 {
            value = json!([value]);
        }
        let err = validate_input_shape(&value, "filter").unwrap_err();
        assert!(matches!(err, ValidatorError::InputTooDeep { .. }));
    }

    #[test]
    fn rejects_input_with_too_many_elements() {
        let items: Vec<Value> = (0..1001).map(Value::from).collect();
        let err = validate_input_shape(&json!(items), "filter").unwrap_err();
        assert!(matches!(err, ValidatorError::InputTooLarge { .. }));
    }

    #[test]
    fn rejects_control_characters_in_nested_strings() {
        let value = json!({"note": "bad\u{0007}value"});
        let err = validate_input_shape(&value, "filter").unwrap_err();
        assert!(matches!(err, ValidatorError::ControlCharacters { .. }));
    }
}
